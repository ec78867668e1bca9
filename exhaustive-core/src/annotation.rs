//! Annotation resolution: is a named type opted into exhaustiveness checks?
//!
//! A type is an exhaustive enum when the marker comment `//exhaustive-enum`
//! is attached to its declaration:
//!
//! ```text
//! //exhaustive-enum
//! type Day int              // marker applies to Day
//!
//! //exhaustive-enum         // ignored: block declares several types
//! type (
//!     //exhaustive-enum
//!     Weekday int           // marker applies to Weekday only
//!     Hour    int
//! )
//! ```
//!
//! Lookup re-inspects the declaring package's syntax on every query. Results
//! are a pure function of the (immutable) program, so [`AnnotationResolver::memoized`]
//! may cache them by type identity without changing any answer.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::trace;

use crate::program::{Comment, Decl, NamedType, Position, ProgramGraph, SourceFile, Span};

/// The marker comment, matched exactly.
pub const EXHAUSTIVE_MARKER: &str = "//exhaustive-enum";

/// Comments on consecutive lines, treated as one unit for attachment.
///
/// A group that starts on the line where a declaration ends, after its last
/// token, is a trailing group. It only ever holds comments of that line and
/// belongs to the node it trails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup<'a> {
    pub comments: Vec<&'a Comment>,
    pub trailing: bool,
}

impl CommentGroup<'_> {
    fn span(&self) -> Span {
        let first = self.comments.first().map(|c| c.span).unwrap_or_default();
        let last = self.comments.last().map(|c| c.span).unwrap_or_default();
        Span::new(first.start, last.end)
    }

    /// Whether the group is a leading comment directly above `node` or a
    /// trailing comment on its last line.
    pub fn is_attached_to(&self, node: Span) -> bool {
        let span = self.span();
        if self.trailing {
            return span.start.line == node.end.line && span.start.column > node.end.column;
        }
        span.end.line + 1 == node.start.line
    }

    pub fn has_marker(&self) -> bool {
        self.comments
            .iter()
            .any(|c| c.text.trim_end_matches('\r') == EXHAUSTIVE_MARKER)
    }
}

/// End positions of every declaration and spec in `file`.
pub fn node_ends(file: &SourceFile) -> Vec<Position> {
    let mut ends = Vec::new();
    for decl in &file.decls {
        match decl {
            Decl::Type(decl) => {
                ends.push(decl.span.end);
                ends.extend(decl.specs.iter().map(|s| s.span.end));
            }
            Decl::Const(decl) => {
                ends.push(decl.span.end);
                ends.extend(decl.specs.iter().map(|s| s.span.end));
            }
            Decl::Func(func) => ends.push(func.span.end),
            Decl::Var(var) => ends.push(var.span.end),
            Decl::Other { span } => ends.push(span.end),
        }
    }
    ends
}

/// Splits a file's comments into groups of consecutive lines. A comment that
/// trails a node in `node_ends` starts its own group, and the group closes at
/// the end of that line.
pub fn group_comments<'a>(
    comments: &'a [Comment],
    node_ends: &[Position],
) -> Vec<CommentGroup<'a>> {
    let trails = |c: &Comment| {
        node_ends
            .iter()
            .any(|end| end.line == c.span.start.line && end.column < c.span.start.column)
    };

    let mut groups: Vec<CommentGroup<'a>> = Vec::new();
    for comment in comments {
        let start = comment.span.start.line;
        let joins = |group: &CommentGroup<'_>| {
            let end = group.span().end.line;
            if group.trailing {
                end == start
            } else {
                end + 1 >= start && !trails(comment)
            }
        };
        match groups.last_mut() {
            Some(group) if joins(&*group) => group.comments.push(comment),
            _ => groups.push(CommentGroup {
                comments: vec![comment],
                trailing: trails(comment),
            }),
        }
    }
    groups
}

/// Decides whether named types carry the exhaustive marker.
pub struct AnnotationResolver<'g, G: ProgramGraph + ?Sized> {
    graph: &'g G,
    memo: Option<Mutex<HashMap<NamedType, bool>>>,
}

impl<'g, G: ProgramGraph + ?Sized> AnnotationResolver<'g, G> {
    /// Uncached resolver: every query re-reads the declaration.
    pub fn new(graph: &'g G) -> Self {
        Self { graph, memo: None }
    }

    /// Resolver that remembers answers per type.
    pub fn memoized(graph: &'g G) -> Self {
        Self {
            graph,
            memo: Some(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_exhaustive(&self, ty: &NamedType) -> bool {
        let Some(memo) = &self.memo else {
            return self.lookup(ty);
        };

        if let Some(&known) = memo.lock().unwrap_or_else(|e| e.into_inner()).get(ty) {
            return known;
        }
        // Computed outside the lock; concurrent misses agree on the answer.
        let answer = self.lookup(ty);
        memo.lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(ty.clone(), answer);
        answer
    }

    fn lookup(&self, ty: &NamedType) -> bool {
        let Some(package) = self.graph.package(&ty.package) else {
            trace!(ty = %ty, "declaring package not loaded");
            return false;
        };

        for file in &package.files {
            if let Some(marked) = marker_in_file(file, &ty.name) {
                trace!(ty = %ty, file = %file.name, marked, "resolved annotation");
                return marked;
            }
        }
        false
    }
}

/// Looks for the declaration of `name` in `file`. Returns `None` when the
/// file does not declare it, otherwise whether the marker applies.
fn marker_in_file(file: &SourceFile, name: &str) -> Option<bool> {
    let mut groups = None;

    for decl in &file.decls {
        let Decl::Type(decl) = decl else {
            continue;
        };
        let Some(spec) = decl.specs.iter().find(|s| s.name == name) else {
            continue;
        };

        let groups =
            groups.get_or_insert_with(|| group_comments(&file.comments, &node_ends(file)));
        let marked = if decl.specs.len() == 1 {
            groups.iter().any(|g| {
                g.has_marker() && (g.is_attached_to(decl.span) || g.is_attached_to(spec.span))
            })
        } else {
            // A block header comment never reaches the members of a group,
            // even when it is also adjacent to the first member.
            groups.iter().any(|g| {
                g.has_marker() && g.is_attached_to(spec.span) && !g.is_attached_to(decl.span)
            })
        };
        return Some(marked);
    }

    None
}
