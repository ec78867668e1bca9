//! Coverage computation for a single switch.
//!
//! Performance characteristics:
//! - Applicability: one annotation lookup per switch (memoizable)
//! - Coverage: O(|E| + |C|) where E = case expressions, C = type constants

use std::borrow::Cow;
use std::collections::HashSet;

use tracing::debug;

use super::switch_site::SwitchSite;
use crate::annotation::AnnotationResolver;
use crate::constset::{constants_of, Constant};
use crate::program::{literal_value, ConstValue, Expr, NamedType, ProgramGraph};

/// Why a switch did or did not produce missing constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// No named discriminant type, or the type is not an exhaustive enum
    NotApplicable,
    /// A `default` clause accepts everything else
    CatchAll,
    /// A case expression has no statically known value; coverage cannot be
    /// proven, so the switch is skipped
    Unresolved,
    /// Every constant of the type is matched
    Covered,
    /// These constants are never matched, in declaration order
    Missing(Vec<Constant>),
}

impl SwitchOutcome {
    pub fn into_missing(self) -> Vec<Constant> {
        match self {
            Self::Missing(missing) => missing,
            _ => Vec::new(),
        }
    }
}

/// Analyzes switches against the constant sets of exhaustive enums.
pub struct SwitchAnalyzer<'g, G: ProgramGraph + ?Sized> {
    graph: &'g G,
    resolver: AnnotationResolver<'g, G>,
}

impl<'g, G: ProgramGraph + ?Sized> SwitchAnalyzer<'g, G> {
    pub fn new(graph: &'g G, resolver: AnnotationResolver<'g, G>) -> Self {
        Self { graph, resolver }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Missing constants of `site`; empty when the switch is exhaustive or
    /// not subject to checking.
    pub fn analyze(&self, site: &SwitchSite<'_>) -> Vec<Constant> {
        self.classify(site).into_missing()
    }

    /// Full decision for `site`, used for statistics.
    pub fn classify(&self, site: &SwitchSite<'_>) -> SwitchOutcome {
        let Some(ty) = self.enum_type(site) else {
            return SwitchOutcome::NotApplicable;
        };

        let mut used: HashSet<Cow<'_, ConstValue>> = HashSet::new();
        for clause in site.clauses {
            if clause.is_catch_all() {
                debug!(file = site.file, line = site.position.line, ty = %ty, "catch-all clause");
                return SwitchOutcome::CatchAll;
            }
            for expr in &clause.list {
                match self.case_value(expr) {
                    Some(value) => {
                        used.insert(value);
                    }
                    None => {
                        debug!(
                            file = site.file,
                            line = site.position.line,
                            ty = %ty,
                            "unresolved case expression, skipping switch"
                        );
                        return SwitchOutcome::Unresolved;
                    }
                }
            }
        }

        let missing: Vec<Constant> = constants_of(self.graph, ty)
            .into_iter()
            .filter(|c| !used.contains(&c.value))
            .collect();

        if missing.is_empty() {
            SwitchOutcome::Covered
        } else {
            SwitchOutcome::Missing(missing)
        }
    }

    fn enum_type<'s>(&self, site: &SwitchSite<'s>) -> Option<&'s NamedType> {
        let ty = site.discriminant?.as_named()?;
        self.resolver.is_exhaustive(ty).then_some(ty)
    }

    /// Value matched by one case expression, if statically known.
    fn case_value<'e>(&self, expr: &'e Expr) -> Option<Cow<'e, ConstValue>> {
        match expr.unparen() {
            e @ (Expr::Ident { .. } | Expr::Selector { .. }) => {
                self.graph.constant_value(e).map(Cow::Borrowed)
            }
            Expr::Lit { lit, raw, .. } => literal_value(*lit, raw).map(Cow::Owned),
            _ => None,
        }
    }
}
