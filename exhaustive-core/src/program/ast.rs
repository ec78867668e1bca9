//! Syntax tree of a resolved program.
//!
//! This is the shape the external front end hands over: declarations,
//! free-floating comments with positions, and expressions that already carry
//! their resolved type and constant value.

use serde::{Deserialize, Serialize};

use super::types::{ConstValue, TypeRef};

/// A 1-based line/column source position.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Start and end position of a node (end is inclusive of the last line).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span covering `line` from `start_col` to `end_col`.
    pub fn line(line: u32, start_col: u32, end_col: u32) -> Self {
        Self::new(Position::new(line, start_col), Position::new(line, end_col))
    }

    /// Span covering whole lines `first..=last`.
    pub fn lines(first: u32, last: u32) -> Self {
        Self::new(Position::new(first, 1), Position::new(last, 1))
    }
}

/// The whole loaded program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    pub packages: Vec<Package>,
}

/// A compilation unit: every file of one package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Import path, also the qualifier used by [`super::NamedType`]
    pub path: String,
    /// Whether the package was named on the command line (as opposed to
    /// being loaded only as a dependency)
    #[serde(default = "default_initial")]
    pub initial: bool,
    /// Errors reported by the front end while parsing or type checking
    #[serde(default)]
    pub diagnostics: Vec<String>,
    #[serde(default)]
    pub files: Vec<SourceFile>,
}

fn default_initial() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// File path as reported by the front end
    pub name: String,
    /// All comments of the file, in source order
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub decls: Vec<Decl>,
}

/// A single `//` or `/* */` comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

/// A top-level declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decl {
    Type(TypeDecl),
    Const(ConstDecl),
    Func(FuncDecl),
    Var(VarDecl),
    Other { span: Span },
}

/// A `type` declaration; grouped blocks carry several specs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub span: Span,
    pub specs: Vec<TypeSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstDecl {
    pub span: Span,
    pub specs: Vec<ConstSpec>,
}

/// One declared constant with its resolved type and value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstSpec {
    pub name: String,
    pub span: Span,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub value: ConstValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    pub span: Span,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

/// A package-level `var` declaration. Only the initializer expressions are
/// kept; function literals among them may hold switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarDecl {
    pub span: Span,
    #[serde(default)]
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    Switch(SwitchStmt),
    Block {
        #[serde(default)]
        body: Vec<Stmt>,
    },
    Expr {
        expr: Expr,
    },
    Other {
        span: Span,
    },
}

/// An expression switch: `switch init; tag { case ...: ... default: ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchStmt {
    pub span: Span,
    #[serde(default)]
    pub init: Option<Box<Stmt>>,
    #[serde(default)]
    pub tag: Option<Expr>,
    #[serde(default)]
    pub clauses: Vec<CaseClause>,
}

/// A `case` clause. An empty expression list is the `default` clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseClause {
    pub span: Span,
    #[serde(default)]
    pub list: Vec<Expr>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

impl CaseClause {
    pub fn is_catch_all(&self) -> bool {
        self.list.is_empty()
    }
}

/// Kind of a literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// An expression annotated with its resolved type and constant value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// A bare name: `Monday`, `day`
    Ident {
        name: String,
        #[serde(default, rename = "type")]
        ty: Option<TypeRef>,
        #[serde(default)]
        value: Option<ConstValue>,
    },
    /// A qualified name: `example.Monday`
    Selector {
        qualifier: String,
        name: String,
        #[serde(default, rename = "type")]
        ty: Option<TypeRef>,
        #[serde(default)]
        value: Option<ConstValue>,
    },
    Paren {
        inner: Box<Expr>,
    },
    Lit {
        lit: LitKind,
        raw: String,
        #[serde(default, rename = "type")]
        ty: Option<TypeRef>,
    },
    FuncLit {
        #[serde(default)]
        body: Vec<Stmt>,
    },
    /// Calls, conversions, operators; only the resolution matters here
    Other {
        #[serde(default, rename = "type")]
        ty: Option<TypeRef>,
        #[serde(default)]
        value: Option<ConstValue>,
        #[serde(default)]
        children: Vec<Expr>,
    },
}

impl Expr {
    /// Strips any number of enclosing parentheses.
    pub fn unparen(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren { inner } = expr {
            expr = inner;
        }
        expr
    }

    /// Statically resolved type, if the front end recorded one.
    pub fn ty(&self) -> Option<&TypeRef> {
        match self {
            Expr::Ident { ty, .. }
            | Expr::Selector { ty, .. }
            | Expr::Lit { ty, .. }
            | Expr::Other { ty, .. } => ty.as_ref(),
            Expr::Paren { inner } => inner.ty(),
            Expr::FuncLit { .. } => None,
        }
    }

    /// Resolved constant value, if the expression is a constant.
    ///
    /// Literals are evaluated by [`super::literal::literal_value`], not here.
    pub fn value(&self) -> Option<&ConstValue> {
        match self {
            Expr::Ident { value, .. } | Expr::Selector { value, .. } | Expr::Other { value, .. } => {
                value.as_ref()
            }
            Expr::Paren { inner } => inner.value(),
            Expr::Lit { .. } | Expr::FuncLit { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparen_strips_nested_parens() {
        let expr = Expr::Paren {
            inner: Box::new(Expr::Paren {
                inner: Box::new(Expr::Ident {
                    name: "Monday".into(),
                    ty: None,
                    value: Some(ConstValue::Int(0)),
                }),
            }),
        };
        assert!(matches!(expr.unparen(), Expr::Ident { name, .. } if name == "Monday"));
        assert_eq!(expr.value(), Some(&ConstValue::Int(0)));
    }

    #[test]
    fn test_default_clause_is_catch_all() {
        let clause = CaseClause {
            span: Span::default(),
            list: Vec::new(),
            body: Vec::new(),
        };
        assert!(clause.is_catch_all());
    }

    #[test]
    fn test_deserialize_switch_stmt() {
        let json = r#"{
            "kind": "switch",
            "span": {"start": {"line": 3, "column": 2}, "end": {"line": 6, "column": 2}},
            "tag": {"kind": "ident", "name": "d", "type": "example.Day"},
            "clauses": [
                {"span": {"start": {"line": 4, "column": 2}, "end": {"line": 4, "column": 14}},
                 "list": [{"kind": "lit", "lit": "int", "raw": "0"}]},
                {"span": {"start": {"line": 5, "column": 2}, "end": {"line": 5, "column": 10}}}
            ]
        }"#;
        let stmt: Stmt = serde_json::from_str(json).unwrap();
        let Stmt::Switch(switch) = stmt else {
            panic!("expected switch");
        };
        assert_eq!(switch.span.start, Position::new(3, 2));
        assert!(switch.init.is_none());
        assert_eq!(switch.clauses.len(), 2);
        assert!(!switch.clauses[0].is_catch_all());
        assert!(switch.clauses[1].is_catch_all());
        let tag_ty = switch.tag.as_ref().and_then(Expr::ty).and_then(TypeRef::as_named);
        assert_eq!(tag_ty.map(|t| t.name.as_str()), Some("Day"));
    }

    #[test]
    fn test_package_defaults() {
        let pkg: Package = serde_json::from_str(r#"{"path": "example"}"#).unwrap();
        assert!(pkg.initial);
        assert!(pkg.diagnostics.is_empty());
        assert!(pkg.files.is_empty());
    }

    #[test]
    fn test_deserialize_var_decl_with_func_literal() {
        let json = r#"{
            "kind": "var",
            "span": {"start": {"line": 8, "column": 1}, "end": {"line": 12, "column": 2}},
            "values": [{"kind": "func_lit", "body": [{"kind": "other", "span":
                {"start": {"line": 9, "column": 2}, "end": {"line": 9, "column": 10}}}]}]
        }"#;
        let decl: Decl = serde_json::from_str(json).unwrap();
        let Decl::Var(var) = decl else {
            panic!("expected var");
        };
        assert!(matches!(&var.values[..], [Expr::FuncLit { body }] if body.len() == 1));

        let bare: Decl = serde_json::from_str(
            r#"{"kind": "var", "span": {"start": {"line": 1, "column": 1}, "end": {"line": 1, "column": 9}}}"#,
        )
        .unwrap();
        assert!(matches!(bare, Decl::Var(VarDecl { values, .. }) if values.is_empty()));
    }
}
