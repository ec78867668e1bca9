//! The program graph: parsed, type-checked source handed over by a front end.
//!
//! Analysis never parses source itself. It borrows a [`ProgramGraph`] for the
//! duration of one run and asks it for packages, files, declarations and the
//! resolved type/value of expressions.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐   ┌────────────────┐   ┌────────────────┐
//! │    load.rs     │──▶│     ast.rs     │◀──│    visit.rs    │
//! │  snapshots on  │   │  Program tree  │   │  depth-first   │
//! │  disk → graph  │   │  + types.rs    │   │   traversal    │
//! └────────────────┘   └────────────────┘   └────────────────┘
//! ```

pub mod ast;
pub mod literal;
pub mod load;
pub mod types;
pub mod visit;

pub use ast::{
    CaseClause, Comment, ConstDecl, ConstSpec, Decl, Expr, FuncDecl, LitKind, Package,
    Position, Program, SourceFile, Span, Stmt, SwitchStmt, TypeDecl, TypeSpec, VarDecl,
};
pub use literal::literal_value;
pub use load::{gather_snapshot_files, load_program, load_snapshot, SNAPSHOT_SUFFIX};
pub use types::{ConstValue, NamedType, TypeRef};
pub use visit::Visit;

/// Read-only access to a resolved program.
///
/// Implementations must be immutable for the lifetime of a run; analysis may
/// query them from several threads.
pub trait ProgramGraph: Sync {
    /// All loaded packages, in load order.
    fn packages(&self) -> &[Package];

    /// The package with the given import path.
    fn package(&self, path: &str) -> Option<&Package> {
        self.packages().iter().find(|p| p.path == path)
    }

    /// Packages that were requested for analysis.
    fn initial_packages(&self) -> Vec<&Package> {
        self.packages().iter().filter(|p| p.initial).collect()
    }

    /// Statically resolved type of an expression.
    fn type_of<'a>(&self, expr: &'a Expr) -> Option<&'a TypeRef> {
        expr.ty()
    }

    /// Constant value of an expression, if it has one.
    fn constant_value<'a>(&self, expr: &'a Expr) -> Option<&'a ConstValue> {
        expr.value()
    }
}

impl ProgramGraph for Program {
    fn packages(&self) -> &[Package] {
        &self.packages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(path: &str, initial: bool) -> Package {
        Package {
            path: path.to_string(),
            initial,
            diagnostics: Vec::new(),
            files: Vec::new(),
        }
    }

    #[test]
    fn test_package_lookup() {
        let program = Program {
            packages: vec![package("example", true), package("fmt", false)],
        };
        assert!(program.package("fmt").is_some());
        assert!(program.package("os").is_none());
    }

    #[test]
    fn test_initial_packages_skip_dependencies() {
        let program = Program {
            packages: vec![package("example", true), package("fmt", false)],
        };
        let initial: Vec<_> = program
            .initial_packages()
            .into_iter()
            .map(|p| p.path.as_str())
            .collect();
        assert_eq!(initial, vec!["example"]);
    }
}
