//! Depth-first syntax tree traversal in the style of `syn::visit`.
//!
//! Implementors override the `visit_*` hooks they care about and call the
//! matching `walk_*` function to keep descending.

use super::ast::{CaseClause, Decl, Expr, SourceFile, Stmt, SwitchStmt};

pub trait Visit<'ast> {
    fn visit_file(&mut self, file: &'ast SourceFile) {
        walk_file(self, file);
    }

    fn visit_decl(&mut self, decl: &'ast Decl) {
        walk_decl(self, decl);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_switch(&mut self, switch: &'ast SwitchStmt) {
        walk_switch(self, switch);
    }

    fn visit_clause(&mut self, clause: &'ast CaseClause) {
        walk_clause(self, clause);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_file<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, file: &'ast SourceFile) {
    for decl in &file.decls {
        v.visit_decl(decl);
    }
}

pub fn walk_decl<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, decl: &'ast Decl) {
    match decl {
        Decl::Func(func) => {
            for stmt in &func.body {
                v.visit_stmt(stmt);
            }
        }
        Decl::Var(var) => {
            for expr in &var.values {
                v.visit_expr(expr);
            }
        }
        Decl::Type(_) | Decl::Const(_) | Decl::Other { .. } => {}
    }
}

pub fn walk_stmt<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, stmt: &'ast Stmt) {
    match stmt {
        Stmt::Switch(switch) => v.visit_switch(switch),
        Stmt::Block { body } => {
            for stmt in body {
                v.visit_stmt(stmt);
            }
        }
        Stmt::Expr { expr } => v.visit_expr(expr),
        Stmt::Other { .. } => {}
    }
}

/// Walks init statement, tag, then every clause in source order.
pub fn walk_switch<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, switch: &'ast SwitchStmt) {
    if let Some(init) = &switch.init {
        v.visit_stmt(init);
    }
    if let Some(tag) = &switch.tag {
        v.visit_expr(tag);
    }
    for clause in &switch.clauses {
        v.visit_clause(clause);
    }
}

pub fn walk_clause<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, clause: &'ast CaseClause) {
    for expr in &clause.list {
        v.visit_expr(expr);
    }
    for stmt in &clause.body {
        v.visit_stmt(stmt);
    }
}

pub fn walk_expr<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, expr: &'ast Expr) {
    match expr {
        Expr::Paren { inner } => v.visit_expr(inner),
        Expr::FuncLit { body } => {
            for stmt in body {
                v.visit_stmt(stmt);
            }
        }
        Expr::Other { children, .. } => {
            for child in children {
                v.visit_expr(child);
            }
        }
        Expr::Ident { .. } | Expr::Selector { .. } | Expr::Lit { .. } => {}
    }
}
