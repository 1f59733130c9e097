use crate::Span;

use super::{
    expressions::ExprKind,
    statements::{AssignmentStmt, PrintStmt, VarDeclStmt},
    types::Type,
};

/// A parsed compilation unit: its statements in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

/// Statement kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    Print(PrintStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::Print(stmt) => &stmt.span,
        }
    }
}

/// Expression node.
///
/// `resolved_type` is empty after parsing and is filled in by the type checker,
/// which is the only mutation an AST sees after it is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub resolved_type: Option<Type>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            resolved_type: None,
        }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }
}
