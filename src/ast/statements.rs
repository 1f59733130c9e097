use crate::Span;

use super::{ast::Expr, types::Type};

/// `name: type = value;` or `name: type;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub declared_type: Type,
    pub assigned_value: Option<Expr>,
    pub span: Span,
}

/// `name = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub identifier: String,
    pub value: Expr,
    pub span: Span,
}

/// `print(value);`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub value: Expr,
    pub span: Span,
}
