use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

use super::ast::Expr;

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Binary(BinaryExpr),
    Literal(LiteralValue),
    Symbol(String),
    List(Vec<Expr>),
}

/// Binary Expression
/// Represents an arithmetic operation between two expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub operator: BinaryOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOperator> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Minus => Some(BinaryOperator::Sub),
            TokenKind::Multiply => Some(BinaryOperator::Mul),
            TokenKind::Divide => Some(BinaryOperator::Div),
            _ => None,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Sub => write!(f, "-"),
            BinaryOperator::Mul => write!(f, "*"),
            BinaryOperator::Div => write!(f, "/"),
        }
    }
}

/// Literal payloads. String values hold the decoded bytes, without quotes
/// or a terminator.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i32),
    Float(f64),
    Str(Vec<u8>),
}
