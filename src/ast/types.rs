//! Type system definitions for the AST.
//!
//! Every type keyword of the language names exactly one `Type`. Only `int`,
//! `float` and `str` have a storage representation in generated code; the
//! others are accepted by the front end and rejected during lowering.

use std::fmt::Display;

use super::expressions::LiteralValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Str,
    List,
    Dict,
    Bool,
}

impl Type {
    pub fn of_literal(literal: &LiteralValue) -> Type {
        match literal {
            LiteralValue::Int(_) => Type::Int,
            LiteralValue::Float(_) => Type::Float,
            LiteralValue::Str(_) => Type::Str,
        }
    }

    /// Whether `+ - * /` are defined on values of this type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Str => write!(f, "str"),
            Type::List => write!(f, "list"),
            Type::Dict => write!(f, "dict"),
            Type::Bool => write!(f, "bool"),
        }
    }
}
