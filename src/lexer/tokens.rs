use std::fmt::Display;

use crate::{ast::types::Type, Span};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,

    // Literals
    Integer,
    Float,
    String,

    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,

    // Grouping
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Punctuation
    Colon,
    Semicolon,
    Comma,
    Equals,
    Dot,

    // Type keywords
    TypeInt,
    TypeFloat,
    TypeStr,
    TypeList,
    TypeDict,
    TypeBool,

    Print,
    Identifier,
}

impl TokenKind {
    /// Maps a type keyword to the type it names.
    pub fn as_type(&self) -> Option<Type> {
        match self {
            TokenKind::TypeInt => Some(Type::Int),
            TokenKind::TypeFloat => Some(Type::Float),
            TokenKind::TypeStr => Some(Type::Str),
            TokenKind::TypeList => Some(Type::List),
            TokenKind::TypeDict => Some(Type::Dict),
            TokenKind::TypeBool => Some(Type::Bool),
            _ => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text of the token, quotes included for strings.
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String | TokenKind::Identifier | TokenKind::Integer | TokenKind::Float => {
                write!(f, "{} ({})", self.kind, self.value)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}

impl Token {
    /// Offset of the first byte of the token in the source.
    pub fn offset(&self) -> u32 {
        self.span.start.offset
    }

    /// Line the token starts on.
    pub fn line(&self) -> u32 {
        self.span.start.line
    }
}
