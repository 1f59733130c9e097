//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a program. It uses a Pratt parser for expressions with proper
//! operator precedence and handles:
//!
//! - Statement parsing (variable declarations, assignments, print)
//! - Expression parsing (arithmetic, grouping, literals, list literals)
//! - Declared-before-use and initialized-before-read checks
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
