//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and parsing functions.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Variable declarations are recorded in the scope handed to [`parse`] so
//! that reads of undeclared or unassigned variables are rejected here.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    type_checker::environment::Environment,
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
pub struct Parser<'s> {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Variables declared so far in this compilation unit
    scope: &'s mut Environment,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl<'s> Parser<'s> {
    /// Creates a new Parser instance.
    ///
    /// An `EOF` token is appended when the stream does not already end with one.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>, scope: &'s mut Environment) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position::new(0, 1, file));
            let span = Span {
                start: end.clone(),
                end,
            };
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::new(), span));
        }

        Parser {
            tokens,
            pos: 0,
            scope,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// The current token's text for diagnostics.
    pub fn current_lexeme(&self) -> String {
        match self.current_token_kind() {
            TokenKind::EOF => String::from("end of input"),
            _ => self.current_token().value.clone(),
        }
    }

    /// Binding power of the current token; tokens without an infix handler
    /// bind at `Default` and end the expression.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current_token_kind())
            .unwrap_or(&BindingPower::Default)
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The cursor never moves past the final `EOF` token.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance().clone());
        }

        match error {
            Some(error) => Err(error),
            None => Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: self.current_lexeme(),
                },
                self.get_position(),
            )),
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// A missing `;`, `(`, `)` or `]` is reported as `MissingDelimiter`,
    /// anything else as `UnexpectedToken`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let delimiter = match expected_kind {
            TokenKind::Semicolon => Some(";"),
            TokenKind::LParen => Some("("),
            TokenKind::RParen => Some(")"),
            TokenKind::RBracket => Some("]"),
            _ => None,
        };

        let error = delimiter.map(|delimiter| {
            Error::new(
                ErrorImpl::MissingDelimiter {
                    delimiter: delimiter.to_string(),
                    found: self.current_lexeme(),
                },
                self.get_position(),
            )
        });

        self.expect_error(expected_kind, error)
    }

    /// Checks if there are more statements to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn scope(&self) -> &Environment {
        &*self.scope
    }

    pub fn scope_mut(&mut self) -> &mut Environment {
        &mut *self.scope
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for the token that starts it.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the current position in the source file.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Parses a stream of tokens into a program.
///
/// Declarations are registered in `scope` as they are parsed. The first error
/// aborts parsing and no partial program is returned.
pub fn parse(
    tokens: Vec<Token>,
    file: Rc<String>,
    scope: &mut Environment,
) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens, file, scope);
    create_token_lookups(&mut parser);

    let mut body = vec![];

    while parser.has_tokens() {
        body.push(parse_stmt(&mut parser)?);
    }

    Ok(Program { body })
}
