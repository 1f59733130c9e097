use crate::{
    ast::{
        ast::Stmt,
        statements::{AssignmentStmt, PrintStmt, VarDeclStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();

    match parser.get_stmt_lookup().get(&kind).copied() {
        Some(stmt_fn) => stmt_fn(parser),
        None => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_lexeme(),
            },
            parser.get_position(),
        )),
    }
}

/// A statement starting with an identifier is a declaration (`x: int ...`)
/// or an assignment (`x = ...`).
pub fn parse_identifier_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let identifier_token = parser.advance().clone();

    match parser.current_token_kind() {
        TokenKind::Colon => parse_var_decl_stmt(parser, identifier_token),
        TokenKind::Equals => parse_assignment_stmt(parser, identifier_token),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_lexeme(),
            },
            parser.get_position(),
        )),
    }
}

fn parse_var_decl_stmt(parser: &mut Parser<'_>, identifier_token: Token) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Colon)?;

    let Some(declared_type) = parser.current_token_kind().as_type() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_lexeme(),
                message: String::from("expected a type after `:` in variable declaration"),
            },
            parser.get_position(),
        ));
    };
    parser.advance();

    let assigned_value = if parser.current_token_kind() == TokenKind::Equals {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    let end = parser.expect(TokenKind::Semicolon)?.span.end;

    // Registered after the initializer so `x: int = x;` still sees the old state
    parser.scope_mut().declare_variable(
        identifier_token.value.clone(),
        declared_type,
        assigned_value.is_some(),
    );

    Ok(Stmt::VarDecl(VarDeclStmt {
        identifier: identifier_token.value,
        declared_type,
        assigned_value,
        span: Span {
            start: identifier_token.span.start,
            end,
        },
    }))
}

fn parse_assignment_stmt(parser: &mut Parser<'_>, identifier_token: Token) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Equals)?;

    let value = parse_expr(parser, BindingPower::Default)?;
    let end = parser.expect(TokenKind::Semicolon)?.span.end;

    parser
        .scope_mut()
        .initialize_variable(&identifier_token.value, identifier_token.span.start.clone())?;

    Ok(Stmt::Assignment(AssignmentStmt {
        identifier: identifier_token.value,
        value,
        span: Span {
            start: identifier_token.span.start,
            end,
        },
    }))
}

pub fn parse_print_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::LParen)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::RParen)?;
    let end = parser.expect(TokenKind::Semicolon)?.span.end;

    Ok(Stmt::Print(PrintStmt {
        value,
        span: Span { start, end },
    }))
}
