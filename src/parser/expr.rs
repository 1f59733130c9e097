use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, BinaryOperator, ExprKind, LiteralValue},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser<'_>, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(unexpected_token(parser));
    };

    let mut left = nud_fn(parser)?;

    // While the next operator binds tighter than `bp`, fold it into the lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(unexpected_token(parser));
        };

        let next_bp = parser.current_binding_power();
        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}

fn unexpected_token(parser: &Parser<'_>) -> Error {
    Error::new(
        ErrorImpl::UnexpectedToken {
            token: parser.current_lexeme(),
        },
        parser.get_position(),
    )
}

pub fn parse_primary_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let kind = match token.kind {
        TokenKind::Integer => {
            let value = token.value.parse::<i32>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;
            ExprKind::Literal(LiteralValue::Int(value))
        }
        TokenKind::Float => {
            let value = token.value.parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;
            ExprKind::Literal(LiteralValue::Float(value))
        }
        TokenKind::String => ExprKind::Literal(LiteralValue::Str(unescape_string(&token.value))),
        TokenKind::Identifier => {
            parser
                .scope()
                .read_variable(&token.value, token.span.start.clone())?;
            ExprKind::Symbol(token.value.clone())
        }
        _ => return Err(unexpected_token(parser)),
    };

    parser.advance();
    Ok(Expr::new(kind, token.span))
}

pub fn parse_binary_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let Some(operator) = BinaryOperator::from_token(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value,
            },
            operator_token.span.start,
        ));
    };

    let right = parse_expr(parser, bp)?;

    let span = Span {
        start: left.get_span().start.clone(),
        end: right.get_span().end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Binary(BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }),
        span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::RParen)?;

    Ok(expr)
}

/// `[a, b, c]`, possibly empty.
pub fn parse_list_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();

    let mut elements = vec![];

    if parser.current_token_kind() != TokenKind::RBracket {
        elements.push(parse_expr(parser, BindingPower::Default)?);

        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            elements.push(parse_expr(parser, BindingPower::Default)?);
        }
    }

    let end = parser.expect(TokenKind::RBracket)?.span.end;

    Ok(Expr::new(ExprKind::List(elements), Span { start, end }))
}

/// Strips the quotes from a string lexeme and decodes its escape sequences
/// into the bytes the literal stands for.
///
/// `\xNN` yields the single byte `NN`. Unknown escapes keep their backslash.
pub fn unescape_string(lexeme: &str) -> Vec<u8> {
    let inner = lexeme
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(lexeme);

    let mut result = Vec::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    let mut utf8 = [0u8; 4];

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
            continue;
        }

        let escaped = match chars.peek().copied() {
            Some('n') => Some(b'\n'),
            Some('t') => Some(b'\t'),
            Some('r') => Some(b'\r'),
            Some('\\') => Some(b'\\'),
            Some('"') => Some(b'"'),
            Some('0') => Some(b'\0'),
            _ => None,
        };
        if let Some(byte) = escaped {
            result.push(byte);
            chars.next();
            continue;
        }

        if chars.peek() == Some(&'x') {
            chars.next();

            let mut hex = String::new();
            while hex.len() < 2 {
                match chars.peek() {
                    Some(ch) if ch.is_ascii_hexdigit() => {
                        hex.push(*ch);
                        chars.next();
                    }
                    _ => break,
                }
            }

            match u8::from_str_radix(&hex, 16) {
                Ok(byte) => result.push(byte),
                Err(_) => result.extend_from_slice(b"\\x"),
            }
            continue;
        }

        // Keep the backslash
        result.push(b'\\');
    }

    result
}
