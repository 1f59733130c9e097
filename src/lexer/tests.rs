//! Unit tests for the lexer module.
//!
//! Covers pattern priority, keyword boundaries, literals, comments,
//! line tracking and the unrecognized-character error.

use super::{
    lexer::{pretty_print_tokens, tokenize},
    tokens::TokenKind,
};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.st".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_type_keywords() {
    assert_eq!(
        kinds("int float str list dict bool"),
        vec![
            TokenKind::TypeInt,
            TokenKind::TypeFloat,
            TokenKind::TypeStr,
            TokenKind::TypeList,
            TokenKind::TypeDict,
            TokenKind::TypeBool,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_keywords_require_word_boundary() {
    let tokens = tokenize("integer printer int_x strict print".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "integer");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "printer");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "int_x");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].kind, TokenKind::Print);
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase".to_string();
    let tokens = tokenize(source, Some("test.st".to_string())).unwrap();

    let values: Vec<&str> = tokens[..5].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "bar", "baz_123", "_underscore", "CamelCase"]);
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_float_has_priority_over_integer() {
    let tokens = tokenize("3.14 42 1.".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Float);
    assert_eq!(tokens[0].value, "3.14");
    assert_eq!(tokens[1].kind, TokenKind::Integer);
    assert_eq!(tokens[1].value, "42");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[2].value, "1");
    assert_eq!(tokens[3].kind, TokenKind::Dot);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings_keep_quotes() {
    let source = r#""hello" "" "say \"hi\"""#.to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, r#""hello""#);
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, r#""""#);
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, r#""say \"hi\"""#);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators_and_punctuation() {
    assert_eq!(
        kinds("+ - * / ( ) { } [ ] = ; : . ,"),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Multiply,
            TokenKind::Divide,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Equals,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_declaration() {
    let tokens = tokenize("x: int = 10;".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 7);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[1].kind, TokenKind::Colon);
    assert_eq!(tokens[2].kind, TokenKind::TypeInt);
    assert_eq!(tokens[3].kind, TokenKind::Equals);
    assert_eq!(tokens[4].kind, TokenKind::Integer);
    assert_eq!(tokens[4].value, "10");
    assert_eq!(tokens[5].kind, TokenKind::Semicolon);
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_eof_token_has_empty_lexeme() {
    let tokens = tokenize(String::new(), None).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].value, "");
}

#[test]
fn test_tokenize_comments() {
    let source = "x: int = 5; // trailing comment\n/* block\n comment */ print x;";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::TypeInt,
            TokenKind::Equals,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Print,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_divide_is_not_a_comment() {
    assert_eq!(
        kinds("a / b"),
        vec![TokenKind::Identifier, TokenKind::Divide, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_line_and_offset_tracking() {
    let source = "a: int = 1;\n\n/* two\nlines */ print a;".to_string();
    let tokens = tokenize(source, Some("lines.st".to_string())).unwrap();

    assert_eq!(tokens[0].line(), 1);
    assert_eq!(tokens[0].offset(), 0);
    assert_eq!(tokens[4].value, "1");
    assert_eq!(tokens[4].offset(), 9);

    let print = &tokens[6];
    assert_eq!(print.kind, TokenKind::Print);
    assert_eq!(print.line(), 4);
    assert_eq!(print.offset(), 29);
    assert_eq!(print.span.end.offset, 34);
    assert_eq!(print.span.start.file.as_str(), "lines.st");
}

#[test]
fn test_lexemes_reproduce_source_without_trivia() {
    let source = "total: float = 1.5 * (2.0 + x); // done\nprint \"a b\";";
    let tokens = tokenize(source.to_string(), None).unwrap();

    let joined: String = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(joined, "total:float=1.5*(2.0+x);print\"a b\";");
}

#[test]
fn test_unrecognized_character() {
    let source = "a: int = 1;\nx: int = @;".to_string();
    let error = tokenize(source, Some("test.st".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognizedCharacter");
    assert_eq!(error.get_position().offset, 21);
    assert_eq!(error.get_position().line, 2);
    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UnrecognizedCharacter {
            character: '@',
            line_text: "x: int = @;".to_string(),
        }
    );
}

#[test]
fn test_unterminated_string_is_rejected() {
    let error = tokenize("print \"open;".to_string(), None).unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UnrecognizedCharacter {
            character: '"',
            line_text: "print \"open;".to_string(),
        }
    );
}

#[test]
fn test_pretty_print_relexes_identically() {
    let source = "x: int = 1+2*3;print x;name: str = \"a;b\"; print [1.5, 2.0];";
    let tokens = tokenize(source.to_string(), None).unwrap();

    let printed = pretty_print_tokens(&tokens);
    assert!(printed.starts_with("x : int = 1 + 2 * 3 ;\nprint x ;\n"));

    let relexed = tokenize(printed, None).unwrap();
    let original: Vec<_> = tokens.iter().map(|t| (t.kind, t.value.clone())).collect();
    let again: Vec<_> = relexed.iter().map(|t| (t.kind, t.value.clone())).collect();
    assert_eq!(original, again);
}
