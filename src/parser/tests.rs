//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Variable declarations and assignments
//! - Print statements
//! - Expression precedence and associativity
//! - List literals and string escapes
//! - Scope checks and syntax errors

use std::rc::Rc;

use super::{expr::unescape_string, parser::parse};
use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{BinaryOperator, ExprKind, LiteralValue},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    type_checker::environment::Environment,
};

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.st".to_string())).unwrap();
    let mut scope = Environment::new();
    parse(tokens, Rc::new("test.st".to_string()), &mut scope)
}

fn initializer(program: &Program, index: usize) -> &Expr {
    match &program.body[index] {
        Stmt::VarDecl(decl) => decl.assigned_value.as_ref().unwrap(),
        other => panic!("expected a declaration, got {:?}", other),
    }
}

fn int(expr: &Expr) -> i32 {
    match &expr.kind {
        ExprKind::Literal(LiteralValue::Int(value)) => *value,
        other => panic!("expected an integer literal, got {:?}", other),
    }
}

fn binary(expr: &Expr) -> (BinaryOperator, &Expr, &Expr) {
    match &expr.kind {
        ExprKind::Binary(binary) => (binary.operator, &*binary.left, &*binary.right),
        other => panic!("expected a binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_source("x: int = 42;").unwrap();

    assert_eq!(program.body.len(), 1);
    match &program.body[0] {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.identifier, "x");
            assert_eq!(decl.declared_type, Type::Int);
            assert_eq!(int(decl.assigned_value.as_ref().unwrap()), 42);
            assert!(decl.assigned_value.as_ref().unwrap().resolved_type.is_none());
        }
        other => panic!("expected a declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_declaration_then_assignment() {
    let program = parse_source("x: float;\nx = 1.5;\nprint(x);").unwrap();

    assert_eq!(program.body.len(), 3);
    match &program.body[0] {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.declared_type, Type::Float);
            assert!(decl.assigned_value.is_none());
        }
        other => panic!("expected a declaration, got {:?}", other),
    }
    match &program.body[1] {
        Stmt::Assignment(assignment) => {
            assert_eq!(assignment.identifier, "x");
            assert_eq!(
                assignment.value.kind,
                ExprKind::Literal(LiteralValue::Float(1.5))
            );
            assert_eq!(assignment.span.start.line, 2);
        }
        other => panic!("expected an assignment, got {:?}", other),
    }
    match &program.body[2] {
        Stmt::Print(print) => assert_eq!(print.value.kind, ExprKind::Symbol("x".to_string())),
        other => panic!("expected a print, got {:?}", other),
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let program = parse_source("x: int = 2 + 3 * 4;").unwrap();

    let (operator, left, right) = binary(initializer(&program, 0));
    assert_eq!(operator, BinaryOperator::Add);
    assert_eq!(int(left), 2);

    let (operator, left, right) = binary(right);
    assert_eq!(operator, BinaryOperator::Mul);
    assert_eq!(int(left), 3);
    assert_eq!(int(right), 4);
}

#[test]
fn test_parentheses_override_precedence() {
    let program = parse_source("x: int = (2 + 3) * 4;").unwrap();

    let (operator, left, right) = binary(initializer(&program, 0));
    assert_eq!(operator, BinaryOperator::Mul);
    assert_eq!(int(right), 4);

    let (operator, left, right) = binary(left);
    assert_eq!(operator, BinaryOperator::Add);
    assert_eq!(int(left), 2);
    assert_eq!(int(right), 3);
}

#[test]
fn test_binary_operators_are_left_associative() {
    let program = parse_source("x: int = 10 - 4 - 3;\ny: int = 8 / 4 / 2;").unwrap();

    let (operator, left, right) = binary(initializer(&program, 0));
    assert_eq!(operator, BinaryOperator::Sub);
    assert_eq!(int(right), 3);
    let (operator, left, right) = binary(left);
    assert_eq!(operator, BinaryOperator::Sub);
    assert_eq!((int(left), int(right)), (10, 4));

    let (operator, left, right) = binary(initializer(&program, 1));
    assert_eq!(operator, BinaryOperator::Div);
    assert_eq!(int(right), 2);
    assert_eq!(binary(left).0, BinaryOperator::Div);
}

#[test]
fn test_binary_span_covers_both_operands() {
    let program = parse_source("x: int = 1 + 22;").unwrap();
    let expr = initializer(&program, 0);

    assert_eq!(expr.span.start.offset, 9);
    assert_eq!(expr.span.end.offset, 15);
}

#[test]
fn test_parse_list_literal() {
    let program = parse_source("l: list = [1, 2.5, \"a\"];\ne: list = [];").unwrap();

    match &initializer(&program, 0).kind {
        ExprKind::List(elements) => {
            assert_eq!(elements.len(), 3);
            assert_eq!(int(&elements[0]), 1);
            assert_eq!(elements[1].kind, ExprKind::Literal(LiteralValue::Float(2.5)));
            assert_eq!(
                elements[2].kind,
                ExprKind::Literal(LiteralValue::Str(b"a".to_vec()))
            );
        }
        other => panic!("expected a list, got {:?}", other),
    }
    assert_eq!(initializer(&program, 1).kind, ExprKind::List(vec![]));
}

#[test]
fn test_parse_string_literal_decodes_escapes() {
    let program = parse_source(r#"s: str = "tab\there \"q\"";"#).unwrap();

    assert_eq!(
        initializer(&program, 0).kind,
        ExprKind::Literal(LiteralValue::Str(b"tab\there \"q\"".to_vec()))
    );
}

#[test]
fn test_parse_empty_program() {
    let program = parse_source("// nothing here\n").unwrap();
    assert!(program.body.is_empty());
}

#[test]
fn test_parse_registers_symbols_in_scope() {
    let tokens = tokenize("a: int = 1; b: str; c: float; c = 2.0;".to_string(), None).unwrap();
    let mut scope = Environment::new();
    parse(tokens, Rc::new("shell".to_string()), &mut scope).unwrap();

    assert_eq!(scope.len(), 3);
    assert!(scope.get_variable("a").unwrap().initialized);
    assert!(!scope.get_variable("b").unwrap().initialized);
    assert_eq!(scope.get_variable("b").unwrap().declared_type, Type::Str);
    assert!(scope.get_variable("c").unwrap().initialized);
}

#[test]
fn test_parse_without_eof_token() {
    let mut tokens = tokenize("print(1);".to_string(), None).unwrap();
    tokens.pop();

    let mut scope = Environment::new();
    let program = parse(tokens, Rc::new("shell".to_string()), &mut scope).unwrap();
    assert_eq!(program.body.len(), 1);
}

#[test]
fn test_undeclared_variable() {
    let error = parse_source("print(y);").unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UndeclaredVariable {
            variable: "y".to_string()
        }
    );
    assert_eq!(error.get_position().offset, 6);
}

#[test]
fn test_uninitialized_variable() {
    let error = parse_source("x: int;\nprint(x);").unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UninitializedVariable {
            variable: "x".to_string()
        }
    );
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_declaration_cannot_read_itself() {
    let error = parse_source("x: int = x + 1;").unwrap_err();
    assert_eq!(error.get_error_name(), "UndeclaredVariable");
}

#[test]
fn test_assignment_to_undeclared_variable() {
    let error = parse_source("y = 1;").unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UndeclaredVariable {
            variable: "y".to_string()
        }
    );
}

#[test]
fn test_missing_semicolon() {
    let error = parse_source("x: int = 42").unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::MissingDelimiter {
            delimiter: ";".to_string(),
            found: "end of input".to_string(),
        }
    );
}

#[test]
fn test_print_requires_parentheses() {
    let error = parse_source("print 1;").unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::MissingDelimiter {
            delimiter: "(".to_string(),
            found: "1".to_string(),
        }
    );
}

#[test]
fn test_unclosed_group_and_list() {
    let error = parse_source("x: int = (1 + 2;").unwrap_err();
    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::MissingDelimiter {
            delimiter: ")".to_string(),
            found: ";".to_string(),
        }
    );

    let error = parse_source("l: list = [1, 2;").unwrap_err();
    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::MissingDelimiter {
            delimiter: "]".to_string(),
            found: ";".to_string(),
        }
    );
}

#[test]
fn test_unexpected_leading_token() {
    let error = parse_source("= 1;").unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UnexpectedToken {
            token: "=".to_string()
        }
    );
}

#[test]
fn test_unexpected_token_after_identifier() {
    let error = parse_source("x 1;").unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UnexpectedToken {
            token: "1".to_string()
        }
    );
}

#[test]
fn test_declaration_requires_type_keyword() {
    let error = parse_source("x: number = 1;").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().offset, 3);
}

#[test]
fn test_missing_operand() {
    let error = parse_source("x: int = 1 + ;").unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UnexpectedToken {
            token: ";".to_string()
        }
    );
}

#[test]
fn test_integer_out_of_range() {
    let error = parse_source("x: int = 2147483648;").unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::NumberParseError {
            token: "2147483648".to_string()
        }
    );
    assert!(parse_source("x: int = 2147483647;").is_ok());
}

#[test]
fn test_unescape_string() {
    assert_eq!(unescape_string(r#""plain""#), b"plain");
    assert_eq!(unescape_string(r#""""#), b"");
    assert_eq!(unescape_string(r#""a\nb\tc\r""#), b"a\nb\tc\r");
    assert_eq!(unescape_string(r#""back\\slash""#), b"back\\slash");
    assert_eq!(unescape_string(r#""nul\0""#), b"nul\0");
    assert_eq!(unescape_string(r#""odd\q""#), b"odd\\q");
    assert_eq!(unescape_string(r#""bare\x""#), b"bare\\x");
    assert_eq!(unescape_string("\"é\""), "é".as_bytes());
}

#[test]
fn test_unescape_hex_bytes() {
    assert_eq!(unescape_string(r#""hex\x41\x7a""#), b"hexAz");
    // High escapes are single bytes, not encoded code points
    assert_eq!(unescape_string(r#""a\xff""#), vec![b'a', 0xff]);
    assert_eq!(unescape_string(r#""\x80\x9""#), vec![0x80, 0x09]);
}
