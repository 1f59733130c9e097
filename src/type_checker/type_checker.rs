use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::ExprKind,
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::environment::Environment;

/// Walks a program once, checking declarations and types and recording the
/// type of every expression in its `resolved_type` slot.
#[derive(Debug, Default)]
pub struct TypeChecker {
    pub environment: Environment,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            environment: Environment::new(),
        }
    }

    pub fn check_stmt(&mut self, stmt: &mut Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::VarDecl(decl) => {
                if let Some(value) = decl.assigned_value.as_mut() {
                    self.check(value, Some(decl.declared_type))?;
                }

                self.environment.declare_variable(
                    decl.identifier.clone(),
                    decl.declared_type,
                    decl.assigned_value.is_some(),
                );
            }
            Stmt::Assignment(assignment) => {
                let Some(symbol) = self.environment.get_variable(&assignment.identifier) else {
                    return Err(Error::new(
                        ErrorImpl::UndeclaredVariable {
                            variable: assignment.identifier.clone(),
                        },
                        assignment.span.start.clone(),
                    ));
                };
                let declared_type = symbol.declared_type;

                self.check(&mut assignment.value, Some(declared_type))?;
                self.environment
                    .initialize_variable(&assignment.identifier, assignment.span.start.clone())?;
            }
            Stmt::Print(print) => {
                self.check(&mut print.value, None)?;
            }
        }

        Ok(())
    }

    /// Resolves the type of `expr`, requiring it to be `expected` when given.
    pub fn check(&mut self, expr: &mut Expr, expected: Option<Type>) -> Result<Type, Error> {
        let position = expr.span.start.clone();

        let resolved = match &mut expr.kind {
            ExprKind::Symbol(name) => {
                let declared_type = self
                    .environment
                    .read_variable(name, position.clone())?
                    .declared_type;
                expect_type(expected, declared_type, position)?
            }
            ExprKind::Literal(literal) => {
                expect_type(expected, Type::of_literal(literal), position)?
            }
            ExprKind::Binary(binary) => {
                // Without an outer expectation the left operand sets it for the right
                let left = self.check(&mut binary.left, expected)?;
                self.check(&mut binary.right, expected.or(Some(left)))?
            }
            ExprKind::List(elements) => {
                expect_type(expected, Type::List, position)?;
                self.check_list_elements(elements)?;
                Type::List
            }
        };

        expr.resolved_type = Some(resolved);
        Ok(resolved)
    }

    fn check_list_elements(&mut self, elements: &mut [Expr]) -> Result<(), Error> {
        let mut element_type = None;

        for element in elements.iter_mut() {
            let current = self.check(element, None)?;

            match element_type {
                None => element_type = Some(current),
                Some(first) if first != current => {
                    return Err(Error::new(
                        ErrorImpl::HeterogeneousList {
                            expected: first.to_string(),
                            received: current.to_string(),
                        },
                        element.span.start.clone(),
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

fn expect_type(expected: Option<Type>, received: Type, position: Position) -> Result<Type, Error> {
    match expected {
        Some(expected) if expected != received => Err(Error::new(
            ErrorImpl::TypeMismatch {
                expected: expected.to_string(),
                received: received.to_string(),
            },
            position,
        )),
        _ => Ok(received),
    }
}

/// Checks a whole program with a fresh symbol table.
///
/// The first error stops the check. On success the final symbol table is
/// returned and every expression carries its resolved type.
pub fn type_check(program: &mut Program) -> Result<Environment, Error> {
    let mut type_checker = TypeChecker::new();

    for stmt in program.body.iter_mut() {
        type_checker.check_stmt(stmt)?;
    }

    Ok(type_checker.environment)
}
