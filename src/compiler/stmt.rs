use crate::{
    ast::{
        ast::Stmt,
        statements::{AssignmentStmt, PrintStmt, VarDeclStmt},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    compiler::Compiler,
    expr::gen_expression,
    runtime::{format_string, printf_function},
};

/// Generates LLVM IR for the given statement at the end of `entry`.
pub fn gen_statement<'ctx>(compiler: &mut Compiler<'ctx>, statement: &Stmt) -> Result<(), Error> {
    match statement {
        Stmt::VarDecl(var_decl_stmt) => gen_var_decl(compiler, var_decl_stmt),
        Stmt::Assignment(assignment_stmt) => gen_assignment(compiler, assignment_stmt),
        Stmt::Print(print_stmt) => gen_print(compiler, print_stmt),
    }
}

fn gen_var_decl(compiler: &mut Compiler<'_>, var_decl_stmt: &VarDeclStmt) -> Result<(), Error> {
    let var_name = var_decl_stmt.identifier.clone();
    let storage_type =
        compiler.convert_type(var_decl_stmt.declared_type, var_decl_stmt.span.start.clone())?;

    // The initializer is lowered before the name is rebound, so a redeclaration
    // reads the previous slot
    let var_value = match &var_decl_stmt.assigned_value {
        Some(value) => Some(gen_expression(compiler, value)?),
        None => None,
    };

    let var = compiler.builder.build_alloca(storage_type, &var_name)?;
    compiler
        .named_allocas
        .insert(var_name, (var, var_decl_stmt.declared_type));

    if let Some(var_value) = var_value {
        compiler.builder.build_store(var, var_value)?;
    }

    Ok(())
}

fn gen_assignment(
    compiler: &mut Compiler<'_>,
    assignment_stmt: &AssignmentStmt,
) -> Result<(), Error> {
    let Some((var, _)) = compiler
        .named_allocas
        .get(&assignment_stmt.identifier)
        .copied()
    else {
        return Err(Error::new(
            ErrorImpl::MissingStorage {
                variable: assignment_stmt.identifier.clone(),
            },
            assignment_stmt.span.start.clone(),
        ));
    };

    let value = gen_expression(compiler, &assignment_stmt.value)?;
    compiler.builder.build_store(var, value)?;

    Ok(())
}

fn gen_print(compiler: &mut Compiler<'_>, print_stmt: &PrintStmt) -> Result<(), Error> {
    let position = print_stmt.value.span.start.clone();

    let Some(value_type) = print_stmt.value.resolved_type else {
        return Err(Error::new(
            ErrorImpl::UnsupportedType {
                type_: String::from("unresolved"),
            },
            position,
        ));
    };

    let value = gen_expression(compiler, &print_stmt.value)?;
    let format = format_string(compiler, value_type, position)?;
    let printf = printf_function(compiler)?;

    compiler
        .builder
        .build_call(printf, &[format.into(), value.into()], "")?;

    Ok(())
}
