use inkwell::{
    module::Linkage,
    values::{BasicValueEnum, PointerValue},
    AddressSpace,
};

use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, BinaryOperator, ExprKind, LiteralValue},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::compiler::Compiler;

/// Generates LLVM IR for the given expression.
pub fn gen_expression<'ctx>(
    compiler: &Compiler<'ctx>,
    expression: &Expr,
) -> Result<BasicValueEnum<'ctx>, Error> {
    match &expression.kind {
        ExprKind::Literal(LiteralValue::Int(value)) => Ok(compiler
            .context
            .i32_type()
            .const_int(*value as u64, true)
            .into()),
        ExprKind::Literal(LiteralValue::Float(value)) => {
            Ok(compiler.context.f64_type().const_float(*value).into())
        }
        ExprKind::Literal(LiteralValue::Str(bytes)) => Ok(gen_string(compiler, bytes)?.into()),
        ExprKind::Symbol(name) => {
            let Some((alloca, _)) = compiler.named_allocas.get(name) else {
                return Err(Error::new(
                    ErrorImpl::MissingStorage {
                        variable: name.clone(),
                    },
                    expression.span.start.clone(),
                ));
            };

            Ok(compiler.builder.build_load(*alloca, name)?)
        }
        ExprKind::Binary(binary_expr) => gen_binary(compiler, expression, binary_expr),
        ExprKind::List(_) => Err(Error::new(
            ErrorImpl::UnsupportedType {
                type_: Type::List.to_string(),
            },
            expression.span.start.clone(),
        )),
    }
}

/// Emits the bytes as a private, null-terminated `.str` global and returns an
/// `i8*` to its first byte.
fn gen_string<'ctx>(compiler: &Compiler<'ctx>, bytes: &[u8]) -> Result<PointerValue<'ctx>, Error> {
    let value = compiler.context.const_string(bytes, true);

    let global = compiler
        .module
        .add_global(value.get_type(), Some(AddressSpace::default()), ".str");
    global.set_initializer(&value);
    global.set_constant(true);
    global.set_linkage(Linkage::Private);
    global.set_unnamed_addr(true);

    let i8_ptr_type = compiler.context.i8_type().ptr_type(AddressSpace::default());
    Ok(compiler
        .builder
        .build_pointer_cast(global.as_pointer_value(), i8_ptr_type, "")?)
}

fn gen_binary<'ctx>(
    compiler: &Compiler<'ctx>,
    expression: &Expr,
    binary_expr: &BinaryExpr,
) -> Result<BasicValueEnum<'ctx>, Error> {
    let unsupported = |type_: String| {
        Error::new(
            ErrorImpl::UnsupportedOperator {
                operator: binary_expr.operator.to_string(),
                type_,
            },
            expression.span.start.clone(),
        )
    };

    if let Some(type_) = expression.resolved_type {
        if !type_.is_numeric() {
            return Err(unsupported(type_.to_string()));
        }
    }

    let left = gen_expression(compiler, &binary_expr.left)?;
    let right = gen_expression(compiler, &binary_expr.right)?;

    let builder = &compiler.builder;
    match (left, right) {
        (BasicValueEnum::IntValue(left), BasicValueEnum::IntValue(right)) => {
            let value = match binary_expr.operator {
                BinaryOperator::Add => builder.build_int_add(left, right, "")?,
                BinaryOperator::Sub => builder.build_int_sub(left, right, "")?,
                BinaryOperator::Mul => builder.build_int_mul(left, right, "")?,
                BinaryOperator::Div => builder.build_int_signed_div(left, right, "")?,
            };
            Ok(value.into())
        }
        (BasicValueEnum::FloatValue(left), BasicValueEnum::FloatValue(right)) => {
            let value = match binary_expr.operator {
                BinaryOperator::Add => builder.build_float_add(left, right, "")?,
                BinaryOperator::Sub => builder.build_float_sub(left, right, "")?,
                BinaryOperator::Mul => builder.build_float_mul(left, right, "")?,
                BinaryOperator::Div => builder.build_float_div(left, right, "")?,
            };
            Ok(value.into())
        }
        _ => Err(unsupported(
            expression
                .resolved_type
                .map(|type_| type_.to_string())
                .unwrap_or_else(|| String::from("unresolved")),
        )),
    }
}
