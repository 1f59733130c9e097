//! External functions the generated code calls into.
//!
//! Output goes through the C library's variadic `printf`, with one template
//! per printable type. `main` ends with `fflush(NULL)` so buffered output is
//! written before control leaves the program.

use inkwell::{
    module::Linkage,
    values::{FunctionValue, PointerValue},
    AddressSpace,
};

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::compiler::Compiler;

pub const PRINTF: &str = "printf";
pub const FFLUSH: &str = "fflush";

/// Declares `i32 printf(i8*, ...)` and `i32 fflush(i8*)` in the module.
pub fn declare_runtime_functions(compiler: &Compiler<'_>) {
    let i8_ptr_type = compiler.context.i8_type().ptr_type(AddressSpace::default());
    let i32_type = compiler.context.i32_type();

    let printf_type = i32_type.fn_type(&[i8_ptr_type.into()], true);
    compiler
        .module
        .add_function(PRINTF, printf_type, Some(Linkage::External));

    // FILE* is opaque here
    let fflush_type = i32_type.fn_type(&[i8_ptr_type.into()], false);
    compiler
        .module
        .add_function(FFLUSH, fflush_type, Some(Linkage::External));
}

pub fn printf_function<'ctx>(compiler: &Compiler<'ctx>) -> Result<FunctionValue<'ctx>, Error> {
    compiler
        .module
        .get_function(PRINTF)
        .ok_or_else(|| Error::backend("printf is not declared in the module"))
}

/// Emits `fflush(NULL)`, flushing every open C output stream.
pub fn flush_output(compiler: &Compiler<'_>) -> Result<(), Error> {
    let fflush = compiler
        .module
        .get_function(FFLUSH)
        .ok_or_else(|| Error::backend("fflush is not declared in the module"))?;
    let all_streams = compiler
        .context
        .i8_type()
        .ptr_type(AddressSpace::default())
        .const_null();

    compiler
        .builder
        .build_call(fflush, &[all_streams.into()], "")?;
    Ok(())
}

/// The `printf` template for values of `type_`, if they can be printed.
pub fn format_template(type_: Type) -> Option<&'static str> {
    match type_ {
        Type::Int => Some("%d\n"),
        Type::Float => Some("%f\n"),
        Type::Str => Some("%s\n"),
        Type::List | Type::Dict | Type::Bool => None,
    }
}

/// Pointer to the global holding the template for `type_`, emitted on first use.
pub fn format_string<'ctx>(
    compiler: &mut Compiler<'ctx>,
    type_: Type,
    position: Position,
) -> Result<PointerValue<'ctx>, Error> {
    if let Some(pointer) = compiler.format_strings.get(&type_) {
        return Ok(*pointer);
    }

    let Some(template) = format_template(type_) else {
        return Err(Error::new(
            ErrorImpl::UnsupportedType {
                type_: type_.to_string(),
            },
            position,
        ));
    };

    let pointer = compiler
        .builder
        .build_global_string_ptr(template, &format!(".fmt_{}", type_))?
        .as_pointer_value();
    compiler.format_strings.insert(type_, pointer);

    Ok(pointer)
}
