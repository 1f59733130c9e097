//! Main compiler module.
//!
//! This module contains the core Compiler structure and the lowering pipeline
//! from a checked program to LLVM IR. Every program becomes one module holding
//! a single `void main()` whose body is one `entry` block.

use std::collections::HashMap;

use inkwell::{
    attributes::{Attribute, AttributeLoc},
    basic_block::BasicBlock,
    builder::Builder,
    context::Context,
    module::{Linkage, Module},
    types::{BasicTypeEnum, FunctionType},
    values::{FunctionValue, PointerValue},
    AddressSpace,
};

use crate::{
    ast::{ast::Program, types::Type},
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    runtime::{declare_runtime_functions, flush_output},
    stmt::gen_statement,
};

/// The state of one lowering run.
///
/// # Type Parameters
///
/// * `'ctx` - Lifetime of the LLVM context
pub struct Compiler<'ctx> {
    /// Map of variable names to their stack slot and declared type
    pub named_allocas: HashMap<String, (PointerValue<'ctx>, Type)>,
    /// `printf` templates already emitted, one global per printed type
    pub format_strings: HashMap<Type, PointerValue<'ctx>>,

    /// Reference to the LLVM context
    pub context: &'ctx Context,
    /// The LLVM module being built
    pub module: Module<'ctx>,
    /// The LLVM IR builder
    pub builder: Builder<'ctx>,
}

impl<'ctx> Compiler<'ctx> {
    pub fn new(context: &'ctx Context, file_name: &str) -> Self {
        Compiler {
            named_allocas: HashMap::new(),
            format_strings: HashMap::new(),
            context,
            module: context.create_module(file_name),
            builder: context.create_builder(),
        }
    }

    /// Textual LLVM IR of the module.
    pub fn ir_string(&self) -> String {
        self.module.print_to_string().to_string()
    }

    /// Maps a declared type to the type of its stack slot.
    ///
    /// `int` is `i32`, `float` is `double` and `str` is `i8*`. The remaining
    /// types have no storage representation.
    pub fn convert_type(&self, type_: Type, position: Position) -> Result<BasicTypeEnum<'ctx>, Error> {
        match type_ {
            Type::Int => Ok(self.context.i32_type().into()),
            Type::Float => Ok(self.context.f64_type().into()),
            Type::Str => Ok(self
                .context
                .i8_type()
                .ptr_type(AddressSpace::default())
                .into()),
            Type::List | Type::Dict | Type::Bool => Err(Error::new(
                ErrorImpl::UnsupportedType {
                    type_: type_.to_string(),
                },
                position,
            )),
        }
    }

    /// Lowers every statement into `main`, in source order.
    fn gen(&mut self, program: &Program) -> Result<(), Error> {
        declare_runtime_functions(self);

        self.create_function("main", self.context.void_type().fn_type(&[], false));

        for statement in program.body.iter() {
            gen_statement(self, statement)?;
        }

        flush_output(self)?;
        self.builder.build_return(None)?;
        Ok(())
    }

    /// Creates a function with an `entry` block and positions the builder in it.
    pub fn create_function(&self, name: &str, function_type: FunctionType<'ctx>) -> FunctionValue<'ctx> {
        let function = match self.module.get_function(name) {
            Some(function) => function,
            None => self
                .module
                .add_function(name, function_type, Some(Linkage::External)),
        };

        let attribute = self
            .context
            .create_enum_attribute(Attribute::get_named_enum_kind_id("nounwind"), 0);
        function.add_attribute(AttributeLoc::Function, attribute);

        let entry = self.create_basic_block("entry", function);
        self.builder.position_at_end(entry);

        function
    }

    fn create_basic_block(&self, name: &str, function: FunctionValue<'ctx>) -> BasicBlock<'ctx> {
        self.context.append_basic_block(function, name)
    }
}

/// Lowers a checked program into a fresh module named after `file_name`.
///
/// Expressions must carry their resolved types; run the type checker first.
pub fn compile<'ctx>(
    program: &Program,
    context: &'ctx Context,
    file_name: &str,
) -> Result<Compiler<'ctx>, Error> {
    let mut compiler = Compiler::new(context, file_name);
    compiler.gen(program)?;

    Ok(compiler)
}
