//! Operations on a lowered module: verification, JIT execution and output.

use std::path::Path;

use inkwell::{
    targets::{CodeModel, FileType, InitializationConfig, RelocMode, Target, TargetMachine},
    OptimizationLevel,
};
use tracing::debug;

use crate::errors::errors::Error;

use super::compiler::Compiler;

/// Runs the LLVM module verifier.
pub fn verify(compiler: &Compiler<'_>) -> Result<(), Error> {
    compiler
        .module
        .verify()
        .map_err(|message| Error::backend(format!("module verification failed: {}", message)))
}

/// Compiles `main` for the host with MCJIT and calls it.
///
/// The engine works on a copy of the module, so the compiler can still be
/// written out afterwards.
pub fn run_jit(compiler: &Compiler<'_>) -> Result<(), Error> {
    Target::initialize_native(&InitializationConfig::default()).map_err(Error::backend)?;

    let module = compiler.module.clone();
    let engine = module
        .create_jit_execution_engine(OptimizationLevel::None)
        .map_err(|message| Error::backend(message.to_string()))?;

    let main = unsafe { engine.get_function::<unsafe extern "C" fn()>("main") }
        .map_err(|error| Error::backend(error.to_string()))?;

    debug!(module = %module.get_name().to_string_lossy(), "running main");
    unsafe { main.call() };

    Ok(())
}

/// Writes the textual IR.
pub fn write_ir(compiler: &Compiler<'_>, path: &Path) -> Result<(), Error> {
    compiler
        .module
        .print_to_file(path)
        .map_err(|message| Error::backend(message.to_string()))
}

/// Writes LLVM bitcode.
pub fn write_bitcode(compiler: &Compiler<'_>, path: &Path) -> Result<(), Error> {
    if compiler.module.write_bitcode_to_path(path) {
        Ok(())
    } else {
        Err(Error::backend(format!(
            "failed to write bitcode to {}",
            path.display()
        )))
    }
}

/// Writes a relocatable object file for the host triple.
pub fn write_object(compiler: &Compiler<'_>, path: &Path) -> Result<(), Error> {
    Target::initialize_all(&InitializationConfig::default());

    let target_triple = TargetMachine::get_default_triple();
    let target =
        Target::from_triple(&target_triple).map_err(|message| Error::backend(message.to_string()))?;
    let target_machine = target
        .create_target_machine(
            &target_triple,
            "generic",
            "",
            OptimizationLevel::Default,
            RelocMode::PIC,
            CodeModel::Default,
        )
        .ok_or_else(|| Error::backend("failed to create a target machine for the host"))?;

    compiler.module.set_triple(&target_triple);
    compiler
        .module
        .set_data_layout(&target_machine.get_target_data().get_data_layout());

    target_machine
        .write_to_file(&compiler.module, FileType::Object, path)
        .map_err(|message| Error::backend(message.to_string()))
}
