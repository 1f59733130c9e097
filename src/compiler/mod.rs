//! Code generation module for the compiler.
//!
//! This module contains the LLVM-based code generator that lowers a checked
//! program into LLVM IR, and the backend operations applied to the result.
//! It handles:
//!
//! - Compilation of expressions and statements
//! - Type conversion from language types to LLVM types
//! - Declarations of the C runtime functions the program calls
//! - Verification, JIT execution and IR/bitcode/object output

pub mod backend;
pub mod compiler;
pub mod expr;
pub mod runtime;
pub mod stmt;
