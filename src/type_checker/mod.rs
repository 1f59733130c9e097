//! Type checking and semantic analysis module.
//!
//! This module performs type checking and semantic analysis on the AST.
//! It annotates the parsed program in place while:
//!
//! - Verifying that initializers and assigned values match declared types
//! - Detecting use of undeclared or unassigned variables
//! - Checking that both operands of an arithmetic expression agree
//! - Checking that list literals hold a single element type
//!
//! Symbols live in an `Environment` created for each compilation unit.

pub mod environment;
pub mod type_checker;
