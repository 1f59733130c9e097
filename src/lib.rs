#![allow(clippy::module_inception)]

use std::{rc::Rc, time::Instant};

use inkwell::context::Context;
use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    compiler::compiler::{compile, Compiler},
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{environment::Environment, type_checker::type_check},
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A location in a source file: byte offset, 1-based line and file name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: u32, line: u32, file: Rc<String>) -> Self {
        Position { offset, line, file }
    }

    pub fn null() -> Self {
        Position::new(0, 0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs the front end (lexer, parser, semantic analyzer) over one compilation unit.
///
/// The returned program has every expression's `resolved_type` filled in.
pub fn analyze_source(source: &str, file_name: &str) -> Result<Program, Error> {
    let start = Instant::now();
    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    debug!(file = file_name, tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");
    trace!(?tokens);

    // Scope used for the parser's declared/initialized checks, local to this unit
    let mut scope = Environment::new();
    let parse_start = Instant::now();
    let mut program = parse(tokens, Rc::new(file_name.to_string()), &mut scope)?;
    debug!(file = file_name, statements = program.body.len(), elapsed = ?parse_start.elapsed(), "parsed");

    let check_start = Instant::now();
    type_check(&mut program)?;
    debug!(file = file_name, elapsed = ?check_start.elapsed(), "type checked");
    trace!(?program);

    Ok(program)
}

/// Compiles one source file down to an LLVM module owned by `context`.
pub fn compile_source<'ctx>(
    source: &str,
    file_name: &str,
    context: &'ctx Context,
) -> Result<Compiler<'ctx>, Error> {
    let program = analyze_source(source, file_name)?;

    let compile_start = Instant::now();
    let compiler = compile(&program, context, file_name)?;
    debug!(file = file_name, elapsed = ?compile_start.elapsed(), "lowered to IR");
    trace!(ir = %compiler.ir_string());

    Ok(compiler)
}

/// Finds the line containing byte `position`.
///
/// Returns the 1-based line number, the line text and the column inside it.
/// Positions at or past the end of the source resolve to the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        let trimmed = line.trim_end_matches(&['\n', '\r'][..]);
        last = (line_number, trimmed.to_string(), trimmed.len());

        start = end;
        line_number += 1;
    }

    if source.ends_with('\n') {
        // The end of input sits on a fresh, empty line
        (line_number, String::new(), 0)
    } else {
        last
    }
}

/// Formats an error as a diagnostic with the offending source line.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: TypeMismatch (Expected type `int`, received `float`)
        -> main.st:3
           |
         3 | x: int = 1.5;
           | ---------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.offset);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut output = String::new();
    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        output.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    output.push_str(&format!("-> {}:{}\n", position.file, line));
    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

/// Writes a rendered diagnostic to stderr.
pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", render_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
