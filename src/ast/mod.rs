/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, statement and expression nodes
/// - expressions: Expression kinds, operators and literal values
/// - statements: Declaration, assignment and print statements
/// - types: The types named by the language's type keywords
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
