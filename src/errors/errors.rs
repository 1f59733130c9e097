use std::fmt::Display;

use inkwell::builder::BuilderError;
use thiserror::Error;

use crate::Position;

/// The compilation stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Lex,
    Parse,
    Semantic,
    Lowering,
    Backend,
}

impl Display for ErrorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorStage::Lex => write!(f, "lex"),
            ErrorStage::Parse => write!(f, "parse"),
            ErrorStage::Semantic => write!(f, "semantic"),
            ErrorStage::Lowering => write!(f, "lowering"),
            ErrorStage::Backend => write!(f, "backend"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Creates an error for failures that have no source location, such as
    /// LLVM rejecting a module.
    pub fn backend(message: impl Into<String>) -> Self {
        Error::new(
            ErrorImpl::BackendError {
                message: message.into(),
            },
            Position::null(),
        )
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognizedCharacter { .. } => "UnrecognizedCharacter",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::MissingDelimiter { .. } => "MissingDelimiter",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UndeclaredVariable { .. } => "UndeclaredVariable",
            ErrorImpl::UninitializedVariable { .. } => "UninitializedVariable",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::HeterogeneousList { .. } => "HeterogeneousList",
            ErrorImpl::UnsupportedOperator { .. } => "UnsupportedOperator",
            ErrorImpl::UnsupportedType { .. } => "UnsupportedType",
            ErrorImpl::MissingStorage { .. } => "MissingStorage",
            ErrorImpl::BackendError { .. } => "BackendError",
        }
    }

    /// The stage that produced this error.
    ///
    /// `UndeclaredVariable` and `UninitializedVariable` are raised by both the
    /// parser and the semantic analyzer; they are reported as semantic errors.
    pub fn stage(&self) -> ErrorStage {
        match &self.internal_error {
            ErrorImpl::UnrecognizedCharacter { .. } => ErrorStage::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::MissingDelimiter { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorStage::Parse,
            ErrorImpl::UndeclaredVariable { .. }
            | ErrorImpl::UninitializedVariable { .. }
            | ErrorImpl::TypeMismatch { .. }
            | ErrorImpl::HeterogeneousList { .. } => ErrorStage::Semantic,
            ErrorImpl::UnsupportedOperator { .. }
            | ErrorImpl::UnsupportedType { .. }
            | ErrorImpl::MissingStorage { .. } => ErrorStage::Lowering,
            ErrorImpl::BackendError { .. } => ErrorStage::Backend,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognizedCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::MissingDelimiter { delimiter, found } => ErrorTip::Suggestion(format!(
                "Expected `{}` but found `{}`, did you miss a delimiter?",
                delimiter, found
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UndeclaredVariable { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::UninitializedVariable { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` is declared but no value is assigned",
                variable
            )),
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::HeterogeneousList { expected, received } => ErrorTip::Suggestion(format!(
                "List elements must share one type: expected `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::UnsupportedOperator { operator, type_ } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}` values",
                operator, type_
            )),
            ErrorImpl::UnsupportedType { type_ } => ErrorTip::Suggestion(format!(
                "Type `{}` has no storage representation yet",
                type_
            )),
            ErrorImpl::MissingStorage { variable } => {
                ErrorTip::Suggestion(format!("No storage allocated for `{}`", variable))
            }
            ErrorImpl::BackendError { message } => ErrorTip::Suggestion(message.clone()),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (line {}, offset {})",
            self.internal_error, self.position.line, self.position.offset
        )
    }
}

impl std::error::Error for Error {}

impl From<BuilderError> for Error {
    fn from(error: BuilderError) -> Self {
        Error::backend(error.to_string())
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognized character {character:?} in line {line_text:?}")]
    UnrecognizedCharacter { character: char, line_text: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("missing delimiter: expected {delimiter:?}, found {found:?}")]
    MissingDelimiter { delimiter: String, found: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("variable {variable:?} not declared")]
    UndeclaredVariable { variable: String },
    #[error("variable {variable:?} used before a value was assigned")]
    UninitializedVariable { variable: String },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMismatch { expected: String, received: String },
    #[error("list elements differ: expected {expected:?}, received {received:?}")]
    HeterogeneousList { expected: String, received: String },
    #[error("unsupported operator {operator:?} for type {type_:?}")]
    UnsupportedOperator { operator: String, type_: String },
    #[error("unsupported type {type_:?}")]
    UnsupportedType { type_: String },
    #[error("no storage for variable {variable:?}")]
    MissingStorage { variable: String },
    #[error("backend error: {message}")]
    BackendError { message: String },
}
