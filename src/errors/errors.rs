use std::fmt::Display;

use thiserror::Error;

use crate::Position;

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

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InconsistentDedent { .. } => "InconsistentDedent",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::Redeclaration { .. } => "Redeclaration",
            ErrorImpl::UnresolvedIdentifier { .. } => "UnresolvedIdentifier",
            ErrorImpl::BindingArityMismatch { .. } => "BindingArityMismatch",
            ErrorImpl::ArgumentArityMismatch { .. } => "ArgumentArityMismatch",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::UnknownType { .. } => "UnknownType",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a newline or a colon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::InconsistentDedent { width } => ErrorTip::Suggestion(format!(
                "Line indented by {} spaces matches no enclosing block",
                width
            )),
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::Redeclaration { variable } => ErrorTip::Suggestion(format!(
                "`{}` is already declared in this scope",
                variable
            )),
            ErrorImpl::UnresolvedIdentifier { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::BindingArityMismatch { names, values } => ErrorTip::Suggestion(format!(
                "Binding declares {} names but has {} initializers",
                names, values
            )),
            ErrorImpl::ArgumentArityMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` takes {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::NotCallable { name } => {
                ErrorTip::Suggestion(format!("`{}` is not a function", name))
            }
            ErrorImpl::ReturnOutsideFunction => ErrorTip::Suggestion(String::from(
                "Return statements are only allowed inside a function body",
            )),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
        }
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

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("inconsistent dedent to width {width:?}")]
    InconsistentDedent { width: usize },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMismatch { expected: String, received: String },
    #[error("{variable:?} already declared in this scope")]
    Redeclaration { variable: String },
    #[error("variable {variable:?} not declared")]
    UnresolvedIdentifier { variable: String },
    #[error("binding has {names:?} names but {values:?} initializers")]
    BindingArityMismatch { names: usize, values: usize },
    #[error("{function:?} expects {expected:?} arguments, received {received:?}")]
    ArgumentArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("{name:?} is not callable")]
    NotCallable { name: String },
    #[error("return statement outside function")]
    ReturnOutsideFunction,
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
}
