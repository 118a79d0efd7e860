use std::fmt;

use lalrpop_util::ParseError as LalrpopError;
use thiserror::Error;

use crate::frontend::ast;
use crate::meta::{LocationMeta, Meta};

#[derive(Debug, PartialEq, Clone, Error)]
pub enum FrontendErrorKind {
    #[error("ParseError: {message}")]
    ParseError {
        message: String,
    },
    #[error("EnvironmentError: {message}")]
    EnvError {
        message: String,
    },
    #[error("TypeError: expected `{expected}`, got `{actual}`")]
    TypeError {
        expected: ast::Type,
        actual: ast::Type,
    },
    #[error("ArgumentError: {message}")]
    ArgumentError {
        message: String,
    },
    #[error("SystemError: {message}")]
    SystemError {
        message: String,
    },
}

/// standardized type to remember all frontend errors
pub type FrontendError<LocationT> = Meta<FrontendErrorKind, LocationT>;

/// error raised from grammar actions (the generated parser only knows about tokens)
#[derive(Debug, PartialEq, Clone)]
pub struct SyntaxError {
    pub offset: usize,
    pub message: &'static str,
}

impl SyntaxError {
    pub fn new(offset: usize, message: &'static str) -> Self {
        Self { offset, message }
    }
}

impl<T: fmt::Debug> From<LalrpopError<usize, T, SyntaxError>> for FrontendError<LocationMeta> {
    fn from(err: LalrpopError<usize, T, SyntaxError>) -> Self {
        let (location, message) = match err {
            LalrpopError::InvalidToken { location } => {
                (location, String::from("InvalidToken"))
            }
            LalrpopError::UnrecognizedEof { location, expected: _ } => {
                (location, String::from("Unexpected end of file"))
            }
            LalrpopError::ExtraToken { token } => {
                (token.0, format!("ExtraToken: {:?}", token.1))
            }
            LalrpopError::UnrecognizedToken { token, expected: _ } => {
                (token.0, format!("UnrecognizedToken: {:?}", token.1))
            }
            LalrpopError::User { error } => {
                (error.offset, String::from(error.message))
            }
        };
        FrontendError::new(FrontendErrorKind::ParseError { message }, LocationMeta::from(location))
    }
}
