use std::fmt::Display;

use thiserror;

use super::options::Capacity;

#[derive(PartialEq, Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("Unknown character `{0}` in expression")]
    UnknownCharacter(char),

    #[error("Identifier `{0}` is longer than {1} characters")]
    IdentifierTooLong(String, usize),

    #[error("Integer literal `{0}` does not fit in 64 bits")]
    InvalidInteger(String),

    #[error("Invalid variable name `{0}`")]
    InvalidVariableName(String),

    #[error("Missing '=' in declaration")]
    MissingAssignment,

    #[error("Variable `{0}` is not declared")]
    UndeclaredVariable(String),

    #[error("Invalid expression")]
    MalformedExpression,

    #[error("Unbalanced parenthesis")]
    UnbalancedParenthesis,

    #[error("Too many {what} (limit is {limit})")]
    CapacityExceeded { what: Capacity, limit: usize },

    #[error("Missing semicolon at end of statement")]
    MissingSemicolon,

    #[error("{0}")]
    Io(String),

    #[error("Bug: {message:?} at {file:?}:{line:?}")]
    Bug {
        message: String,
        file: &'static str,
        line: u32,
    },
}

impl Error {
    pub fn with_statement(self, statement: Option<String>) -> ErrorWithStatement {
        ErrorWithStatement {
            err: self,
            statement,
        }
    }
}

/// An error and the statement it was found in.
#[derive(PartialEq, Debug, Clone)]
pub struct ErrorWithStatement {
    pub err: Error,
    pub statement: Option<String>,
}

impl Display for ErrorWithStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(statement) = &self.statement {
            write!(f, "Error: {} (in '{}')", self.err, statement)
        } else {
            write!(f, "Error: {}", self.err)
        }
    }
}

/// Recover the typed error from an `anyhow::Error` raised inside the pipeline.
pub fn into_error(err: anyhow::Error) -> Error {
    match err.downcast::<Error>() {
        Ok(err) => err,
        Err(err) => Error::Bug {
            message: err.to_string(),
            file: file!(),
            line: line!(),
        },
    }
}

#[macro_export]
macro_rules! bug {
    () => {
        $crate::bug!("".to_string())
    };
    ( $msg:expr ) => {
        anyhow::Error::from($crate::compiler::error::Error::Bug {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        })
    };
}
