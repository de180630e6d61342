//! Errors raised while building, loading or serializing a Gemfile.

use thiserror::Error;

/// Errors raised while building, loading or serializing a Gemfile.
#[derive(Error, Debug)]
pub enum GemfileError {
    /// A statement was given an argument that cannot be rendered
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Failed to load Gemfile text
    #[error("Failed to parse Gemfile at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Failed to serialize the statement tree
    #[error("Failed to serialize Gemfile: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Gemfile operations.
pub type Result<T> = std::result::Result<T, GemfileError>;

impl GemfileError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a parse error for a 1-based line number.
    pub fn parse_error(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Attach a line number to an error raised while replaying a loaded line.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Self::InvalidArgument { message } => Self::ParseError { line, message },
            other => other,
        }
    }
}
