//! The RError type reports invalid arguments to R-like functions and
//! failures while streaming records.
//!
//! Undefined numeric results are NOT errors: they are returned as NaN
//! (or NA, i.e., `None`, for logical results), as in R.

// dependencies
use std::error::Error;
use std::fmt;

/// Errors returned by `rvec` functions.
#[derive(Debug, Clone, PartialEq)]
pub enum RError {
    /// An argument was outside its valid domain, e.g., `trim` outside [0, 0.5]
    /// or a value that is not numeric, logical or NA passed to a strict parser.
    InvalidArgument(String),

    /// A record stream failed at or near a 1-based input line.
    Stream {
        line:    Option<usize>,
        message: String,
    },
}
impl RError {
    /// Create an InvalidArgument error from any displayable message.
    pub fn invalid_argument<M: fmt::Display>(msg: M) -> Self {
        RError::InvalidArgument(msg.to_string())
    }
    /// Create a Stream error, with or without a known input line.
    pub fn stream<M: fmt::Display>(line: Option<usize>, msg: M) -> Self {
        RError::Stream {
            line,
            message: msg.to_string(),
        }
    }
    /// Return true if this error reports an invalid argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RError::InvalidArgument(_))
    }
}
impl fmt::Display for RError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            RError::Stream { line: Some(line), message } => {
                write!(f, "record stream failed at or near input line {}: {}", line, message)
            }
            RError::Stream { line: None, message } => {
                write!(f, "record stream failed: {}", message)
            }
        }
    }
}
impl Error for RError {}
