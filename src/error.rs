//! Error types for table tokenizing and parsing.
//!
//! Most "failures" in the table format are not errors at all: running out of
//! input yields no token or no block, and a header with fewer tokens than its
//! schema declares simply leaves the trailing fields absent. The variants here
//! cover the remaining structural faults.
//!
//! ## Error Categories
//!
//! - **Quoting Errors**: a delimited token whose closing quote never arrives
//! - **Schema Errors**: a `schema` header value that cannot be tokenized
//! - **Depth Errors**: nesting deeper than [`ParseOptions::max_depth`](crate::ParseOptions)
//! - **Tree Errors**: a [`Value`](crate::Value) that does not have the shape of a block
//! - **I/O Errors**: reading the input failed or it was not UTF-8
//!
//! ## Examples
//!
//! ```rust
//! use tblparse::{from_str, Error};
//!
//! let result = from_str("\"never closed");
//! assert!(matches!(result, Err(Error::UnterminatedQuote { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while parsing tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading
    #[error("IO error: {0}")]
    Io(String),

    /// Input bytes were not valid UTF-8
    #[error("Invalid UTF-8 after byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },

    /// A delimited token reached end of input before its closing quote
    #[error("Unterminated quoted token at line {line}, column {col}: missing closing {delimiter}")]
    UnterminatedQuote {
        delimiter: char,
        line: usize,
        col: usize,
    },

    /// A backslash was the last character of the input inside a quoted token
    #[error("Dangling escape at line {line}, column {col}: '\\' at end of input")]
    DanglingEscape { line: usize, col: usize },

    /// Block nesting went deeper than the configured limit
    #[error("Nesting depth limit of {max} exceeded at line {line}, column {col}")]
    DepthLimitExceeded { max: usize, line: usize, col: usize },

    /// A schema spec embedded in the data could not be parsed
    #[error("Invalid schema {spec:?}: {source}")]
    InvalidSchema {
        spec: String,
        #[source]
        source: Box<Error>,
    },

    /// A value could not be converted back into a block tree
    #[error("Invalid block tree: {0}")]
    InvalidTree(String),
}

impl Error {
    /// Creates an unterminated-quote error for the given delimiter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tblparse::Error;
    ///
    /// let err = Error::unterminated_quote('"', 3, 7);
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn unterminated_quote(delimiter: char, line: usize, col: usize) -> Self {
        Error::UnterminatedQuote {
            delimiter,
            line,
            col,
        }
    }

    /// Creates a dangling-escape error.
    pub fn dangling_escape(line: usize, col: usize) -> Self {
        Error::DanglingEscape { line, col }
    }

    /// Creates a depth-limit error.
    pub fn depth_limit(max: usize, line: usize, col: usize) -> Self {
        Error::DepthLimitExceeded { max, line, col }
    }

    /// Wraps an error raised while parsing a schema spec taken from the data.
    pub fn invalid_schema(spec: &str, source: Error) -> Self {
        Error::InvalidSchema {
            spec: spec.to_string(),
            source: Box::new(source),
        }
    }

    /// Creates an error for a value that is not shaped like a block.
    pub fn invalid_tree<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidTree(msg.to_string())
    }

    /// Creates an I/O error for reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
