//! hdldoc Error Types
//!
//! Two families of errors exist:
//!
//! 1. [`MalformedConstruct`] - a recognized opening pattern whose block
//!    cannot be bounded. Always recoverable: the dispatcher logs it and
//!    passes the opening line through as a comment.
//! 2. [`TranslateError`] - I/O failures around the translator. Fatal for
//!    the CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Kind of multi-line construct an extractor was bounding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructKind {
    Procedural,
    Generate,
    Function,
    Task,
    TypedefEnum,
}

impl std::fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructKind::Procedural => write!(f, "procedural block"),
            ConstructKind::Generate => write!(f, "generate region"),
            ConstructKind::Function => write!(f, "function"),
            ConstructKind::Task => write!(f, "task"),
            ConstructKind::TypedefEnum => write!(f, "typedef enum"),
        }
    }
}

/// A construct whose delimiters could not be balanced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedConstruct {
    /// Input ended before the closing delimiter was found
    #[error("{kind} opened at line {line} is never closed")]
    Unterminated { kind: ConstructKind, line: usize },

    /// A closing delimiter appeared with nothing open
    #[error("{kind} opened at line {line} closes more than it opens at line {at}")]
    NegativeDepth {
        kind: ConstructKind,
        line: usize,
        at: usize,
    },
}

/// Fatal errors surfaced to the caller of the translator
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("failed to read '{}': {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read standard input: {0}")]
    ReadStdin(#[source] io::Error),

    #[error("failed to write output: {0}")]
    WriteOutput(#[source] io::Error),
}

/// Result type for hdldoc I/O operations
pub type Result<T> = std::result::Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_messages() {
        let err = MalformedConstruct::Unterminated {
            kind: ConstructKind::Generate,
            line: 12,
        };
        assert_eq!(err.to_string(), "generate region opened at line 12 is never closed");

        let err = MalformedConstruct::NegativeDepth {
            kind: ConstructKind::Procedural,
            line: 3,
            at: 4,
        };
        assert_eq!(
            err.to_string(),
            "procedural block opened at line 3 closes more than it opens at line 4"
        );
    }

    #[test]
    fn test_read_input_message() {
        let err = TranslateError::ReadInput {
            path: PathBuf::from("missing.sv"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read 'missing.sv': not found");
    }
}
