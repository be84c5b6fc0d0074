use std::{io, num};

use thiserror::Error;

use crate::diagnostic::Diagnostic;

/// Fatal failures of a single `parse` call.
///
/// Lines applied before the failing one are kept; nothing is rolled back.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read data")]
    ReadFailure {
        #[from]
        source: io::Error,
    },

    #[error("end of line while parsing section header name (line {line_number}, near {line:?})")]
    MalformedHeader { line_number: usize, line: String },

    #[error("key/value pair encountered before first section (line {line_number}, near {line:?})")]
    OrphanKeyValue { line_number: usize, line: String },

    #[error("fatal warning encountered: {0}")]
    FatalWarning(Diagnostic),
}

impl ParseError {
    /// 1-based line number of the offending line, if the error is tied to one.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match *self {
            Self::MalformedHeader { line_number, .. } | Self::OrphanKeyValue { line_number, .. } => {
                Some(line_number)
            }
            Self::FatalWarning(ref diagnostic) => Some(diagnostic.line_number),
            Self::ReadFailure { .. } => None,
        }
    }
}

/// Failures of the typed accessors. These never affect the parser state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("bad boolean value {value}")]
    BadBoolean { value: String },

    #[error("bad integer value {value}")]
    BadInt {
        value: String,
        #[source]
        source: num::ParseIntError,
    },

    #[error("bad float value {value}")]
    BadFloat {
        value: String,
        #[source]
        source: num::ParseFloatError,
    },

    #[error("expected a single value, found a list")]
    NotScalar,
}
