use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons an email field is rejected by [`crate::domain::validate_email`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("email address is empty")]
    Empty,

    #[error("invalid email format: missing '@' separator")]
    MissingSeparator,

    #[error("invalid email format: empty local part")]
    EmptyLocalPart,

    #[error("invalid email format: empty domain")]
    EmptyDomain,

    #[error("invalid email format: multiple '@' symbols")]
    MultipleSeparators,
}

/// Why a record could not be decoded.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("bare '\"' in non-quoted field")]
    BareQuote,

    #[error("extraneous or missing '\"' in quoted field")]
    TextAfterQuote,

    #[error("quoted field is never closed")]
    UnterminatedQuote,

    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

/// Failures that abort an aggregation pass.
///
/// `record` numbers count decoded records from 1 with the header included.
/// Blank lines are not counted and a quoted field spanning several lines
/// belongs to a single record, so they are not physical line numbers.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open customer file {path:?}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("customer file has no readable header row")]
    EmptyOrUnreadableSource {
        #[source]
        source: Option<RecordError>,
    },

    #[error("malformed CSV in record {row}: {source}")]
    MalformedRecord {
        row: u64,
        #[source]
        source: RecordError,
    },

    #[error("insufficient columns in record {row}: expected at least {expected}, got {actual}")]
    InsufficientColumns {
        row: u64,
        expected: usize,
        actual: usize,
    },

    #[error("invalid email in record {row} ({value:?}): {source}")]
    InvalidEmail {
        row: u64,
        value: String,
        #[source]
        source: EmailError,
    },
}

impl ImportError {
    /// Row-level rejections that the lenient policy may skip over.
    pub fn is_row_rejection(&self) -> bool {
        matches!(
            self,
            ImportError::InsufficientColumns { .. } | ImportError::InvalidEmail { .. }
        )
    }
}

pub type ImportResult<T> = std::result::Result<T, ImportError>;
