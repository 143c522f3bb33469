//! Unified error types for smspack.
//!
//! This module provides a single [`SmspackError`] enum that covers all error
//! cases in the library. This design follows the pattern used by popular
//! crates like `reqwest`, `serde_json`, and `csv`.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for smspack operations.
///
/// This type is broadly used across the library for any operation that
/// may produce an error.
///
/// # Example
///
/// ```rust
/// use smspack::error::Result;
/// use smspack::SmsRecord;
///
/// fn my_function() -> Result<Vec<SmsRecord>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SmspackError>;

/// The error type for all smspack operations.
///
/// This enum represents all possible errors that can occur when converting
/// conversation exports. Each variant contains context about what went wrong
/// and, where applicable, the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SmspackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - An input stream cannot be read
    /// - The output sink rejects a write
    /// - An input file is not valid UTF-8
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A conversation document is missing a required field.
    ///
    /// Contains the specific field that was absent and, when known, the
    /// zero-based index of the input document it came from.
    #[error("Failed to parse conversation{}: {kind}", document.map(|i| format!(" #{i}")).unwrap_or_default())]
    Parse {
        /// What exactly was missing
        kind: ParseErrorKind,
        /// Zero-based index of the input document, if known
        document: Option<usize>,
    },

    /// A message datetime attribute could not be parsed.
    ///
    /// Datetime attributes are expected in RFC 3339 form with a UTC offset,
    /// e.g. `2013-11-08T23:31:04.911-08:00`. This error is fatal for the
    /// whole run: no partial document is emitted.
    #[error("Failed to parse datetime '{input}': {source}")]
    DateParse {
        /// The datetime string that was rejected
        input: String,
        /// The underlying chrono error
        #[source]
        source: chrono::ParseError,
    },

    /// The requested display timezone is not a known IANA zone name.
    #[error("Unknown timezone '{input}'. Expected an IANA name like 'America/New_York'")]
    UnknownTimezone {
        /// The name that failed to resolve
        input: String,
    },
}

/// Required document fields that can be absent.
///
/// The conversation parser defines required vs. optional fields explicitly;
/// a missing required field produces one of these instead of an ambiguous
/// empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The document has content but no `<title>` element.
    #[error("document has no title element")]
    MissingTitle,
    /// A message entry has no sender name element.
    #[error("message entry has no sender name")]
    MissingSender,
    /// A message entry has no precision datetime attribute.
    #[error("message entry has no datetime attribute")]
    MissingTimestamp,
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SmspackError {
    /// Creates a parse error for the given missing field.
    pub fn parse(kind: ParseErrorKind) -> Self {
        SmspackError::Parse {
            kind,
            document: None,
        }
    }

    /// Creates a datetime parse error.
    pub fn date_parse(input: impl Into<String>, source: chrono::ParseError) -> Self {
        SmspackError::DateParse {
            input: input.into(),
            source,
        }
    }

    /// Creates an unknown timezone error.
    pub fn unknown_timezone(input: impl Into<String>) -> Self {
        SmspackError::UnknownTimezone {
            input: input.into(),
        }
    }

    /// Attaches an input-document index to a parse error.
    ///
    /// Other variants pass through unchanged.
    #[must_use]
    pub fn with_document(self, index: usize) -> Self {
        match self {
            SmspackError::Parse { kind, .. } => SmspackError::Parse {
                kind,
                document: Some(index),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, SmspackError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, SmspackError::Parse { .. })
    }

    /// Returns `true` if this is a datetime parse error.
    pub fn is_date_parse(&self) -> bool {
        matches!(self, SmspackError::DateParse { .. })
    }

    /// Returns `true` if this is an unknown timezone error.
    pub fn is_unknown_timezone(&self) -> bool {
        matches!(self, SmspackError::UnknownTimezone { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
