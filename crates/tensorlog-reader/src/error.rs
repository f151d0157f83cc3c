//! Error types for header parsing and stream decoding.

use std::fmt;
use std::io;

use tensorlog_core::TensorError;

/// Errors that can occur while opening or decoding a tensor log.
///
/// A clean end of input is never an error; it is reported as `Ok(None)`
/// by [`ObservationStream::next_observation`](crate::ObservationStream::next_observation).
#[derive(Debug)]
pub enum LogError {
    /// An I/O error occurred while reading the source.
    Io(io::Error),
    /// A header names a type token that is not in the element type registry.
    UnknownType {
        /// The unrecognized token.
        token: String,
    },
    /// The header line is not valid JSON, or a required field is missing or mistyped.
    MalformedHeader {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The source ended inside a tensor payload.
    TruncatedTensor {
        /// Name of the tensor being read.
        name: String,
        /// Bytes the spec demands.
        expected: usize,
        /// Bytes actually available.
        got: usize,
    },
    /// A core tensor invariant was violated.
    Tensor(TensorError),
}

impl LogError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedHeader {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnknownType { token } => write!(f, "unknown element type '{token}' in header"),
            Self::MalformedHeader { detail } => write!(f, "malformed header: {detail}"),
            Self::TruncatedTensor {
                name,
                expected,
                got,
            } => write!(
                f,
                "truncated tensor '{name}': expected {expected} bytes, got {got}"
            ),
            Self::Tensor(e) => write!(f, "tensor error: {e}"),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Tensor(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LogError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<TensorError> for LogError {
    fn from(e: TensorError) -> Self {
        match e {
            TensorError::UnknownType { token } => Self::UnknownType { token },
            other => Self::Tensor(other),
        }
    }
}
