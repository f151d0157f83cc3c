//! Error types for element resolution, spec construction, and value access.

use std::error::Error;
use std::fmt;

use crate::element::ElementType;

/// Errors raised by the core tensor types.
///
/// None of these involve I/O. The reader wraps them in its own error type
/// when they surface while decoding a stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TensorError {
    /// A type token is not one of the recognized element types.
    UnknownType {
        /// The token as it appeared in the header.
        token: String,
    },
    /// An index fell outside `[0, len)`.
    IndexOutOfRange {
        /// The requested index (signed, so negative requests are reported as given).
        index: i128,
        /// Number of scalars in the tensor.
        len: usize,
    },
    /// Typed extraction requested a different element type than the spec declares.
    TypeMismatch {
        /// The element type the caller asked for.
        expected: ElementType,
        /// The element type declared by the spec.
        found: ElementType,
    },
    /// A byte buffer does not match the spec's byte length.
    BufferLength {
        /// Bytes required by the spec.
        expected: usize,
        /// Bytes supplied.
        got: usize,
    },
    /// `numel * width` does not fit in `usize`.
    SizeOverflow {
        /// Name of the offending spec.
        name: String,
    },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType { token } => write!(f, "unknown element type '{token}'"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range [0..{len})")
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "element type mismatch: requested {expected}, tensor holds {found}")
            }
            Self::BufferLength { expected, got } => {
                write!(f, "buffer length mismatch: expected {expected} bytes, got {got}")
            }
            Self::SizeOverflow { name } => {
                write!(f, "byte size of tensor '{name}' overflows usize")
            }
        }
    }
}

impl Error for TensorError {}
