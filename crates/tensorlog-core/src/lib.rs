//! Core types for decoding tensorlog streams.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the element type registry, tensor specifications, and the owned
//! [`TensorValue`] that the reader materializes from raw bytes.
//!
//! Nothing here performs I/O; the stream-level machinery lives in
//! `tensorlog-reader`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod error;
pub mod spec;
pub mod value;

pub use element::{ByteOrder, Element, ElementType, Scalar};
pub use error::TensorError;
pub use spec::{Shape, TensorSpec};
pub use value::{Scalars, TensorValue};
