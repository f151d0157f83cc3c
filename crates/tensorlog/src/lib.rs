//! tensorlog: a streaming decoder for self-describing binary tensor logs.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the tensorlog sub-crates. For most users, adding `tensorlog` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tensorlog::prelude::*;
//!
//! let mut log = Vec::new();
//! log.extend_from_slice(
//!     b"{\"features\":[{\"name\":\"f\",\"port\":0,\"shape\":[2],\"type\":\"int32_t\"}]}\n",
//! );
//! log.extend_from_slice(&[1, 0, 0, 0, 2, 0, 0, 0]);
//! log.push(b'\n');
//!
//! let stream = ObservationStream::new(log.as_slice(), ReaderConfig::default()).unwrap();
//! for obs in stream {
//!     let obs = obs.unwrap();
//!     assert_eq!(obs.features[0].to_string(), "f: 1,2");
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tensorlog-core` | Element types, specs, tensor values |
//! | [`reader`] | `tensorlog-reader` | Header parsing and observation streams |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Element types, tensor specs, and decoded values (`tensorlog-core`).
pub use tensorlog_core as types;

/// Header parsing, tensor decoding, and observation streams (`tensorlog-reader`).
///
/// Open files with [`reader::read_stream`]; wrap an already-open source
/// with [`reader::ObservationStream::new`].
pub use tensorlog_reader as reader;

/// Common imports for typical tensorlog usage.
pub mod prelude {
    pub use tensorlog_core::{ByteOrder, Element, ElementType, Scalar, Shape, TensorSpec, TensorValue};

    pub use tensorlog_core::TensorError;
    pub use tensorlog_reader::LogError;

    pub use tensorlog_reader::{
        parse_header, read_sections, read_stream, read_stream_with, Header, Observation,
        ObservationStream, ReaderConfig, StreamMode,
    };
}
