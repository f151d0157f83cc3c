//! Streaming decoder for tensorlog files.
//!
//! A tensorlog is what an instrumented compiler or runtime emits while it
//! records feature tensors for training: one JSON header line describing
//! the tensor layout, then an unbounded run of binary observations.
//!
//! # Architecture
//!
//! - [`parse_header`] / [`read_header`] turn one header line into a [`Header`]
//! - [`read_tensor`] materializes one [`TensorValue`](tensorlog_core::TensorValue)
//! - [`ObservationStream`] pulls one [`Observation`] at a time from any `BufRead`
//! - [`read_stream`] opens a file and owns it for the life of the stream
//!
//! # Format
//!
//! ```text
//! {"features":[...],"score"?:{...},"advice"?:{...}}\n     <- header
//! [feature 0 bytes][feature 1 bytes]...[feature N bytes]   <- observation
//! <delimiter line>\n
//! ...
//! ```
//!
//! Tensor bytes are packed back to back in header order with no padding.
//! In multi-section logs a fresh header precedes every observation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod error;
pub mod header;
pub mod observation;
pub mod stream;

pub use codec::read_tensor;
pub use config::{ReaderConfig, StreamMode, DEFAULT_MAX_HEADER_LEN};
pub use error::LogError;
pub use header::{parse_header, read_header, Header};
pub use observation::Observation;
pub use stream::{read_sections, read_stream, read_stream_with, ObservationStream};
