//! Test utilities for tensorlog development.
//!
//! The decoder never writes logs, so tests and benches build their input
//! with [`LogBuilder`]: a header line from a list of [`FeatureDef`]s
//! followed by observations assembled through [`ObservationBuilder`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{FeatureDef, LogBuilder, ObservationBuilder};

/// Header line (with terminator) for a single `int32_t` feature `f` of shape `[2]`.
pub const PAIR_HEADER: &[u8] =
    b"{\"features\":[{\"name\":\"f\",\"port\":0,\"shape\":[2],\"type\":\"int32_t\"}]}\n";
