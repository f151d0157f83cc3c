//! Benchmark profiles for the tensorlog decoder.
//!
//! - [`compiler_profile`]: a header shaped like an inliner feature log
//!   (a dozen scalar `int64_t` features) with `n` observations
//! - [`wide_profile`]: one large `float` tensor per observation

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tensorlog_core::ElementType;
use tensorlog_test_utils::{FeatureDef, LogBuilder};

/// Feature names of [`compiler_profile`].
pub const COMPILER_FEATURES: [&str; 12] = [
    "callee_basic_block_count",
    "callsite_height",
    "node_count",
    "nr_ctant_params",
    "cost_estimate",
    "edge_count",
    "caller_users",
    "caller_conditionally_executed_blocks",
    "caller_basic_block_count",
    "callee_conditionally_executed_blocks",
    "callee_users",
    "inlining_default",
];

/// `n` observations of twelve scalar `int64_t` features.
pub fn compiler_profile(n: usize) -> Vec<u8> {
    let features = COMPILER_FEATURES
        .iter()
        .enumerate()
        .map(|(port, name)| FeatureDef::new(*name, port as i64, &[], ElementType::Int64))
        .collect();
    let mut log = LogBuilder::new(features)
        .with_score(FeatureDef::new("reward", 12, &[], ElementType::Float32));
    for i in 0..n as i64 {
        log.observation(|o| {
            for f in 0..COMPILER_FEATURES.len() as i64 {
                o.push_i64s(&[i * 31 + f]);
            }
            o
        });
    }
    log.into_bytes()
}

/// `n` observations of a single `float` tensor with `width` elements.
pub fn wide_profile(n: usize, width: usize) -> Vec<u8> {
    let mut log = LogBuilder::new(vec![FeatureDef::new(
        "embedding",
        0,
        &[width],
        ElementType::Float32,
    )]);
    let row: Vec<f32> = (0..width).map(|i| i as f32 * 0.5).collect();
    for _ in 0..n {
        log.observation(|o| o.push_f32s(&row));
    }
    log.into_bytes()
}
