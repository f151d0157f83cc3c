//! Low-level reads against the byte source: tensor payloads, delimiter
//! lines, and end-of-input probing.
//!
//! Tensor payloads are raw element bytes packed back to back with no
//! padding and no length prefix; the header is the only schema.

use std::io::{BufRead, ErrorKind, Read};
use std::sync::Arc;

use tensorlog_core::{ByteOrder, TensorSpec, TensorValue};

use crate::error::LogError;

/// Whether the source has no more bytes.
///
/// Only meaningful at an observation or section boundary, where running
/// out of input is a clean end rather than a truncation.
pub fn at_eof(r: &mut dyn BufRead) -> Result<bool, LogError> {
    loop {
        match r.fill_buf() {
            Ok(buf) => return Ok(buf.is_empty()),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(LogError::Io(e)),
        }
    }
}

/// Initial buffer reservation for a tensor payload. The buffer grows only
/// as bytes actually arrive, so a huge declared shape over a short source
/// cannot allocate more than the source holds.
const INITIAL_PAYLOAD_CAPACITY: usize = 64 * 1024;

/// Read exactly `spec.byte_len()` bytes and bind them to `spec`.
///
/// A short read is a [`LogError::TruncatedTensor`]; no partial value is
/// returned and the cursor is left wherever the source stopped.
pub fn read_tensor(
    r: &mut dyn Read,
    spec: &Arc<TensorSpec>,
    order: ByteOrder,
) -> Result<TensorValue, LogError> {
    let expected = spec.byte_len();
    let mut buf = Vec::with_capacity(expected.min(INITIAL_PAYLOAD_CAPACITY));
    let got = r.take(expected as u64).read_to_end(&mut buf)?;
    if got < expected {
        return Err(LogError::TruncatedTensor {
            name: spec.name().to_string(),
            expected,
            got,
        });
    }
    Ok(TensorValue::from_bytes(Arc::clone(spec), buf, order)?)
}

/// Consume one line up to and including `\n`, discarding its content.
///
/// Returns the number of bytes consumed; 0 means the source was exhausted.
pub fn skip_line(r: &mut dyn BufRead) -> Result<usize, LogError> {
    let mut consumed = 0;
    loop {
        let (done, used) = {
            let available = match r.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(LogError::Io(e)),
            };
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => (true, i + 1),
                None => (available.is_empty(), available.len()),
            }
        };
        r.consume(used);
        consumed += used;
        if done {
            return Ok(consumed);
        }
    }
}
