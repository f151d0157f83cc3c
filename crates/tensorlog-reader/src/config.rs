//! Reader configuration.

use tensorlog_core::ByteOrder;

/// Default cap on the length of one header line: 16 MiB.
pub const DEFAULT_MAX_HEADER_LEN: usize = 16 * 1024 * 1024;

/// How headers are interleaved with observations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamMode {
    /// One header at the start of the stream, then observations until EOF.
    #[default]
    SingleSection,
    /// A fresh header precedes every observation. Sections may change
    /// shape between observations.
    MultiSection,
}

/// Configuration for an [`ObservationStream`](crate::ObservationStream).
///
/// # Examples
///
/// ```
/// use tensorlog_reader::{ReaderConfig, StreamMode};
/// use tensorlog_core::ByteOrder;
///
/// let config = ReaderConfig::default()
///     .with_mode(StreamMode::MultiSection)
///     .with_byte_order(ByteOrder::Big);
/// assert_eq!(config.mode, StreamMode::MultiSection);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Section layout. Default: [`StreamMode::SingleSection`].
    pub mode: StreamMode,
    /// Byte order of tensor payloads. Default: little-endian.
    pub byte_order: ByteOrder,
    /// Longest accepted header line in bytes, terminator included.
    /// Default: [`DEFAULT_MAX_HEADER_LEN`].
    pub max_header_len: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            mode: StreamMode::SingleSection,
            byte_order: ByteOrder::Little,
            max_header_len: DEFAULT_MAX_HEADER_LEN,
        }
    }
}

impl ReaderConfig {
    /// Set the section layout.
    pub fn with_mode(mut self, mode: StreamMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the payload byte order.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Set the header line length cap.
    pub fn with_max_header_len(mut self, max_header_len: usize) -> Self {
        self.max_header_len = max_header_len;
        self
    }
}
