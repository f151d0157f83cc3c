//! Lazy, pull-based observation decoding.
//!
//! [`ObservationStream`] owns the byte source and decodes one observation
//! per pull: every feature tensor in header order, then one delimiter
//! line that is consumed without inspection. Running out of input at an
//! observation (or, in multi-section mode, header) boundary ends the
//! stream cleanly; running out anywhere else is an error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::Path;
use std::sync::Arc;

use crate::codec::{at_eof, read_tensor, skip_line};
use crate::config::{ReaderConfig, StreamMode};
use crate::error::LogError;
use crate::header::{read_header, Header};
use crate::observation::Observation;

/// Decodes observations from a `BufRead` source.
///
/// Generic over `R: BufRead` so tests can use `&[u8]` and production
/// code can use `BufReader<File>` or a pipe.
///
/// The stream is fused: after the end of input or the first error it
/// drops the source and every later pull returns `Ok(None)`.
///
/// # Examples
///
/// ```
/// use tensorlog_reader::{ObservationStream, ReaderConfig};
///
/// let mut log = Vec::new();
/// log.extend_from_slice(b"{\"features\":[{\"name\":\"f\",\"port\":0,\"shape\":[2],\"type\":\"int32_t\"}]}\n");
/// for _ in 0..2 {
///     log.extend_from_slice(&[1, 0, 0, 0, 2, 0, 0, 0]);
///     log.push(b'\n');
/// }
///
/// let mut stream = ObservationStream::new(log.as_slice(), ReaderConfig::default()).unwrap();
/// let first = stream.next_observation().unwrap().unwrap();
/// assert_eq!(first.features[0].to_vec::<i32>().unwrap(), vec![1, 2]);
/// assert!(stream.next_observation().unwrap().is_some());
/// assert!(stream.next_observation().unwrap().is_none());
/// ```
pub struct ObservationStream<R: BufRead> {
    source: Option<R>,
    header: Option<Arc<Header>>,
    context: Option<String>,
    config: ReaderConfig,
    observations_read: u64,
    sections_read: u64,
}

impl<R: BufRead> ObservationStream<R> {
    /// Wrap an already-open source.
    ///
    /// In [`StreamMode::SingleSection`] the leading header is parsed here,
    /// so a bad header fails construction. In [`StreamMode::MultiSection`]
    /// nothing is read until the first pull.
    pub fn new(mut source: R, config: ReaderConfig) -> Result<Self, LogError> {
        let (header, sections_read) = match config.mode {
            StreamMode::SingleSection => (Some(Arc::new(read_header(&mut source, &config)?)), 1),
            StreamMode::MultiSection => (None, 0),
        };
        Ok(Self {
            source: Some(source),
            header,
            context: None,
            config,
            observations_read: 0,
            sections_read,
        })
    }

    /// The most recently parsed header. `None` before the first pull of a
    /// multi-section stream.
    pub fn header(&self) -> Option<&Arc<Header>> {
        self.header.as_ref()
    }

    /// Context attached to the observations this stream emits.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Set the context threaded into subsequent observations.
    pub fn set_context(&mut self, context: Option<String>) {
        self.context = context;
    }

    /// Configuration this stream was built with.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Number of observations decoded so far.
    pub fn observations_read(&self) -> u64 {
        self.observations_read
    }

    /// Number of headers parsed so far.
    pub fn sections_read(&self) -> u64 {
        self.sections_read
    }

    /// Whether the stream has ended (cleanly or by error) and released its source.
    pub fn is_finished(&self) -> bool {
        self.source.is_none()
    }

    /// Give back the source, if the stream has not released it yet.
    pub fn into_inner(self) -> Option<R> {
        self.source
    }

    /// Decode the next observation, or `None` at a clean end of input.
    pub fn next_observation(&mut self) -> Result<Option<Observation>, LogError> {
        match self.pull() {
            Ok(Some(obs)) => {
                self.observations_read += 1;
                tracing::trace!(
                    index = self.observations_read - 1,
                    features = obs.features.len(),
                    "decoded observation"
                );
                Ok(Some(obs))
            }
            Ok(None) => {
                if self.source.take().is_some() {
                    tracing::debug!(
                        observations = self.observations_read,
                        sections = self.sections_read,
                        "end of tensor log"
                    );
                }
                Ok(None)
            }
            Err(e) => {
                self.source = None;
                tracing::debug!(
                    error = %e,
                    observations = self.observations_read,
                    "tensor log decode failed"
                );
                Err(e)
            }
        }
    }

    fn pull(&mut self) -> Result<Option<Observation>, LogError> {
        let source = match self.source.as_mut() {
            Some(s) => s,
            None => return Ok(None),
        };
        if at_eof(source)? {
            return Ok(None);
        }

        if self.config.mode == StreamMode::MultiSection {
            self.header = Some(Arc::new(read_header(source, &self.config)?));
            self.sections_read += 1;
        }
        let header = match &self.header {
            Some(h) => Arc::clone(h),
            None => return Err(LogError::malformed("no header parsed for this section")),
        };

        let mut features = Vec::with_capacity(header.features().len());
        for spec in header.features() {
            features.push(read_tensor(source, spec, self.config.byte_order)?);
        }
        skip_line(source)?;

        Ok(Some(Observation {
            context: self.context.clone(),
            observation_id: None,
            features,
            score: None,
        }))
    }
}

impl<R: BufRead> Iterator for ObservationStream<R> {
    type Item = Result<Observation, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_observation().transpose()
    }
}

impl<R: BufRead> FusedIterator for ObservationStream<R> {}

/// Open a log file, parse its header, and return the lazy observation stream.
///
/// The file is closed when the stream is drained, fails, or is dropped.
pub fn read_stream(path: impl AsRef<Path>) -> Result<ObservationStream<BufReader<File>>, LogError> {
    read_stream_with(path, ReaderConfig::default())
}

/// [`read_stream`] with an explicit configuration.
pub fn read_stream_with(
    path: impl AsRef<Path>,
    config: ReaderConfig,
) -> Result<ObservationStream<BufReader<File>>, LogError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    tracing::debug!(path = %path.display(), mode = ?config.mode, "opened tensor log");
    ObservationStream::new(BufReader::new(file), config)
}

/// Build a multi-section stream over an open source: a header precedes
/// every observation. Pulling stops at a clean end of input or whenever
/// the caller stops asking.
pub fn read_sections<R: BufRead>(
    source: R,
    config: ReaderConfig,
) -> Result<ObservationStream<R>, LogError> {
    ObservationStream::new(source, config.with_mode(StreamMode::MultiSection))
}
