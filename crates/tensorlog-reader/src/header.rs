//! Section header parsing.
//!
//! A header is a single line of UTF-8 JSON:
//!
//! ```text
//! {"features": [{"name": str, "port": int, "shape": [int...], "type": str}, ...],
//!  "score"?: {...}, "advice"?: {...}}
//! ```
//!
//! The order of `features` is the binary read order of every observation
//! in the section. Unknown top-level keys are ignored.

use std::io::{BufRead, Read};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use tensorlog_core::{ElementType, Shape, TensorSpec};

use crate::config::ReaderConfig;
use crate::error::LogError;

#[derive(Deserialize)]
struct RawHeader {
    features: Vec<RawSpec>,
    #[serde(default)]
    score: Option<RawSpec>,
    #[serde(default)]
    advice: Option<RawSpec>,
}

#[derive(Deserialize)]
struct RawSpec {
    name: String,
    port: i64,
    shape: Vec<serde_json::Number>,
    #[serde(rename = "type")]
    element_type: String,
}

/// Parsed metadata for one section of the log.
///
/// Specs are shared behind `Arc` so decoded values can keep a handle to
/// the spec they were read against. Each parsed header owns fresh `Arc`s;
/// specs from an earlier section are never reused.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    features: Vec<Arc<TensorSpec>>,
    score: Option<Arc<TensorSpec>>,
    advice: Option<Arc<TensorSpec>>,
    by_name: IndexMap<String, usize>,
}

impl Header {
    /// Build a header from already constructed specs.
    ///
    /// Fails if two features share a name.
    pub fn new(
        features: Vec<TensorSpec>,
        score: Option<TensorSpec>,
        advice: Option<TensorSpec>,
    ) -> Result<Self, LogError> {
        let mut by_name = IndexMap::with_capacity(features.len());
        for (i, spec) in features.iter().enumerate() {
            if by_name.insert(spec.name().to_string(), i).is_some() {
                return Err(LogError::malformed(format!(
                    "duplicate feature name '{}'",
                    spec.name()
                )));
            }
        }
        Ok(Self {
            features: features.into_iter().map(Arc::new).collect(),
            score: score.map(Arc::new),
            advice: advice.map(Arc::new),
            by_name,
        })
    }

    /// Feature specs in declared (binary read) order.
    pub fn features(&self) -> &[Arc<TensorSpec>] {
        &self.features
    }

    /// The score spec, if the header declares one.
    pub fn score(&self) -> Option<&Arc<TensorSpec>> {
        self.score.as_ref()
    }

    /// The advice spec, if the header declares one.
    pub fn advice(&self) -> Option<&Arc<TensorSpec>> {
        self.advice.as_ref()
    }

    /// Position of the named feature in the read order.
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Look up a feature spec by name.
    pub fn feature(&self, name: &str) -> Option<&Arc<TensorSpec>> {
        self.feature_index(name).map(|i| &self.features[i])
    }

    /// Total payload bytes of one observation (all features, no delimiter).
    pub fn observation_byte_len(&self) -> usize {
        self.features.iter().map(|s| s.byte_len()).sum()
    }
}

fn coerce_dim(spec_name: &str, n: &serde_json::Number) -> Result<usize, LogError> {
    if let Some(u) = n.as_u64() {
        return usize::try_from(u).map_err(|_| {
            LogError::malformed(format!("shape of '{spec_name}': dimension {u} too large"))
        });
    }
    match n.as_f64() {
        // Fractional dimensions truncate toward zero.
        Some(f) if f.is_finite() && f >= 0.0 && f < usize::MAX as f64 => Ok(f as usize),
        _ => Err(LogError::malformed(format!(
            "shape of '{spec_name}': dimension {n} is not a non-negative integer"
        ))),
    }
}

fn build_spec(raw: RawSpec) -> Result<TensorSpec, LogError> {
    let element_type = ElementType::resolve(&raw.element_type)?;
    let dims = raw
        .shape
        .iter()
        .map(|n| coerce_dim(&raw.name, n))
        .collect::<Result<Vec<_>, _>>()?;
    let spec = TensorSpec::new(raw.name, raw.port, Shape::from(dims), element_type)?;
    Ok(spec)
}

/// Parse one header line. A single trailing `\n` or `\r\n` is ignored.
///
/// # Examples
///
/// ```
/// use tensorlog_reader::parse_header;
///
/// let header = parse_header(
///     br#"{"features":[{"name":"f","port":0,"shape":[2],"type":"int32_t"}]}"#,
/// )
/// .unwrap();
/// assert_eq!(header.features().len(), 1);
/// assert_eq!(header.features()[0].byte_len(), 8);
/// assert!(header.score().is_none());
/// ```
pub fn parse_header(line: &[u8]) -> Result<Header, LogError> {
    let line = strip_line_terminator(line);
    let text = std::str::from_utf8(line)
        .map_err(|e| LogError::malformed(format!("header is not valid UTF-8: {e}")))?;
    let raw: RawHeader =
        serde_json::from_str(text).map_err(|e| LogError::malformed(e.to_string()))?;

    let features = raw
        .features
        .into_iter()
        .map(build_spec)
        .collect::<Result<Vec<_>, _>>()?;
    let score = raw.score.map(build_spec).transpose()?;
    let advice = raw.advice.map(build_spec).transpose()?;

    let header = Header::new(features, score, advice)?;
    tracing::debug!(
        features = header.features().len(),
        has_score = header.score().is_some(),
        has_advice = header.advice().is_some(),
        observation_bytes = header.observation_byte_len(),
        "parsed section header"
    );
    Ok(header)
}

/// Consume exactly one line from `r` and parse it as a header.
///
/// An exhausted source at this point is a malformed header, not a clean end.
pub fn read_header(r: &mut dyn BufRead, config: &ReaderConfig) -> Result<Header, LogError> {
    let limit = (config.max_header_len as u64).saturating_add(1);
    let mut line = Vec::new();
    r.take(limit).read_until(b'\n', &mut line)?;
    if line.is_empty() {
        return Err(LogError::malformed("stream ended before header line"));
    }
    if line.len() > config.max_header_len {
        return Err(LogError::malformed(format!(
            "header line exceeds {} bytes",
            config.max_header_len
        )));
    }
    parse_header(&line)
}

fn strip_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Header, LogError> {
        parse_header(s.as_bytes())
    }

    #[test]
    fn parses_features_score_and_advice() {
        let h = parse(
            r#"{"features":[
                {"name":"a","port":0,"shape":[2,3],"type":"float"},
                {"name":"b","port":1,"shape":[],"type":"int64_t"}],
              "score":{"name":"reward","port":2,"shape":[1],"type":"double"},
              "advice":{"name":"decision","port":3,"shape":[1],"type":"uint8_t"}}"#,
        )
        .unwrap();
        assert_eq!(h.features().len(), 2);
        assert_eq!(h.features()[0].byte_len(), 24);
        assert_eq!(h.features()[1].numel(), 1);
        assert_eq!(h.score().unwrap().name(), "reward");
        assert_eq!(h.advice().unwrap().element_type(), ElementType::UInt8);
        assert_eq!(h.feature_index("b"), Some(1));
        assert_eq!(h.observation_byte_len(), 32);
    }

    #[test]
    fn features_keep_declared_order() {
        let h = parse(
            r#"{"score":{"name":"s","port":9,"shape":[1],"type":"float"},
               "features":[
                {"name":"c","port":2,"shape":[1],"type":"float"},
                {"name":"a","port":0,"shape":[1],"type":"float"},
                {"name":"b","port":1,"shape":[1],"type":"float"}]}"#,
        )
        .unwrap();
        let names: Vec<_> = h.features().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn unknown_type_is_distinct_error() {
        let err = parse(r#"{"features":[{"name":"f","port":0,"shape":[1],"type":"bool"}]}"#)
            .unwrap_err();
        assert!(matches!(err, LogError::UnknownType { ref token } if token == "bool"));
    }

    #[test]
    fn missing_required_fields_rejected() {
        for bad in [
            r#"{"features":[{"port":0,"shape":[1],"type":"float"}]}"#,
            r#"{"features":[{"name":"f","shape":[1],"type":"float"}]}"#,
            r#"{"features":[{"name":"f","port":0,"type":"float"}]}"#,
            r#"{"features":[{"name":"f","port":0,"shape":[1]}]}"#,
            r#"{"score":{"name":"f","port":0,"shape":[1],"type":"float"}}"#,
        ] {
            let err = parse(bad).unwrap_err();
            assert!(
                matches!(err, LogError::MalformedHeader { .. }),
                "{bad} gave {err}"
            );
        }
    }

    #[test]
    fn mistyped_fields_rejected() {
        for bad in [
            r#"{"features":[{"name":1,"port":0,"shape":[1],"type":"float"}]}"#,
            r#"{"features":[{"name":"f","port":"0","shape":[1],"type":"float"}]}"#,
            r#"{"features":[{"name":"f","port":0,"shape":["1"],"type":"float"}]}"#,
            r#"{"features":[{"name":"f","port":0,"shape":[-1],"type":"float"}]}"#,
            r#"{"features":{"name":"f"}}"#,
            r#"not json"#,
            r#"[]"#,
        ] {
            assert!(matches!(
                parse(bad),
                Err(LogError::MalformedHeader { .. })
            ));
        }
    }

    #[test]
    fn fractional_dims_truncate() {
        let h = parse(r#"{"features":[{"name":"f","port":0,"shape":[2.9, 3],"type":"int8_t"}]}"#)
            .unwrap();
        assert_eq!(h.features()[0].shape().dims(), &[2, 3]);
    }

    #[test]
    fn duplicate_feature_names_rejected() {
        let err = parse(
            r#"{"features":[
                {"name":"f","port":0,"shape":[1],"type":"float"},
                {"name":"f","port":1,"shape":[1],"type":"float"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LogError::MalformedHeader { .. }));
    }

    #[test]
    fn null_score_treated_as_absent() {
        let h = parse(r#"{"features":[],"score":null}"#).unwrap();
        assert!(h.features().is_empty());
        assert!(h.score().is_none());
    }

    #[test]
    fn read_header_consumes_exactly_one_line() {
        let data = b"{\"features\":[]}\r\nrest";
        let mut cursor = &data[..];
        read_header(&mut cursor, &ReaderConfig::default()).unwrap();
        assert_eq!(cursor, b"rest");
    }

    #[test]
    fn read_header_on_empty_source_fails() {
        let mut cursor: &[u8] = &[];
        let err = read_header(&mut cursor, &ReaderConfig::default()).unwrap_err();
        assert!(matches!(err, LogError::MalformedHeader { .. }));
    }

    #[test]
    fn overlong_header_rejected() {
        let data = b"{\"features\":[]}\n";
        let mut cursor = &data[..];
        let config = ReaderConfig::default().with_max_header_len(8);
        let err = read_header(&mut cursor, &config).unwrap_err();
        assert!(matches!(err, LogError::MalformedHeader { .. }));
    }
}
