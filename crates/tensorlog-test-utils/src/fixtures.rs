//! Log fixture builders.
//!
//! - [`FeatureDef`] describes one tensor slot for a generated header.
//! - [`LogBuilder`] writes the header line and accumulates observations.
//! - [`ObservationBuilder`] appends payload bytes and the delimiter line.
//!
//! Payload sizes are not checked against the header, so tests can build
//! deliberately inconsistent logs.

use serde_json::{json, Value};
use tensorlog_core::{ByteOrder, Element, ElementType};

/// One tensor slot in a generated header.
#[derive(Clone, Debug)]
pub struct FeatureDef {
    pub name: String,
    pub port: i64,
    pub shape: Vec<usize>,
    pub element_type: ElementType,
}

impl FeatureDef {
    pub fn new(name: impl Into<String>, port: i64, shape: &[usize], ty: ElementType) -> Self {
        Self {
            name: name.into(),
            port,
            shape: shape.to_vec(),
            element_type: ty,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "port": self.port,
            "shape": self.shape,
            "type": self.element_type.token(),
        })
    }
}

/// Builds a complete single-section log in memory.
pub struct LogBuilder {
    features: Vec<FeatureDef>,
    score: Option<FeatureDef>,
    advice: Option<FeatureDef>,
    order: ByteOrder,
    body: Vec<u8>,
    observations: usize,
}

impl LogBuilder {
    pub fn new(features: Vec<FeatureDef>) -> Self {
        Self {
            features,
            score: None,
            advice: None,
            order: ByteOrder::Little,
            body: Vec::new(),
            observations: 0,
        }
    }

    pub fn with_score(mut self, score: FeatureDef) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_advice(mut self, advice: FeatureDef) -> Self {
        self.advice = Some(advice);
        self
    }

    /// Byte order for payloads appended after this call.
    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    /// The header JSON line, terminated by `\n`.
    pub fn header_line(&self) -> Vec<u8> {
        let mut header = json!({
            "features": self.features.iter().map(FeatureDef::to_json).collect::<Vec<_>>(),
        });
        if let Some(score) = &self.score {
            header["score"] = score.to_json();
        }
        if let Some(advice) = &self.advice {
            header["advice"] = advice.to_json();
        }
        let mut line = header.to_string().into_bytes();
        line.push(b'\n');
        line
    }

    /// Append one observation. The closure pushes payloads in feature order.
    pub fn observation<F>(&mut self, f: F) -> &mut Self
    where
        F: for<'a> FnOnce(&'a mut ObservationBuilder) -> &'a mut ObservationBuilder,
    {
        let mut obs = ObservationBuilder {
            order: self.order,
            payload: Vec::new(),
            delimiter: Vec::new(),
        };
        f(&mut obs);
        self.body.extend_from_slice(&obs.payload);
        self.body.extend_from_slice(&obs.delimiter);
        self.body.push(b'\n');
        self.observations += 1;
        self
    }

    pub fn observation_count(&self) -> usize {
        self.observations
    }

    /// Header line followed by every observation.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut out = self.header_line();
        out.extend_from_slice(&self.body);
        out
    }
}

/// Payload bytes of one observation.
pub struct ObservationBuilder {
    order: ByteOrder,
    payload: Vec<u8>,
    delimiter: Vec<u8>,
}

impl ObservationBuilder {
    /// Append a tensor's elements in the builder's byte order.
    pub fn push<T: Element>(&mut self, values: &[T]) -> &mut Self {
        for &v in values {
            v.encode(&mut self.payload, self.order);
        }
        self
    }

    pub fn push_i32s(&mut self, values: &[i32]) -> &mut Self {
        self.push(values)
    }

    pub fn push_i64s(&mut self, values: &[i64]) -> &mut Self {
        self.push(values)
    }

    pub fn push_u8s(&mut self, values: &[u8]) -> &mut Self {
        self.push(values)
    }

    pub fn push_f32s(&mut self, values: &[f32]) -> &mut Self {
        self.push(values)
    }

    pub fn push_f64s(&mut self, values: &[f64]) -> &mut Self {
        self.push(values)
    }

    /// Append bytes verbatim.
    pub fn push_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.payload.extend_from_slice(bytes);
        self
    }

    /// Text of the delimiter line, without the terminating `\n`.
    pub fn delimiter(&mut self, text: &[u8]) -> &mut Self {
        self.delimiter = text.to_vec();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_line_lists_features_in_order() {
        let log = LogBuilder::new(vec![
            FeatureDef::new("b", 1, &[3], ElementType::Float32),
            FeatureDef::new("a", 0, &[], ElementType::Int8),
        ])
        .with_score(FeatureDef::new("reward", 2, &[1], ElementType::Float64));
        let line = log.header_line();
        assert_eq!(line.last(), Some(&b'\n'));
        let v: Value = serde_json::from_slice(&line).unwrap();
        assert_eq!(v["features"][0]["name"], "b");
        assert_eq!(v["features"][1]["type"], "int8_t");
        assert_eq!(v["score"]["shape"], json!([1]));
        assert!(v.get("advice").is_none());
    }

    #[test]
    fn observation_appends_payload_and_delimiter() {
        let mut log = LogBuilder::new(vec![FeatureDef::new("f", 0, &[2], ElementType::Int32)]);
        log.observation(|o| o.push_i32s(&[1, 2]));
        assert_eq!(log.observation_count(), 1);
        let header_len = log.header_line().len();
        let bytes = log.into_bytes();
        assert_eq!(&bytes[header_len..], &[1, 0, 0, 0, 2, 0, 0, 0, b'\n']);
    }
}
