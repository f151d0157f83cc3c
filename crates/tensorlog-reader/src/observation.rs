//! The unit of output produced by an [`ObservationStream`](crate::ObservationStream).

use tensorlog_core::TensorValue;

/// One decoded observation: every feature tensor of a section, in header order.
///
/// `observation_id` and `score` are part of the record shape but the
/// stream never fills them; the log layout carries neither per
/// observation. `context` is whatever the stream was threading when the
/// observation was read.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Context name threaded through the stream.
    pub context: Option<String>,
    /// Observation identifier. Always `None` from the built-in streams.
    pub observation_id: Option<u64>,
    /// Feature values in header-declared order.
    pub features: Vec<TensorValue>,
    /// Score value. Always `None` from the built-in streams.
    pub score: Option<TensorValue>,
}

impl Observation {
    /// Look up a feature value by tensor name.
    pub fn feature(&self, name: &str) -> Option<&TensorValue> {
        self.features.iter().find(|v| v.name() == name)
    }

    /// Split into the `(context, observation_id, features, score)` tuple.
    pub fn into_parts(
        self,
    ) -> (
        Option<String>,
        Option<u64>,
        Vec<TensorValue>,
        Option<TensorValue>,
    ) {
        (self.context, self.observation_id, self.features, self.score)
    }
}
