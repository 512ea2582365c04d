use super::epoch::Timestamp;
use super::error::TelemetryError;
use super::nearest::nearest;
use super::types::StateVector;

/// State vectors of one feed fetch, in feed order. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct StateVectorStore {
    samples: Vec<StateVector>,
}

impl StateVectorStore {
    pub fn new(samples: Vec<StateVector>) -> Self {
        Self { samples }
    }

    pub fn nearest(&self, target: Timestamp) -> Result<&StateVector, TelemetryError> {
        nearest(&self.samples, target)
    }
}
