use serde::Deserialize;

use crate::feed::error::FeedError;
use crate::telemetry::{parse_epoch, StateVector, StateVectorStore, TelemetryError};

/// A CCSDS Orbit Ephemeris Message, reduced to its single segment.
#[derive(Debug, Clone)]
pub struct OemDocument {
    pub header: Header,
    pub metadata: Metadata,
    pub comments: Vec<String>,
    pub state_vectors: Vec<StateVectorRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Header {
    pub creation_date: String,
    pub originator: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Metadata {
    pub object_name: String,
    pub object_id: String,
    pub center_name: String,
    pub ref_frame: String,
    pub time_system: String,
    pub start_time: String,
    #[serde(default)]
    pub useable_start_time: Option<String>,
    #[serde(default)]
    pub useable_stop_time: Option<String>,
    pub stop_time: String,
}

/// A `stateVector` element as published, numbers still in text form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StateVectorRecord {
    pub epoch: String,
    pub x: Measurement,
    pub y: Measurement,
    pub z: Measurement,
    pub x_dot: Measurement,
    pub y_dot: Measurement,
    pub z_dot: Measurement,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Measurement {
    #[serde(rename = "@units", default)]
    pub units: Option<String>,
    #[serde(rename = "$text")]
    pub text: String,
}

#[derive(Deserialize)]
struct Ndm {
    oem: Oem,
}

#[derive(Deserialize)]
struct Oem {
    header: Header,
    body: Body,
}

#[derive(Deserialize)]
struct Body {
    segment: Segment,
}

#[derive(Deserialize)]
struct Segment {
    metadata: Metadata,
    data: Data,
}

#[derive(Deserialize)]
struct Data {
    #[serde(rename = "COMMENT", default)]
    comments: Vec<String>,
    #[serde(rename = "stateVector", default)]
    state_vectors: Vec<StateVectorRecord>,
}

impl OemDocument {
    pub fn from_xml(xml: &str) -> Result<Self, FeedError> {
        let ndm: Ndm = quick_xml::de::from_str(xml)?;
        let segment = ndm.oem.body.segment;
        Ok(OemDocument {
            header: ndm.oem.header,
            metadata: segment.metadata,
            comments: segment.data.comments,
            state_vectors: segment.data.state_vectors,
        })
    }

    /// Record whose `EPOCH` text matches exactly.
    pub fn find(&self, epoch: &str) -> Option<&StateVectorRecord> {
        self.state_vectors.iter().find(|sv| sv.epoch == epoch)
    }

    /// Parses every record; the first malformed one fails the whole store.
    pub fn state_vector_store(&self) -> Result<StateVectorStore, TelemetryError> {
        self.state_vectors
            .iter()
            .map(StateVectorRecord::to_state_vector)
            .collect::<Result<Vec<_>, _>>()
            .map(StateVectorStore::new)
    }
}

impl StateVectorRecord {
    pub fn to_state_vector(&self) -> Result<StateVector, TelemetryError> {
        Ok(StateVector {
            epoch_text: self.epoch.clone(),
            epoch: parse_epoch(&self.epoch)?,
            position_km: [
                self.x.value("X")?,
                self.y.value("Y")?,
                self.z.value("Z")?,
            ],
            velocity_km_s: [
                self.x_dot.value("X_DOT")?,
                self.y_dot.value("Y_DOT")?,
                self.z_dot.value("Z_DOT")?,
            ],
        })
    }
}

impl Measurement {
    fn value(&self, field: &'static str) -> Result<f64, TelemetryError> {
        self.text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| TelemetryError::InvalidNumber {
                field,
                value: self.text.clone(),
            })
    }
}
