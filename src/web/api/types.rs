use serde::Serialize;
use utoipa::ToSchema;

use crate::feed::{Header, Measurement, Metadata, StateVectorRecord};
use crate::geocode::GeoLocation;
use crate::telemetry::GeodeticPosition;

/// A numeric feed value in the feed's own text form.
#[derive(Debug, Serialize, ToSchema)]
pub struct MeasurementResponse {
    #[serde(rename = "@units", skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(rename = "#text")]
    pub text: String,
}

impl From<&Measurement> for MeasurementResponse {
    fn from(m: &Measurement) -> Self {
        MeasurementResponse {
            units: m.units.clone(),
            text: m.text.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StateVectorResponse {
    pub epoch: String,
    pub x: MeasurementResponse,
    pub y: MeasurementResponse,
    pub z: MeasurementResponse,
    pub x_dot: MeasurementResponse,
    pub y_dot: MeasurementResponse,
    pub z_dot: MeasurementResponse,
}

impl From<&StateVectorRecord> for StateVectorResponse {
    fn from(sv: &StateVectorRecord) -> Self {
        StateVectorResponse {
            epoch: sv.epoch.clone(),
            x: (&sv.x).into(),
            y: (&sv.y).into(),
            z: (&sv.z).into(),
            x_dot: (&sv.x_dot).into(),
            y_dot: (&sv.y_dot).into(),
            z_dot: (&sv.z_dot).into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SpeedResponse {
    pub speed: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Quantity {
    pub value: f64,
    pub units: String,
}

impl Quantity {
    pub fn new(value: f64, units: &str) -> Self {
        Quantity {
            value,
            units: units.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Quantity,
    /// Address fields, or the string "No location data".
    #[schema(value_type = Object)]
    pub geo: GeoLocation,
}

impl LocationResponse {
    pub fn new(position: GeodeticPosition, geo: GeoLocation) -> Self {
        LocationResponse {
            latitude: position.latitude_deg,
            longitude: position.longitude_deg,
            altitude: Quantity::new(position.altitude_km, "km"),
            geo,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NowResponse {
    pub closest_epoch: String,
    pub location: LocationResponse,
    pub speed: Quantity,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct HeaderResponse {
    pub creation_date: String,
    pub originator: String,
}

impl From<&Header> for HeaderResponse {
    fn from(h: &Header) -> Self {
        HeaderResponse {
            creation_date: h.creation_date.clone(),
            originator: h.originator.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MetadataResponse {
    pub object_name: String,
    pub object_id: String,
    pub center_name: String,
    pub ref_frame: String,
    pub time_system: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub useable_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub useable_stop_time: Option<String>,
    pub stop_time: String,
}

impl From<&Metadata> for MetadataResponse {
    fn from(m: &Metadata) -> Self {
        MetadataResponse {
            object_name: m.object_name.clone(),
            object_id: m.object_id.clone(),
            center_name: m.center_name.clone(),
            ref_frame: m.ref_frame.clone(),
            time_system: m.time_system.clone(),
            start_time: m.start_time.clone(),
            useable_start_time: m.useable_start_time.clone(),
            useable_stop_time: m.useable_stop_time.clone(),
            stop_time: m.stop_time.clone(),
        }
    }
}
