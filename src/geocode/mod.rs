//! Reverse geocoding of ground positions. The client is built once from
//! configuration and handed to whoever needs it.

mod error;
mod nominatim;

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

pub use error::GeocodeError;
pub use nominatim::{NominatimClient, DEFAULT_NOMINATIM_URL};

pub const NO_LOCATION_DATA: &str = "No location data";

/// Address found for a point, or nothing (open ocean, polar ice, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum GeoLocation {
    Address(BTreeMap<String, String>),
    NoData,
}

impl Serialize for GeoLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GeoLocation::Address(address) => address.serialize(serializer),
            GeoLocation::NoData => serializer.serialize_str(NO_LOCATION_DATA),
        }
    }
}

pub enum Geocoder {
    Nominatim(NominatimClient),
    Disabled,
}

impl Geocoder {
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<GeoLocation, GeocodeError> {
        match self {
            Geocoder::Nominatim(client) => client.reverse(lat, lon).await,
            Geocoder::Disabled => Ok(GeoLocation::NoData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_no_data() {
        let json = serde_json::to_value(GeoLocation::NoData).unwrap();
        assert_eq!(json, serde_json::json!("No location data"));
    }

    #[test]
    fn test_serialize_address() {
        let address = BTreeMap::from([
            ("city".to_string(), "Houston".to_string()),
            ("country_code".to_string(), "us".to_string()),
        ]);
        let json = serde_json::to_value(GeoLocation::Address(address)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"city": "Houston", "country_code": "us"})
        );
    }

    #[tokio::test]
    async fn test_disabled_geocoder() {
        let location = Geocoder::Disabled.reverse(29.979, -95.336).await.unwrap();
        assert_eq!(location, GeoLocation::NoData);
    }
}
