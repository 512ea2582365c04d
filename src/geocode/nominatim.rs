use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

use super::error::GeocodeError;
use super::GeoLocation;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
    zoom: u8,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    error: Option<String>,
}

impl NominatimClient {
    pub fn new(
        base_url: String,
        user_agent: &str,
        language: String,
        zoom: u8,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            http,
            base_url,
            language,
            zoom,
        })
    }

    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<GeoLocation, GeocodeError> {
        let url = format!("{}/reverse", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("zoom", self.zoom.to_string()),
                ("accept-language", self.language.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status));
        }

        let body: ReverseResponse = response.json().await?;
        Ok(location_from_response(body))
    }
}

fn location_from_response(body: ReverseResponse) -> GeoLocation {
    if let Some(reason) = &body.error {
        log::debug!("No reverse geocoding result: {}", reason);
    }
    match body.address {
        Some(address) if !address.is_empty() => GeoLocation::Address(
            address
                .into_iter()
                .map(|(k, v)| match v {
                    serde_json::Value::String(s) => (k, s),
                    other => (k, other.to_string()),
                })
                .collect(),
        ),
        _ => GeoLocation::NoData,
    }
}
