use std::sync::Arc;
use thiserror::Error;

use crate::feed::{FeedClient, FeedError, FeedSource};
use crate::geocode::{GeocodeError, Geocoder, NominatimClient};
use crate::telemetry::ObservationClock;

use super::config::Config;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("feed client: {0}")]
    Feed(#[from] FeedError),
    #[error("geocoder client: {0}")]
    Geocode(#[from] GeocodeError),
}

/// Collaborators shared by every request. None of them hold mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub feed: Arc<FeedSource>,
    pub geocoder: Arc<Geocoder>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, StateError> {
        let feed = match &config.feed.file {
            Some(path) => {
                log::info!("Reading trajectory from {}", path.display());
                FeedSource::File(path.clone())
            }
            None => FeedSource::Remote(FeedClient::new(
                config.feed.url.clone(),
                config.feed.timeout,
            )?),
        };

        let geocoder = if config.geocoder.enabled {
            let gc = &config.geocoder;
            Geocoder::Nominatim(NominatimClient::new(
                gc.base_url.clone(),
                &gc.user_agent,
                gc.language.clone(),
                gc.zoom,
                gc.timeout,
            )?)
        } else {
            log::info!("Reverse geocoding disabled");
            Geocoder::Disabled
        };

        Ok(Self {
            config: Arc::new(config),
            feed: Arc::new(feed),
            geocoder: Arc::new(geocoder),
        })
    }

    pub fn clock(&self) -> ObservationClock {
        self.config.frame.clock
    }
}
