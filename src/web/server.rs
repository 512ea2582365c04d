use axum::{routing::get, Router};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::document as document_handlers;
use super::api::epochs as epoch_handlers;
use super::api::now as now_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::{AppState, StateError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    State(#[from] StateError),
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/epochs", get(epoch_handlers::list_epochs))
        .route("/epochs/{epoch}", get(epoch_handlers::get_epoch))
        .route("/epochs/{epoch}/speed", get(epoch_handlers::get_epoch_speed))
        .route(
            "/epochs/{epoch}/location",
            get(epoch_handlers::get_epoch_location),
        )
        .route("/now", get(now_handlers::get_now))
        .route("/metadata", get(document_handlers::get_metadata))
        .route("/comment", get(document_handlers::get_comments))
        .route("/header", get(document_handlers::get_header))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let bind_addr = config.web.bind.clone();
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::path::PathBuf;
    use tower::ServiceExt;

    use crate::telemetry::ObservationClock;

    fn fixture_config() -> Config {
        let mut config = Config::default();
        config.feed.file = Some(PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/ISS.OEM_J2K_EPH.xml"
        )));
        config.geocoder.enabled = false;
        config
    }

    async fn get_json(config: Config, uri: &str) -> (StatusCode, Value) {
        let app = build_router(AppState::from_config(config).unwrap());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_list_epochs() {
        let (status, body) = get_json(fixture_config(), "/epochs").await;
        assert_eq!(status, StatusCode::OK);
        let vectors = body.as_array().unwrap();
        assert_eq!(vectors.len(), 4);
        assert_eq!(vectors[0]["EPOCH"], "2024-067T08:24:00.000Z");
        assert_eq!(vectors[0]["X"]["#text"], "1811.469");
        assert_eq!(vectors[0]["X"]["@units"], "km");
        assert_eq!(vectors[0]["Z_DOT"]["@units"], "km/s");
    }

    #[tokio::test]
    async fn test_list_epochs_page() {
        let (status, body) = get_json(fixture_config(), "/epochs?offset=1&limit=2").await;
        assert_eq!(status, StatusCode::OK);
        let epochs: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|sv| sv["EPOCH"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(epochs, ["2024-067T08:28:00.000Z", "2024-067T08:32:00.000Z"]);

        let (_, body) = get_json(fixture_config(), "/epochs?offset=10").await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_epochs_bad_page() {
        let (status, body) = get_json(fixture_config(), "/epochs?offset=one&limit=2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_failed");
    }

    #[tokio::test]
    async fn test_get_epoch() {
        let (status, body) = get_json(fixture_config(), "/epochs/2024-067T08:28:00.000Z").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["EPOCH"], "2024-067T08:28:00.000Z");
        assert_eq!(body["Y"]["#text"], "-4867.064");

        let (status, body) = get_json(fixture_config(), "/epochs/2024-067T08:29:00.000Z").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "epoch_not_found");
    }

    #[tokio::test]
    async fn test_epoch_speed() {
        let (status, body) =
            get_json(fixture_config(), "/epochs/2024-067T08:28:00.000Z/speed").await;
        assert_eq!(status, StatusCode::OK);
        assert!((body["speed"].as_f64().unwrap() - 7.7221).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_epoch_location() {
        let (status, body) =
            get_json(fixture_config(), "/epochs/2024-067T08:28:00.000Z/location").await;
        assert_eq!(status, StatusCode::OK);
        assert!((body["latitude"].as_f64().unwrap() - 45.7966).abs() < 1e-3);
        assert!((body["longitude"].as_f64().unwrap() + 17.5904).abs() < 1e-3);
        assert!((body["altitude"]["value"].as_f64().unwrap() - 615.008).abs() < 1e-3);
        assert_eq!(body["altitude"]["units"], "km");
        assert_eq!(body["geo"], "No location data");
    }

    #[tokio::test]
    async fn test_epoch_location_legacy_clock() {
        let mut config = fixture_config();
        config.frame.clock = ObservationClock::LegacyMonthMinutes;
        let (status, body) = get_json(config, "/epochs/2024-067T08:28:00.000Z/location").await;
        assert_eq!(status, StatusCode::OK);
        assert!((body["latitude"].as_f64().unwrap() - 45.7965).abs() < 1e-3);
        assert!((body["longitude"].as_f64().unwrap() + 11.323).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_now_picks_latest_sample_for_stale_feed() {
        let (status, body) = get_json(fixture_config(), "/now").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["closest_epoch"], "2024-067T08:36:00.000Z");
        assert_eq!(body["speed"]["units"], "km/s");
        assert_eq!(body["location"]["altitude"]["units"], "km");
        assert_eq!(body["location"]["geo"], "No location data");
    }

    #[tokio::test]
    async fn test_document_sections() {
        let (status, body) = get_json(fixture_config(), "/metadata").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["OBJECT_NAME"], "ISS");
        assert_eq!(body["REF_FRAME"], "EME2000");

        let (_, body) = get_json(fixture_config(), "/comment").await;
        assert_eq!(body[1], "MASS=461235.00");

        let (_, body) = get_json(fixture_config(), "/header").await;
        assert_eq!(body["ORIGINATOR"], "JSC");
        assert_eq!(body["CREATION_DATE"], "2024-067T05:04:30.476Z");
    }

    #[tokio::test]
    async fn test_missing_feed_is_bad_gateway() {
        let mut config = fixture_config();
        config.feed.file = Some(PathBuf::from("/nonexistent/ISS.OEM_J2K_EPH.xml"));
        let (status, body) = get_json(config, "/now").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "feed_unavailable");
    }
}
