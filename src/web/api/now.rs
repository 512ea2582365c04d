use axum::{extract::State, Json};
use chrono::Utc;

use crate::telemetry::Timestamp;
use crate::web::api::epochs::locate;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::types::{NowResponse, Quantity};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/now",
    responses(
        (status = 200, description = "State vector closest to the current time", body = NowResponse),
        (status = 502, description = "Trajectory feed or geocoder unavailable", body = ErrorResponse)
    ),
    tag = "now"
)]
pub async fn get_now(State(state): State<AppState>) -> ApiResult<Json<NowResponse>> {
    Ok(Json(report_at(&state, Utc::now()).await?))
}

/// Location and speed of the sample nearest to `at`, from a fresh fetch.
pub async fn report_at(state: &AppState, at: Timestamp) -> ApiResult<NowResponse> {
    let document = state.feed.fetch().await?;
    let store = document.state_vector_store()?;
    let closest = store.nearest(at)?;
    log::debug!(
        "Closest epoch to {} is {} of {}",
        at,
        closest.epoch_text,
        document.state_vectors.len()
    );

    Ok(NowResponse {
        closest_epoch: closest.epoch_text.clone(),
        location: locate(state, closest).await?,
        speed: Quantity::new(closest.speed_km_s(), "km/s"),
    })
}
