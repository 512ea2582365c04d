use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::telemetry::StateVector;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::api::types::{LocationResponse, SpeedResponse, StateVectorResponse};
use crate::web::state::AppState;

/// Paging for `/epochs`. Kept as text so malformed numbers become a 400.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EpochsQuery {
    /// Number of state vectors to skip
    pub offset: Option<String>,
    /// Maximum number of state vectors to return
    pub limit: Option<String>,
}

impl EpochsQuery {
    fn page(&self) -> ApiResult<(usize, Option<usize>)> {
        let parse = |name: &str, value: &Option<String>| {
            value
                .as_deref()
                .map(|v| {
                    v.trim()
                        .parse::<usize>()
                        .map_err(|_| ApiError::Validation(format!("invalid {name}: {v:?}")))
                })
                .transpose()
        };
        let offset = parse("offset", &self.offset)?.unwrap_or(0);
        let limit = parse("limit", &self.limit)?;
        Ok((offset, limit))
    }
}

#[utoipa::path(
    get,
    path = "/epochs",
    params(EpochsQuery),
    responses(
        (status = 200, description = "State vectors in feed order", body = Vec<StateVectorResponse>),
        (status = 400, description = "Invalid offset or limit", body = ErrorResponse),
        (status = 502, description = "Trajectory feed unavailable", body = ErrorResponse)
    ),
    tag = "epochs"
)]
pub async fn list_epochs(
    State(state): State<AppState>,
    Query(query): Query<EpochsQuery>,
) -> ApiResult<Json<Vec<StateVectorResponse>>> {
    let (offset, limit) = query.page()?;
    let document = state.feed.fetch().await?;

    let vectors = document
        .state_vectors
        .iter()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .map(StateVectorResponse::from)
        .collect();
    Ok(Json(vectors))
}

#[utoipa::path(
    get,
    path = "/epochs/{epoch}",
    params(("epoch" = String, Path, description = "Epoch exactly as published, e.g. 2024-067T08:28:00.000Z")),
    responses(
        (status = 200, description = "State vector", body = StateVectorResponse),
        (status = 404, description = "Epoch not found", body = ErrorResponse),
        (status = 502, description = "Trajectory feed unavailable", body = ErrorResponse)
    ),
    tag = "epochs"
)]
pub async fn get_epoch(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> ApiResult<Json<StateVectorResponse>> {
    let document = state.feed.fetch().await?;
    let record = document
        .find(&epoch)
        .ok_or(ApiError::NotFound("epoch_not_found"))?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    get,
    path = "/epochs/{epoch}/speed",
    params(("epoch" = String, Path, description = "Epoch exactly as published")),
    responses(
        (status = 200, description = "Instantaneous speed in km/s", body = SpeedResponse),
        (status = 404, description = "Epoch not found", body = ErrorResponse),
        (status = 502, description = "Trajectory feed unavailable", body = ErrorResponse)
    ),
    tag = "epochs"
)]
pub async fn get_epoch_speed(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> ApiResult<Json<SpeedResponse>> {
    let sample = find_sample(&state, &epoch).await?;
    Ok(Json(SpeedResponse {
        speed: sample.speed_km_s(),
    }))
}

#[utoipa::path(
    get,
    path = "/epochs/{epoch}/location",
    params(("epoch" = String, Path, description = "Epoch exactly as published")),
    responses(
        (status = 200, description = "Ground position and address", body = LocationResponse),
        (status = 404, description = "Epoch not found", body = ErrorResponse),
        (status = 502, description = "Trajectory feed or geocoder unavailable", body = ErrorResponse)
    ),
    tag = "epochs"
)]
pub async fn get_epoch_location(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> ApiResult<Json<LocationResponse>> {
    let sample = find_sample(&state, &epoch).await?;
    Ok(Json(locate(&state, &sample).await?))
}

async fn find_sample(state: &AppState, epoch: &str) -> ApiResult<StateVector> {
    let document = state.feed.fetch().await?;
    let record = document
        .find(epoch)
        .ok_or(ApiError::NotFound("epoch_not_found"))?;
    Ok(record.to_state_vector()?)
}

/// Ground position of `sample` plus whatever the geocoder knows about it.
pub(crate) async fn locate(state: &AppState, sample: &StateVector) -> ApiResult<LocationResponse> {
    let position = sample.geodetic(state.clock())?;
    let geo = state
        .geocoder
        .reverse(position.latitude_deg, position.longitude_deg)
        .await?;
    Ok(LocationResponse::new(position, geo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(offset: Option<&str>, limit: Option<&str>) -> EpochsQuery {
        EpochsQuery {
            offset: offset.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn test_page_defaults() {
        assert!(matches!(query(None, None).page(), Ok((0, None))));
        assert!(matches!(query(Some("3"), None).page(), Ok((3, None))));
        assert!(matches!(query(None, Some("2")).page(), Ok((0, Some(2)))));
    }

    #[test]
    fn test_page_rejects_garbage() {
        assert!(matches!(
            query(Some("-1"), Some("2")).page(),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            query(Some("0"), Some("ten")).page(),
            Err(ApiError::Validation(_))
        ));
    }
}
