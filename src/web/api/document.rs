use axum::{extract::State, Json};

use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::types::{HeaderResponse, MetadataResponse};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/metadata",
    responses(
        (status = 200, description = "Segment metadata", body = MetadataResponse),
        (status = 502, description = "Trajectory feed unavailable", body = ErrorResponse)
    ),
    tag = "document"
)]
pub async fn get_metadata(State(state): State<AppState>) -> ApiResult<Json<MetadataResponse>> {
    let document = state.feed.fetch().await?;
    Ok(Json((&document.metadata).into()))
}

#[utoipa::path(
    get,
    path = "/comment",
    responses(
        (status = 200, description = "Comments attached to the trajectory data", body = Vec<String>),
        (status = 502, description = "Trajectory feed unavailable", body = ErrorResponse)
    ),
    tag = "document"
)]
pub async fn get_comments(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let document = state.feed.fetch().await?;
    Ok(Json(document.comments))
}

#[utoipa::path(
    get,
    path = "/header",
    responses(
        (status = 200, description = "Message header", body = HeaderResponse),
        (status = 502, description = "Trajectory feed unavailable", body = ErrorResponse)
    ),
    tag = "document"
)]
pub async fn get_header(State(state): State<AppState>) -> ApiResult<Json<HeaderResponse>> {
    let document = state.feed.fetch().await?;
    Ok(Json((&document.header).into()))
}
