use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::types::{
    HeaderResponse, LocationResponse, MeasurementResponse, MetadataResponse, NowResponse,
    Quantity, SpeedResponse, StateVectorResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::epochs::list_epochs,
        super::api::epochs::get_epoch,
        super::api::epochs::get_epoch_speed,
        super::api::epochs::get_epoch_location,
        super::api::now::get_now,
        super::api::document::get_metadata,
        super::api::document::get_comments,
        super::api::document::get_header,
    ),
    components(
        schemas(
            StateVectorResponse,
            MeasurementResponse,
            SpeedResponse,
            LocationResponse,
            Quantity,
            NowResponse,
            MetadataResponse,
            HeaderResponse,
            ErrorResponse,
        )
    ),
    info(
        title = "ISS Tracker API",
        description = "Live ISS state vectors with derived speed and ground position",
        version = "0.1.0"
    ),
    tags(
        (name = "epochs", description = "State vectors by epoch"),
        (name = "now", description = "Current position"),
        (name = "document", description = "Trajectory document sections")
    )
)]
pub struct ApiDoc;
