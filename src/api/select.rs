use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::ElementId;
use crate::server::AppState;

/// Selection request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    pub ids: Vec<ElementId>,
}

/// Selection response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectResponse {
    /// How many of the requested ids resolved to elements
    pub selected: usize,
}

/// Select elements in the host document
///
/// Side effect only; subsequent scans target the new selection.
#[utoipa::path(
    post,
    path = "/api/select",
    request_body = SelectRequest,
    responses(
        (status = 200, description = "Selection applied", body = SelectResponse),
    ),
    tag = "Elements"
)]
pub async fn handle_select(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<SelectResponse>, ApiError> {
    let selected = state.elements.select(&request.ids).await?;

    tracing::info!(
        requested = request.ids.len(),
        selected = selected,
        "Selection updated"
    );

    Ok(Json(SelectResponse { selected }))
}
