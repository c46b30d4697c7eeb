use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::server::AppState;

/// Collection names available for matching
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsResponse {
    /// Local collection names followed by library names not already present,
    /// first-seen order
    pub names: Vec<String>,
}

/// List collections available for matching
///
/// Local collection names come first, followed by any library collection
/// names not already present (case-insensitive de-duplication). A failing
/// library lookup degrades to local names only.
#[utoipa::path(
    get,
    path = "/api/collections",
    responses(
        (status = 200, description = "Collection names", body = CollectionsResponse),
    ),
    tag = "Catalog"
)]
pub async fn handle_collections(
    State(state): State<AppState>,
) -> Result<Json<CollectionsResponse>, ApiError> {
    let names = state.catalog.collection_names().await?;

    tracing::debug!(count = names.len(), "Collection names listed");

    Ok(Json(CollectionsResponse { names }))
}
