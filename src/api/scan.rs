use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{ScanResult, VariableId};
use crate::server::AppState;

/// Scan request parameters
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    /// Collection to match against (case-insensitive)
    pub collection_name: String,
    /// Mode name, typically "Light" or "Dark"; falls back to the
    /// collection's first mode when unresolvable
    pub mode: String,
    /// Restrict matching to the configured name-prefix groups
    #[serde(default)]
    pub use_group_filters: bool,
}

/// Aggregate counts for one scan pass
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// Number of paint slots scanned
    pub total_scanned: usize,
    /// Unique hexes with an exact match
    pub matched_unique: usize,
    /// Unique hexes with no exact match
    pub no_match_unique: usize,
    /// Scanned slots with no exact match
    pub no_match_items: usize,
}

/// One matched unique color
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchedColorDto {
    pub hex: String,
    pub variable_id: VariableId,
    pub variable_name: String,
}

/// One unmatched unique color
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoMatchColorDto {
    pub hex: String,
}

/// Response from the scan command
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub summary: ScanSummary,
    /// Unique matched colors in first-seen order
    pub matched_colors: Vec<MatchedColorDto>,
    /// Unique unmatched colors sorted ascending by hex
    pub no_match_colors: Vec<NoMatchColorDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<DateTime<Utc>>,
    /// Set when the scan aborted (unknown collection, empty catalog,
    /// traversal failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResponse {
    pub fn from_result(result: &ScanResult) -> Self {
        Self {
            summary: ScanSummary {
                total_scanned: result.total_scanned,
                matched_unique: result.matched_colors.len(),
                no_match_unique: result.no_match_hexes.len(),
                no_match_items: result.no_match_items(),
            },
            matched_colors: result
                .matched_colors
                .iter()
                .map(|m| MatchedColorDto {
                    hex: m.hex.clone(),
                    variable_id: m.variable_id.clone(),
                    variable_name: m.variable_name.clone(),
                })
                .collect(),
            no_match_colors: result
                .no_match_hexes
                .iter()
                .map(|hex| NoMatchColorDto { hex: hex.clone() })
                .collect(),
            scanned_at: result.scanned_at,
            error: result.error.clone(),
        }
    }
}

/// Scan the target elements against a collection
///
/// Walks every unbound solid fill/stroke slot of the current selection (or
/// the full document), exact-matches each observed color, and replaces the
/// process-wide last-scan state consumed by later apply requests. Failures
/// come back in the `error` field, never as a crash.
#[utoipa::path(
    post,
    path = "/api/scan",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Scan summary", body = ScanResponse),
    ),
    tag = "Matching"
)]
pub async fn handle_scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    tracing::info!(
        collection = %request.collection_name,
        mode = %request.mode,
        use_group_filters = request.use_group_filters,
        "Scan request received"
    );

    let result = state
        .orchestrator
        .scan(
            &request.collection_name,
            &request.mode,
            request.use_group_filters,
        )
        .await;

    Ok(Json(ScanResponse::from_result(&result)))
}
