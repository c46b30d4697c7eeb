use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use catalog_match::{parse_hex, rgb_to_hex};

use crate::error::{ApiError, EngineError};
use crate::models::{AggregateOutcome, VariableId};
use crate::server::AppState;

/// Aggregated apply outcomes
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeResponse {
    pub applied_count: usize,
    pub skipped_count: usize,
    pub failed_count: usize,
    /// One reason per failed item, in processing order, prefixed with the
    /// owning element's name
    pub failed_reasons: Vec<String>,
}

impl From<AggregateOutcome> for OutcomeResponse {
    fn from(outcome: AggregateOutcome) -> Self {
        Self {
            applied_count: outcome.applied_count,
            skipped_count: outcome.skipped_count,
            failed_count: outcome.failed_count,
            failed_reasons: outcome.failed_reasons,
        }
    }
}

/// Manual bind request for a no-match color
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyColorRequest {
    /// Target color as 6 hex digits, optional leading '#'
    pub hex: String,
    /// Chosen catalog entry to bind
    pub variable_id: VariableId,
}

/// Bind all matched items from the last scan
///
/// Re-validates every item before binding; items whose slot is gone, no
/// longer solid, or already bound are skipped, and per-item failures never
/// abort the batch. Applying the same scan twice skips everything the first
/// pass bound.
#[utoipa::path(
    post,
    path = "/api/apply",
    responses(
        (status = 200, description = "Aggregated outcomes", body = OutcomeResponse),
    ),
    tag = "Binding"
)]
pub async fn handle_apply(State(state): State<AppState>) -> Result<Json<OutcomeResponse>, ApiError> {
    let Some(scan) = state.orchestrator.last_scan().await else {
        tracing::warn!("Apply requested before any scan");
        return Ok(Json(AggregateOutcome::default().into()));
    };

    let outcome = state.applier.apply_all(&scan).await;
    Ok(Json(outcome.into()))
}

/// Bind a chosen entry onto every unmatched slot at a hex
///
/// Manual override for a no-match color, typically with a candidate picked
/// from the candidates command.
#[utoipa::path(
    post,
    path = "/api/apply-color",
    request_body = ApplyColorRequest,
    responses(
        (status = 200, description = "Aggregated outcomes", body = OutcomeResponse),
        (status = 400, description = "Malformed hex"),
    ),
    tag = "Binding"
)]
pub async fn handle_apply_color(
    State(state): State<AppState>,
    Json(request): Json<ApplyColorRequest>,
) -> Result<Json<OutcomeResponse>, ApiError> {
    let target = parse_hex(&request.hex).map_err(|source| {
        ApiError::Engine(EngineError::InvalidHex {
            input: request.hex.clone(),
            source,
        })
    })?;
    let hex = rgb_to_hex(target);

    let Some(scan) = state.orchestrator.last_scan().await else {
        tracing::warn!(hex = %hex, "Manual apply requested before any scan");
        return Ok(Json(AggregateOutcome::default().into()));
    };

    let outcome = state
        .applier
        .apply_one(&scan, &hex, &request.variable_id)
        .await;
    Ok(Json(outcome.into()))
}
