use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use catalog_match::{parse_hex, rank, rgb_to_hex, Candidate};

use crate::error::{ApiError, EngineError};
use crate::server::AppState;

/// Fixed candidate limit of the compatibility suggestions command.
const SUGGESTION_LIMIT: usize = 12;

/// Query parameters for candidate and suggestion lookups
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CandidatesQuery {
    /// Collection to rank against (case-insensitive)
    pub collection_name: String,
    /// Mode name, typically "Light" or "Dark"
    pub mode: String,
    /// Target color as 6 hex digits, optional leading '#'
    pub hex: String,
    /// Restrict candidates to the configured name-prefix groups
    #[serde(default)]
    pub use_group_filters: bool,
}

/// One nearest-neighbor candidate
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDto {
    pub variable_id: String,
    pub variable_name: String,
    pub hex: String,
}

/// Response from the candidates command
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidatesResponse {
    /// Normalized target hex (lowercase, no '#')
    pub hex: String,
    /// Closest catalog entries, ascending by RGB distance
    pub candidates: Vec<CandidateDto>,
    /// Set for invalid hex input or catalog failures; the list is empty then
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One suggestion item (compatibility shape)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionDto {
    pub variable_id: String,
    pub name: String,
    pub hex: String,
}

/// Response from the suggestions command
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub hex: String,
    pub items: Vec<SuggestionDto>,
}

/// Rank the catalog entries nearest to `hex`.
///
/// Returns the normalized hex together with the ranked candidates. Invalid
/// hex input and collection failures surface as [`EngineError`]s for the
/// handlers to shape.
async fn rank_for_hex(
    state: &AppState,
    query: &CandidatesQuery,
    limit: usize,
) -> Result<(String, Vec<Candidate>), EngineError> {
    let target = parse_hex(&query.hex).map_err(|source| EngineError::InvalidHex {
        input: query.hex.clone(),
        source,
    })?;
    let normalized = rgb_to_hex(target);

    let filter = query
        .use_group_filters
        .then(|| state.config.group_filters.as_slice());
    let index = state
        .catalog
        .resolve_catalog(&query.collection_name, &query.mode, filter)
        .await?;

    Ok((normalized, rank(target, &index.list, limit)))
}

/// List nearest candidates for an unmatched color
///
/// Euclidean RGB distance, ascending, name ascending on exact ties. Invalid
/// hex yields an empty list with an `error` string rather than a failure
/// status.
#[utoipa::path(
    get,
    path = "/api/candidates",
    params(CandidatesQuery),
    responses(
        (status = 200, description = "Ranked candidates", body = CandidatesResponse),
    ),
    tag = "Matching"
)]
pub async fn handle_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidatesQuery>,
) -> Result<Json<CandidatesResponse>, ApiError> {
    let limit = state.config.candidate_limit.min(SUGGESTION_LIMIT);

    match rank_for_hex(&state, &query, limit).await {
        Ok((hex, ranked)) => Ok(Json(CandidatesResponse {
            hex,
            candidates: ranked
                .into_iter()
                .map(|c| CandidateDto {
                    variable_id: c.id,
                    variable_name: c.name,
                    hex: c.hex,
                })
                .collect(),
            error: None,
        })),
        // Host failures are real errors; everything else is an in-band
        // empty result the caller can show next to the color.
        Err(EngineError::Host(e)) => Err(ApiError::Host(e)),
        Err(e) => {
            tracing::debug!(hex = %query.hex, error = %e, "Candidate query failed");
            Ok(Json(CandidatesResponse {
                hex: query.hex.trim_start_matches('#').to_lowercase(),
                candidates: Vec::new(),
                error: Some(e.to_string()),
            }))
        }
    }
}

/// List suggestions for an unmatched color (compatibility)
///
/// Fixed-limit variant of the candidates command, kept for callers of the
/// older shape. Failures yield an empty item list.
#[utoipa::path(
    get,
    path = "/api/suggestions",
    params(CandidatesQuery),
    responses(
        (status = 200, description = "Ranked suggestions", body = SuggestionsResponse),
    ),
    tag = "Matching"
)]
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Query(query): Query<CandidatesQuery>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    match rank_for_hex(&state, &query, SUGGESTION_LIMIT).await {
        Ok((hex, ranked)) => Ok(Json(SuggestionsResponse {
            hex,
            items: ranked
                .into_iter()
                .map(|c| SuggestionDto {
                    variable_id: c.id,
                    name: c.name,
                    hex: c.hex,
                })
                .collect(),
        })),
        Err(EngineError::Host(e)) => Err(ApiError::Host(e)),
        Err(e) => {
            tracing::debug!(hex = %query.hex, error = %e, "Suggestion query failed");
            Ok(Json(SuggestionsResponse {
                hex: query.hex.trim_start_matches('#').to_lowercase(),
                items: Vec::new(),
            }))
        }
    }
}
