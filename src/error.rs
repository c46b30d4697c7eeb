use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure reported by a host collaborator (catalog, element, or variable store).
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host backend error: {0}")]
    Backend(String),

    #[error("host denied access: {0}")]
    Denied(String),
}

/// Errors from the matching core.
///
/// Collection-level failures carry the diagnostic context the operator needs
/// to fix their setup without re-running diagnostics by hand: the full local
/// and library name lists for a miss, and whether group filters were active
/// for an empty catalog.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{}", collection_not_found_message(.name, .local, .library))]
    CollectionNotFound {
        name: String,
        local: Vec<String>,
        library: Vec<String>,
    },

    #[error("{}", empty_catalog_message(.collection, .mode, .group_filters))]
    EmptyCatalog {
        collection: String,
        mode: String,
        group_filters: bool,
    },

    #[error("invalid hex color \"{input}\": {source}")]
    InvalidHex {
        input: String,
        source: catalog_match::ParseColorError,
    },

    #[error(transparent)]
    Host(#[from] HostError),
}

fn collection_not_found_message(name: &str, local: &[String], library: &[String]) -> String {
    format!(
        "collection \"{name}\" not found; searched {} local ({}) and {} library ({})",
        local.len(),
        name_list(local),
        library.len(),
        name_list(library),
    )
}

fn empty_catalog_message(collection: &str, mode: &str, group_filters: &bool) -> String {
    let filters = if *group_filters {
        "group filters active"
    } else {
        "group filters off"
    };
    format!("collection \"{collection}\" has no color variables for mode \"{mode}\" ({filters})")
}

fn name_list(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// Error surfaced across the command boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unrecognized command")]
    UnrecognizedCommand,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnrecognizedCommand => StatusCode::NOT_FOUND,
            ApiError::Engine(EngineError::CollectionNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Engine(EngineError::EmptyCatalog { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Engine(EngineError::InvalidHex { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Engine(EngineError::Host(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Host(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
