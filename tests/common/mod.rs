//! Test application factory for integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use tokenbind::models::{AppConfig, Document};
use tokenbind::server::{build_router, create_app_state, AppState};

/// A document with one local collection, one library collection, and a few
/// elements covering the match, no-match and ineligible-slot cases.
pub const SAMPLE_DOCUMENT: &str = r#"
collections:
  - name: Primitive
    modes: [Light, Dark]
    variables:
      - id: var-blue-500
        name: blue/500
        values:
          Light: { r: 0.0, g: 0.0, b: 1.0 }
          Dark: { r: 0.2, g: 0.2, b: 0.9 }
      - id: var-red-500
        name: red/500
        values:
          Light: { r: 1.0, g: 0.0, b: 0.0 }
  - name: Brand
    source: library
    modes: [Default]
    variables:
      - id: var-brand-accent
        name: brand/accent
        values:
          Default: { r: 0.9, g: 0.2, b: 0.1 }
elements:
  - id: e1
    name: card
    fills:
      - { r: 0.0, g: 0.0, b: 1.0 }
      - { kind: gradient }
  - id: e2
    name: banner
    fills:
      - { r: 1.0, g: 0.5, b: 0.0 }
    strokes:
      - { r: 0.0, g: 0.0, b: 1.0, bound: var-blue-500 }
"#;

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a test application over a YAML document with default config
    pub fn new(document_yaml: &str) -> Self {
        Self::with_config(document_yaml, AppConfig::default())
    }

    /// Create a test application with explicit config
    pub fn with_config(document_yaml: &str, config: AppConfig) -> Self {
        let document: Document =
            serde_yaml::from_str(document_yaml).expect("invalid test document");
        let state = create_app_state(document, Arc::new(config));
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Create a test application from prebuilt state
    pub fn from_state(state: AppState) -> Self {
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        self.request(
            Request::post(path)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with an empty body
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse { status, body }
    }
}

/// Captured response with parsing helpers
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not valid JSON")
    }
}

/// Assert a 200 response
pub fn assert_ok(response: &TestResponse) {
    assert_eq!(
        response.status,
        StatusCode::OK,
        "expected 200, got {} with body {}",
        response.status,
        String::from_utf8_lossy(&response.body)
    );
}
