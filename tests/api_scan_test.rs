//! Tests for /api/scan.

mod common;

use common::TestApp;
use pretty_assertions::assert_eq;
use tokenbind::models::AppConfig;

#[tokio::test]
async fn test_scan_reports_matched_color() {
    let document = r#"
collections:
  - name: Primitive
    modes: [Light]
    variables:
      - id: v1
        name: blue/500
        values:
          Light: { r: 0.0, g: 0.0, b: 1.0 }
elements:
  - id: e1
    name: card
    fills:
      - { r: 0.0, g: 0.0, b: 1.0 }
"#;
    let app = TestApp::new(document);

    let response = app
        .post_json(
            "/api/scan",
            r#"{"collectionName": "Primitive", "mode": "Light", "useGroupFilters": false}"#,
        )
        .await;
    common::assert_ok(&response);

    let json = response.json();
    assert_eq!(json["summary"]["totalScanned"], 1);
    assert_eq!(json["summary"]["matchedUnique"], 1);
    assert_eq!(json["summary"]["noMatchUnique"], 0);
    assert_eq!(json["matchedColors"][0]["hex"], "0000ff");
    assert_eq!(json["matchedColors"][0]["variableName"], "blue/500");
    assert_eq!(json["matchedColors"][0]["variableId"], "v1");
    assert_eq!(json["noMatchColors"].as_array().unwrap().len(), 0);
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_scan_reports_no_match_color() {
    let document = r#"
collections:
  - name: Primitive
    modes: [Light]
    variables:
      - id: v1
        name: blue/500
        values:
          Light: { r: 0.0, g: 0.0, b: 1.0 }
elements:
  - id: e1
    name: card
    fills:
      - { r: 1.0, g: 0.0, b: 0.0 }
"#;
    let app = TestApp::new(document);

    let response = app
        .post_json(
            "/api/scan",
            r#"{"collectionName": "Primitive", "mode": "Light"}"#,
        )
        .await;
    common::assert_ok(&response);

    let json = response.json();
    assert_eq!(json["summary"]["matchedUnique"], 0);
    assert_eq!(json["summary"]["noMatchUnique"], 1);
    assert_eq!(json["summary"]["noMatchItems"], 1);
    assert_eq!(json["noMatchColors"][0]["hex"], "ff0000");
}

#[tokio::test]
async fn test_scan_skips_gradients_and_bound_slots() {
    let app = TestApp::new(common::SAMPLE_DOCUMENT);

    let response = app
        .post_json(
            "/api/scan",
            r#"{"collectionName": "Primitive", "mode": "Light"}"#,
        )
        .await;
    common::assert_ok(&response);

    let json = response.json();
    // card's gradient fill and banner's bound stroke are not scanned
    assert_eq!(json["summary"]["totalScanned"], 2);
    assert_eq!(json["summary"]["matchedUnique"], 1);
    assert_eq!(json["noMatchColors"][0]["hex"], "ff8000");
}

#[tokio::test]
async fn test_scan_no_match_colors_sorted_by_hex() {
    let document = r#"
collections:
  - name: Primitive
    modes: [Light]
    variables:
      - id: v1
        name: blue/500
        values:
          Light: { r: 0.0, g: 0.0, b: 1.0 }
elements:
  - id: e1
    name: card
    fills:
      - { r: 1.0, g: 0.0, b: 0.0 }
      - { r: 0.0, g: 1.0, b: 0.0 }
      - { r: 1.0, g: 0.0, b: 0.0 }
"#;
    let app = TestApp::new(document);

    let response = app
        .post_json(
            "/api/scan",
            r#"{"collectionName": "Primitive", "mode": "Light"}"#,
        )
        .await;
    common::assert_ok(&response);

    let json = response.json();
    let hexes: Vec<&str> = json["noMatchColors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["hex"].as_str().unwrap())
        .collect();
    // Deduped and ascending, while three slots went unmatched
    assert_eq!(hexes, ["00ff00", "ff0000"]);
    assert_eq!(json["summary"]["noMatchItems"], 3);
}

#[tokio::test]
async fn test_scan_group_filter_priority_wins_shared_key() {
    let document = r#"
collections:
  - name: Primitive
    modes: [Light]
    variables:
      - id: v1
        name: Black/bg
        values:
          Light: { r: 0.0, g: 0.0, b: 0.0 }
      - id: v2
        name: Color/bg
        values:
          Light: { r: 0.0, g: 0.0, b: 0.0 }
elements:
  - id: e1
    name: card
    fills:
      - { r: 0.0, g: 0.0, b: 0.0 }
"#;
    let config = AppConfig {
        group_filters: vec!["Color/".to_string(), "Black/".to_string()],
        ..AppConfig::default()
    };
    let app = TestApp::with_config(document, config);

    let response = app
        .post_json(
            "/api/scan",
            r#"{"collectionName": "Primitive", "mode": "Light", "useGroupFilters": true}"#,
        )
        .await;
    common::assert_ok(&response);

    let json = response.json();
    // Both entries resolve to the same exact key; the first-priority prefix
    // group owns it.
    assert_eq!(json["matchedColors"][0]["variableName"], "Color/bg");
    assert_eq!(json["matchedColors"][0]["variableId"], "v2");
}

#[tokio::test]
async fn test_scan_mode_falls_back_case_insensitively() {
    let document = r#"
collections:
  - name: Primitive
    modes: [Light]
    variables:
      - id: v1
        name: blue/500
        values:
          Light: { r: 0.0, g: 0.0, b: 1.0 }
elements:
  - id: e1
    name: card
    fills:
      - { r: 0.0, g: 0.0, b: 1.0 }
"#;
    let app = TestApp::new(document);

    // "light" resolves to "Light" case-insensitively
    let response = app
        .post_json(
            "/api/scan",
            r#"{"collectionName": "Primitive", "mode": "light"}"#,
        )
        .await;
    common::assert_ok(&response);
    assert_eq!(response.json()["summary"]["matchedUnique"], 1);
}

#[tokio::test]
async fn test_scan_unknown_collection_reports_searched_names() {
    let app = TestApp::new(common::SAMPLE_DOCUMENT);

    let response = app
        .post_json(
            "/api/scan",
            r#"{"collectionName": "Tokens", "mode": "Light"}"#,
        )
        .await;
    common::assert_ok(&response);

    let json = response.json();
    assert_eq!(json["summary"]["totalScanned"], 0);
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("\"Tokens\" not found"));
    assert!(error.contains("Primitive"));
    assert!(error.contains("Brand"));
}

#[tokio::test]
async fn test_scan_empty_catalog_reports_filter_state() {
    let document = r#"
collections:
  - name: Primitive
    modes: [Light]
    variables:
      - id: v1
        name: spacing/accent
        values:
          Light: { r: 1.0, g: 0.0, b: 0.0 }
elements:
  - id: e1
    name: card
    fills:
      - { r: 1.0, g: 0.0, b: 0.0 }
"#;
    let config = AppConfig {
        group_filters: vec!["Color/".to_string()],
        ..AppConfig::default()
    };
    let app = TestApp::with_config(document, config);

    let response = app
        .post_json(
            "/api/scan",
            r#"{"collectionName": "Primitive", "mode": "Light", "useGroupFilters": true}"#,
        )
        .await;
    common::assert_ok(&response);

    let json = response.json();
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("no color variables"));
    assert!(error.contains("group filters active"));
}

#[tokio::test]
async fn test_scan_malformed_body_is_a_client_error() {
    let app = TestApp::new(common::SAMPLE_DOCUMENT);

    let response = app.post_json("/api/scan", r#"{"mode": "Light"}"#).await;
    assert!(
        response.status.is_client_error(),
        "expected client error, got {}",
        response.status
    );
}
