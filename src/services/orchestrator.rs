//! Scan orchestration and process-wide scan state.
//!
//! The orchestrator owns the two pieces of shared mutable state: the catalog
//! cache lifecycle (cleared at the start of every scan) and the last scan
//! result (replaced atomically when a scan completes). Readers always
//! observe either the previous complete result or the next one.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::EngineError;
use crate::models::{
    AppConfig, MatchedEntry, ObservedColor, ScanItem, ScanResult, VariableId,
};
use crate::services::catalog::CatalogService;
use crate::services::host::ElementStore;

pub struct ScanOrchestrator {
    config: Arc<AppConfig>,
    catalog: Arc<CatalogService>,
    elements: Arc<dyn ElementStore>,
    last_scan: RwLock<Option<Arc<ScanResult>>>,
}

impl ScanOrchestrator {
    pub fn new(
        config: Arc<AppConfig>,
        catalog: Arc<CatalogService>,
        elements: Arc<dyn ElementStore>,
    ) -> Self {
        Self {
            config,
            catalog,
            elements,
            last_scan: RwLock::new(None),
        }
    }

    /// Run a scan pass and replace the last-scan state with its result.
    ///
    /// Never panics across the command boundary: catalog and traversal
    /// failures come back as a result with zero items and an `error` string.
    pub async fn scan(
        &self,
        collection: &str,
        mode: &str,
        use_group_filters: bool,
    ) -> Arc<ScanResult> {
        let scanned_at = Utc::now();
        self.catalog.invalidate().await;

        let result = match self.scan_inner(collection, mode, use_group_filters).await {
            Ok(items) => {
                let result = ScanResult::from_items(items, scanned_at);
                tracing::info!(
                    collection = collection,
                    mode = mode,
                    use_group_filters = use_group_filters,
                    total_scanned = result.total_scanned,
                    matched_unique = result.matched_colors.len(),
                    no_match_unique = result.no_match_hexes.len(),
                    "Scan complete"
                );
                result
            }
            Err(e) => {
                tracing::warn!(collection = collection, error = %e, "Scan failed");
                ScanResult::failed(e.to_string(), scanned_at)
            }
        };

        let result = Arc::new(result);
        *self.last_scan.write().await = Some(result.clone());
        result
    }

    /// The most recent scan result, if any scan has run.
    pub async fn last_scan(&self) -> Option<Arc<ScanResult>> {
        self.last_scan.read().await.clone()
    }

    async fn scan_inner(
        &self,
        collection: &str,
        mode: &str,
        use_group_filters: bool,
    ) -> Result<Vec<ScanItem>, EngineError> {
        let filter = use_group_filters.then(|| self.config.group_filters.as_slice());
        let index = self.catalog.resolve_catalog(collection, mode, filter).await?;

        let targets = self
            .elements
            .target_elements()
            .await
            .map_err(EngineError::Host)?;

        let mut items = Vec::new();
        for (element, name) in targets {
            let slots = self
                .elements
                .paint_slots(&element)
                .await
                .map_err(EngineError::Host)?;

            for slot in slots.into_iter().filter(|s| s.is_eligible()) {
                let observed = ObservedColor {
                    owner: element.clone(),
                    owner_name: name.clone(),
                    property: slot.property,
                    index: slot.index,
                    rgb: slot.rgb,
                    opacity: slot.opacity,
                };

                let matched = index
                    .find_exact(slot.rgb.r, slot.rgb.g, slot.rgb.b, slot.opacity)
                    .map(|entry| MatchedEntry {
                        id: VariableId::new(entry.id.clone()),
                        name: entry.name.clone(),
                    });

                items.push(ScanItem { observed, matched });
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;
    use crate::services::memory_host::InMemoryHost;

    fn orchestrator_over(yaml: &str, config: AppConfig) -> ScanOrchestrator {
        let document: Document = serde_yaml::from_str(yaml).unwrap();
        let host = Arc::new(InMemoryHost::new(document));
        let catalog = Arc::new(CatalogService::new(host.clone()));
        ScanOrchestrator::new(Arc::new(config), catalog, host)
    }

    const ONE_BLUE: &str = r#"
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

    #[tokio::test]
    async fn test_scan_reports_exact_match() {
        let orchestrator = orchestrator_over(ONE_BLUE, AppConfig::default());
        let result = orchestrator.scan("Primitive", "Light", false).await;

        assert!(result.error.is_none());
        assert_eq!(result.total_scanned, 1);
        assert_eq!(result.matched_colors.len(), 1);
        assert_eq!(result.matched_colors[0].hex, "0000ff");
        assert_eq!(result.matched_colors[0].variable_name, "blue/500");
        assert!(result.no_match_hexes.is_empty());
    }

    #[tokio::test]
    async fn test_scan_reports_no_match_hex() {
        let yaml = r#"
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
        let orchestrator = orchestrator_over(yaml, AppConfig::default());
        let result = orchestrator.scan("Primitive", "Light", false).await;

        assert_eq!(result.matched_colors.len(), 0);
        let no_match: Vec<_> = result.no_match_hexes.iter().cloned().collect();
        assert_eq!(no_match, ["ff0000"]);
    }

    #[tokio::test]
    async fn test_scan_skips_gradients_and_bound_slots() {
        let yaml = r#"
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
      - { kind: gradient }
      - { r: 0.0, g: 0.0, b: 1.0, bound: v1 }
      - { r: 0.0, g: 0.0, b: 1.0 }
"#;
        let orchestrator = orchestrator_over(yaml, AppConfig::default());
        let result = orchestrator.scan("Primitive", "Light", false).await;

        // Only the third slot is eligible; the bound one is skipped silently
        assert_eq!(result.total_scanned, 1);
        assert_eq!(result.items[0].observed.index, 2);
    }

    #[tokio::test]
    async fn test_scan_collection_not_found_is_an_error_result() {
        let orchestrator = orchestrator_over(ONE_BLUE, AppConfig::default());
        let result = orchestrator.scan("Tokens", "Light", false).await;

        assert_eq!(result.total_scanned, 0);
        let error = result.error.as_deref().unwrap();
        assert!(error.contains("\"Tokens\" not found"));
        assert!(error.contains("Primitive"));
    }

    #[tokio::test]
    async fn test_scan_replaces_last_scan_state() {
        let orchestrator = orchestrator_over(ONE_BLUE, AppConfig::default());
        assert!(orchestrator.last_scan().await.is_none());

        let first = orchestrator.scan("Primitive", "Light", false).await;
        let last = orchestrator.last_scan().await.unwrap();
        assert!(Arc::ptr_eq(&first, &last));

        // A failed scan still replaces the state wholesale
        let failed = orchestrator.scan("Tokens", "Light", false).await;
        let last = orchestrator.last_scan().await.unwrap();
        assert!(Arc::ptr_eq(&failed, &last));
        assert!(last.error.is_some());
    }

    #[tokio::test]
    async fn test_scan_with_group_filters_restricts_matching() {
        let yaml = r#"
collections:
  - name: Primitive
    modes: [Light]
    variables:
      - id: v1
        name: Color/bg
        values:
          Light: { r: 0.0, g: 0.0, b: 0.0 }
      - id: v2
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
        let orchestrator = orchestrator_over(yaml, config);

        // With filters on, the red entry is outside the filter groups
        let result = orchestrator.scan("Primitive", "Light", true).await;
        assert!(result.matched_colors.is_empty());
        assert!(result.no_match_hexes.contains("ff0000"));

        // With filters off it matches
        let result = orchestrator.scan("Primitive", "Light", false).await;
        assert_eq!(result.matched_colors.len(), 1);
    }

    #[tokio::test]
    async fn test_scan_scoped_to_selection() {
        let yaml = r#"
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
  - id: e2
    name: label
    fills:
      - { r: 0.0, g: 0.0, b: 1.0 }
selection: [e2]
"#;
        let orchestrator = orchestrator_over(yaml, AppConfig::default());
        let result = orchestrator.scan("Primitive", "Light", false).await;

        assert_eq!(result.total_scanned, 1);
        assert_eq!(result.items[0].observed.owner_name, "label");
    }
}
