use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use catalog_match::CatalogIndex;

/// Cache of built catalog indexes, keyed by (collection, mode, filter variant).
///
/// Repeated lookups with an identical key within one scan session return the
/// identical cached value without re-querying the catalog store. The cache is
/// cleared in full at the start of every new scan; entries never expire by
/// time and are never partially evicted.
pub struct CatalogCache {
    cache: Arc<RwLock<HashMap<String, Arc<CatalogIndex>>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Composite cache key, string-distinct per filter variant.
    pub fn key(collection: &str, mode: &str, filter: Option<&[String]>) -> String {
        match filter {
            None => format!("{collection}::{mode}::none"),
            Some(prefixes) => format!("{collection}::{mode}::groups[{}]", prefixes.join("|")),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<CatalogIndex>> {
        let cache = self.cache.read().await;
        cache.get(key).cloned()
    }

    pub async fn store(&self, key: String, index: Arc<CatalogIndex>) {
        let mut cache = self.cache.write().await;
        cache.insert(key, index);
    }

    /// Drop every entry. Called once per scan request, before any new index
    /// is built.
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.clear();
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}
