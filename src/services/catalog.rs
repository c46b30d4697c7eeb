//! Collection resolution and cache-through catalog index building.

use std::sync::Arc;

use catalog_match::{resolve_mode, CatalogIndex};

use crate::error::{EngineError, HostError};
use crate::services::cache::CatalogCache;
use crate::services::host::{CatalogStore, CollectionInfo};

/// Resolves collections against the catalog store and memoizes built
/// indexes per (collection, mode, filter variant) key.
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    cache: CatalogCache,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            cache: CatalogCache::new(),
        }
    }

    /// Clear the index cache. Called at the start of every scan request.
    pub async fn invalidate(&self) {
        self.cache.clear().await;
        tracing::debug!("Catalog cache invalidated");
    }

    /// Collection names for the picker: local names first, then library
    /// names not already present, case-insensitive de-duplication, first-seen
    /// order. Library lookup fails soft to an empty list.
    pub async fn collection_names(&self) -> Result<Vec<String>, HostError> {
        let local = self.store.local_collections().await?;
        let library = self.library_collections_soft().await;

        let mut names: Vec<String> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        for info in local.iter().chain(library.iter()) {
            let folded = info.name.to_lowercase();
            if !seen.contains(&folded) {
                seen.push(folded);
                names.push(info.name.clone());
            }
        }
        Ok(names)
    }

    /// Find a collection by name, case-insensitively, local collections
    /// first. A miss carries the full searched name lists for diagnosis.
    pub async fn find_collection(&self, name: &str) -> Result<CollectionInfo, EngineError> {
        let local = self.store.local_collections().await.map_err(EngineError::Host)?;
        if let Some(info) = find_by_name(&local, name) {
            return Ok(info.clone());
        }

        let library = self.library_collections_soft().await;
        if let Some(info) = find_by_name(&library, name) {
            return Ok(info.clone());
        }

        Err(EngineError::CollectionNotFound {
            name: name.to_string(),
            local: local.into_iter().map(|c| c.name).collect(),
            library: library.into_iter().map(|c| c.name).collect(),
        })
    }

    /// Resolve the catalog index for (collection, mode, filter), serving
    /// repeated identical lookups from the cache. Zero surviving entries is
    /// a user-facing configuration error, not an empty success.
    pub async fn resolve_catalog(
        &self,
        collection: &str,
        mode: &str,
        filter: Option<&[String]>,
    ) -> Result<Arc<CatalogIndex>, EngineError> {
        let key = CatalogCache::key(collection, mode, filter);
        if let Some(index) = self.cache.get(&key).await {
            tracing::debug!(%key, "Catalog index cache hit");
            return Ok(index);
        }

        let info = self.find_collection(collection).await?;

        // Unresolvable mode means no index, not a hard error.
        let entries = match resolve_mode(&info.modes, mode) {
            Some(resolved) => {
                if !resolved.eq_ignore_ascii_case(mode) {
                    tracing::debug!(
                        requested = mode,
                        resolved = resolved,
                        "Mode not found, fell back to first mode"
                    );
                }
                self.store
                    .color_entries(&info.name, resolved)
                    .await
                    .map_err(EngineError::Host)?
            }
            None => Vec::new(),
        };

        let index = Arc::new(CatalogIndex::build(&entries, filter));
        tracing::debug!(
            collection = %info.name,
            mode = mode,
            entries = entries.len(),
            indexed = index.len(),
            "Built catalog index"
        );

        if index.is_empty() {
            return Err(EngineError::EmptyCatalog {
                collection: info.name,
                mode: mode.to_string(),
                group_filters: filter.is_some(),
            });
        }

        self.cache.store(key, index.clone()).await;
        Ok(index)
    }

    async fn library_collections_soft(&self) -> Vec<CollectionInfo> {
        match self.store.library_collections().await {
            Ok(collections) => collections,
            Err(e) => {
                tracing::warn!(%e, "Library collection lookup failed, continuing without");
                Vec::new()
            }
        }
    }
}

fn find_by_name<'a>(collections: &'a [CollectionInfo], name: &str) -> Option<&'a CollectionInfo> {
    collections
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}
