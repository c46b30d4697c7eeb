//! In-memory host backed by a [`Document`] snapshot.
//!
//! Implements all three collaborator seams over a YAML-loadable document
//! model. Used by the binary's demo path and by tests; a production
//! deployment would put a real document bridge behind the same traits.

use async_trait::async_trait;
use catalog_match::{ColorEntry, Rgb};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::HostError;
use crate::models::{
    CollectionSource, Document, ElementDef, ElementId, PaintDef, PaintProperty, PaintSlot,
    VariableId,
};
use crate::services::host::{
    CatalogStore, CollectionInfo, ElementStore, VariableInfo, VariableStore,
};

/// Document-backed implementation of the host collaborator traits.
pub struct InMemoryHost {
    document: Arc<RwLock<Document>>,
}

impl InMemoryHost {
    pub fn new(document: Document) -> Self {
        Self {
            document: Arc::new(RwLock::new(document)),
        }
    }
}

fn collection_info(document: &Document, source: CollectionSource) -> Vec<CollectionInfo> {
    document
        .collections
        .iter()
        .filter(|c| c.source == source)
        .map(|c| CollectionInfo {
            name: c.name.clone(),
            modes: c.modes.clone(),
        })
        .collect()
}

fn paint_slot(paint: &PaintDef, property: PaintProperty, index: usize) -> PaintSlot {
    PaintSlot {
        property,
        index,
        kind: paint.kind,
        rgb: Rgb::new(paint.r, paint.g, paint.b),
        opacity: paint.opacity,
        bound: paint.bound.as_deref().map(VariableId::new),
    }
}

fn element_slots(element: &ElementDef) -> Vec<PaintSlot> {
    let fills = element
        .fills
        .iter()
        .enumerate()
        .map(|(i, p)| paint_slot(p, PaintProperty::Fill, i));
    let strokes = element
        .strokes
        .iter()
        .enumerate()
        .map(|(i, p)| paint_slot(p, PaintProperty::Stroke, i));
    fills.chain(strokes).collect()
}

#[async_trait]
impl CatalogStore for InMemoryHost {
    async fn local_collections(&self) -> Result<Vec<CollectionInfo>, HostError> {
        let document = self.document.read().await;
        Ok(collection_info(&document, CollectionSource::Local))
    }

    async fn library_collections(&self) -> Result<Vec<CollectionInfo>, HostError> {
        let document = self.document.read().await;
        Ok(collection_info(&document, CollectionSource::Library))
    }

    async fn color_entries(
        &self,
        collection: &str,
        mode: &str,
    ) -> Result<Vec<ColorEntry>, HostError> {
        let document = self.document.read().await;
        let Some(def) = document.collections.iter().find(|c| c.name == collection) else {
            return Ok(Vec::new());
        };

        // Only variables carrying a value under the resolved mode are
        // color entries of this catalog.
        Ok(def
            .variables
            .iter()
            .filter_map(|v| {
                v.values.get(mode).map(|value| {
                    ColorEntry::new(
                        v.id.clone(),
                        v.name.clone(),
                        Rgb::new(value.r, value.g, value.b),
                        value.a,
                    )
                })
            })
            .collect())
    }

    async fn variable(&self, id: &VariableId) -> Result<Option<VariableInfo>, HostError> {
        let document = self.document.read().await;
        for collection in &document.collections {
            if let Some(v) = collection.variables.iter().find(|v| v.id == id.as_str()) {
                return Ok(Some(VariableInfo {
                    id: VariableId::new(v.id.clone()),
                    name: v.name.clone(),
                }));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl ElementStore for InMemoryHost {
    async fn target_elements(&self) -> Result<Vec<(ElementId, String)>, HostError> {
        let document = self.document.read().await;
        if document.selection.is_empty() {
            return Ok(document
                .elements
                .iter()
                .map(|e| (ElementId::new(e.id.clone()), e.name.clone()))
                .collect());
        }

        Ok(document
            .selection
            .iter()
            .filter_map(|id| {
                document
                    .elements
                    .iter()
                    .find(|e| &e.id == id)
                    .map(|e| (ElementId::new(e.id.clone()), e.name.clone()))
            })
            .collect())
    }

    async fn paint_slots(&self, element: &ElementId) -> Result<Vec<PaintSlot>, HostError> {
        let document = self.document.read().await;
        Ok(document
            .elements
            .iter()
            .find(|e| e.id == element.as_str())
            .map(element_slots)
            .unwrap_or_default())
    }

    async fn paint_slot(
        &self,
        element: &ElementId,
        property: PaintProperty,
        index: usize,
    ) -> Result<Option<PaintSlot>, HostError> {
        let document = self.document.read().await;
        let Some(def) = document.elements.iter().find(|e| e.id == element.as_str()) else {
            return Ok(None);
        };
        let list = match property {
            PaintProperty::Fill => &def.fills,
            PaintProperty::Stroke => &def.strokes,
        };
        Ok(list.get(index).map(|p| paint_slot(p, property, index)))
    }

    async fn element_exists(&self, element: &ElementId) -> Result<bool, HostError> {
        let document = self.document.read().await;
        Ok(document.elements.iter().any(|e| e.id == element.as_str()))
    }

    async fn select(&self, ids: &[ElementId]) -> Result<usize, HostError> {
        let mut document = self.document.write().await;
        let resolved: Vec<String> = ids
            .iter()
            .filter(|id| document.elements.iter().any(|e| e.id == id.as_str()))
            .map(|id| id.as_str().to_string())
            .collect();
        let count = resolved.len();
        document.selection = resolved;
        Ok(count)
    }
}

#[async_trait]
impl VariableStore for InMemoryHost {
    async fn bind(
        &self,
        element: &ElementId,
        property: PaintProperty,
        index: usize,
        variable: &VariableId,
    ) -> Result<PaintSlot, HostError> {
        let mut document = self.document.write().await;

        let variable_exists = document
            .collections
            .iter()
            .any(|c| c.variables.iter().any(|v| v.id == variable.as_str()));
        if !variable_exists {
            return Err(HostError::Backend(format!(
                "variable {variable} does not exist"
            )));
        }

        let Some(def) = document
            .elements
            .iter_mut()
            .find(|e| e.id == element.as_str())
        else {
            return Err(HostError::Backend(format!(
                "element {element} does not exist"
            )));
        };
        let list = match property {
            PaintProperty::Fill => &mut def.fills,
            PaintProperty::Stroke => &mut def.strokes,
        };
        let Some(paint) = list.get_mut(index) else {
            return Err(HostError::Backend(format!(
                "no {property} paint at index {index} on element {element}"
            )));
        };

        paint.bound = Some(variable.as_str().to_string());
        Ok(paint_slot(paint, property, index))
    }
}
