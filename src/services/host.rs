//! Collaborator interfaces onto the host document.
//!
//! The matching core never touches the document model directly; it goes
//! through these three seams. Every call is a suspension point on the single
//! cooperative timeline: the caller awaits the collaborator to completion
//! before taking the next step, so no additional synchronization is needed.

use async_trait::async_trait;
use catalog_match::ColorEntry;

use crate::error::HostError;
use crate::models::{ElementId, PaintProperty, PaintSlot, VariableId};

/// Summary of one variable collection visible to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionInfo {
    pub name: String,
    /// Mode names in collection order; the first mode is the fallback when
    /// a requested mode cannot be resolved.
    pub modes: Vec<String>,
}

/// Identity of a resolvable catalog variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    pub id: VariableId,
    pub name: String,
}

/// Access to variable collections and their color values.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Collections local to the host document.
    async fn local_collections(&self) -> Result<Vec<CollectionInfo>, HostError>;

    /// Collections from enabled libraries. May fail when the host denies
    /// access; callers must treat a failure as an empty list, never as a
    /// hard error.
    async fn library_collections(&self) -> Result<Vec<CollectionInfo>, HostError>;

    /// Color-typed entries of one collection under one already-resolved
    /// mode, in collection order.
    async fn color_entries(
        &self,
        collection: &str,
        mode: &str,
    ) -> Result<Vec<ColorEntry>, HostError>;

    /// Resolve a variable by id.
    async fn variable(&self, id: &VariableId) -> Result<Option<VariableInfo>, HostError>;
}

/// Read access to the element tree plus selection control.
#[async_trait]
pub trait ElementStore: Send + Sync {
    /// The current selection if non-empty, else every element in the
    /// document. Pairs of (id, display name) in traversal order.
    async fn target_elements(&self) -> Result<Vec<(ElementId, String)>, HostError>;

    /// All paint slots on one element, fills then strokes, in slot order.
    async fn paint_slots(&self, element: &ElementId) -> Result<Vec<PaintSlot>, HostError>;

    /// Re-read one paint slot; `None` when the element or slot no longer
    /// exists. Used to re-validate between scan and apply.
    async fn paint_slot(
        &self,
        element: &ElementId,
        property: PaintProperty,
        index: usize,
    ) -> Result<Option<PaintSlot>, HostError>;

    /// Whether an element id still resolves.
    async fn element_exists(&self, element: &ElementId) -> Result<bool, HostError>;

    /// Select/focus the given elements in the host. Returns how many ids
    /// resolved.
    async fn select(&self, ids: &[ElementId]) -> Result<usize, HostError>;
}

/// Write access for binding variables onto paint slots.
#[async_trait]
pub trait VariableStore: Send + Sync {
    /// Bind a variable onto a paint slot, leaving the slot's opacity
    /// unchanged. Returns the updated slot.
    async fn bind(
        &self,
        element: &ElementId,
        property: PaintProperty,
        index: usize,
        variable: &VariableId,
    ) -> Result<PaintSlot, HostError>;
}
