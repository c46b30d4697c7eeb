pub mod config;
pub mod document;
pub mod ids;
pub mod paint;
pub mod scan;

pub use config::AppConfig;
pub use document::{CollectionDef, CollectionSource, ColorValue, Document, DocumentError, ElementDef, PaintDef, VariableDef};
pub use ids::{ElementId, VariableId};
pub use paint::{PaintKind, PaintProperty, PaintSlot};
pub use scan::{
    AggregateOutcome, ApplyOutcome, MatchedColor, MatchedEntry, ObservedColor, ScanItem, ScanResult,
};
