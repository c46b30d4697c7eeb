//! YAML document model backing the in-memory host.
//!
//! This is the development and test stand-in for a real host document: a
//! set of variable collections (local and library) and a tree-flattened list
//! of elements with their paint slots. The production collaborator traits in
//! `services::host` are implemented over this model by `InMemoryHost`.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use super::PaintKind;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A loadable snapshot of a host document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub collections: Vec<CollectionDef>,

    #[serde(default)]
    pub elements: Vec<ElementDef>,

    /// Ids of currently selected elements; an empty selection targets the
    /// whole document.
    #[serde(default)]
    pub selection: Vec<String>,
}

impl Document {
    /// Load a document snapshot from a YAML file.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        let document: Self = serde_yaml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            collections = document.collections.len(),
            elements = document.elements.len(),
            "Loaded document"
        );
        Ok(document)
    }
}

/// Where a collection lives relative to the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionSource {
    #[default]
    Local,
    Library,
}

/// One named variable collection with its modes and color variables.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionDef {
    pub name: String,

    #[serde(default)]
    pub source: CollectionSource,

    #[serde(default)]
    pub modes: Vec<String>,

    #[serde(default)]
    pub variables: Vec<VariableDef>,
}

/// One color variable with per-mode values.
#[derive(Debug, Clone, Deserialize)]
pub struct VariableDef {
    pub id: String,
    pub name: String,

    /// Mode name -> color value.
    #[serde(default)]
    pub values: HashMap<String, ColorValue>,
}

/// A color value as stored in the document.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ColorValue {
    pub r: f32,
    pub g: f32,
    pub b: f32,

    #[serde(default = "default_alpha")]
    pub a: f32,
}

fn default_alpha() -> f32 {
    1.0
}

/// One visual element with its fill and stroke paint lists.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementDef {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub fills: Vec<PaintDef>,

    #[serde(default)]
    pub strokes: Vec<PaintDef>,
}

/// One paint in an element's fill or stroke list.
#[derive(Debug, Clone, Deserialize)]
pub struct PaintDef {
    #[serde(default)]
    pub kind: PaintKind,

    #[serde(default)]
    pub r: f32,

    #[serde(default)]
    pub g: f32,

    #[serde(default)]
    pub b: f32,

    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Id of a variable already bound onto this paint, if any.
    #[serde(default)]
    pub bound: Option<String>,
}

fn default_opacity() -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_document() {
        let yaml = r#"
collections:
  - name: Primitive
    modes: [Light, Dark]
    variables:
      - id: v1
        name: blue/500
        values:
          Light: { r: 0.0, g: 0.0, b: 1.0 }
          Dark: { r: 0.1, g: 0.1, b: 0.9 }
  - name: Brand
    source: library
    modes: [Default]
elements:
  - id: e1
    name: card
    fills:
      - { r: 0.0, g: 0.0, b: 1.0 }
      - { kind: gradient }
    strokes:
      - { r: 1.0, g: 1.0, b: 1.0, bound: v7 }
selection: [e1]
"#;
        let document: Document = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(document.collections.len(), 2);
        assert_eq!(document.collections[0].source, CollectionSource::Local);
        assert_eq!(document.collections[1].source, CollectionSource::Library);

        let variable = &document.collections[0].variables[0];
        assert_eq!(variable.name, "blue/500");
        assert_eq!(variable.values["Light"].a, 1.0);

        let element = &document.elements[0];
        assert_eq!(element.fills[0].kind, PaintKind::Solid);
        assert_eq!(element.fills[0].opacity, 1.0);
        assert_eq!(element.fills[1].kind, PaintKind::Gradient);
        assert_eq!(element.strokes[0].bound.as_deref(), Some("v7"));
        assert_eq!(document.selection, ["e1"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Document::load(Path::new("/nonexistent/document.yaml"));
        assert!(matches!(result, Err(DocumentError::Io(_))));
    }

    #[test]
    fn test_empty_document_defaults() {
        let document: Document = serde_yaml::from_str("{}").unwrap();
        assert!(document.collections.is_empty());
        assert!(document.elements.is_empty());
        assert!(document.selection.is_empty());
    }
}
