use catalog_match::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::VariableId;

/// Which paint list on an element a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaintProperty {
    Fill,
    Stroke,
}

impl fmt::Display for PaintProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintProperty::Fill => write!(f, "fill"),
            PaintProperty::Stroke => write!(f, "stroke"),
        }
    }
}

/// Kind of paint occupying a slot. Only solid paints are eligible for
/// matching; gradients and images are never scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintKind {
    #[default]
    Solid,
    Gradient,
    Image,
}

/// Runtime view of one paint slot on an element, as read from the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintSlot {
    pub property: PaintProperty,
    pub index: usize,
    pub kind: PaintKind,
    pub rgb: Rgb,
    pub opacity: f32,
    /// Variable already bound onto this slot, if any.
    pub bound: Option<VariableId>,
}

impl PaintSlot {
    /// A slot is eligible for scanning and binding when it holds a solid
    /// paint and carries no bound variable reference.
    pub fn is_eligible(&self) -> bool {
        self.kind == PaintKind::Solid && self.bound.is_none()
    }
}
