//! Nearest-neighbor candidate ranking.
//!
//! When a scanned color has no exact catalog match, the engine offers a
//! bounded list of closest alternatives. Ranking is plain Euclidean distance
//! in raw RGB space (opacity excluded), ascending, with exact ties broken by
//! entry name so the ordering is reproducible for identical inputs.

use std::cmp::Ordering;

use crate::color::{rgb_to_hex, Rgb};
use crate::index::ColorEntry;

/// Distances closer than this are treated as exact ties and ordered by name.
pub const DISTANCE_EPSILON: f32 = 1e-6;

/// One ranked catalog entry offered as a close-but-inexact alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Variable handle of the entry.
    pub id: String,
    /// Entry name.
    pub name: String,
    /// Entry color as a lowercase 6-digit hex string.
    pub hex: String,
    /// Euclidean RGB distance from the target.
    pub distance: f32,
}

/// Rank `candidates` by distance from `target` and truncate to `limit`.
///
/// Output is non-increasing in closeness: ascending by distance, ties within
/// [`DISTANCE_EPSILON`] ascending by name. Length is
/// `min(limit, candidates.len())`. The ordering depends only on the input
/// slice, never on map iteration order.
pub fn rank(target: Rgb, candidates: &[ColorEntry], limit: usize) -> Vec<Candidate> {
    let mut ranked: Vec<Candidate> = candidates
        .iter()
        .map(|entry| Candidate {
            id: entry.id.clone(),
            name: entry.name.clone(),
            hex: rgb_to_hex(entry.rgb),
            distance: target.distance_to(entry.rgb),
        })
        .collect();

    ranked.sort_by(|a, b| {
        if (a.distance - b.distance).abs() < DISTANCE_EPSILON {
            a.name.cmp(&b.name)
        } else {
            a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal)
        }
    });
    ranked.truncate(limit);
    ranked
}
