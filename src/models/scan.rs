//! Scan and apply result types.
//!
//! A scan walks the eligible paint slots of the target element set, matches
//! each observed color against the catalog index, and aggregates the raw
//! per-slot items into per-unique-hex summaries. The most recent
//! [`ScanResult`] is retained by the orchestrator and consumed by later
//! apply and suggestion requests.

use std::collections::{BTreeSet, HashSet};

use catalog_match::{rgb_to_hex, Rgb};
use chrono::{DateTime, Utc};

use super::{ElementId, PaintProperty, VariableId};

/// One unbound solid paint slot observed during a scan.
///
/// Created during the scan pass and consumed immediately by matching; not
/// persisted beyond the scan result that holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedColor {
    pub owner: ElementId,
    /// Display name of the owning element, captured at traversal time so
    /// apply failures can be reported against a human-readable name.
    pub owner_name: String,
    pub property: PaintProperty,
    pub index: usize,
    pub rgb: Rgb,
    pub opacity: f32,
}

impl ObservedColor {
    /// Lowercase 6-digit hex of the observed RGB, ignoring opacity.
    pub fn hex(&self) -> String {
        rgb_to_hex(self.rgb)
    }
}

/// Catalog entry an observed color matched exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedEntry {
    pub id: VariableId,
    pub name: String,
}

/// One observed color together with its match outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanItem {
    pub observed: ObservedColor,
    pub matched: Option<MatchedEntry>,
}

/// First matching entry seen for a unique hex during a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedColor {
    pub hex: String,
    pub variable_id: VariableId,
    pub variable_name: String,
}

/// Outcome of one scan pass. The most recent result is process-wide state,
/// replaced wholesale by the next scan.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Raw per-slot items in traversal order.
    pub items: Vec<ScanItem>,
    /// Unique matched hexes in first-seen order; the first matching item per
    /// hex contributes the entry name and id.
    pub matched_colors: Vec<MatchedColor>,
    /// Unique hexes with no exact match, sorted ascending.
    pub no_match_hexes: BTreeSet<String>,
    /// Number of paint slots scanned.
    pub total_scanned: usize,
    pub scanned_at: Option<DateTime<Utc>>,
    /// Set when the scan aborted before producing items (catalog failure,
    /// traversal failure). Never set together with a non-empty item list.
    pub error: Option<String>,
}

impl ScanResult {
    /// Aggregate raw scan items into per-unique-hex summaries.
    ///
    /// Dedup is by hex, ignoring opacity. The first matched item per hex
    /// wins; later color-identical matches do not overwrite it. A hex lands
    /// in `no_match_hexes` whenever any item at that hex went unmatched,
    /// regardless of how many slots share it.
    pub fn from_items(items: Vec<ScanItem>, scanned_at: DateTime<Utc>) -> Self {
        let mut matched_colors: Vec<MatchedColor> = Vec::new();
        let mut matched_seen: HashSet<String> = HashSet::new();
        let mut no_match_hexes: BTreeSet<String> = BTreeSet::new();

        for item in &items {
            let hex = item.observed.hex();
            match &item.matched {
                Some(entry) => {
                    if matched_seen.insert(hex.clone()) {
                        matched_colors.push(MatchedColor {
                            hex,
                            variable_id: entry.id.clone(),
                            variable_name: entry.name.clone(),
                        });
                    }
                }
                None => {
                    no_match_hexes.insert(hex);
                }
            }
        }

        let total_scanned = items.len();
        Self {
            items,
            matched_colors,
            no_match_hexes,
            total_scanned,
            scanned_at: Some(scanned_at),
            error: None,
        }
    }

    /// An empty result carrying only an error message.
    pub fn failed(message: impl Into<String>, scanned_at: DateTime<Utc>) -> Self {
        Self {
            scanned_at: Some(scanned_at),
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of scanned slots that went unmatched.
    pub fn no_match_items(&self) -> usize {
        self.items.iter().filter(|i| i.matched.is_none()).count()
    }
}

/// Per-item outcome of an apply pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    Applied,
    Skipped,
    Failed(String),
}

/// Aggregated apply outcomes for one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateOutcome {
    pub applied_count: usize,
    pub skipped_count: usize,
    pub failed_count: usize,
    /// One reason per failed item, in processing order, each prefixed with
    /// the owning element's display name.
    pub failed_reasons: Vec<String>,
}

impl AggregateOutcome {
    pub fn record(&mut self, outcome: ApplyOutcome) {
        match outcome {
            ApplyOutcome::Applied => self.applied_count += 1,
            ApplyOutcome::Skipped => self.skipped_count += 1,
            ApplyOutcome::Failed(reason) => {
                self.failed_count += 1;
                self.failed_reasons.push(reason);
            }
        }
    }
}
