//! Catalog index construction.
//!
//! A catalog index holds two views of the same set of entries: an exact-match
//! map keyed by [`exact_key`](crate::key::exact_key) and a flat candidate
//! list in processing order. Group filters restrict the entries to those
//! whose names start with one of an ordered set of prefixes; earlier prefixes
//! take priority when two entries collide on the same exact key.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::key::exact_key;

/// One named color value in a catalog.
///
/// Immutable snapshot of a catalog variable's value under one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorEntry {
    /// Opaque variable handle in the host document.
    pub id: String,
    /// Variable name, e.g. "blue/500".
    pub name: String,
    /// Color value.
    pub rgb: Rgb,
    /// Alpha in 0.0..=1.0.
    pub alpha: f32,
}

impl ColorEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rgb: Rgb, alpha: f32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rgb,
            alpha,
        }
    }

    /// The exact-match identity key of this entry's value.
    pub fn exact_key(&self) -> String {
        exact_key(self.rgb.r, self.rgb.g, self.rgb.b, self.alpha)
    }
}

/// Exact-match map plus ordered candidate list for one catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    /// Exact key -> entry. Collision policy depends on whether group filters
    /// were applied at build time.
    pub exact: HashMap<String, ColorEntry>,
    /// Every indexed entry, in processing order. Input to candidate ranking.
    pub list: Vec<ColorEntry>,
}

impl CatalogIndex {
    /// Build an index from catalog entries in collection order.
    ///
    /// Without a filter every entry is indexed; on exact-key collisions the
    /// last entry wins. With a filter, entries are processed prefix-group by
    /// prefix-group in the filter's priority order, and on collisions the
    /// first insertion wins, so an entry under an earlier prefix shadows a
    /// color-identical entry under a later one. An entry matching more than
    /// one prefix is indexed once, under its earliest matching prefix.
    pub fn build(entries: &[ColorEntry], filter: Option<&[String]>) -> CatalogIndex {
        let mut exact = HashMap::new();
        let mut list = Vec::new();

        match filter {
            None => {
                for entry in entries {
                    exact.insert(entry.exact_key(), entry.clone());
                    list.push(entry.clone());
                }
            }
            Some(prefixes) => {
                let mut taken = vec![false; entries.len()];
                for prefix in prefixes {
                    for (i, entry) in entries.iter().enumerate() {
                        if taken[i] || !entry.name.starts_with(prefix.as_str()) {
                            continue;
                        }
                        taken[i] = true;
                        exact
                            .entry(entry.exact_key())
                            .or_insert_with(|| entry.clone());
                        list.push(entry.clone());
                    }
                }
            }
        }

        CatalogIndex { exact, list }
    }

    /// Look up the entry exactly matching a color value, if any.
    ///
    /// O(1) expected, no side effects.
    pub fn find_exact(&self, r: f32, g: f32, b: f32, alpha: f32) -> Option<&ColorEntry> {
        self.exact.get(&exact_key(r, g, b, alpha))
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// True when no entries survived mode/filter resolution.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// Resolve a requested mode name against a collection's available modes.
///
/// Matching is case-insensitive; when nothing matches, the collection's
/// first mode is used instead. Returns `None` only for a collection with no
/// modes at all.
pub fn resolve_mode<'a>(modes: &'a [String], requested: &str) -> Option<&'a str> {
    modes
        .iter()
        .find(|m| m.eq_ignore_ascii_case(requested))
        .or_else(|| modes.first())
        .map(|s| s.as_str())
}
