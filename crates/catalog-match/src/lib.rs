//! catalog-match: exact-key indexing and nearest-color ranking for named
//! color catalogs.
//!
//! This crate is the algorithmic core of tokenbind: given the named color
//! entries of one collection under one mode, it builds an exact-match index
//! (RGB identity plus quantized alpha) and a flat candidate list, and ranks
//! candidates by Euclidean RGB distance when no exact match exists.
//!
//! # Quick start
//!
//! ```
//! use catalog_match::{CatalogIndex, ColorEntry, Rgb, rank};
//!
//! let entries = [ColorEntry::new("v1", "blue/500", Rgb::new(0.0, 0.0, 1.0), 1.0)];
//! let index = CatalogIndex::build(&entries, None);
//!
//! // Exact lookup
//! assert!(index.find_exact(0.0, 0.0, 1.0, 1.0).is_some());
//!
//! // Nearest candidates for a color with no exact match
//! let candidates = rank(Rgb::new(1.0, 0.0, 0.0), &index.list, 12);
//! assert_eq!(candidates[0].name, "blue/500");
//! ```
//!
//! # Group filters
//!
//! [`CatalogIndex::build`] accepts an ordered list of name prefixes. Earlier
//! prefixes take priority: when two entries under different prefixes share an
//! exact key, the entry from the earlier-listed prefix owns the key, while
//! both stay in the candidate list.

pub mod color;
pub mod error;
pub mod index;
pub mod key;
pub mod rank;

pub use color::{parse_hex, rgb_to_hex, Rgb};
pub use error::ParseColorError;
pub use index::{resolve_mode, CatalogIndex, ColorEntry};
pub use key::exact_key;
pub use rank::{rank, Candidate, DISTANCE_EPSILON};
