pub mod apply;
pub mod candidates;
pub mod collections;
pub mod scan;
pub mod select;

pub use apply::{handle_apply, handle_apply_color, ApplyColorRequest, OutcomeResponse};
pub use apply::{__path_handle_apply, __path_handle_apply_color};
pub use candidates::{
    handle_candidates, handle_suggestions, CandidatesResponse, SuggestionsResponse,
};
pub use candidates::{__path_handle_candidates, __path_handle_suggestions};
pub use collections::{handle_collections, CollectionsResponse};
pub use collections::__path_handle_collections;
pub use scan::{handle_scan, ScanRequest, ScanResponse};
pub use scan::__path_handle_scan;
pub use select::{handle_select, SelectRequest, SelectResponse};
pub use select::__path_handle_select;
