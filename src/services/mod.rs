pub mod applier;
pub mod cache;
pub mod catalog;
pub mod host;
pub mod memory_host;
pub mod orchestrator;

pub use applier::BindingApplier;
pub use cache::CatalogCache;
pub use catalog::CatalogService;
pub use host::{CatalogStore, CollectionInfo, ElementStore, VariableInfo, VariableStore};
pub use memory_host::InMemoryHost;
pub use orchestrator::ScanOrchestrator;
