mod discovery;
mod error;
mod identity;
mod import;

pub use discovery::{DiscoverOutcome, DiscoveredAgent, DiscoveryResolver};
pub use error::SyncError;
pub use import::{ImportOutcome, ImportReconciler, ImportRequest, REASON_ALREADY_IMPORTED, SkippedImport};
