pub mod import;
pub mod store;
pub mod types;

// Re-export the main API for easier access
pub use import::RosterLine;
pub use store::RosterStore;
pub use types::{ImportSummary, RosterRow, StudentRecord};
