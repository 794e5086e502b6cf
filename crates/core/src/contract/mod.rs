//! Contract types shared by every storage engine
//!
//! These types define the consistency contract between batch construction
//! and the storage engine:
//!
//! - `version`: Opaque version token (`Version`)
//! - `document`: The storage-layer unit (`Document`)
//! - `outcome`: Result of an atomic conditional commit (`CommitOutcome`)

pub mod document;
pub mod outcome;
pub mod version;

// Re-exports
pub use document::Document;
pub use outcome::{CommitOutcome, UpdateConflict};
pub use version::Version;
