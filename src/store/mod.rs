//! Saved-search storage.
//!
//! A saved search owns a deep copy of the query model it was saved from;
//! mutating the live model never changes a saved snapshot. The whole
//! collection is one durable JSON record, written synchronously after every
//! mutation - last write wins, no merging.

pub mod saved;
pub mod seed;
pub mod transfer;

pub use saved::{SavedSearch, SavedSearchCollection, SavedSearchStore, SavedSearchUpdate};
pub use transfer::{EXPORT_TYPE, EXPORT_VERSION};
