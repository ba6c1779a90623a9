//! Immutable catalog data and derived lookup structures.
//!
//! Catalog records come from an external provider (out of scope here) and are
//! treated as read-only snapshots: the engine validates them once, builds a
//! variant index per product, and answers lookups until the snapshot is
//! swapped for a fresher one.

pub mod index;
pub mod snapshot;
pub mod types;

pub use index::VariantIndex;
pub use snapshot::{CatalogError, CatalogSnapshot};
pub use types::{Collection, Product, ProductOption, ProductVariant};
