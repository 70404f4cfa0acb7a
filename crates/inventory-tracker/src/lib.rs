//! Supply tracking for a single inventory item
//!
//! A [`SupplyTracker`] owns the quantity store of one configured item and
//! derives the daily consumption, days remaining and low-supply warning from
//! it. Derived values are recomputed on every read, so callers can hand a
//! shared borrow to any number of display facets without cache invalidation.

mod store;
mod tracker;

pub use store::QuantityStore;
pub use tracker::{SupplyTracker, TrackerSettings};
