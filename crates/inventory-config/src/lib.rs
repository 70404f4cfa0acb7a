//! Item configuration for the inventory manager
//!
//! Each tracked item is described by an [`ItemConfig`]: a required name,
//! consumption limit and warning threshold, plus optional size, unit, agent
//! and vendor. Items are read from a YAML file:
//!
//! ```yaml
//! items:
//!   - item_name: Ibuprofen
//!     item_size: 400
//!     item_unit: mg
//!     warning_days_before_empty: 7
//! ```
//!
//! Loaded items become [`ItemEntry`] values carrying a stable entry id.
//! Options updates are merged through [`ItemOptions`].

mod entry;
mod error;
mod item;
mod loader;

pub use entry::ItemEntry;
pub use error::{ConfigError, ConfigResult};
pub use item::{ItemConfig, ItemOptions};
pub use loader::{load_items, load_items_str, InventoryFile, ItemDefinition};

/// Configuration keys, shared with service and attribute naming
pub mod keys {
    pub const ITEM_NAME: &str = "item_name";
    pub const ITEM_SIZE: &str = "item_size";
    pub const ITEM_VENDOR: &str = "item_vendor";
    pub const ITEM_MAX_CONSUMPTION: &str = "item_max_consumption";
    pub const WARNING_DAYS_BEFORE_EMPTY: &str = "warning_days_before_empty";
    pub const ITEM_AGENT: &str = "item_agent";
    pub const ITEM_UNIT: &str = "item_unit";
    pub const ENABLE_WEEKLY_MONTHLY: &str = "enable_weekly_monthly";
}
