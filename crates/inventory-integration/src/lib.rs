//! Inventory manager integration
//!
//! Ties the pieces together: each configured [`ItemEntry`] gets a
//! [`SupplyTracker`](inventory_tracker::SupplyTracker) and a set of entity
//! facets, owned by the [`InventoryManager`]. Callers mutate trackers through
//! the registered services and read them back as rendered states.
//!
//! [`ItemEntry`]: inventory_config::ItemEntry

mod error;
mod manager;
mod services;

pub use error::{IntegrationError, IntegrationResult};
pub use manager::{tracker_settings, ConsumeRequest, InventoryManager};
pub use services::{
    register_services, ATTR_AMOUNT, ATTR_PREDEFINED_AMOUNT, ATTR_VALUE, SERVICE_CONSUME,
    SERVICE_SET_VALUE, SERVICE_STORE,
};

use std::sync::Arc;

use inventory_config::ItemEntry;
use inventory_services::ServiceRegistry;
use tracing::warn;

/// Set up every entry, skipping (and logging) the ones that fail
///
/// Returns the number of entries set up.
pub fn setup_entries(manager: &InventoryManager, entries: Vec<ItemEntry>) -> usize {
    let mut count = 0;
    for entry in entries {
        let entry_id = entry.entry_id.clone();
        match manager.setup_entry(entry) {
            Ok(_) => count += 1,
            Err(e) => warn!(%entry_id, error = %e, "Failed to set up inventory item"),
        }
    }
    count
}

/// Create a manager with the given entries and register its services
pub fn setup(
    services: &ServiceRegistry,
    entries: Vec<ItemEntry>,
) -> Result<Arc<InventoryManager>, inventory_services::ServiceError> {
    let manager = Arc::new(InventoryManager::new());
    setup_entries(&manager, entries);
    register_services(services, manager.clone())?;
    Ok(manager)
}
