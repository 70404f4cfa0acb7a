//! Inventory manager server
//!
//! Loads the configured items, sets up their trackers and services, and
//! recomputes every entity state once an hour until interrupted.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use inventory_integration::InventoryManager;
use inventory_services::ServiceRegistry;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "inventory.yaml";

/// How often derived states are recomputed and published
const UPDATE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// The running integration
pub struct InventoryServer {
    pub services: Arc<ServiceRegistry>,
    pub manager: Arc<InventoryManager>,
}

impl InventoryServer {
    pub fn load(config_path: &PathBuf) -> Result<Self> {
        let entries = inventory_config::load_items(config_path)
            .with_context(|| format!("loading {}", config_path.display()))?;

        let services = Arc::new(ServiceRegistry::new());
        let manager = inventory_integration::setup(&services, entries)?;

        Ok(Self { services, manager })
    }

    /// Render and log every entity state
    pub fn publish_states(&self) {
        for state in self.manager.states(Utc::now()) {
            info!(entity_id = %state.entity_id, state = %state.state, "State");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    info!("Starting inventory manager with {}", config_path.display());

    let server = InventoryServer::load(&config_path)?;
    info!(
        items = server.manager.item_count(),
        services = server.services.service_count(),
        "Inventory manager initialized"
    );

    let mut interval = tokio::time::interval(UPDATE_INTERVAL);
    loop {
        tokio::select! {
            _ = interval.tick() => server.publish_states(),
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}
