//! Binary sensor indicating the need to resupply

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use inventory_config::ItemConfig;
use inventory_core::{attrs, EntityId, State, STATE_OFF, STATE_ON, STATE_UNAVAILABLE};
use inventory_tracker::SupplyTracker;
use serde_json::json;
use tracing::debug;

use crate::EntityConfig;

/// Problem flag that turns on when the supply runs low
///
/// Unavailable until the supply has been set at least once.
#[derive(Debug, Clone)]
pub struct WarnSensor {
    config: EntityConfig,
    name: String,
}

impl WarnSensor {
    pub fn new(config: EntityConfig, item: &ItemConfig) -> Self {
        debug!(entity_id = %config.entity_id, "Initializing warning sensor");
        Self {
            config,
            name: format!("{} Warning", item.title()),
        }
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.config.entity_id
    }

    pub fn unique_id(&self) -> &str {
        &self.config.unique_id
    }

    fn translation_key(&self) -> &'static str {
        "problem_entity"
    }

    pub fn render(&self, tracker: &SupplyTracker, now: DateTime<Utc>) -> State {
        let value = match tracker.warning() {
            Some(true) => STATE_ON,
            Some(false) => STATE_OFF,
            None => STATE_UNAVAILABLE,
        };
        debug!(entity_id = %self.config.entity_id, value, "Rendering warning");

        let mut attributes = HashMap::new();
        attributes.insert(attrs::FRIENDLY_NAME.to_string(), json!(self.name));
        attributes.insert(attrs::DEVICE_CLASS.to_string(), json!("problem"));
        attributes.insert(
            attrs::TRANSLATION_KEY.to_string(),
            json!(self.translation_key()),
        );

        State::new(self.config.entity_id.clone(), value, attributes, now)
    }
}
