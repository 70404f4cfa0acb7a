//! Sensor predicting when the supply runs out

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use inventory_config::ItemConfig;
use inventory_core::{attrs, EntityId, State};
use inventory_tracker::SupplyTracker;
use serde_json::json;
use tracing::debug;

use crate::EntityConfig;

/// Timestamp sensor with the predicted depletion time
#[derive(Debug, Clone)]
pub struct EmptyPredictionSensor {
    config: EntityConfig,
    name: String,
}

impl EmptyPredictionSensor {
    pub fn new(config: EntityConfig, item: &ItemConfig) -> Self {
        debug!(entity_id = %config.entity_id, "Initializing empty prediction sensor");
        Self {
            config,
            name: format!("{} Supply empty", item.title()),
        }
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.config.entity_id
    }

    pub fn unique_id(&self) -> &str {
        &self.config.unique_id
    }

    fn translation_key(&self) -> &'static str {
        "sensor_entity"
    }

    pub fn native_value(&self, tracker: &SupplyTracker, now: DateTime<Utc>) -> DateTime<Utc> {
        tracker.predicted_empty_at(now)
    }

    pub fn render(&self, tracker: &SupplyTracker, now: DateTime<Utc>) -> State {
        let empty_at = self.native_value(tracker, now);
        debug!(entity_id = %self.config.entity_id, %empty_at, "Rendering prediction");

        let mut attributes = HashMap::new();
        attributes.insert(attrs::FRIENDLY_NAME.to_string(), json!(self.name));
        attributes.insert(attrs::DEVICE_CLASS.to_string(), json!("timestamp"));
        attributes.insert(
            attrs::DAYS_REMAINING.to_string(),
            json!(tracker.days_remaining()),
        );
        attributes.insert(attrs::DAILY.to_string(), json!(tracker.daily_consumption()));
        attributes.insert(
            attrs::TRANSLATION_KEY.to_string(),
            json!(self.translation_key()),
        );

        State::new(
            self.config.entity_id.clone(),
            empty_at.to_rfc3339_opts(SecondsFormat::Secs, false),
            attributes,
            now,
        )
    }
}
