//! Number entities: the supply and the per-slot consumption inputs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use inventory_config::ItemConfig;
use inventory_core::{attrs, DoseSlot, EntityId, Quantity, State};
use inventory_tracker::SupplyTracker;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::EntityConfig;

/// Largest supply a number entity accepts
pub const MAX_SUPPLY: f64 = 1_000_000.0;

/// Increment offered by the UI
pub const NUMBER_STEP: f64 = 0.25;

/// Where the entity is listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Config,
    Diagnostic,
}

/// A writable numeric facet bound to one [`Quantity`]
#[derive(Debug, Clone)]
pub struct NumberEntity {
    config: EntityConfig,
    quantity: Quantity,
    name: String,
    min: f64,
    max: f64,
    step: f64,
    unit: String,
    icon: &'static str,
    category: Option<EntityCategory>,
}

impl NumberEntity {
    /// The supply on hand
    pub fn supply(config: EntityConfig, item: &ItemConfig) -> Self {
        debug!(entity_id = %config.entity_id, "Initializing supply entity");
        Self {
            config,
            quantity: Quantity::Supply,
            name: format!("{} Supply", item.title()),
            min: 0.0,
            max: MAX_SUPPLY,
            step: NUMBER_STEP,
            unit: item.unit().to_string(),
            icon: "mdi:medication",
            category: None,
        }
    }

    /// The dose taken in `slot`, bounded by the item's max consumption
    pub fn consumption(config: EntityConfig, slot: DoseSlot, item: &ItemConfig) -> Self {
        debug!(entity_id = %config.entity_id, slot = ?slot, "Initializing consumption entity");
        Self {
            config,
            quantity: slot.quantity(),
            name: format!("{} {}", item.title(), slot_label(slot)),
            min: 0.0,
            max: item.item_max_consumption,
            step: NUMBER_STEP,
            unit: item.unit().to_string(),
            icon: "mdi:pill-multiple",
            category: Some(EntityCategory::Config),
        }
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.config.entity_id
    }

    pub fn unique_id(&self) -> &str {
        &self.config.unique_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn category(&self) -> Option<EntityCategory> {
        self.category
    }

    pub fn translation_key(&self) -> &'static str {
        match self.quantity {
            Quantity::Supply => "supply_entity",
            Quantity::Morning => "morning_entity",
            Quantity::Noon => "noon_entity",
            Quantity::Evening => "evening_entity",
            Quantity::Night => "night_entity",
            Quantity::Week => "week_entity",
            Quantity::Month => "month_entity",
        }
    }

    pub fn native_value(&self, tracker: &SupplyTracker) -> f64 {
        tracker.quantity(self.quantity)
    }

    /// Write a value, clamped into the entity's range
    pub fn set_native_value(&self, tracker: &mut SupplyTracker, value: f64) {
        let clamped = value.clamp(self.min, self.max);
        debug!(
            entity_id = %self.config.entity_id,
            value,
            clamped,
            "Setting native value"
        );
        tracker.set_quantity(self.quantity, clamped);
    }

    /// Restore the value saved before a restart
    ///
    /// Numbers are written back; any other saved value resets to zero.
    /// Nothing is written when there is no saved value.
    pub fn restore(&self, tracker: &mut SupplyTracker, last: Option<&serde_json::Value>) {
        let Some(last) = last else {
            return;
        };
        let value = last.as_f64().unwrap_or_else(|| {
            debug!(entity_id = %self.config.entity_id, last = %last, "Saved value is not a number");
            0.0
        });
        tracker.set_quantity(self.quantity, value);
    }

    pub fn render(&self, tracker: &SupplyTracker, now: DateTime<Utc>) -> State {
        let mut attributes = HashMap::new();
        attributes.insert(attrs::FRIENDLY_NAME.to_string(), json!(self.name));
        attributes.insert(attrs::ICON.to_string(), json!(self.icon));
        attributes.insert(attrs::UNIT_OF_MEASUREMENT.to_string(), json!(self.unit));
        attributes.insert(attrs::MIN.to_string(), json!(self.min));
        attributes.insert(attrs::MAX.to_string(), json!(self.max));
        attributes.insert(attrs::STEP.to_string(), json!(self.step));
        attributes.insert(attrs::MODE.to_string(), json!("auto"));
        attributes.insert(
            attrs::TRANSLATION_KEY.to_string(),
            json!(self.translation_key()),
        );

        State::new(
            self.config.entity_id.clone(),
            format_number(self.native_value(tracker)),
            attributes,
            now,
        )
    }
}

fn slot_label(slot: DoseSlot) -> &'static str {
    match slot {
        DoseSlot::Morning => "Morning",
        DoseSlot::Noon => "Noon",
        DoseSlot::Evening => "Evening",
        DoseSlot::Night => "Night",
        DoseSlot::Week => "Week",
        DoseSlot::Month => "Month",
    }
}

/// Format a number for state display (no trailing ".0")
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::EntityKind;

    fn entity_config(quantity: Quantity) -> EntityConfig {
        EntityConfig {
            unique_id: format!("pills_{}", quantity.name()),
            entity_id: EntityId::new("number", format!("pills_{}", quantity.name().to_lowercase()))
                .unwrap(),
            kind: EntityKind::Quantity(quantity),
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(2.25), "2.25");
    }

    #[test]
    fn test_consumption_limits() {
        let mut item = ItemConfig::new("Pills");
        item.item_max_consumption = 3.0;
        item.item_unit = Some("tablets".to_string());

        let entity =
            NumberEntity::consumption(entity_config(Quantity::Morning), DoseSlot::Morning, &item);
        assert_eq!(entity.max(), 3.0);
        assert_eq!(entity.category(), Some(EntityCategory::Config));
        assert_eq!(entity.translation_key(), "morning_entity");

        let mut tracker = SupplyTracker::default();
        entity.set_native_value(&mut tracker, 10.0);
        assert_eq!(tracker.quantity(Quantity::Morning), 3.0);

        entity.set_native_value(&mut tracker, -1.0);
        assert_eq!(tracker.quantity(Quantity::Morning), 0.0);
    }

    #[test]
    fn test_supply_render() {
        let item = ItemConfig::new("Pills");
        let entity = NumberEntity::supply(entity_config(Quantity::Supply), &item);

        let mut tracker = SupplyTracker::default();
        entity.set_native_value(&mut tracker, 42.5);

        let state = entity.render(&tracker, Utc::now());
        assert_eq!(state.state, "42.5");
        assert_eq!(state.attribute::<String>("unit_of_measurement").as_deref(), Some("pcs."));
        assert_eq!(state.attribute::<f64>("max"), Some(MAX_SUPPLY));
        assert_eq!(state.attribute::<String>("friendly_name").as_deref(), Some("Pills Supply"));
        assert_eq!(
            state.attribute::<String>("translation_key").as_deref(),
            Some("supply_entity")
        );
        assert_eq!(entity.category(), None);
    }

    #[test]
    fn test_restore() {
        let item = ItemConfig::new("Pills");
        let entity = NumberEntity::supply(entity_config(Quantity::Supply), &item);
        let mut tracker = SupplyTracker::default();

        entity.restore(&mut tracker, None);
        assert!(!tracker.has_supply_data());

        entity.restore(&mut tracker, Some(&json!(17.5)));
        assert_eq!(tracker.quantity(Quantity::Supply), 17.5);
        assert!(tracker.has_supply_data());

        entity.restore(&mut tracker, Some(&json!("unknown")));
        assert_eq!(tracker.quantity(Quantity::Supply), 0.0);
    }
}
