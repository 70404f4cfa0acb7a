//! Item lifecycle and tracker ownership
//!
//! The manager owns one [`SupplyTracker`] per configured item together with
//! that item's entity facets. Trackers live inside a `DashMap` entry, so every
//! mutation goes through the entry's write guard and is serialized per item.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use inventory_config::{ItemConfig, ItemEntry, ItemOptions};
use inventory_core::{EntityId, EntityKind, Quantity, State};
use inventory_entities::{DeviceInfo, Facet, ItemEntities};
use inventory_tracker::{SupplyTracker, TrackerSettings};
use tracing::{debug, info, instrument, warn};

use crate::{IntegrationError, IntegrationResult};

/// A consume request against an item's supply
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsumeRequest {
    /// Take a fixed amount
    Amount(f64),
    /// Take one dose of the named kind; non-dose kinds are ignored
    Dose(EntityKind),
}

/// Everything held for one set-up item
#[derive(Debug)]
struct LoadedItem {
    entry: ItemEntry,
    entities: ItemEntities,
    tracker: SupplyTracker,
}

/// Owns all configured items
pub struct InventoryManager {
    items: DashMap<String, LoadedItem>,
    /// entity_id -> entry_id
    entity_index: DashMap<EntityId, String>,
}

/// Tracker parameters derived from an item's configuration
pub fn tracker_settings(config: &ItemConfig) -> TrackerSettings {
    TrackerSettings {
        warning_days: f64::from(config.warning_days_before_empty),
    }
}

impl InventoryManager {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            entity_index: DashMap::new(),
        }
    }

    /// Set up an item: create its tracker and entities
    ///
    /// Returns the entity ids of the new facets.
    #[instrument(skip(self, entry), fields(entry_id = %entry.entry_id))]
    pub fn setup_entry(&self, entry: ItemEntry) -> IntegrationResult<Vec<EntityId>> {
        if self.items.contains_key(&entry.entry_id) {
            return Err(IntegrationError::AlreadyConfigured(entry.entry_id));
        }
        entry.config.validate()?;

        let entities = ItemEntities::build(&entry.entry_id, &entry.config, |id| {
            self.entity_index.contains_key(id)
        })?;
        let tracker = SupplyTracker::new(tracker_settings(&entry.config));

        let entity_ids: Vec<EntityId> = entities
            .facets()
            .iter()
            .map(|f| f.entity_id().clone())
            .collect();
        for id in &entity_ids {
            self.entity_index.insert(id.clone(), entry.entry_id.clone());
        }

        info!(title = %entry.title, entities = entity_ids.len(), "Set up inventory item");
        self.items.insert(
            entry.entry_id.clone(),
            LoadedItem {
                entry,
                entities,
                tracker,
            },
        );
        Ok(entity_ids)
    }

    /// Remove an item together with its tracker and entities
    #[instrument(skip(self))]
    pub fn unload_entry(&self, entry_id: &str) -> IntegrationResult<ItemEntry> {
        let item = self.remove_item(entry_id)?;
        info!(title = %item.entry.title, "Unloaded inventory item");
        Ok(item.entry)
    }

    fn remove_item(&self, entry_id: &str) -> IntegrationResult<LoadedItem> {
        let (_, item) = self
            .items
            .remove(entry_id)
            .ok_or_else(|| IntegrationError::EntryNotFound(entry_id.to_string()))?;
        for facet in item.entities.facets() {
            self.entity_index.remove(facet.entity_id());
        }
        Ok(item)
    }

    /// Apply an options update and reload the item in place
    ///
    /// Tracked quantities survive the reload; the entities are rebuilt from
    /// the merged configuration. The item stays locked for the whole reload
    /// and is left unchanged when the update fails.
    #[instrument(skip(self, options))]
    pub fn update_options(&self, entry_id: &str, options: &ItemOptions) -> IntegrationResult<()> {
        let mut item = self
            .items
            .get_mut(entry_id)
            .ok_or_else(|| IntegrationError::EntryNotFound(entry_id.to_string()))?;

        let mut entry = item.entry.clone();
        entry.update(options)?;

        // ids held by this item may be reused
        let entities = ItemEntities::build(entry_id, &entry.config, |id| {
            self.entity_index
                .get(id)
                .map_or(false, |owner| owner.value().as_str() != entry_id)
        })?;

        for facet in item.entities.facets() {
            self.entity_index.remove(facet.entity_id());
        }
        for facet in entities.facets() {
            self.entity_index
                .insert(facet.entity_id().clone(), entry_id.to_string());
        }

        let store = std::mem::take(&mut item.tracker).into_store();
        item.tracker = SupplyTracker::with_store(tracker_settings(&entry.config), store);
        item.entities = entities;
        item.entry = entry;

        debug!(title = %item.entry.title, "Reloaded inventory item after options update");
        Ok(())
    }

    /// Check that an entity exists and accepts values
    pub fn ensure_writable(&self, entity_id: &EntityId) -> IntegrationResult<()> {
        match self.resolve(entity_id) {
            Some((_, EntityKind::Quantity(_))) => Ok(()),
            Some(_) => Err(IntegrationError::NotWritable(entity_id.to_string())),
            None => Err(IntegrationError::EntityNotFound(entity_id.to_string())),
        }
    }

    /// Restore saved number values after a restart
    ///
    /// Quantities missing from `saved` are left untouched.
    pub fn restore(
        &self,
        entry_id: &str,
        saved: &HashMap<Quantity, serde_json::Value>,
    ) -> IntegrationResult<()> {
        let mut item = self
            .items
            .get_mut(entry_id)
            .ok_or_else(|| IntegrationError::EntryNotFound(entry_id.to_string()))?;
        let LoadedItem {
            entities, tracker, ..
        } = &mut *item;

        for facet in entities.facets() {
            if let Facet::Number(number) = facet {
                number.restore(tracker, saved.get(&number.quantity()));
            }
        }
        Ok(())
    }

    pub fn entry(&self, entry_id: &str) -> Option<ItemEntry> {
        self.items.get(entry_id).map(|item| item.entry.clone())
    }

    pub fn device(&self, entry_id: &str) -> Option<DeviceInfo> {
        self.items.get(entry_id).map(|item| item.entities.device.clone())
    }

    /// Ids of every set-up item, sorted
    pub fn entry_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.items.iter().map(|r| r.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Find the item and kind behind an entity id
    pub fn resolve(&self, entity_id: &EntityId) -> Option<(String, EntityKind)> {
        let entry_id = self.entity_index.get(entity_id)?.clone();
        let kind = self
            .items
            .get(&entry_id)?
            .entities
            .by_entity_id(entity_id)?
            .kind();
        Some((entry_id, kind))
    }

    /// Read from an item's tracker
    pub fn with_tracker<R>(
        &self,
        entry_id: &str,
        f: impl FnOnce(&SupplyTracker) -> R,
    ) -> IntegrationResult<R> {
        let item = self
            .items
            .get(entry_id)
            .ok_or_else(|| IntegrationError::EntryNotFound(entry_id.to_string()))?;
        Ok(f(&item.tracker))
    }

    /// Mutate an item's tracker under its entry guard
    pub fn with_tracker_mut<R>(
        &self,
        entry_id: &str,
        f: impl FnOnce(&mut SupplyTracker) -> R,
    ) -> IntegrationResult<R> {
        let mut item = self
            .items
            .get_mut(entry_id)
            .ok_or_else(|| IntegrationError::EntryNotFound(entry_id.to_string()))?;
        Ok(f(&mut item.tracker))
    }

    pub fn set_quantity(&self, entry_id: &str, quantity: Quantity, value: f64) -> IntegrationResult<()> {
        self.with_tracker_mut(entry_id, |t| t.set_quantity(quantity, value))
    }

    /// Apply a consume request, returning the remaining supply
    pub fn consume(&self, entry_id: &str, request: ConsumeRequest) -> IntegrationResult<f64> {
        self.with_tracker_mut(entry_id, |tracker| {
            match request {
                ConsumeRequest::Amount(amount) => tracker.consume_amount(amount),
                ConsumeRequest::Dose(kind) => {
                    tracker.consume_kind(kind);
                }
            }
            tracker.quantity(Quantity::Supply)
        })
    }

    /// Add to an item's supply, returning the new supply
    pub fn restock(&self, entry_id: &str, amount: f64) -> IntegrationResult<f64> {
        self.with_tracker_mut(entry_id, |tracker| {
            tracker.restock(amount);
            tracker.quantity(Quantity::Supply)
        })
    }

    /// Write a value through a number entity, clamped into its range
    pub fn set_number_value(&self, entity_id: &EntityId, value: f64) -> IntegrationResult<()> {
        let entry_id = self
            .entity_index
            .get(entity_id)
            .map(|r| r.clone())
            .ok_or_else(|| IntegrationError::EntityNotFound(entity_id.to_string()))?;
        let mut item = self
            .items
            .get_mut(&entry_id)
            .ok_or_else(|| IntegrationError::EntryNotFound(entry_id.clone()))?;
        let LoadedItem {
            entities, tracker, ..
        } = &mut *item;

        match entities.by_entity_id(entity_id) {
            Some(Facet::Number(number)) => {
                number.set_native_value(tracker, value);
                Ok(())
            }
            Some(_) => Err(IntegrationError::NotWritable(entity_id.to_string())),
            None => {
                warn!(%entity_id, "Entity index out of sync with item entities");
                Err(IntegrationError::EntityNotFound(entity_id.to_string()))
            }
        }
    }

    /// Render one entity
    pub fn state(&self, entity_id: &EntityId, now: DateTime<Utc>) -> Option<State> {
        let entry_id = self.entity_index.get(entity_id)?.clone();
        let item = self.items.get(&entry_id)?;
        let facet = item.entities.by_entity_id(entity_id)?;
        Some(facet.render(&item.tracker, now))
    }

    /// Render every entity of one item
    pub fn entry_states(&self, entry_id: &str, now: DateTime<Utc>) -> IntegrationResult<Vec<State>> {
        let item = self
            .items
            .get(entry_id)
            .ok_or_else(|| IntegrationError::EntryNotFound(entry_id.to_string()))?;
        Ok(item.entities.render_all(&item.tracker, now))
    }

    /// Render every entity of every item
    pub fn states(&self, now: DateTime<Utc>) -> Vec<State> {
        let mut states: Vec<State> = self
            .items
            .iter()
            .flat_map(|item| item.entities.render_all(&item.tracker, now))
            .collect();
        states.sort_by(|a, b| a.entity_id.cmp(&b.entity_id));
        states
    }
}

impl Default for InventoryManager {
    fn default() -> Self {
        Self::new()
    }
}
