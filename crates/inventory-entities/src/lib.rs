//! Entity facets of an inventory item
//!
//! Every configured item is presented through several facets that all read
//! from the same [`SupplyTracker`]: writable numbers for the supply and each
//! consumption slot, a timestamp sensor with the predicted depletion time and
//! a binary problem sensor for low supply. Facets never store the tracker or
//! any derived value; they borrow it when rendering.

mod binary_sensor;
mod device;
mod naming;
mod number;
mod sensor;

pub use binary_sensor::WarnSensor;
pub use device::{DeviceEntryType, DeviceInfo};
pub use naming::{generate_entity_id, slugify, unique_id, EntityConfig};
pub use number::{EntityCategory, NumberEntity, MAX_SUPPLY, NUMBER_STEP};
pub use sensor::EmptyPredictionSensor;

use chrono::{DateTime, Utc};
use inventory_config::ItemConfig;
use inventory_core::{DerivedOutput, EntityId, EntityIdError, EntityKind, Quantity, State};
use inventory_tracker::SupplyTracker;
use tracing::debug;

/// Platform domains
pub mod domains {
    pub const NUMBER: &str = "number";
    pub const SENSOR: &str = "sensor";
    pub const BINARY_SENSOR: &str = "binary_sensor";
}

/// One facet of an item
#[derive(Debug, Clone)]
pub enum Facet {
    Number(NumberEntity),
    Prediction(EmptyPredictionSensor),
    Warning(WarnSensor),
}

impl Facet {
    pub fn entity_id(&self) -> &EntityId {
        match self {
            Facet::Number(e) => e.entity_id(),
            Facet::Prediction(e) => e.entity_id(),
            Facet::Warning(e) => e.entity_id(),
        }
    }

    pub fn unique_id(&self) -> &str {
        match self {
            Facet::Number(e) => e.unique_id(),
            Facet::Prediction(e) => e.unique_id(),
            Facet::Warning(e) => e.unique_id(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Facet::Number(e) => EntityKind::Quantity(e.quantity()),
            Facet::Prediction(_) => EntityKind::Derived(DerivedOutput::EmptyPrediction),
            Facet::Warning(_) => EntityKind::Derived(DerivedOutput::Warning),
        }
    }

    pub fn render(&self, tracker: &SupplyTracker, now: DateTime<Utc>) -> State {
        match self {
            Facet::Number(e) => e.render(tracker, now),
            Facet::Prediction(e) => e.render(tracker, now),
            Facet::Warning(e) => e.render(tracker, now),
        }
    }
}

/// Platform domain of each kind
pub fn domain_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Quantity(_) => domains::NUMBER,
        EntityKind::Derived(DerivedOutput::EmptyPrediction) => domains::SENSOR,
        EntityKind::Derived(DerivedOutput::Warning) => domains::BINARY_SENSOR,
    }
}

/// Quantities that get a number entity for `item`
pub fn enabled_quantities(item: &ItemConfig) -> Vec<Quantity> {
    Quantity::ALL
        .into_iter()
        .filter(|q| item.enable_weekly_monthly || !matches!(q, Quantity::Week | Quantity::Month))
        .collect()
}

/// All facets of one item plus its device
#[derive(Debug, Clone)]
pub struct ItemEntities {
    pub device: DeviceInfo,
    facets: Vec<Facet>,
}

impl ItemEntities {
    /// Build the facets of an item
    ///
    /// `is_taken` reports entity ids already in use elsewhere; ids created
    /// here are also kept unique among themselves.
    pub fn build(
        entry_id: &str,
        item: &ItemConfig,
        is_taken: impl Fn(&EntityId) -> bool,
    ) -> Result<Self, EntityIdError> {
        let mut facets: Vec<Facet> = Vec::new();

        let kinds = enabled_quantities(item)
            .into_iter()
            .map(EntityKind::Quantity)
            .chain(DerivedOutput::ALL.into_iter().map(EntityKind::Derived));

        for kind in kinds {
            let unique_id = unique_id(entry_id, kind);
            let entity_id = generate_entity_id(domain_for(kind), &unique_id, |candidate| {
                is_taken(candidate) || facets.iter().any(|f| f.entity_id() == candidate)
            })?;
            let config = EntityConfig {
                unique_id,
                entity_id,
                kind,
            };

            let facet = match kind {
                EntityKind::Quantity(q) => match q.as_dose() {
                    Some(slot) => Facet::Number(NumberEntity::consumption(config, slot, item)),
                    None => Facet::Number(NumberEntity::supply(config, item)),
                },
                EntityKind::Derived(DerivedOutput::EmptyPrediction) => {
                    Facet::Prediction(EmptyPredictionSensor::new(config, item))
                }
                EntityKind::Derived(DerivedOutput::Warning) => {
                    Facet::Warning(WarnSensor::new(config, item))
                }
            };
            facets.push(facet);
        }

        debug!(entry_id, count = facets.len(), "Built item entities");

        Ok(Self {
            device: DeviceInfo::for_item(entry_id, item),
            facets,
        })
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn get(&self, kind: EntityKind) -> Option<&Facet> {
        self.facets.iter().find(|f| f.kind() == kind)
    }

    pub fn by_entity_id(&self, entity_id: &EntityId) -> Option<&Facet> {
        self.facets.iter().find(|f| f.entity_id() == entity_id)
    }

    pub fn number(&self, quantity: Quantity) -> Option<&NumberEntity> {
        match self.get(EntityKind::Quantity(quantity)) {
            Some(Facet::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Render every facet against the tracker
    pub fn render_all(&self, tracker: &SupplyTracker, now: DateTime<Utc>) -> Vec<State> {
        self.facets.iter().map(|f| f.render(tracker, now)).collect()
    }
}
