//! Core types for the inventory manager
//!
//! This crate provides the vocabulary shared by every other crate in the
//! workspace: the closed sets of storable quantities and derived outputs,
//! entity identifiers, rendered entity states and service calls.

mod entity_id;
mod kind;
mod service_call;
mod state;

pub use entity_id::{EntityId, EntityIdError};
pub use kind::{DerivedOutput, DoseSlot, EntityKind, Quantity, UnknownKind};
pub use service_call::ServiceCall;
pub use state::State;

/// Integration domain, used for service names and device identifiers
pub const DOMAIN: &str = "inventory_manager";

/// Days remaining reported when nothing is consumed
///
/// A large finite value (roughly 27 years) rather than infinity, so that the
/// predicted depletion timestamp stays representable.
pub const NEVER_EMPTY_DAYS: f64 = 10000.0;

/// Default unit of measurement for quantity entities
pub const UNIT_PCS: &str = "pcs.";

/// State value used for entities without data
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// Standard binary states
pub const STATE_ON: &str = "on";
pub const STATE_OFF: &str = "off";

/// Attribute keys published on entity states
pub mod attrs {
    pub const DAYS_REMAINING: &str = "days_remaining";
    pub const DAILY: &str = "daily";
    pub const FRIENDLY_NAME: &str = "friendly_name";
    pub const ICON: &str = "icon";
    pub const UNIT_OF_MEASUREMENT: &str = "unit_of_measurement";
    pub const DEVICE_CLASS: &str = "device_class";
    pub const TRANSLATION_KEY: &str = "translation_key";
    pub const MIN: &str = "min";
    pub const MAX: &str = "max";
    pub const STEP: &str = "step";
    pub const MODE: &str = "mode";
}
