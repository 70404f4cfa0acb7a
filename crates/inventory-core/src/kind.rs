//! Entity kinds tracked per inventory item
//!
//! Storable quantities and derived outputs are two separate enums so that
//! operations like "consume a dose of the warning flag" cannot be expressed
//! in typed code. [`EntityKind`] joins both sets where a caller needs to name
//! any facet of an item (unique ids, service payloads).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named numeric slot held in a tracker's quantity store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// Current supply on hand
    Supply,
    Morning,
    Noon,
    Evening,
    Night,
    /// Consumption once per week
    Week,
    /// Consumption once per month
    Month,
}

impl Quantity {
    /// Every storable quantity, supply first
    pub const ALL: [Quantity; 7] = [
        Quantity::Supply,
        Quantity::Morning,
        Quantity::Noon,
        Quantity::Evening,
        Quantity::Night,
        Quantity::Week,
        Quantity::Month,
    ];

    /// Upper-case name used when building unique ids
    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Supply => "SUPPLY",
            Quantity::Morning => "MORNING",
            Quantity::Noon => "NOON",
            Quantity::Evening => "EVENING",
            Quantity::Night => "NIGHT",
            Quantity::Week => "WEEK",
            Quantity::Month => "MONTH",
        }
    }

    /// The dose slot this quantity represents, if it is one
    pub fn as_dose(&self) -> Option<DoseSlot> {
        match self {
            Quantity::Supply => None,
            Quantity::Morning => Some(DoseSlot::Morning),
            Quantity::Noon => Some(DoseSlot::Noon),
            Quantity::Evening => Some(DoseSlot::Evening),
            Quantity::Night => Some(DoseSlot::Night),
            Quantity::Week => Some(DoseSlot::Week),
            Quantity::Month => Some(DoseSlot::Month),
        }
    }
}

/// A consumption slot that can be taken as a dose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoseSlot {
    Morning,
    Noon,
    Evening,
    Night,
    Week,
    Month,
}

impl DoseSlot {
    /// The four slots taken every day
    pub const DAILY: [DoseSlot; 4] = [
        DoseSlot::Morning,
        DoseSlot::Noon,
        DoseSlot::Evening,
        DoseSlot::Night,
    ];

    /// How many days one dose of this slot is spread over
    pub fn period_days(&self) -> f64 {
        match self {
            DoseSlot::Morning | DoseSlot::Noon | DoseSlot::Evening | DoseSlot::Night => 1.0,
            DoseSlot::Week => 7.0,
            DoseSlot::Month => 28.0,
        }
    }

    /// The quantity store slot backing this dose
    pub fn quantity(&self) -> Quantity {
        match self {
            DoseSlot::Morning => Quantity::Morning,
            DoseSlot::Noon => Quantity::Noon,
            DoseSlot::Evening => Quantity::Evening,
            DoseSlot::Night => Quantity::Night,
            DoseSlot::Week => Quantity::Week,
            DoseSlot::Month => Quantity::Month,
        }
    }
}

/// A display-only value computed from the quantity store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedOutput {
    /// Low-supply problem flag
    Warning,
    /// Predicted timestamp at which the supply runs out
    EmptyPrediction,
}

impl DerivedOutput {
    pub const ALL: [DerivedOutput; 2] = [DerivedOutput::Warning, DerivedOutput::EmptyPrediction];

    pub fn name(&self) -> &'static str {
        match self {
            DerivedOutput::Warning => "WARNING",
            DerivedOutput::EmptyPrediction => "EMPTYPREDICTION",
        }
    }
}

/// Any facet of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Quantity(Quantity),
    Derived(DerivedOutput),
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Quantity(q) => q.name(),
            EntityKind::Derived(d) => d.name(),
        }
    }

    /// The dose slot named by this kind, or `None` for supply and derived outputs
    pub fn as_dose(&self) -> Option<DoseSlot> {
        match self {
            EntityKind::Quantity(q) => q.as_dose(),
            EntityKind::Derived(_) => None,
        }
    }

    /// Every kind, quantities first
    pub fn all() -> impl Iterator<Item = EntityKind> {
        Quantity::ALL
            .into_iter()
            .map(EntityKind::Quantity)
            .chain(DerivedOutput::ALL.into_iter().map(EntityKind::Derived))
    }
}

impl From<Quantity> for EntityKind {
    fn from(q: Quantity) -> Self {
        EntityKind::Quantity(q)
    }
}

impl From<DerivedOutput> for EntityKind {
    fn from(d: DerivedOutput) -> Self {
        EntityKind::Derived(d)
    }
}

impl From<DoseSlot> for EntityKind {
    fn from(slot: DoseSlot) -> Self {
        EntityKind::Quantity(slot.quantity())
    }
}

/// Error for a kind name that matches no known facet
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown entity kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownKind;

    /// Parse a kind name, ignoring case (e.g. "morning", "MORNING")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        EntityKind::all()
            .find(|kind| kind.name() == upper)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_case_insensitive() {
        assert_eq!(
            "morning".parse::<EntityKind>().unwrap(),
            EntityKind::Quantity(Quantity::Morning)
        );
        assert_eq!(
            "Warning".parse::<EntityKind>().unwrap(),
            EntityKind::Derived(DerivedOutput::Warning)
        );
        assert_eq!(
            "bedtime".parse::<EntityKind>().unwrap_err(),
            UnknownKind("bedtime".to_string())
        );
    }

    #[test]
    fn test_only_consumption_slots_are_doses() {
        assert_eq!(Quantity::Supply.as_dose(), None);
        assert_eq!(
            EntityKind::Derived(DerivedOutput::Warning).as_dose(),
            None
        );
        assert_eq!(
            EntityKind::Quantity(Quantity::Week).as_dose(),
            Some(DoseSlot::Week)
        );
    }

    #[test]
    fn test_dose_slot_periods() {
        for slot in DoseSlot::DAILY {
            assert_eq!(slot.period_days(), 1.0);
        }
        assert_eq!(DoseSlot::Week.period_days(), 7.0);
        assert_eq!(DoseSlot::Month.period_days(), 28.0);
    }

    #[test]
    fn test_all_kinds_unique_names() {
        let names: Vec<_> = EntityKind::all().map(|k| k.name()).collect();
        assert_eq!(names.len(), 9);
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }
}
