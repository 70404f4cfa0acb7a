//! Quantity store: non-negative amounts keyed by [`Quantity`]

use std::collections::HashMap;

use inventory_core::Quantity;
use tracing::trace;

/// Non-negative amounts for each storable quantity
///
/// Unset quantities read as zero. Writes never fail: negative and NaN values
/// are clamped to zero, so the store cannot hold an invalid amount.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuantityStore {
    values: HashMap<Quantity, f64>,
    /// Set once supply has been written at least once
    supply_written: bool,
}

impl QuantityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `max(value, 0)` under `quantity`
    pub fn set(&mut self, quantity: Quantity, value: f64) {
        // f64::max returns the non-NaN operand, so NaN also lands on 0
        let value = value.max(0.0);
        trace!(quantity = ?quantity, value, "Storing quantity");
        self.values.insert(quantity, value);
        if quantity == Quantity::Supply {
            self.supply_written = true;
        }
    }

    pub fn get(&self, quantity: Quantity) -> f64 {
        self.values.get(&quantity).copied().unwrap_or(0.0)
    }

    /// Whether the supply has ever been written
    pub fn has_supply_data(&self) -> bool {
        self.supply_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_reads_zero() {
        let store = QuantityStore::new();
        for q in Quantity::ALL {
            assert_eq!(store.get(q), 0.0);
        }
        assert!(!store.has_supply_data());
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        let mut store = QuantityStore::new();
        for value in [-5.0, -0.25, -1e9, f64::NEG_INFINITY] {
            store.set(Quantity::Supply, value);
            assert_eq!(store.get(Quantity::Supply), 0.0);
        }
    }

    #[test]
    fn test_nan_clamps_to_zero() {
        let mut store = QuantityStore::new();
        store.set(Quantity::Morning, f64::NAN);
        assert_eq!(store.get(Quantity::Morning), 0.0);
    }

    #[test]
    fn test_supply_data_flag() {
        let mut store = QuantityStore::new();
        store.set(Quantity::Morning, 1.0);
        assert!(!store.has_supply_data());

        store.set(Quantity::Supply, 0.0);
        assert!(store.has_supply_data());
    }
}
