//! The supply tracker for one configured item

use chrono::{DateTime, Duration, Utc};
use inventory_core::{DoseSlot, EntityKind, Quantity, NEVER_EMPTY_DAYS};
use tracing::debug;

use crate::QuantityStore;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Static per-item parameters
///
/// These only set thresholds; they never change how the consumption or
/// prediction is computed.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSettings {
    /// Warn when fewer than this many days of supply remain
    pub warning_days: f64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self { warning_days: 10.0 }
    }
}

/// Tracks the supply of one item and predicts when it runs out
#[derive(Debug, Clone, Default)]
pub struct SupplyTracker {
    store: QuantityStore,
    settings: TrackerSettings,
}

impl SupplyTracker {
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            store: QuantityStore::new(),
            settings,
        }
    }

    /// Create a tracker that continues from previously stored quantities
    pub fn with_store(settings: TrackerSettings, store: QuantityStore) -> Self {
        Self { store, settings }
    }

    /// Consume the tracker, keeping only its quantities
    pub fn into_store(self) -> QuantityStore {
        self.store
    }

    pub fn set_quantity(&mut self, quantity: Quantity, value: f64) {
        debug!(quantity = ?quantity, value, "Setting quantity");
        self.store.set(quantity, value);
    }

    pub fn quantity(&self, quantity: Quantity) -> f64 {
        self.store.get(quantity)
    }

    pub fn has_supply_data(&self) -> bool {
        self.store.has_supply_data()
    }

    /// Amount consumed per day
    ///
    /// The four daily slots count fully; weekly and monthly doses are spread
    /// over 7 and 28 days.
    pub fn daily_consumption(&self) -> f64 {
        DoseSlot::DAILY
            .into_iter()
            .chain([DoseSlot::Week, DoseSlot::Month])
            .map(|slot| self.store.get(slot.quantity()) / slot.period_days())
            .sum()
    }

    /// Days until the supply is used up, or [`NEVER_EMPTY_DAYS`] when
    /// nothing is consumed
    pub fn days_remaining(&self) -> f64 {
        let daily = self.daily_consumption();
        if daily > 0.0 {
            self.store.get(Quantity::Supply) / daily
        } else {
            NEVER_EMPTY_DAYS
        }
    }

    /// Whether fewer than `threshold_days` days of supply remain
    pub fn is_low_supply_warning(&self, threshold_days: f64) -> bool {
        self.days_remaining() < threshold_days
    }

    /// Warning against the configured threshold
    ///
    /// `None` until supply data exists: "no data" is reported as unavailable
    /// rather than as "not low".
    pub fn warning(&self) -> Option<bool> {
        self.has_supply_data()
            .then(|| self.is_low_supply_warning(self.settings.warning_days))
    }

    /// Point in time at which the supply is expected to run out
    ///
    /// Saturates at the latest representable time when the supply outlasts
    /// the calendar.
    pub fn predicted_empty_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        // `as` saturates at i64::MAX for out-of-range values
        let millis = (self.days_remaining() * MILLIS_PER_DAY).round() as i64;
        Duration::try_milliseconds(millis)
            .and_then(|offset| now.checked_add_signed(offset))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Take `amount` from the supply, stopping at zero
    pub fn consume_amount(&mut self, amount: f64) {
        if amount != 0.0 {
            let supply = self.store.get(Quantity::Supply);
            debug!(amount, supply, "Consuming from supply");
            self.store.set(Quantity::Supply, supply - amount);
        }
    }

    /// Take one dose of `slot` from the supply
    pub fn consume_dose(&mut self, slot: DoseSlot) {
        self.consume_amount(self.store.get(slot.quantity()));
    }

    /// Take one dose named by an untyped kind
    ///
    /// Kinds that are not dose slots leave the tracker untouched. Returns
    /// whether a dose was taken.
    pub fn consume_kind(&mut self, kind: EntityKind) -> bool {
        match kind.as_dose() {
            Some(slot) => {
                self.consume_dose(slot);
                true
            }
            None => {
                debug!(kind = %kind, "Invalid dose slot, ignoring consume request");
                false
            }
        }
    }

    /// Add `amount` to the supply
    pub fn restock(&mut self, amount: f64) {
        let supply = self.store.get(Quantity::Supply);
        debug!(amount, supply, "Restocking supply");
        self.store.set(Quantity::Supply, supply + amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::DerivedOutput;

    fn tracker_with(values: &[(Quantity, f64)]) -> SupplyTracker {
        let mut tracker = SupplyTracker::default();
        for (q, v) in values {
            tracker.set_quantity(*q, *v);
        }
        tracker
    }

    #[test]
    fn test_daily_consumption_sums_slots() {
        for (a, b, c, d) in [(0.0, 0.0, 0.0, 0.0), (1.0, 0.5, 2.0, 0.25), (3.0, 0.0, 0.0, 1.0)] {
            let tracker = tracker_with(&[
                (Quantity::Morning, a),
                (Quantity::Noon, b),
                (Quantity::Evening, c),
                (Quantity::Night, d),
            ]);
            assert_eq!(tracker.daily_consumption(), a + b + c + d);
        }
    }

    #[test]
    fn test_weekly_and_monthly_normalized() {
        let mut tracker = tracker_with(&[(Quantity::Morning, 1.0)]);
        let before = tracker.daily_consumption();

        tracker.set_quantity(Quantity::Week, 14.0);
        tracker.set_quantity(Quantity::Month, 7.0);

        let added = tracker.daily_consumption() - before;
        assert!((added - (14.0 / 7.0 + 7.0 / 28.0)).abs() < 1e-12);
    }

    #[test]
    fn test_days_remaining() {
        let tracker = tracker_with(&[
            (Quantity::Supply, 100.0),
            (Quantity::Morning, 1.0),
            (Quantity::Noon, 1.0),
            (Quantity::Evening, 1.0),
            (Quantity::Night, 1.0),
        ]);
        assert_eq!(tracker.days_remaining(), 25.0);
    }

    #[test]
    fn test_days_remaining_sentinel_without_consumption() {
        for supply in [0.0, 1.0, 5000.0] {
            let tracker = tracker_with(&[(Quantity::Supply, supply)]);
            assert_eq!(tracker.days_remaining(), NEVER_EMPTY_DAYS);
        }
    }

    #[test]
    fn test_zero_supply_with_consumption() {
        let tracker = tracker_with(&[(Quantity::Supply, 0.0), (Quantity::Night, 2.0)]);
        assert_eq!(tracker.days_remaining(), 0.0);
        assert!(tracker.is_low_supply_warning(1.0));
    }

    #[test]
    fn test_warning_threshold_is_strict() {
        // 10 supply at 1/day is exactly 10 days
        let tracker = tracker_with(&[(Quantity::Supply, 10.0), (Quantity::Morning, 1.0)]);
        assert!(!tracker.is_low_supply_warning(10.0));
        assert!(tracker.is_low_supply_warning(10.5));

        let tracker = tracker_with(&[(Quantity::Supply, 9.0), (Quantity::Morning, 1.0)]);
        assert!(tracker.is_low_supply_warning(10.0));
    }

    #[test]
    fn test_warning_unavailable_without_supply() {
        let mut tracker = tracker_with(&[(Quantity::Morning, 1.0)]);
        assert_eq!(tracker.warning(), None);

        tracker.set_quantity(Quantity::Supply, 3.0);
        assert_eq!(tracker.warning(), Some(true));

        tracker.set_quantity(Quantity::Supply, 300.0);
        assert_eq!(tracker.warning(), Some(false));
    }

    #[test]
    fn test_consume_dose() {
        let mut tracker = tracker_with(&[(Quantity::Supply, 10.0), (Quantity::Morning, 2.0)]);
        tracker.consume_dose(DoseSlot::Morning);
        assert_eq!(tracker.quantity(Quantity::Supply), 8.0);
    }

    #[test]
    fn test_consume_invalid_kind_is_noop() {
        let mut tracker = tracker_with(&[(Quantity::Supply, 10.0), (Quantity::Morning, 2.0)]);

        assert!(!tracker.consume_kind(EntityKind::Quantity(Quantity::Supply)));
        assert!(!tracker.consume_kind(EntityKind::Derived(DerivedOutput::Warning)));
        assert_eq!(tracker.quantity(Quantity::Supply), 10.0);

        assert!(tracker.consume_kind(EntityKind::Quantity(Quantity::Morning)));
        assert_eq!(tracker.quantity(Quantity::Supply), 8.0);
    }

    #[test]
    fn test_consume_amount_clamps_at_zero() {
        let mut tracker = tracker_with(&[(Quantity::Supply, 3.0)]);
        tracker.consume_amount(5.0);
        assert_eq!(tracker.quantity(Quantity::Supply), 0.0);
    }

    #[test]
    fn test_consume_zero_does_not_mark_supply() {
        let mut tracker = SupplyTracker::default();
        tracker.consume_amount(0.0);
        assert!(!tracker.has_supply_data());

        // an empty slot resolves to a zero amount
        tracker.consume_dose(DoseSlot::Noon);
        assert!(!tracker.has_supply_data());
    }

    #[test]
    fn test_restock() {
        let mut tracker = tracker_with(&[(Quantity::Supply, 3.0)]);
        tracker.restock(20.0);
        assert_eq!(tracker.quantity(Quantity::Supply), 23.0);
    }

    #[test]
    fn test_predicted_empty_at() {
        let now = Utc::now();
        let tracker = tracker_with(&[(Quantity::Supply, 6.0), (Quantity::Evening, 4.0)]);
        assert_eq!(tracker.predicted_empty_at(now), now + Duration::hours(36));

        let idle = SupplyTracker::default();
        assert_eq!(idle.predicted_empty_at(now), now + Duration::days(10000));
    }

    #[test]
    fn test_predicted_empty_at_saturates() {
        let now = Utc::now();

        // 1e6 supply at a quarter per month lasts ~112 million days
        let tracker = tracker_with(&[(Quantity::Supply, 1_000_000.0), (Quantity::Month, 0.25)]);
        assert_eq!(tracker.predicted_empty_at(now), DateTime::<Utc>::MAX_UTC);

        let tracker = tracker_with(&[(Quantity::Supply, 1e9), (Quantity::Morning, 1.0)]);
        assert_eq!(tracker.predicted_empty_at(now), DateTime::<Utc>::MAX_UTC);

        let tracker = tracker_with(&[(Quantity::Supply, f64::MAX), (Quantity::Night, 1e-300)]);
        assert_eq!(tracker.predicted_empty_at(now), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_reads_are_stable() {
        let tracker = tracker_with(&[(Quantity::Supply, 7.0), (Quantity::Noon, 3.0)]);
        let first = (tracker.quantity(Quantity::Supply), tracker.days_remaining());
        for _ in 0..3 {
            assert_eq!(
                (tracker.quantity(Quantity::Supply), tracker.days_remaining()),
                first
            );
        }
    }

    #[test]
    fn test_with_store_keeps_quantities() {
        let tracker = tracker_with(&[(Quantity::Supply, 12.0), (Quantity::Night, 1.0)]);
        let settings = TrackerSettings { warning_days: 20.0 };

        let reloaded = SupplyTracker::with_store(settings, tracker.into_store());
        assert_eq!(reloaded.quantity(Quantity::Supply), 12.0);
        assert_eq!(reloaded.warning(), Some(true));
    }
}
