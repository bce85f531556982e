use tracing::info;

use crate::catalog::{Catalog, Tier, resolve_tier};

/// Counters that survive a teardown. The active tier is not stored; restore
/// re-derives it from `units_sold`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub revenue: u64,
    pub units_sold: u64,
    pub elapsed_seconds: u64,
}

#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    revenue: u64,
    units_sold: u64,
    active_tier: usize,
    elapsed_seconds: u64,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            revenue: 0,
            units_sold: 0,
            active_tier: 0,
            elapsed_seconds: 0,
        }
    }

    /// Sells one unit at the price of the tier active before the sale, then
    /// re-resolves the tier. Returns true when the active tier changed.
    pub fn record_sale(&mut self) -> bool {
        let price = self.current_tier().unit_price;
        self.revenue = self.revenue.saturating_add(price);
        self.units_sold = self.units_sold.saturating_add(1);

        let previous = self.active_tier;
        self.active_tier = resolve_tier(&self.catalog, self.units_sold);

        let changed = previous != self.active_tier;
        if changed {
            info!(
                tier = self.current_tier().image.name,
                units_sold = self.units_sold,
                "new dessert unlocked"
            );
        }
        changed
    }

    pub fn tick(&mut self) {
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            revenue: self.revenue,
            units_sold: self.units_sold,
            elapsed_seconds: self.elapsed_seconds,
        }
    }

    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        self.revenue = snapshot.revenue;
        self.units_sold = snapshot.units_sold;
        self.elapsed_seconds = snapshot.elapsed_seconds;
        self.active_tier = resolve_tier(&self.catalog, self.units_sold);
    }

    /// The next locked tier and how many more sales unlock it.
    pub fn next_milestone(&self) -> Option<(&Tier, u64)> {
        self.catalog
            .tiers()
            .iter()
            .skip(self.active_tier + 1)
            .find(|tier| tier.activation_threshold > self.units_sold)
            .map(|tier| (tier, tier.activation_threshold - self.units_sold))
    }

    pub fn current_tier(&self) -> &Tier {
        &self.catalog.tiers()[self.active_tier]
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn revenue(&self) -> u64 {
        self.revenue
    }

    pub fn units_sold(&self) -> u64 {
        self.units_sold
    }

    pub fn active_tier(&self) -> usize {
        self.active_tier
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::three_tier_catalog;

    #[test]
    fn test_session_initialization() {
        let session = Session::new(three_tier_catalog());

        assert_eq!(session.revenue(), 0);
        assert_eq!(session.units_sold(), 0);
        assert_eq!(session.active_tier(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.current_tier().unit_price, 5);
    }

    #[test]
    fn test_five_sales_reach_second_tier() {
        let mut session = Session::new(three_tier_catalog());

        let changes: Vec<bool> = (0..5).map(|_| session.record_sale()).collect();

        assert_eq!(changes, vec![false, false, false, false, true]);
        assert_eq!(session.units_sold(), 5);
        // The fifth sale is charged at the cupcake price before the donut unlocks.
        assert_eq!(session.revenue(), 25);
        assert_eq!(session.active_tier(), 1);
    }

    #[test]
    fn test_twenty_sales_reach_third_tier() {
        let mut session = Session::new(three_tier_catalog());

        for _ in 0..20 {
            session.record_sale();
        }

        assert_eq!(session.units_sold(), 20);
        assert_eq!(session.revenue(), 5 * 5 + 15 * 10);
        assert_eq!(session.active_tier(), 2);
        assert_eq!(session.current_tier().unit_price, 15);
    }

    #[test]
    fn test_revenue_sums_price_active_before_each_sale() {
        let mut session = Session::new(Catalog::desserts());
        let mut expected = 0;

        for _ in 0..600 {
            expected += session.current_tier().unit_price;
            session.record_sale();
            assert_eq!(session.revenue(), expected);
        }
        assert_eq!(session.units_sold(), 600);
    }

    #[test]
    fn test_tick_only_touches_elapsed_time() {
        let mut session = Session::new(three_tier_catalog());

        session.tick();
        session.tick();

        assert_eq!(session.elapsed_seconds(), 2);
        assert_eq!(session.revenue(), 0);
        assert_eq!(session.units_sold(), 0);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut session = Session::new(three_tier_catalog());
        for _ in 0..7 {
            session.record_sale();
        }
        session.tick();
        session.tick();
        session.tick();

        let snapshot = session.snapshot();
        let mut restored = Session::new(three_tier_catalog());
        restored.restore(snapshot);

        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.revenue(), 25 + 2 * 10);
        assert_eq!(restored.units_sold(), 7);
        assert_eq!(restored.elapsed_seconds(), 3);
        assert_eq!(restored.active_tier(), 1);
    }

    #[test]
    fn test_restore_rederives_tier() {
        let mut session = Session::new(three_tier_catalog());
        for _ in 0..25 {
            session.record_sale();
        }
        assert_eq!(session.active_tier(), 2);

        session.restore(SessionSnapshot {
            revenue: 10,
            units_sold: 2,
            elapsed_seconds: 0,
        });

        assert_eq!(session.active_tier(), 0);
        assert_eq!(session.current_tier().unit_price, 5);
    }

    #[test]
    fn test_next_milestone() {
        let mut session = Session::new(three_tier_catalog());

        let (tier, remaining) = session.next_milestone().unwrap();
        assert_eq!(tier.image.name, "Donut");
        assert_eq!(remaining, 5);

        for _ in 0..6 {
            session.record_sale();
        }
        let (tier, remaining) = session.next_milestone().unwrap();
        assert_eq!(tier.image.name, "Eclair");
        assert_eq!(remaining, 14);

        for _ in 0..14 {
            session.record_sale();
        }
        assert!(session.next_milestone().is_none());
    }
}
