//! Trip statistics and financial counters accumulated over one replication.

use bevy_ecs::prelude::Resource;

/// Running tally of a sample: count, sum, and sum of squares, from which the
/// mean and sample variance are derived.
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Tally {
    count: u64,
    sum: f64,
    sum_sq: f64,
}

impl Tally {
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Sample variance (n - 1 denominator); 0.0 with fewer than two samples.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        (self.sum_sq - self.sum * self.sum / n) / (n - 1.0)
    }
}

/// Final statistics of a run: two trip tallies plus the financial and
/// operational counters. Cloned out of the world when the run ends.
#[derive(Debug, Default, Clone, PartialEq, Resource, serde::Serialize)]
pub struct RideStats {
    pub trip_miles: Tally,
    pub trip_minutes: Tally,
    pub gross_profit: f64,
    pub repair_costs: f64,
    pub net_profit: f64,
    pub bikes_needing_repair: u64,
    pub redirects: u64,
    pub lost_customers: u64,
    pub overages: u64,
    pub customers_generated: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_mean_and_variance() {
        let mut tally = Tally::default();
        for value in [1.0, 2.0, 3.0, 4.0] {
            tally.add(value);
        }
        assert_eq!(tally.count(), 4);
        assert!((tally.mean() - 2.5).abs() < 1e-12);
        assert!((tally.variance() - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn tally_degenerate_cases() {
        let mut tally = Tally::default();
        assert_eq!(tally.mean(), 0.0);
        assert_eq!(tally.variance(), 0.0);
        tally.add(3.5);
        assert_eq!(tally.mean(), 3.5);
        assert_eq!(tally.variance(), 0.0);
    }
}
