//! Ride revenue and repair-cost model.

/// Flat charge per completed ride (24-hour pass).
pub const RIDE_CHARGE: f64 = 9.95;

/// Riding minutes included in the flat charge before overage billing starts.
pub const TIME_LIMIT_MINUTES: f64 = 30.0;

/// Escalating half-hour overage tiers: the first half-hour over charges
/// `[0]`, a second adds `[1]`, and every ride longer than that also pays
/// `[2]` per half-hour over, rounded up.
pub const OVERAGE_TIERS: [f64; 3] = [4.0, 9.0, 12.0];

/// Flat cost accrued when a bike crosses the repair threshold.
pub const AVG_REPAIR_COST: f64 = 50.0;

/// Surcharge for a ride of `elapsed_minutes`, or 0.0 when the ride fits in
/// the time limit.
///
/// The billed unit count is the number of half-hours over the limit rounded
/// to nearest; the top tier multiplies by the count rounded up.
pub fn overage_charge(elapsed_minutes: f64) -> f64 {
    let half_hours_over = elapsed_minutes / TIME_LIMIT_MINUTES - 1.0;
    if half_hours_over <= 0.0 {
        return 0.0;
    }
    let units = half_hours_over.round();
    if units <= 1.0 {
        OVERAGE_TIERS[0]
    } else if units <= 2.0 {
        OVERAGE_TIERS[0] + OVERAGE_TIERS[1]
    } else {
        OVERAGE_TIERS[0] + OVERAGE_TIERS[1] + OVERAGE_TIERS[2] * half_hours_over.ceil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rides_within_the_limit_pay_no_surcharge() {
        assert_eq!(overage_charge(0.0), 0.0);
        assert_eq!(overage_charge(5.0), 0.0);
        assert_eq!(overage_charge(TIME_LIMIT_MINUTES), 0.0);
    }

    #[test]
    fn first_half_hour_over_pays_tier_one() {
        // 36 minutes: 0.2 half-hours over.
        assert_eq!(overage_charge(36.0), 4.0);
        // 66 minutes: 1.2 half-hours over still bills as one unit.
        assert_eq!(overage_charge(66.0), 4.0);
    }

    #[test]
    fn second_half_hour_adds_tier_two() {
        // 84 minutes: 1.8 half-hours over bills as two units.
        assert_eq!(overage_charge(84.0), 13.0);
    }

    #[test]
    fn long_rides_pay_tier_three_per_half_hour_rounded_up() {
        // 105 minutes: 2.5 half-hours over -> 4 + 9 + 12 * ceil(2.5).
        assert_eq!(overage_charge(105.0), 49.0);
        // 126 minutes: 3.2 half-hours over -> 4 + 9 + 12 * 4.
        assert_eq!(overage_charge(126.0), 61.0);
    }
}
