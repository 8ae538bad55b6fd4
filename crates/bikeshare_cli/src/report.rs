//! Report extraction from a finished replication.

use bevy_ecs::prelude::World;

use bikeshare_core::runner::{initialize_simulation, run_to_completion, simulation_schedule};
use bikeshare_core::scenario::{build_scenario, ConfigError, ScenarioParams};
use bikeshare_core::telemetry::RideStats;

/// Aggregated results of one replication.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReplicationReport {
    pub trips_completed: u64,
    pub avg_trip_miles: f64,
    pub trip_miles_variance: f64,
    pub avg_trip_minutes: f64,
    pub trip_minutes_variance: f64,
    pub gross_profit: f64,
    pub repair_costs: f64,
    pub net_profit: f64,
    pub bikes_needing_repair: u64,
    pub redirects: u64,
    pub lost_customers: u64,
    pub overages: u64,
    pub customers_generated: u64,
}

/// Extracts the report from a world whose run has finished.
pub fn extract_report(world: &World) -> ReplicationReport {
    let stats = world.resource::<RideStats>();
    ReplicationReport {
        trips_completed: stats.trip_miles.count(),
        avg_trip_miles: stats.trip_miles.mean(),
        trip_miles_variance: stats.trip_miles.variance(),
        avg_trip_minutes: stats.trip_minutes.mean(),
        trip_minutes_variance: stats.trip_minutes.variance(),
        gross_profit: stats.gross_profit,
        repair_costs: stats.repair_costs,
        net_profit: stats.net_profit,
        bikes_needing_repair: stats.bikes_needing_repair,
        redirects: stats.redirects,
        lost_customers: stats.lost_customers,
        overages: stats.overages,
        customers_generated: stats.customers_generated,
    }
}

/// Runs one replication to the horizon and extracts its report.
pub fn run_replication(
    params: ScenarioParams,
    time_horizon: f64,
) -> Result<ReplicationReport, ConfigError> {
    let mut world = World::new();
    build_scenario(&mut world, params)?;
    initialize_simulation(&mut world, time_horizon);
    let mut schedule = simulation_schedule();
    run_to_completion(&mut world, &mut schedule, usize::MAX);
    Ok(extract_report(&world))
}

impl std::fmt::Display for ReplicationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SIMULATION RESULTS")?;
        writeln!(
            f,
            "Distances traveled: n = {}, mean = {:.4} mi, variance = {:.4}",
            self.trips_completed, self.avg_trip_miles, self.trip_miles_variance
        )?;
        writeln!(
            f,
            "Service times: n = {}, mean = {:.4} min, variance = {:.4}",
            self.trips_completed, self.avg_trip_minutes, self.trip_minutes_variance
        )?;
        writeln!(f, "Gross Profit: {:.2}", self.gross_profit)?;
        writeln!(f, "Repair Costs: {:.2}", self.repair_costs)?;
        writeln!(f, "Net Profit: {:.2}", self.net_profit)?;
        writeln!(
            f,
            "Number of bikes that need maintenance: {}",
            self.bikes_needing_repair
        )?;
        writeln!(f, "Number of customers redirected: {}", self.redirects)?;
        writeln!(f, "Number of customers lost: {}", self.lost_customers)?;
        write!(f, "Number of time overages: {}", self.overages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_matches_the_run_statistics() {
        let params = ScenarioParams::default().with_seed(42);
        let report = run_replication(params.clone(), 1000.0).expect("valid params");
        let stats = bikeshare_core::runner::run(params, 1000.0).expect("valid params");

        assert_eq!(report.trips_completed, stats.trip_miles.count());
        assert_eq!(report.customers_generated, stats.customers_generated);
        assert!((report.net_profit - stats.net_profit).abs() < 1e-9);
    }

    #[test]
    fn report_serializes_and_prints() {
        let report = run_replication(ScenarioParams::default().with_seed(1), 500.0)
            .expect("valid params");

        let json = serde_json::to_string(&report).expect("serializable");
        assert!(json.contains("\"net_profit\""));

        let text = report.to_string();
        assert!(text.contains("SIMULATION RESULTS"));
        assert!(text.contains("Net Profit"));
    }

    #[test]
    fn invalid_parameters_surface_config_errors() {
        let params = ScenarioParams::default().with_capacity(5, 6);
        assert_eq!(
            run_replication(params, 100.0).unwrap_err(),
            ConfigError::MoreBikesThanPosts { bikes: 6, posts: 5 }
        );
    }
}
