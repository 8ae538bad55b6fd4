//! Simulation runner: advances the clock and routes events into the systems.
//!
//! Each step pops the earliest event from [SimulationClock], inserts it as
//! [CurrentEvent], then runs the schedule. Systems are gated by event kind
//! so only the matching handler does work.

use bevy_ecs::prelude::{Res, Resource, Schedule, World};
use bevy_ecs::schedule::IntoSystemConfigs;
use bevy_ecs::world::Mut;

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::scenario::{build_scenario, ArrivalProcess, ConfigError, ScenarioParams};
use crate::systems::{
    arrival::arrival_system, departure::departure_system, end_of_sim::end_of_sim_system,
};
use crate::telemetry::RideStats;
use crate::variates::Variates;

/// Set once the end-of-simulation event fires; the run loop then stops.
#[derive(Debug, Default, Clone, Copy, Resource)]
pub struct SimulationComplete(pub bool);

fn is_arrival(event: Option<Res<CurrentEvent>>) -> bool {
    event.map(|e| e.0.kind == EventKind::Arrival).unwrap_or(false)
}

fn is_departure(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::Departure)
        .unwrap_or(false)
}

fn is_end_of_sim(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::EndOfSim)
        .unwrap_or(false)
}

/// Builds the default simulation schedule with one handler per event kind.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((
        arrival_system.run_if(is_arrival),
        departure_system.run_if(is_departure),
        end_of_sim_system.run_if(is_end_of_sim),
    ));
    schedule
}

/// Seeds the event queue: the end-of-simulation event at `time_horizon` and
/// the first arrival at a sampled inter-arrival offset. Call after
/// [build_scenario] and before running events.
pub fn initialize_simulation(world: &mut World, time_horizon: f64) {
    world.resource_scope(|world, mut variates: Mut<Variates>| {
        let rate = world.resource::<ArrivalProcess>().rate();
        let mut clock = world.resource_mut::<SimulationClock>();
        clock.schedule_at(time_horizon, EventKind::EndOfSim);
        let first_arrival = variates.0.sample_exponential(rate);
        clock.schedule_at(first_arrival, EventKind::Arrival);
    });
}

/// Runs one simulation step. Returns `false` once the run is complete or the
/// event queue is empty.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    if world.resource::<SimulationComplete>().0 {
        return false;
    }
    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    true
}

/// Runs simulation steps until the end-of-simulation event fires, the queue
/// empties, or `max_steps` is reached. Returns the number of steps executed.
pub fn run_to_completion(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Executes one replication from clock 0 to `time_horizon` and yields the
/// final statistics.
pub fn run(params: ScenarioParams, time_horizon: f64) -> Result<RideStats, ConfigError> {
    let mut world = World::new();
    build_scenario(&mut world, params)?;
    initialize_simulation(&mut world, time_horizon);
    let mut schedule = simulation_schedule();
    run_to_completion(&mut world, &mut schedule, usize::MAX);
    Ok(world.resource::<RideStats>().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::customers::CustomerLedger;
    use crate::test_helpers::{scripted_world, two_station_params, ScriptedVariates};

    #[test]
    fn seeded_runs_are_reproducible() {
        let params = || ScenarioParams::default().with_seed(42);
        let first = run(params(), 1000.0).expect("valid params");
        let second = run(params(), 1000.0).expect("valid params");
        assert_eq!(first, second);
        assert!(first.customers_generated > 0);
    }

    #[test]
    fn accounting_identity_holds_after_a_run() {
        let stats = run(ScenarioParams::default().with_seed(7), 1000.0).expect("valid params");
        assert!((stats.net_profit - (stats.gross_profit - stats.repair_costs)).abs() < 1e-9);
        // Every completed trip contributed the flat charge at minimum.
        assert!(stats.gross_profit >= stats.trip_miles.count() as f64 * 9.95 - 1e-9);
    }

    #[test]
    fn horizon_truncates_pending_events() {
        // First arrival would fire at 1.0, after the 0.5 horizon.
        let mut world = scripted_world(
            two_station_params(1, 1),
            ScriptedVariates::new(&[], &[1.0]),
        );
        initialize_simulation(&mut world, 0.5);
        let mut schedule = simulation_schedule();

        let steps = run_to_completion(&mut world, &mut schedule, 1000);
        assert_eq!(steps, 1);
        assert!(world.resource::<SimulationComplete>().0);
        // The arrival stays queued, unprocessed.
        assert!(!world.resource::<SimulationClock>().is_empty());
        assert_eq!(world.resource::<RideStats>().customers_generated, 0);
        assert!(world.resource::<CustomerLedger>().is_empty());
    }

    #[test]
    fn in_flight_customers_stay_in_the_ledger_at_the_horizon() {
        // Arrival at 0.1 rides a 5-minute trip; the horizon cuts at 2.0
        // before the departure fires.
        let mut world = scripted_world(
            two_station_params(2, 1),
            ScriptedVariates::new(&[0, 1], &[0.1]),
        );
        initialize_simulation(&mut world, 2.0);
        let mut schedule = simulation_schedule();
        run_to_completion(&mut world, &mut schedule, 1000);

        assert!(world.resource::<SimulationComplete>().0);
        assert_eq!(world.resource::<CustomerLedger>().len(), 1);
        assert_eq!(world.resource::<RideStats>().trip_miles.count(), 0);
    }
}
