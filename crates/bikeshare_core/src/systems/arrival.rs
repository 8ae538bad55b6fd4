//! Arrival handler: a customer shows up, checks out a bike, and rides off.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::customers::{Customer, CustomerLedger};
use crate::fleet::StationNetwork;
use crate::scenario::ArrivalProcess;
use crate::spatial::manhattan_blocks;
use crate::telemetry::RideStats;
use crate::variates::Variates;

pub fn arrival_system(
    mut clock: ResMut<SimulationClock>,
    mut network: ResMut<StationNetwork>,
    mut ledger: ResMut<CustomerLedger>,
    mut stats: ResMut<RideStats>,
    mut variates: ResMut<Variates>,
    process: Res<ArrivalProcess>,
    event: Res<CurrentEvent>,
) {
    if event.0.kind != EventKind::Arrival {
        return;
    }

    let now = clock.now();
    // Each arrival reschedules the next one, keeping the chain alive.
    let next = now + variates.0.sample_exponential(process.rate());
    clock.schedule_at(next, EventKind::Arrival);

    stats.customers_generated += 1;
    let station_count = network.stations.len();
    let origin = variates.0.sample_uniform_int(station_count);
    let mut destination = variates.0.sample_uniform_int(station_count);
    // Rejection loop; terminates because the scenario has >= 2 stations.
    while destination == origin {
        destination = variates.0.sample_uniform_int(station_count);
    }

    let checked_out = network
        .checkout(origin)
        .expect("bikes_available out of sync with posts");
    let Some(bike) = checked_out else {
        // Balking: no bike at the origin, the customer leaves the system.
        stats.lost_customers += 1;
        return;
    };

    let blocks = manhattan_blocks(
        network.stations[origin].coord,
        network.stations[destination].coord,
    );
    let customer = Customer::new(now, bike, origin, destination, blocks);
    clock.schedule_at(customer.service_time, EventKind::Departure);
    ledger.push(customer);
}
