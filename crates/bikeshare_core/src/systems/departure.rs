//! Departure handler: the ride ends and the customer parks or redirects.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::customers::CustomerLedger;
use crate::fleet::{ParkOutcome, StationNetwork};
use crate::pricing::{overage_charge, AVG_REPAIR_COST, RIDE_CHARGE};
use crate::spatial::manhattan_blocks;
use crate::telemetry::RideStats;

pub fn departure_system(
    mut clock: ResMut<SimulationClock>,
    mut network: ResMut<StationNetwork>,
    mut ledger: ResMut<CustomerLedger>,
    mut stats: ResMut<RideStats>,
    event: Res<CurrentEvent>,
) {
    if event.0.kind != EventKind::Departure {
        return;
    }

    // The ledger and scheduled departures are 1:1, so the earliest customer
    // is exactly the one whose event is firing.
    let mut customer = ledger
        .pop_earliest()
        .expect("departure fired with an empty customer ledger");

    match network.park(customer.destination, customer.bike, customer.travel_miles) {
        ParkOutcome::Parked { newly_flagged } => {
            if newly_flagged {
                stats.bikes_needing_repair += 1;
                stats.repair_costs += AVG_REPAIR_COST;
            }
            stats.trip_miles.add(customer.travel_miles);
            stats.trip_minutes.add(customer.travel_time);
            stats.gross_profit += RIDE_CHARGE;
            let surcharge = overage_charge(customer.travel_time);
            if surcharge > 0.0 {
                stats.gross_profit += surcharge;
                stats.overages += 1;
            }
            stats.net_profit = stats.gross_profit - stats.repair_costs;
            // Customer complete; dropped here.
        }
        ParkOutcome::StationFull => {
            stats.redirects += 1;
            let next = network.nearest_other_station(customer.destination);
            let leg_blocks = manhattan_blocks(
                network.stations[customer.destination].coord,
                network.stations[next].coord,
            );
            customer.redirect_to(next, leg_blocks);
            clock.schedule_at(customer.service_time, EventKind::Departure);
            ledger.push(customer);
        }
    }
}
