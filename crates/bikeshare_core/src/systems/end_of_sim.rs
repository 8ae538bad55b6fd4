use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind};
use crate::runner::SimulationComplete;

/// Halts the run loop. Events still queued past this point stay unprocessed;
/// that is the expected truncation at the horizon, not an error.
pub fn end_of_sim_system(mut complete: ResMut<SimulationComplete>, event: Res<CurrentEvent>) {
    if event.0.kind != EventKind::EndOfSim {
        return;
    }
    complete.0 = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{Schedule, World};

    use crate::clock::{Event, SimulationClock};
    use crate::runner::run_next_event;

    #[test]
    fn end_of_sim_sets_the_completion_flag() {
        let mut world = World::new();
        world.insert_resource(SimulationClock::default());
        world.insert_resource(SimulationComplete::default());
        world
            .resource_mut::<SimulationClock>()
            .schedule_at(100.0, EventKind::EndOfSim);

        let mut schedule = Schedule::default();
        schedule.add_systems(end_of_sim_system);

        assert!(run_next_event(&mut world, &mut schedule));
        assert!(world.resource::<SimulationComplete>().0);
        // The loop refuses further steps once complete.
        assert!(!run_next_event(&mut world, &mut schedule));
    }

    #[test]
    fn other_events_leave_the_flag_untouched() {
        let mut world = World::new();
        world.insert_resource(SimulationComplete::default());
        world.insert_resource(CurrentEvent(Event {
            time: 1.0,
            kind: EventKind::Arrival,
        }));

        let mut schedule = Schedule::default();
        schedule.add_systems(end_of_sim_system);
        schedule.run(&mut world);

        assert!(!world.resource::<SimulationComplete>().0);
    }
}
