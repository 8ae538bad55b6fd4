use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventKind {
    Arrival,
    Departure,
    EndOfSim,
}

/// One pending event. Times are simulation minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub time: f64,
    pub kind: EventKind,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    event: Event,
    seq: u64,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by time.
        // Equal times fall back to FIFO via the insertion sequence number.
        other
            .event
            .time
            .total_cmp(&self.event.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

/// The event popped by the runner for the step currently executing.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

/// Virtual clock plus the time-ordered queue of pending events.
///
/// Once scheduled, events never cancel; the runner simply stops popping when
/// the end-of-simulation event fires, leaving later events unprocessed.
#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: f64,
    next_seq: u64,
    events: BinaryHeap<Scheduled>,
}

impl SimulationClock {
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn schedule_at(&mut self, time: f64, kind: EventKind) {
        debug_assert!(time >= self.now, "event time must be >= current time");
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Scheduled {
            event: Event { time, kind },
            seq,
        });
    }

    /// Pops the earliest pending event and advances the clock to its time.
    pub fn pop_next(&mut self) -> Option<Event> {
        let scheduled = self.events.pop()?;
        self.now = scheduled.event.time;
        Some(scheduled.event)
    }

    pub fn next_event_time(&self) -> Option<f64> {
        self.events.peek().map(|s| s.event.time)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
