//! In-flight customers and the service-time-ordered ledger.
//!
//! A customer only exists between a successful checkout and a successful
//! park, so it always carries a bike. Redirects mutate the customer in
//! place: trip distance and time accumulate across legs and the service
//! time is always recomputed from the original arrival time.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::Resource;

use crate::spatial::{BLOCK_LENGTH_MILES, MINUTES_PER_BLOCK};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Customer {
    pub arrival_time: f64,
    /// Cumulative riding distance over all legs, in blocks.
    pub travel_blocks: u32,
    pub travel_miles: f64,
    pub travel_time: f64,
    /// When the current leg ends: original arrival time plus cumulative
    /// travel time. This is the customer's departure-event time.
    pub service_time: f64,
    pub bike: usize,
    pub origin: usize,
    pub destination: usize,
}

impl Customer {
    pub fn new(
        arrival_time: f64,
        bike: usize,
        origin: usize,
        destination: usize,
        leg_blocks: u32,
    ) -> Self {
        let mut customer = Self {
            arrival_time,
            travel_blocks: 0,
            travel_miles: 0.0,
            travel_time: 0.0,
            service_time: arrival_time,
            bike,
            origin,
            destination,
        };
        customer.extend_leg(leg_blocks);
        customer
    }

    /// Adds one leg to the cumulative trip and recomputes the derived
    /// mileage, riding time, and service time.
    pub fn extend_leg(&mut self, leg_blocks: u32) {
        self.travel_blocks += leg_blocks;
        self.travel_miles = f64::from(self.travel_blocks) * BLOCK_LENGTH_MILES;
        self.travel_time = f64::from(self.travel_blocks) * MINUTES_PER_BLOCK;
        self.service_time = self.arrival_time + self.travel_time;
    }

    /// Reroutes a customer whose destination was full: the old destination
    /// becomes the new origin and the new leg is added to the running trip.
    pub fn redirect_to(&mut self, new_destination: usize, leg_blocks: u32) {
        self.origin = self.destination;
        self.destination = new_destination;
        self.extend_leg(leg_blocks);
    }
}

#[derive(Debug, Clone, Copy)]
struct LedgerEntry {
    customer: Customer,
    seq: u64,
}

impl Ord for LedgerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by service time.
        // Equal service times pop in insertion order.
        other
            .customer
            .service_time
            .total_cmp(&self.customer.service_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for LedgerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LedgerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LedgerEntry {}

/// In-flight customers keyed by service time. The ledger and the scheduled
/// departure events are kept in 1:1 correspondence, so the customer popped
/// here is always the one whose departure event is firing.
#[derive(Debug, Default, Resource)]
pub struct CustomerLedger {
    entries: BinaryHeap<LedgerEntry>,
    next_seq: u64,
}

impl CustomerLedger {
    pub fn push(&mut self, customer: Customer) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(LedgerEntry { customer, seq });
    }

    /// Removes and returns the customer with the minimum service time.
    pub fn pop_earliest(&mut self) -> Option<Customer> {
        self.entries.pop().map(|entry| entry.customer)
    }

    pub fn peek_earliest(&self) -> Option<&Customer> {
        self.entries.peek().map(|entry| &entry.customer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
