//! Test helpers for common test setup and utilities.

use std::collections::VecDeque;

use bevy_ecs::prelude::World;

use crate::fleet::StationNetwork;
use crate::scenario::{build_scenario, ScenarioParams};
use crate::spatial::GridCoord;
use crate::variates::{Variates, VariateSource};

/// Variate source that replays scripted draws, for deterministic tests.
///
/// Exhausted uniform draws return 0; exhausted exponential draws return
/// infinity, so a rescheduled arrival chain simply never fires again.
#[derive(Debug, Default)]
pub struct ScriptedVariates {
    uniforms: VecDeque<usize>,
    exponentials: VecDeque<f64>,
}

impl ScriptedVariates {
    pub fn new(uniforms: &[usize], exponentials: &[f64]) -> Self {
        Self {
            uniforms: uniforms.iter().copied().collect(),
            exponentials: exponentials.iter().copied().collect(),
        }
    }
}

impl VariateSource for ScriptedVariates {
    fn sample_uniform_int(&mut self, n: usize) -> usize {
        let value = self.uniforms.pop_front().unwrap_or(0);
        assert!(value < n, "scripted uniform draw {value} out of range 0..{n}");
        value
    }

    fn sample_exponential(&mut self, _rate: f64) -> f64 {
        self.exponentials.pop_front().unwrap_or(f64::INFINITY)
    }
}

/// Two stations ten blocks apart with the given capacity.
pub fn two_station_params(posts: usize, bikes: usize) -> ScenarioParams {
    ScenarioParams::default()
        .with_stations(&[GridCoord::new(0, 0), GridCoord::new(0, 10)])
        .with_capacity(posts, bikes)
}

/// Builds a world for `params` with a scripted variate source installed.
pub fn scripted_world(params: ScenarioParams, variates: ScriptedVariates) -> World {
    let mut world = World::new();
    build_scenario(&mut world, params).expect("valid test params");
    world.insert_resource(Variates::new(Box::new(variates)));
    world
}

/// Asserts the station counter invariants: occupied posts plus free posts
/// equal total posts, and `bikes_available` counts exactly the occupied
/// posts holding a non-flagged bike.
pub fn assert_station_invariants(network: &StationNetwork) {
    for (idx, station) in network.stations.iter().enumerate() {
        assert_eq!(
            station.occupied_posts() + station.posts_available,
            station.posts.len(),
            "post counters out of sync at station {idx}"
        );
        let eligible = station
            .posts
            .iter()
            .filter_map(|p| p.bike)
            .filter(|&id| !network.bikes[id].needs_repair)
            .count();
        assert_eq!(
            station.bikes_available, eligible,
            "bike counter out of sync at station {idx}"
        );
    }
}
