//! Scenario setup: validate parameters and populate the simulation world.
//!
//! The default layout is ten stations on a 40-avenue by 100-street grid.

use bevy_ecs::prelude::{Resource, World};

use crate::clock::SimulationClock;
use crate::customers::CustomerLedger;
use crate::fleet::StationNetwork;
use crate::runner::SimulationComplete;
use crate::spatial::GridCoord;
use crate::telemetry::RideStats;
use crate::variates::Variates;

/// The fixed ten-station layout spanning the 40x100 block service area.
pub const DEFAULT_STATION_COORDS: [GridCoord; 10] = [
    GridCoord::new(9, 0),
    GridCoord::new(39, 0),
    GridCoord::new(0, 30),
    GridCoord::new(21, 30),
    GridCoord::new(9, 50),
    GridCoord::new(39, 50),
    GridCoord::new(0, 70),
    GridCoord::new(30, 70),
    GridCoord::new(9, 90),
    GridCoord::new(39, 90),
];

/// Customer arrival process: exponential inter-arrival times with the given
/// mean, in simulation minutes.
#[derive(Debug, Clone, Copy, Resource)]
pub struct ArrivalProcess {
    pub mean_interarrival: f64,
}

impl ArrivalProcess {
    pub fn rate(&self) -> f64 {
        1.0 / self.mean_interarrival
    }
}

/// Parameters for building a replication.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    /// Mean inter-arrival time of customers, in simulation minutes.
    pub mean_interarrival: f64,
    pub posts_per_station: usize,
    /// Bikes initially docked per station; must not exceed posts.
    pub bikes_per_station: usize,
    pub station_coords: Vec<GridCoord>,
    /// Random seed for reproducibility (optional; if None, uses entropy).
    pub seed: Option<u64>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            mean_interarrival: 1.0,
            posts_per_station: 50,
            bikes_per_station: 40,
            station_coords: DEFAULT_STATION_COORDS.to_vec(),
            seed: None,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_capacity(mut self, posts_per_station: usize, bikes_per_station: usize) -> Self {
        self.posts_per_station = posts_per_station;
        self.bikes_per_station = bikes_per_station;
        self
    }

    pub fn with_stations(mut self, coords: &[GridCoord]) -> Self {
        self.station_coords = coords.to_vec();
        self
    }
}

/// Configuration problems that must fail fast before the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Destination resampling needs at least two distinct stations.
    TooFewStations { stations: usize },
    NoPosts,
    NoBikes,
    MoreBikesThanPosts { bikes: usize, posts: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::TooFewStations { stations } => {
                write!(f, "need at least 2 stations, got {stations}")
            }
            ConfigError::NoPosts => write!(f, "posts per station must be at least 1"),
            ConfigError::NoBikes => write!(f, "bikes per station must be at least 1"),
            ConfigError::MoreBikesThanPosts { bikes, posts } => {
                write!(f, "{bikes} bikes per station cannot dock in {posts} posts")
            }
        }
    }
}

fn validate(params: &ScenarioParams) -> Result<(), ConfigError> {
    if params.station_coords.len() < 2 {
        return Err(ConfigError::TooFewStations {
            stations: params.station_coords.len(),
        });
    }
    if params.posts_per_station == 0 {
        return Err(ConfigError::NoPosts);
    }
    if params.bikes_per_station == 0 {
        return Err(ConfigError::NoBikes);
    }
    if params.bikes_per_station > params.posts_per_station {
        return Err(ConfigError::MoreBikesThanPosts {
            bikes: params.bikes_per_station,
            posts: params.posts_per_station,
        });
    }
    Ok(())
}

/// Validates `params` and inserts every resource a replication needs:
/// clock, station network, customer ledger, statistics, completion flag,
/// arrival process, and the variate source.
pub fn build_scenario(world: &mut World, params: ScenarioParams) -> Result<(), ConfigError> {
    validate(&params)?;

    world.insert_resource(SimulationClock::default());
    world.insert_resource(StationNetwork::new(
        &params.station_coords,
        params.posts_per_station,
        params.bikes_per_station,
    ));
    world.insert_resource(CustomerLedger::default());
    world.insert_resource(RideStats::default());
    world.insert_resource(SimulationComplete::default());
    world.insert_resource(ArrivalProcess {
        mean_interarrival: params.mean_interarrival,
    });
    world.insert_resource(match params.seed {
        Some(seed) => Variates::seeded(seed),
        None => Variates::from_entropy(),
    });

    Ok(())
}
