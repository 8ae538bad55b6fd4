//! Stations, docking posts, and the bike roster.
//!
//! The network owns every bike for the whole run. Each station keeps two
//! derived counters that must stay in sync with its posts at all times:
//! `posts_available` is the number of free posts, and `bikes_available` is
//! the number of occupied posts holding a bike that is not flagged for
//! repair. Post scans are index-first, so ties always resolve to the lowest
//! post index.

use bevy_ecs::prelude::Resource;

use crate::spatial::{euclidean_distance, GridCoord};

/// Cumulative mileage at which a bike is flagged for repair and leaves the
/// checkout-eligible fleet for the rest of the run.
pub const REPAIR_THRESHOLD_MILES: f64 = 200.0;

#[derive(Debug, Clone)]
pub struct Bike {
    pub id: usize,
    pub needs_repair: bool,
    pub total_distance_miles: f64,
}

/// A docking post: free, or occupied by the bike with the stored roster index.
#[derive(Debug, Clone, Copy, Default)]
pub struct Post {
    pub bike: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Station {
    pub coord: GridCoord,
    pub posts: Vec<Post>,
    pub bikes_available: usize,
    pub posts_available: usize,
}

impl Station {
    pub fn occupied_posts(&self) -> usize {
        self.posts.iter().filter(|p| p.bike.is_some()).count()
    }
}

/// Raised when a station's `bikes_available` counter says a bike can be
/// checked out but no post holds an eligible one. This is a bookkeeping bug,
/// never a modeled outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantViolation {
    pub station: usize,
    pub bikes_available: usize,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "station {} reports {} available bikes but no post holds an eligible one",
            self.station, self.bikes_available
        )
    }
}

/// What happened when a customer tried to park at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParkOutcome {
    /// The bike was docked. `newly_flagged` is true when this trip pushed the
    /// bike's mileage past [REPAIR_THRESHOLD_MILES]; a flagged bike occupies
    /// a post but does not count toward `bikes_available`.
    Parked { newly_flagged: bool },
    /// No free post; the customer must redirect.
    StationFull,
}

/// All stations plus the global bike roster.
#[derive(Debug, Clone, Resource)]
pub struct StationNetwork {
    pub stations: Vec<Station>,
    pub bikes: Vec<Bike>,
}

impl StationNetwork {
    /// Builds the network with `bikes_per_station` bikes docked in the
    /// lowest-index posts of each station. Callers validate the parameters
    /// first (see [crate::scenario::build_scenario]).
    pub fn new(coords: &[GridCoord], posts_per_station: usize, bikes_per_station: usize) -> Self {
        debug_assert!(bikes_per_station <= posts_per_station);

        let mut bikes = Vec::with_capacity(coords.len() * bikes_per_station);
        let stations = coords
            .iter()
            .map(|&coord| {
                let mut posts = vec![Post::default(); posts_per_station];
                for post in posts.iter_mut().take(bikes_per_station) {
                    let id = bikes.len();
                    bikes.push(Bike {
                        id,
                        needs_repair: false,
                        total_distance_miles: 0.0,
                    });
                    post.bike = Some(id);
                }
                Station {
                    coord,
                    posts,
                    bikes_available: bikes_per_station,
                    posts_available: posts_per_station - bikes_per_station,
                }
            })
            .collect();

        Self { stations, bikes }
    }

    /// Removes the first eligible bike (index-first post scan, repair-flagged
    /// bikes skipped) from `station`, freeing its post.
    ///
    /// `Ok(None)` means no bike was available and the customer balks.
    pub fn checkout(&mut self, station: usize) -> Result<Option<usize>, InvariantViolation> {
        let bikes_available = self.stations[station].bikes_available;
        if bikes_available == 0 {
            return Ok(None);
        }

        for post_idx in 0..self.stations[station].posts.len() {
            let Some(bike_id) = self.stations[station].posts[post_idx].bike else {
                continue;
            };
            if self.bikes[bike_id].needs_repair {
                continue;
            }
            let st = &mut self.stations[station];
            st.posts[post_idx].bike = None;
            st.posts_available += 1;
            st.bikes_available -= 1;
            return Ok(Some(bike_id));
        }

        Err(InvariantViolation {
            station,
            bikes_available,
        })
    }

    /// Docks `bike_id` in the first free post of `station` and credits the
    /// trip's mileage to the bike. Crossing the repair threshold flags the
    /// bike permanently; a flagged bike is excluded from `bikes_available`.
    pub fn park(&mut self, station: usize, bike_id: usize, trip_miles: f64) -> ParkOutcome {
        if self.stations[station].posts_available == 0 {
            return ParkOutcome::StationFull;
        }

        let st = &mut self.stations[station];
        let post = st
            .posts
            .iter_mut()
            .find(|p| p.bike.is_none())
            .expect("posts_available > 0 but no free post; station bookkeeping bug");
        post.bike = Some(bike_id);
        st.posts_available -= 1;

        let bike = &mut self.bikes[bike_id];
        bike.total_distance_miles += trip_miles;
        let newly_flagged = !bike.needs_repair && bike.total_distance_miles > REPAIR_THRESHOLD_MILES;
        if newly_flagged {
            bike.needs_repair = true;
        } else {
            self.stations[station].bikes_available += 1;
        }

        ParkOutcome::Parked { newly_flagged }
    }

    /// Nearest station to `from` by Euclidean distance, never `from` itself.
    /// Distance ties resolve to the lowest station index.
    pub fn nearest_other_station(&self, from: usize) -> usize {
        let origin = self.stations[from].coord;
        let mut best = None;
        let mut best_distance = f64::INFINITY;
        for (idx, station) in self.stations.iter().enumerate() {
            if idx == from {
                continue;
            }
            let distance = euclidean_distance(origin, station.coord);
            if distance < best_distance {
                best_distance = distance;
                best = Some(idx);
            }
        }
        best.expect("network has at least two stations")
    }
}
