//! Park layout files: the rides, visitors, walkways and activity a query
//! runs against.
//!
//! A layout is a JSON document:
//!
//! ```json
//! {
//!   "rides": [{ "id": 1, "name": "Thunder Loop", "thrill_level": 9, "capacity": 24 }],
//!   "visitors": [{ "id": 1001, "name": "Ada", "thrill_preference": 8, "ticket_type": "premium" }],
//!   "walkways": [{ "from": 1, "to": 2, "distance": 120 }],
//!   "queues": [{ "ride": 1, "visitor": 1001 }],
//!   "experiences": [{ "ride": 1, "visitor": 1001 }]
//! }
//! ```
//!
//! Every section is optional. Entries are applied in the order above, so
//! queued visitors shape the waits that completed rides observe.

use std::io::BufReader;

use camino::Utf8Path;
use ridepark_core::{Edge, EngineError, NewRide, NewVisitor, RideId, VisitorId};
use ridepark_router::{CachingRouter, DijkstraRouter};
use ridepark_runtime::{Park, ParkConfig};
use ridepark_scorer::ThrillScorer;
use serde::{Deserialize, Serialize};

use crate::CliError;
use crate::fs::open_utf8_file;

/// Engine configuration used by every CLI command.
pub type CliPark = Park<ThrillScorer, CachingRouter<DijkstraRouter>>;

/// A visitor and the ride they act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideVisit {
    /// Ride acted on.
    pub ride: RideId,
    /// Visitor acting.
    pub visitor: VisitorId,
}

/// Decoded layout file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParkLayout {
    /// Rides to register.
    #[serde(default)]
    pub rides: Vec<NewRide>,
    /// Visitors to register.
    #[serde(default)]
    pub visitors: Vec<NewVisitor>,
    /// Walkways between registered rides.
    #[serde(default)]
    pub walkways: Vec<Edge>,
    /// Queue places, joined in order.
    #[serde(default)]
    pub queues: Vec<RideVisit>,
    /// Completed rides, replayed in order.
    #[serde(default)]
    pub experiences: Vec<RideVisit>,
}

impl ParkLayout {
    /// Load a layout from a JSON file.
    ///
    /// # Errors
    /// Returns [`CliError::OpenLayout`] when the file cannot be opened and
    /// [`CliError::ParseLayout`] when it is not a valid layout.
    pub fn load(path: &Utf8Path) -> Result<Self, CliError> {
        let file = open_utf8_file(path).map_err(|source| CliError::OpenLayout {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseLayout {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build a park holding this layout.
    ///
    /// # Errors
    /// Returns the first [`EngineError`] raised while applying an entry.
    pub fn build(&self, config: ParkConfig) -> Result<CliPark, EngineError> {
        let park = Park::new(ThrillScorer::default(), CachingRouter::new(DijkstraRouter), config)?;
        for ride in &self.rides {
            park.add_ride(ride.clone())?;
        }
        for visitor in &self.visitors {
            park.add_visitor(visitor.clone())?;
        }
        for walkway in &self.walkways {
            park.connect(walkway.from, walkway.to, walkway.distance)?;
        }
        for place in &self.queues {
            park.enqueue(place.ride, place.visitor)?;
        }
        for visit in &self.experiences {
            park.experience(visit.ride, visit.visitor)?;
        }
        log::debug!(
            "layout built: {} rides, {} visitors, {} walkways",
            self.rides.len(),
            self.visitors.len(),
            self.walkways.len()
        );
        Ok(park)
    }
}
