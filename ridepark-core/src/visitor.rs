//! Visitors and their ride ledger.
//!
//! A [`Visitor`] owns its profile, running totals and [`RideHistory`]. The
//! totals only change through [`Visitor::record_ride`] and
//! [`Visitor::undo_last_ride`], which keep them consistent with the history.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, HistoryEntry, RideHistory, RideId, Satisfaction, SatisfactionDelta, ThrillLevel,
    VisitorId,
};

/// Admission tier of a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    /// Standard admission; queues in the regular lane.
    #[default]
    Normal,
    /// Fast-pass admission; queues in the premium lane.
    Premium,
}

impl TicketType {
    /// Return the ticket type as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "premium" => Ok(Self::Premium),
            _ => Err(format!("unknown ticket type '{s}'")),
        }
    }
}

/// Parameters for registering a visitor.
///
/// The identifier is kept raw so the engine can reject reserved values with
/// [`EngineError::InvalidId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVisitor {
    /// Caller-assigned identifier, at least [`VisitorId::MIN`].
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Preferred thrill level.
    pub thrill_preference: ThrillLevel,
    /// Admission tier.
    #[serde(default)]
    pub ticket_type: TicketType,
}

impl NewVisitor {
    /// Build creation parameters.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        thrill_preference: ThrillLevel,
        ticket_type: TicketType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            thrill_preference,
            ticket_type,
        }
    }
}

/// A visitor and their ride ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visitor {
    /// Validated identifier.
    pub id: VisitorId,
    /// Display name.
    pub name: String,
    /// Preferred thrill level.
    pub thrill_preference: ThrillLevel,
    /// Admission tier.
    pub ticket_type: TicketType,
    rides_completed: u32,
    satisfaction: Satisfaction,
    total_distance: u64,
    location: Option<RideId>,
    history: RideHistory,
}

/// Details of a ride about to be recorded in a visitor's ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideRecord {
    /// Ride being completed.
    pub ride_id: RideId,
    /// Registration serial of the ride being completed.
    pub ride_serial: u64,
    /// Ride name, kept so history survives ride removal.
    pub ride_name: String,
    /// Commit time.
    pub timestamp: DateTime<Utc>,
    /// Requested satisfaction change before clamping.
    pub satisfaction_delta: SatisfactionDelta,
    /// Walking distance from the previous location, in metres.
    pub distance: u64,
}

impl Visitor {
    /// Validate and construct a [`Visitor`] with a history bound.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidId`] for reserved identifiers and
    /// [`EngineError::InvalidInput`] for a blank name.
    pub fn new(spec: NewVisitor, history_bound: usize) -> Result<Self, EngineError> {
        let id = VisitorId::new(spec.id)?;
        let name = spec.name.trim();
        if name.is_empty() {
            return Err(EngineError::invalid_input("visitor name", "must not be blank"));
        }
        Ok(Self {
            id,
            name: name.to_owned(),
            thrill_preference: spec.thrill_preference,
            ticket_type: spec.ticket_type,
            rides_completed: 0,
            satisfaction: Satisfaction::NEUTRAL,
            total_distance: 0,
            location: None,
            history: RideHistory::with_bound(history_bound),
        })
    }

    /// Completed rides, net of undos.
    #[must_use]
    pub const fn rides_completed(&self) -> u32 {
        self.rides_completed
    }

    /// Current satisfaction.
    #[must_use]
    pub const fn satisfaction(&self) -> Satisfaction {
        self.satisfaction
    }

    /// Total walking distance, in metres.
    #[must_use]
    pub const fn total_distance(&self) -> u64 {
        self.total_distance
    }

    /// Ride the visitor last experienced, if any.
    #[must_use]
    pub const fn location(&self) -> Option<RideId> {
        self.location
    }

    /// Borrow the ride history.
    #[must_use]
    pub const fn history(&self) -> &RideHistory {
        &self.history
    }

    /// Commit a completed ride and return the entry pushed onto the history.
    ///
    /// This method cannot fail, so callers validate before invoking it.
    pub fn record_ride(&mut self, record: RideRecord) -> HistoryEntry {
        let (satisfaction, applied) = self.satisfaction.apply(record.satisfaction_delta);
        let entry = HistoryEntry {
            ride_id: record.ride_id,
            ride_serial: record.ride_serial,
            ride_name: record.ride_name,
            timestamp: record.timestamp,
            satisfaction_delta: applied,
            distance_delta: record.distance,
            previous_location: self.location,
        };
        self.satisfaction = satisfaction;
        self.rides_completed = self.rides_completed.saturating_add(1);
        self.total_distance = self.total_distance.saturating_add(record.distance);
        self.location = Some(record.ride_id);
        self.history.push(entry.clone());
        entry
    }

    /// Reverse the most recent ride and return its history entry.
    ///
    /// # Errors
    /// Returns [`EngineError::NoHistory`] when there is nothing to undo.
    pub fn undo_last_ride(&mut self) -> Result<HistoryEntry, EngineError> {
        let entry = self
            .history
            .pop()
            .ok_or(EngineError::NoHistory { visitor: self.id })?;
        let (satisfaction, _) = self.satisfaction.apply(entry.satisfaction_delta.negate());
        self.satisfaction = satisfaction;
        self.rides_completed = self.rides_completed.saturating_sub(1);
        self.total_distance = self.total_distance.saturating_sub(entry.distance_delta);
        self.location = entry.previous_location;
        Ok(entry)
    }
}
