//! Error taxonomy shared by every engine operation.

use std::fmt;

use thiserror::Error;

use crate::{RideId, VisitorId};

/// The kind of registry entry an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A ride registered with the park.
    Ride,
    /// A visitor registered with the park.
    Visitor,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ride => "ride",
            Self::Visitor => "visitor",
        })
    }
}

/// Errors returned by engine operations.
///
/// Every variant carries enough context to build a user-facing message.
/// Operations that fail never leave shared state partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The referenced ride or visitor is not registered.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Which registry was searched.
        kind: EntityKind,
        /// Raw identifier that failed to resolve.
        id: u32,
    },
    /// The ride is closed for maintenance.
    #[error("ride {ride} is closed for maintenance")]
    RideClosed {
        /// The closed ride.
        ride: RideId,
    },
    /// Undo was requested for a visitor without ride history.
    #[error("visitor {visitor} has no rides to undo")]
    NoHistory {
        /// The visitor whose history is empty.
        visitor: VisitorId,
    },
    /// The walkway graph holds no path between the two rides.
    #[error("no walkway connects ride {from} to ride {to}")]
    NoPath {
        /// Start of the requested path.
        from: RideId,
        /// End of the requested path.
        to: RideId,
    },
    /// A visitor identifier fell below the reserved minimum.
    #[error("visitor id {raw} is invalid; ids start at {min}", min = VisitorId::MIN)]
    InvalidId {
        /// The rejected identifier.
        raw: u32,
    },
    /// A creation or configuration parameter was out of range.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending parameter.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
    /// An add operation reused an identifier that is already registered.
    #[error("{kind} {id} already exists")]
    Duplicate {
        /// Which registry rejected the entry.
        kind: EntityKind,
        /// The duplicated identifier.
        id: u32,
    },
}

impl EngineError {
    /// Build a [`EngineError::NotFound`] for a ride.
    #[must_use]
    pub const fn ride_not_found(ride: RideId) -> Self {
        Self::NotFound {
            kind: EntityKind::Ride,
            id: ride.get(),
        }
    }

    /// Build a [`EngineError::NotFound`] for a visitor.
    #[must_use]
    pub const fn visitor_not_found(visitor: VisitorId) -> Self {
        Self::NotFound {
            kind: EntityKind::Visitor,
            id: visitor.get(),
        }
    }

    /// Build a [`EngineError::InvalidInput`] for `field`.
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
