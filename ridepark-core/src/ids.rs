//! Identifier and bounded-scalar newtypes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Identifier of a ride; doubles as its node in the walkway graph.
///
/// # Examples
/// ```
/// use ridepark_core::RideId;
///
/// let ride = RideId::new(3);
/// assert_eq!(ride.get(), 3);
/// assert_eq!(ride.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RideId(u32);

impl RideId {
    /// Wrap a raw ride identifier.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for RideId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a visitor.
///
/// Visitor ids are supplied by the caller and must be at least
/// [`VisitorId::MIN`]; lower values are reserved.
///
/// # Examples
/// ```
/// use ridepark_core::{EngineError, VisitorId};
///
/// assert!(VisitorId::new(1000).is_ok());
/// assert_eq!(VisitorId::new(999), Err(EngineError::InvalidId { raw: 999 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct VisitorId(u32);

impl VisitorId {
    /// Smallest identifier accepted for a visitor.
    pub const MIN: u32 = 1000;

    /// Validate and wrap a raw visitor identifier.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidId`] when `raw` is below [`Self::MIN`].
    pub const fn new(raw: u32) -> Result<Self, EngineError> {
        if raw < Self::MIN {
            return Err(EngineError::InvalidId { raw });
        }
        Ok(Self(raw))
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for VisitorId {
    type Error = EngineError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<VisitorId> for u32 {
    fn from(id: VisitorId) -> Self {
        id.0
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thrill rating on the inclusive `1..=10` scale.
///
/// Used both for a ride's intensity and a visitor's preference.
///
/// # Examples
/// ```
/// use ridepark_core::ThrillLevel;
///
/// let ride = ThrillLevel::new(8).unwrap();
/// let visitor = ThrillLevel::new(5).unwrap();
/// assert_eq!(ride.distance(visitor), 3);
/// assert!(ThrillLevel::new(11).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ThrillLevel(u8);

impl ThrillLevel {
    /// Lowest thrill rating.
    pub const MIN: u8 = 1;
    /// Highest thrill rating.
    pub const MAX: u8 = 10;

    /// Validate and wrap a thrill rating.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] when `raw` is outside `1..=10`.
    pub fn new(raw: u8) -> Result<Self, EngineError> {
        if (Self::MIN..=Self::MAX).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(EngineError::invalid_input(
                "thrill level",
                format!("{raw} is outside {}..={}", Self::MIN, Self::MAX),
            ))
        }
    }

    /// Wrap a rating, clamping it into `1..=10`.
    #[must_use]
    pub const fn clamped(raw: u8) -> Self {
        if raw < Self::MIN {
            Self(Self::MIN)
        } else if raw > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(raw)
        }
    }

    /// Return the raw rating.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Absolute difference between two ratings.
    #[must_use]
    pub const fn distance(self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl TryFrom<u8> for ThrillLevel {
    type Error = EngineError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ThrillLevel> for u8 {
    fn from(level: ThrillLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ThrillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
