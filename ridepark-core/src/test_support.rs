//! Deterministic fixtures shared by unit, behaviour and integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};

use crate::{Clock, Edge, NewRide, NewVisitor, RideId, ThrillLevel, TicketType};

/// [`Clock`] frozen at a chosen instant until advanced.
#[derive(Debug)]
pub struct FixedClock {
    seconds: AtomicI64,
}

impl FixedClock {
    /// Freeze the clock at `seconds` past the Unix epoch.
    #[must_use]
    pub const fn at(seconds: i64) -> Self {
        Self {
            seconds: AtomicI64::new(seconds),
        }
    }

    /// Move the clock forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        self.seconds.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        // 2024-06-01T09:00:00Z, opening time.
        Self::at(1_717_232_400)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        TimeDelta::try_seconds(self.seconds.load(Ordering::SeqCst))
            .and_then(|offset| DateTime::<Utc>::UNIX_EPOCH.checked_add_signed(offset))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Five rides spanning the thrill scale.
///
/// | id | name | thrill | capacity |
/// |----|------|--------|----------|
/// | 1 | Thunder Loop | 9 | 24 |
/// | 2 | Log Flume | 5 | 12 |
/// | 3 | Carousel | 2 | 30 |
/// | 4 | Sky Drop | 8 | 10 |
/// | 5 | Teacup Spin | 3 | 16 |
#[must_use]
pub fn sample_rides() -> Vec<NewRide> {
    [
        (1, "Thunder Loop", 9, 24),
        (2, "Log Flume", 5, 12),
        (3, "Carousel", 2, 30),
        (4, "Sky Drop", 8, 10),
        (5, "Teacup Spin", 3, 16),
    ]
    .into_iter()
    .map(|(id, name, thrill, capacity)| {
        NewRide::new(RideId::new(id), name, ThrillLevel::clamped(thrill), capacity)
    })
    .collect()
}

/// Three visitors, one holding a premium ticket.
#[must_use]
pub fn sample_visitors() -> Vec<NewVisitor> {
    vec![
        NewVisitor::new(1001, "Ada", ThrillLevel::clamped(8), TicketType::Premium),
        NewVisitor::new(1002, "Grace", ThrillLevel::clamped(3), TicketType::Normal),
        NewVisitor::new(1003, "Linus", ThrillLevel::clamped(6), TicketType::Normal),
    ]
}

/// Walkways linking the sample rides.
///
/// Rides 1 to 4 form a loop with a shortcut; ride 5 hangs off ride 3. The
/// shortest walk from 1 to 5 is `1 -> 2 -> 3 -> 5` at 330 m.
#[must_use]
pub fn sample_walkways() -> Vec<Edge> {
    [(1, 2, 120), (2, 3, 90), (3, 4, 200), (4, 1, 150), (1, 3, 260), (3, 5, 120)]
        .into_iter()
        .map(|(from, to, distance)| Edge {
            from: RideId::new(from),
            to: RideId::new(to),
            distance,
        })
        .collect()
}
