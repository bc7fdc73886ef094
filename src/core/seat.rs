//! Connection and seat identifiers.
//!
//! ## ConnectionId
//!
//! Stable identifier for one transport connection. Membership is scoped to
//! the connection: a reconnect is a new `ConnectionId`.
//!
//! ## SeatIndex
//!
//! 1-based seat number handed out in admission order. Never reused while
//! the session lives.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a single participant connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Fresh random (v4) connection id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Connection id from a raw integer. Handy for fixtures.
    ///
    /// ```
    /// use tabletop_sync::core::ConnectionId;
    ///
    /// assert_eq!(ConnectionId::from_u128(7), ConnectionId::from_u128(7));
    /// assert_ne!(ConnectionId::from_u128(7), ConnectionId::from_u128(8));
    /// ```
    #[must_use]
    pub const fn from_u128(raw: u128) -> Self {
        Self(Uuid::from_u128(raw))
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seat number assigned on admission, starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatIndex(pub u32);

impl SeatIndex {
    /// The first seat handed out in a session.
    pub const FIRST: SeatIndex = SeatIndex(1);

    /// Create a seat index.
    #[must_use]
    pub const fn new(seat: u32) -> Self {
        Self(seat)
    }

    /// The seat after this one. Saturates at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for SeatIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}
