//! Seat admission and release.
//!
//! At most `capacity` connections are seated at once. Seats are numbered
//! from 1 in admission order and the counter only moves forward: a
//! connection that leaves and comes back gets a new, higher seat.

use crate::core::error::Rejection;
use crate::core::seat::{ConnectionId, SeatIndex};

/// Who is seated, in admission order.
#[derive(Clone, Debug)]
pub struct SessionRegistry {
    capacity: usize,
    seated: Vec<(ConnectionId, SeatIndex)>,
    next_seat: SeatIndex,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            seated: Vec::with_capacity(capacity),
            next_seat: SeatIndex::FIRST,
        }
    }

    /// Seat a connection.
    ///
    /// Admitting an already seated connection returns its existing seat.
    pub fn admit(&mut self, connection: ConnectionId) -> Result<SeatIndex, Rejection> {
        if let Some(seat) = self.seat_of(connection) {
            return Ok(seat);
        }
        if self.seated.len() >= self.capacity {
            return Err(Rejection::RoomFull);
        }
        let seat = self.next_seat;
        self.next_seat = seat.next();
        self.seated.push((connection, seat));
        Ok(seat)
    }

    /// Unseat a connection, returning the seat it held.
    pub fn release(&mut self, connection: ConnectionId) -> Option<SeatIndex> {
        let pos = self.seated.iter().position(|&(c, _)| c == connection)?;
        Some(self.seated.remove(pos).1)
    }

    /// Seat held by a connection.
    #[must_use]
    pub fn seat_of(&self, connection: ConnectionId) -> Option<SeatIndex> {
        self.seated
            .iter()
            .find(|&&(c, _)| c == connection)
            .map(|&(_, seat)| seat)
    }

    /// Check if a connection is seated.
    #[must_use]
    pub fn is_seated(&self, connection: ConnectionId) -> bool {
        self.seat_of(connection).is_some()
    }

    /// Seated (connection, seat) pairs in admission order.
    pub fn members(&self) -> impl Iterator<Item = (ConnectionId, SeatIndex)> + '_ {
        self.seated.iter().copied()
    }

    /// Seated connections in admission order.
    pub fn connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.seated.iter().map(|&(c, _)| c)
    }

    /// Number of seated connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seated.len()
    }

    /// Check if nobody is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seated.is_empty()
    }

    /// Maximum concurrent seats.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
