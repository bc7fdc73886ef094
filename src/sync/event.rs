//! Outbound snapshots and their delivery scope.
//!
//! Every event carries a full snapshot of the store it describes; there
//! are no deltas. Hand contents only ever go to their owner, everything
//! else goes to the whole room.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::seat::{ConnectionId, SeatIndex};
use crate::table::{Placement, Token, TokenKind};

/// Public hand size of one seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandCount {
    /// Seat.
    pub seat: SeatIndex,
    /// Cards held.
    pub count: usize,
}

/// An engine-to-participant event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Admission succeeded.
    SeatAssigned(SeatIndex),
    /// Admission refused; nothing else will follow.
    RoomFull,
    /// The receiver's hand, in draw order.
    HandUpdated(Vec<Card>),
    /// All placements in table order.
    TableUpdated(Vector<Placement>),
    /// Every token of one kind.
    TokensUpdated {
        /// Token kind.
        kind: TokenKind,
        /// Tokens in index order.
        tokens: Vec<Token>,
    },
    /// Hand sizes of every seat, in admission order.
    HandCountUpdated(Vec<HandCount>),
    /// Cards left in each supply.
    SupplyUpdated {
        /// Standard supply size.
        standard: usize,
        /// Special supply size.
        special: usize,
    },
}

impl ServerEvent {
    /// Wire name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::SeatAssigned(_) => "seat-assigned",
            ServerEvent::RoomFull => "room-full",
            ServerEvent::HandUpdated(_) => "hand-updated",
            ServerEvent::TableUpdated(_) => "table-updated",
            ServerEvent::TokensUpdated { .. } => "tokens-updated",
            ServerEvent::HandCountUpdated(_) => "hand-count-updated",
            ServerEvent::SupplyUpdated { .. } => "supply-updated",
        }
    }
}

/// Who receives an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// One connection only.
    To(ConnectionId),
    /// Every seated connection.
    Room,
}

/// An event with its delivery scope.
#[derive(Clone, Debug, PartialEq)]
pub struct Outbound {
    /// Recipients.
    pub delivery: Delivery,
    /// Payload.
    pub event: ServerEvent,
}

impl Outbound {
    /// Event for a single connection.
    #[must_use]
    pub fn to(connection: ConnectionId, event: ServerEvent) -> Self {
        Self {
            delivery: Delivery::To(connection),
            event,
        }
    }

    /// Event for the whole room.
    #[must_use]
    pub fn room(event: ServerEvent) -> Self {
        Self {
            delivery: Delivery::Room,
            event,
        }
    }

    /// Whether `connection` is among the recipients, given who is seated.
    #[must_use]
    pub fn reaches(&self, connection: ConnectionId, seated: bool) -> bool {
        match self.delivery {
            Delivery::To(target) => target == connection,
            Delivery::Room => seated,
        }
    }
}

/// Events produced by one command. Most commands emit at most four.
pub type Outbox = SmallVec<[Outbound; 4]>;
