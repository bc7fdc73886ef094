//! Per-connection hand storage.
//!
//! Each seated connection owns exactly one hand, an ordered list in draw
//! order. Every operation is scoped to the caller's own hand; a card held
//! by somebody else is reported as `ForeignHand` and left alone.

use rustc_hash::FxHashMap;

use crate::cards::{Card, Namespace};
use crate::core::error::Rejection;
use crate::core::seat::ConnectionId;

/// Hands of all seated participants.
#[derive(Clone, Debug, Default)]
pub struct HandStore {
    hands: FxHashMap<ConnectionId, Vec<Card>>,
}

impl HandStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Give a newly seated connection an empty hand.
    pub fn open(&mut self, owner: ConnectionId) {
        self.hands.entry(owner).or_default();
    }

    /// Drop a hand entirely, returning what it held.
    pub fn discard(&mut self, owner: ConnectionId) -> Option<Vec<Card>> {
        self.hands.remove(&owner)
    }

    /// Drop every hand.
    pub fn clear(&mut self) {
        self.hands.clear();
    }

    /// Append a freshly drawn card.
    ///
    /// Returns `false` if the owner has no hand or already holds the card.
    pub fn draw(&mut self, owner: ConnectionId, card: Card) -> bool {
        match self.hands.get_mut(&owner) {
            Some(hand) if !hand.contains(&card) => {
                hand.push(card);
                true
            }
            _ => false,
        }
    }

    /// Remove the first occurrence of `card` from the owner's hand.
    pub fn remove(&mut self, owner: ConnectionId, card: &Card) -> Result<Card, Rejection> {
        let hand = self.hands.get_mut(&owner).ok_or(Rejection::NotAdmitted)?;

        if let Some(pos) = hand.iter().position(|c| c == card) {
            return Ok(hand.remove(pos));
        }

        if self.holder_of(card).is_some() {
            Err(Rejection::ForeignHand)
        } else {
            Err(Rejection::NotFound)
        }
    }

    /// Who currently holds a card, if anyone.
    #[must_use]
    pub fn holder_of(&self, card: &Card) -> Option<ConnectionId> {
        self.hands
            .iter()
            .find(|(_, hand)| hand.contains(card))
            .map(|(&owner, _)| owner)
    }

    /// A connection's hand in draw order.
    #[must_use]
    pub fn hand(&self, owner: ConnectionId) -> Option<&[Card]> {
        self.hands.get(&owner).map(Vec::as_slice)
    }

    /// Number of cards held by a connection (0 if it has no hand).
    #[must_use]
    pub fn hand_size(&self, owner: ConnectionId) -> usize {
        self.hands.get(&owner).map_or(0, Vec::len)
    }

    /// Total cards of a namespace across all hands.
    #[must_use]
    pub fn count_in(&self, namespace: Namespace) -> usize {
        self.hands
            .values()
            .flatten()
            .filter(|c| c.namespace() == namespace)
            .count()
    }

    /// Iterate over every held card.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.hands.values().flatten()
    }
}
