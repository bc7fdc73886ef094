//! Cards laid on the shared surface.
//!
//! Placements are kept in play order and can be addressed two ways:
//! - by position, which shifts when an earlier placement is removed
//! - by `PlacementId`, assigned once at creation and never reused
//!
//! Positional commands that go stale after a removal either hit whatever
//! now sits at that position or do nothing; they never fail loudly.
//! Returning a card by position also requires the card to match.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Namespace};
use crate::core::error::Rejection;

/// Stable identifier of a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(pub u64);

impl std::fmt::Display for PlacementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Placement({})", self.0)
    }
}

/// How a command addresses a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementRef {
    /// Current position in the list.
    Index(usize),
    /// Stable id.
    Id(PlacementId),
}

/// One card on the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Stable id.
    pub id: PlacementId,
    /// The placed card.
    pub card: Card,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

/// Ordered placement list.
///
/// Backed by `im::Vector` so that taking a snapshot for broadcast is O(1).
#[derive(Clone, Debug, Default)]
pub struct Placements {
    items: Vector<Placement>,
    next_id: u64,
}

impl Placements {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a placement. Coordinates are taken as given.
    pub fn place(&mut self, card: Card, x: f64, y: f64) -> PlacementId {
        let id = PlacementId(self.next_id);
        self.next_id += 1;
        self.items.push_back(Placement { id, card, x, y });
        id
    }

    /// Current position of a placement id.
    #[must_use]
    pub fn position_of(&self, id: PlacementId) -> Option<usize> {
        self.items.iter().position(|p| p.id == id)
    }

    /// Placement at a position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Placement> {
        self.items.get(index)
    }

    /// Move the placement at a position.
    pub fn move_at(&mut self, index: usize, x: f64, y: f64) -> Result<PlacementId, Rejection> {
        let placement = self.items.get_mut(index).ok_or(Rejection::NotFound)?;
        placement.x = x;
        placement.y = y;
        Ok(placement.id)
    }

    /// Move a placement by id.
    pub fn move_by_id(&mut self, id: PlacementId, x: f64, y: f64) -> Result<PlacementId, Rejection> {
        let index = self.position_of(id).ok_or(Rejection::NotFound)?;
        self.move_at(index, x, y)
    }

    /// Remove the placement at a position if it holds `card`.
    pub fn remove_at(&mut self, index: usize, card: &Card) -> Result<Placement, Rejection> {
        match self.items.get(index) {
            Some(p) if p.card == *card => Ok(self.items.remove(index)),
            _ => Err(Rejection::NotFound),
        }
    }

    /// Remove a placement by id if it holds `card`.
    pub fn remove_by_id(&mut self, id: PlacementId, card: &Card) -> Result<Placement, Rejection> {
        let index = self.position_of(id).ok_or(Rejection::NotFound)?;
        self.remove_at(index, card)
    }

    /// Move a placement addressed either way.
    pub fn move_ref(&mut self, target: PlacementRef, x: f64, y: f64) -> Result<PlacementId, Rejection> {
        match target {
            PlacementRef::Index(index) => self.move_at(index, x, y),
            PlacementRef::Id(id) => self.move_by_id(id, x, y),
        }
    }

    /// Remove a placement addressed either way, if it holds `card`.
    pub fn remove_ref(&mut self, target: PlacementRef, card: &Card) -> Result<Placement, Rejection> {
        match target {
            PlacementRef::Index(index) => self.remove_at(index, card),
            PlacementRef::Id(id) => self.remove_by_id(id, card),
        }
    }

    /// O(1) copy of the current list.
    #[must_use]
    pub fn snapshot(&self) -> Vector<Placement> {
        self.items.clone()
    }

    /// Number of placements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the table holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of placed cards from a namespace.
    #[must_use]
    pub fn count_in(&self, namespace: Namespace) -> usize {
        self.items
            .iter()
            .filter(|p| p.card.namespace() == namespace)
            .count()
    }

    /// Iterate over placements in order.
    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.items.iter()
    }

    /// Remove every placement. Ids keep counting up.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
