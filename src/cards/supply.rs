//! Draw supplies.
//!
//! Each namespace has its own `Supply`, a stack whose top is the end of the
//! backing vec. Supplies never exchange cards.
//!
//! Returning a card appends it and reshuffles the entire supply.

use serde::{Deserialize, Serialize};

use super::card::{Card, Namespace};
use crate::core::rng::SessionRng;

/// Ordered draw stack for one namespace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    namespace: Namespace,
    cards: Vec<Card>,
}

impl Supply {
    /// Full, shuffled supply for a namespace.
    #[must_use]
    pub fn initialize(namespace: Namespace, rng: &mut SessionRng) -> Self {
        let mut supply = Self {
            namespace,
            cards: namespace.full_set(),
        };
        supply.shuffle(rng);
        supply
    }

    /// Supply with explicit contents (bottom first). Used by fixtures.
    #[must_use]
    pub fn from_cards(namespace: Namespace, cards: Vec<Card>) -> Self {
        Self { namespace, cards }
    }

    /// Namespace of this supply.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Re-randomize current contents in place.
    pub fn shuffle(&mut self, rng: &mut SessionRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Put a card back and reshuffle everything.
    pub fn return_card(&mut self, card: Card, rng: &mut SessionRng) {
        debug_assert_eq!(card.namespace(), self.namespace);
        self.cards.push(card);
        self.shuffle(rng);
    }

    /// Cards in stack order (index 0 is the bottom).
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if no cards are left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if a card is in this supply.
    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
}

/// The standard and special supplies of one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplies {
    standard: Supply,
    special: Supply,
}

impl Supplies {
    /// Both supplies, full and shuffled.
    #[must_use]
    pub fn initialize(rng: &mut SessionRng) -> Self {
        Self {
            standard: Supply::initialize(Namespace::Standard, rng),
            special: Supply::initialize(Namespace::Special, rng),
        }
    }

    /// Supply for a namespace.
    #[must_use]
    pub fn get(&self, namespace: Namespace) -> &Supply {
        match namespace {
            Namespace::Standard => &self.standard,
            Namespace::Special => &self.special,
        }
    }

    /// Mutable supply for a namespace.
    pub fn get_mut(&mut self, namespace: Namespace) -> &mut Supply {
        match namespace {
            Namespace::Standard => &mut self.standard,
            Namespace::Special => &mut self.special,
        }
    }

    /// Return a card to the supply matching its namespace.
    pub fn return_card(&mut self, card: Card, rng: &mut SessionRng) {
        self.get_mut(card.namespace()).return_card(card, rng);
    }

    /// (standard, special) sizes.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        (self.standard.len(), self.special.len())
    }
}
