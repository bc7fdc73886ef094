//! The session aggregate.
//!
//! `Session` owns every store of one game: registry, supplies, hands and
//! table. All mutation goes through its methods, which either apply fully
//! or return a `Rejection` and leave state untouched.
//!
//! ## Conservation
//!
//! For each namespace, every card is in exactly one of: its supply, some
//! hand, the table, or the dropped pile (hands discarded on release).
//! `Session::audit` computes those totals.

use serde::{Deserialize, Serialize};

use super::registry::SessionRegistry;
use crate::cards::{Card, Namespace, Supplies};
use crate::core::config::SessionConfig;
use crate::core::error::Rejection;
use crate::core::rng::SessionRng;
use crate::core::seat::{ConnectionId, SeatIndex};
use crate::hands::HandStore;
use crate::table::{Placement, PlacementId, PlacementRef, TableSurface, TokenKind};

/// Where the cards of one namespace currently are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceAudit {
    /// Cards left in the supply.
    pub supply: usize,
    /// Cards held in hands.
    pub hands: usize,
    /// Cards on the table.
    pub table: usize,
    /// Cards discarded with a departing hand.
    pub dropped: usize,
}

impl NamespaceAudit {
    /// Sum over all locations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.supply + self.hands + self.table + self.dropped
    }
}

/// Conservation report for both namespaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    /// Standard namespace.
    pub standard: NamespaceAudit,
    /// Special namespace.
    pub special: NamespaceAudit,
}

impl Audit {
    /// Whether each namespace still accounts for its full card set.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        self.standard.total() == Namespace::Standard.size()
            && self.special.total() == Namespace::Special.size()
    }
}

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    rng: SessionRng,
    registry: SessionRegistry,
    supplies: Supplies,
    hands: HandStore,
    table: TableSurface,
    dropped: Vec<Card>,
}

impl Session {
    /// Fresh session: full shuffled supplies, empty table, initial tokens.
    #[must_use]
    pub fn new(config: SessionConfig, mut rng: SessionRng) -> Self {
        let supplies = Supplies::initialize(&mut rng);
        let table = TableSurface::new(&config);
        Self {
            registry: SessionRegistry::new(config.capacity),
            config,
            rng,
            supplies,
            hands: HandStore::new(),
            table,
            dropped: Vec::new(),
        }
    }

    /// Session with explicit supplies. Used by fixtures that need a known
    /// draw order.
    #[must_use]
    pub fn with_supplies(config: SessionConfig, rng: SessionRng, supplies: Supplies) -> Self {
        Self {
            supplies,
            ..Self::new(config, rng)
        }
    }

    // === Membership ===

    /// Seat a connection and open its hand.
    pub fn admit(&mut self, connection: ConnectionId) -> Result<SeatIndex, Rejection> {
        let seat = self.registry.admit(connection)?;
        self.hands.open(connection);
        Ok(seat)
    }

    /// Unseat a connection and discard its hand.
    ///
    /// Cards in the hand are dropped, not returned to supply. When the last
    /// participant leaves, the board is reset for whoever comes next.
    pub fn release(&mut self, connection: ConnectionId) -> Result<(SeatIndex, Vec<Card>), Rejection> {
        let seat = self.registry.release(connection).ok_or(Rejection::NotAdmitted)?;
        let discarded = self.hands.discard(connection).unwrap_or_default();
        self.dropped.extend(discarded.iter().cloned());

        if self.registry.is_empty() {
            self.reset_board();
        }
        Ok((seat, discarded))
    }

    fn reset_board(&mut self) {
        self.supplies = Supplies::initialize(&mut self.rng);
        self.hands.clear();
        self.table.reset(&self.config);
        self.dropped.clear();
    }

    fn require_seated(&self, connection: ConnectionId) -> Result<(), Rejection> {
        if self.registry.is_seated(connection) {
            Ok(())
        } else {
            Err(Rejection::NotAdmitted)
        }
    }

    // === Supplies and hands ===

    /// Draw the top card of a supply into the caller's hand.
    pub fn draw(&mut self, connection: ConnectionId, namespace: Namespace) -> Result<Card, Rejection> {
        self.require_seated(connection)?;
        let card = self
            .supplies
            .get_mut(namespace)
            .draw()
            .ok_or(Rejection::EmptySupply)?;
        let added = self.hands.draw(connection, card.clone());
        debug_assert!(added, "{card} drawn twice");
        Ok(card)
    }

    /// Reshuffle a supply.
    pub fn shuffle(&mut self, namespace: Namespace) {
        self.supplies.get_mut(namespace).shuffle(&mut self.rng);
    }

    /// Move a card from the caller's hand onto the table.
    pub fn play_to_table(
        &mut self,
        connection: ConnectionId,
        card: &Card,
        x: f64,
        y: f64,
    ) -> Result<PlacementId, Rejection> {
        let card = self.hands.remove(connection, card)?;
        Ok(self.table.placements.place(card, x, y))
    }

    /// Move a card from the caller's hand back into its supply.
    pub fn return_from_hand(&mut self, connection: ConnectionId, card: &Card) -> Result<(), Rejection> {
        let card = self.hands.remove(connection, card)?;
        self.supplies.return_card(card, &mut self.rng);
        Ok(())
    }

    // === Table ===

    /// Move a placed card.
    pub fn move_placement(&mut self, target: PlacementRef, x: f64, y: f64) -> Result<PlacementId, Rejection> {
        self.table.placements.move_ref(target, x, y)
    }

    /// Take a placed card off the table and back into its supply.
    pub fn return_from_table(&mut self, target: PlacementRef, card: &Card) -> Result<Placement, Rejection> {
        let placement = self.table.placements.remove_ref(target, card)?;
        self.supplies.return_card(placement.card.clone(), &mut self.rng);
        Ok(placement)
    }

    /// Move a token.
    pub fn move_token(&mut self, kind: TokenKind, index: usize, x: f64, y: f64) -> Result<(), Rejection> {
        self.table.tokens.move_token(kind, index, x, y)
    }

    /// Set a token's value.
    pub fn set_token_value(&mut self, kind: TokenKind, index: usize, value: i32) -> Result<(), Rejection> {
        self.table.tokens.set_value(kind, index, value)
    }

    /// Roll a token's value with the session RNG.
    pub fn roll_token(&mut self, kind: TokenKind, index: usize) -> Result<i32, Rejection> {
        self.table.tokens.roll(kind, index, &mut self.rng)
    }

    // === Views ===

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Seat registry.
    #[must_use]
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Both supplies.
    #[must_use]
    pub fn supplies(&self) -> &Supplies {
        &self.supplies
    }

    /// All hands.
    #[must_use]
    pub fn hands(&self) -> &HandStore {
        &self.hands
    }

    /// The table surface.
    #[must_use]
    pub fn table(&self) -> &TableSurface {
        &self.table
    }

    /// Cards discarded by releases since the last reset.
    #[must_use]
    pub fn dropped(&self) -> &[Card] {
        &self.dropped
    }

    /// Per-namespace location totals.
    #[must_use]
    pub fn audit(&self) -> Audit {
        let count = |namespace: Namespace| NamespaceAudit {
            supply: self.supplies.get(namespace).len(),
            hands: self.hands.count_in(namespace),
            table: self.table.placements.count_in(namespace),
            dropped: self.dropped.iter().filter(|c| c.namespace() == namespace).count(),
        };
        Audit {
            standard: count(Namespace::Standard),
            special: count(Namespace::Special),
        }
    }
}
