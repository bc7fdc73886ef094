//! Command application and snapshot fan-out.
//!
//! `Broadcaster` owns the `Session` and is the only way to mutate it.
//! `apply` takes `&mut self` and runs synchronously, so one inbound is
//! fully applied, and its events computed, before the next can start.
//!
//! ## Emission rules
//!
//! | Inbound | Targeted (sender) | Room |
//! |---|---|---|
//! | admit | seat, table, tokens, supply | hand counts |
//! | draw | hand | hand counts, supply |
//! | shuffle | - | - |
//! | play | hand | table, hand counts |
//! | move placement | - | table |
//! | return from hand | hand | hand counts, supply |
//! | return from table | - | table, supply |
//! | token move/update/roll | - | tokens of that kind |
//! | release | - | hand counts |
//!
//! A rejected inbound emits nothing, except `room-full` to a refused
//! admission.

use tracing::{debug, info, trace};

use super::command::{Command, Inbound};
use super::event::{HandCount, Outbound, Outbox, ServerEvent};
use crate::cards::Namespace;
use crate::core::config::SessionConfig;
use crate::core::error::Rejection;
use crate::core::rng::SessionRng;
use crate::core::seat::{ConnectionId, SeatIndex};
use crate::session::Session;
use crate::table::{PlacementRef, TokenKind};

/// Result of applying one inbound.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outcome {
    /// Why the inbound was declined, if it was.
    pub rejection: Option<Rejection>,
    /// Events to deliver.
    pub outbox: Outbox,
}

impl Outcome {
    fn applied(outbox: Outbox) -> Self {
        Self {
            rejection: None,
            outbox,
        }
    }

    fn rejected(rejection: Rejection) -> Self {
        Self {
            rejection: Some(rejection),
            outbox: Outbox::new(),
        }
    }

    /// Whether the inbound changed (or could have changed) session state.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.rejection.is_none()
    }

    /// Events that reach `connection`, given whether it is seated.
    pub fn events_for(&self, connection: ConnectionId, seated: bool) -> impl Iterator<Item = &ServerEvent> {
        self.outbox
            .iter()
            .filter(move |o| o.reaches(connection, seated))
            .map(|o| &o.event)
    }
}

/// Single entry point of the engine.
#[derive(Clone, Debug)]
pub struct Broadcaster {
    session: Session,
}

impl Broadcaster {
    /// Broadcaster over a fresh session.
    #[must_use]
    pub fn new(config: SessionConfig, rng: SessionRng) -> Self {
        Self::from_session(Session::new(config, rng))
    }

    /// Broadcaster over an existing session.
    #[must_use]
    pub fn from_session(session: Session) -> Self {
        Self { session }
    }

    /// Read-only view of the session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Admit a connection.
    pub fn admit(&mut self, connection: ConnectionId) -> Outcome {
        self.apply(Inbound::Admit(connection))
    }

    /// Release a connection.
    pub fn release(&mut self, connection: ConnectionId) -> Outcome {
        self.apply(Inbound::Release(connection))
    }

    /// Apply a participant command.
    pub fn command(&mut self, from: ConnectionId, command: Command) -> Outcome {
        self.apply(Inbound::Command { from, command })
    }

    /// Apply one inbound to completion.
    pub fn apply(&mut self, inbound: Inbound) -> Outcome {
        let connection = inbound.connection();
        let name = inbound.name();

        let result = match inbound {
            Inbound::Admit(c) => self.on_admit(c),
            Inbound::Release(c) => self.on_release(c),
            Inbound::Command { from, command } => {
                if self.session.registry().is_seated(from) {
                    self.on_command(from, command)
                } else {
                    Err(Rejection::NotAdmitted)
                }
            }
        };

        match result {
            Ok(outbox) => {
                for out in &outbox {
                    trace!(%connection, event = out.event.name(), delivery = ?out.delivery, "emit");
                }
                Outcome::applied(outbox)
            }
            Err(Rejection::RoomFull) => {
                info!(%connection, "admission refused, room full");
                Outcome {
                    rejection: Some(Rejection::RoomFull),
                    outbox: Outbox::from_iter([Outbound::to(connection, ServerEvent::RoomFull)]),
                }
            }
            Err(rejection) => {
                debug!(%connection, command = name, reason = %rejection, "command ignored");
                Outcome::rejected(rejection)
            }
        }
    }

    fn on_admit(&mut self, connection: ConnectionId) -> Result<Outbox, Rejection> {
        let seat = self.session.admit(connection)?;
        info!(%connection, %seat, "participant admitted");

        let mut outbox = Outbox::new();
        outbox.push(Outbound::to(connection, ServerEvent::SeatAssigned(seat)));
        outbox.push(Outbound::to(connection, self.table_event()));
        for kind in TokenKind::ALL {
            outbox.push(Outbound::to(connection, self.tokens_event(kind)));
        }
        outbox.push(Outbound::to(connection, self.supply_event()));
        outbox.push(Outbound::room(self.hand_count_event()));
        Ok(outbox)
    }

    fn on_release(&mut self, connection: ConnectionId) -> Result<Outbox, Rejection> {
        let (seat, discarded) = self.session.release(connection)?;
        info!(%connection, %seat, dropped = discarded.len(), "participant released");

        let mut outbox = Outbox::new();
        if self.session.registry().is_empty() {
            info!("last participant left, board reset");
        } else {
            outbox.push(Outbound::room(self.hand_count_event()));
        }
        Ok(outbox)
    }

    fn on_command(&mut self, from: ConnectionId, command: Command) -> Result<Outbox, Rejection> {
        let mut outbox = Outbox::new();

        match command {
            Command::DrawStandard => self.on_draw(from, Namespace::Standard, &mut outbox)?,
            Command::DrawSpecial => self.on_draw(from, Namespace::Special, &mut outbox)?,
            Command::ShuffleStandard => self.session.shuffle(Namespace::Standard),
            Command::ShuffleSpecial => self.session.shuffle(Namespace::Special),
            Command::PlayCard { card, x, y } => {
                self.session.play_to_table(from, &card, x, y)?;
                outbox.push(self.hand_event(from));
                outbox.push(Outbound::room(self.table_event()));
                outbox.push(Outbound::room(self.hand_count_event()));
            }
            Command::MoveTableCard { index, x, y } => {
                self.session.move_placement(PlacementRef::Index(index), x, y)?;
                outbox.push(Outbound::room(self.table_event()));
            }
            Command::MovePlacement { id, x, y } => {
                self.session.move_placement(PlacementRef::Id(id), x, y)?;
                outbox.push(Outbound::room(self.table_event()));
            }
            Command::ReturnCardFromHand { card } => {
                self.session.return_from_hand(from, &card)?;
                outbox.push(self.hand_event(from));
                outbox.push(Outbound::room(self.hand_count_event()));
                outbox.push(Outbound::room(self.supply_event()));
            }
            Command::ReturnCardFromTable { index, card } => {
                self.session.return_from_table(PlacementRef::Index(index), &card)?;
                outbox.push(Outbound::room(self.table_event()));
                outbox.push(Outbound::room(self.supply_event()));
            }
            Command::ReturnPlacement { id, card } => {
                self.session.return_from_table(PlacementRef::Id(id), &card)?;
                outbox.push(Outbound::room(self.table_event()));
                outbox.push(Outbound::room(self.supply_event()));
            }
            Command::MoveToken { kind, index, x, y } => {
                self.session.move_token(kind, index, x, y)?;
                outbox.push(Outbound::room(self.tokens_event(kind)));
            }
            Command::UpdateToken { kind, index, value } => {
                self.session.set_token_value(kind, index, value)?;
                outbox.push(Outbound::room(self.tokens_event(kind)));
            }
            Command::RollToken { kind, index } => {
                let value = self.session.roll_token(kind, index)?;
                debug!(connection = %from, %kind, index, value, "token rolled");
                outbox.push(Outbound::room(self.tokens_event(kind)));
            }
        }

        Ok(outbox)
    }

    fn on_draw(&mut self, from: ConnectionId, namespace: Namespace, outbox: &mut Outbox) -> Result<(), Rejection> {
        self.session.draw(from, namespace)?;
        outbox.push(self.hand_event(from));
        outbox.push(Outbound::room(self.hand_count_event()));
        outbox.push(Outbound::room(self.supply_event()));
        Ok(())
    }

    // === Snapshots ===

    fn hand_event(&self, owner: ConnectionId) -> Outbound {
        let cards = self
            .session
            .hands()
            .hand(owner)
            .map(<[_]>::to_vec)
            .unwrap_or_default();
        Outbound::to(owner, ServerEvent::HandUpdated(cards))
    }

    fn table_event(&self) -> ServerEvent {
        ServerEvent::TableUpdated(self.session.table().placements.snapshot())
    }

    fn tokens_event(&self, kind: TokenKind) -> ServerEvent {
        ServerEvent::TokensUpdated {
            kind,
            tokens: self.session.table().tokens.tokens(kind).to_vec(),
        }
    }

    fn hand_count_event(&self) -> ServerEvent {
        let counts = self
            .session
            .registry()
            .members()
            .map(|(connection, seat)| HandCount {
                seat,
                count: self.session.hands().hand_size(connection),
            })
            .collect();
        ServerEvent::HandCountUpdated(counts)
    }

    fn supply_event(&self) -> ServerEvent {
        let (standard, special) = self.session.supplies().counts();
        ServerEvent::SupplyUpdated { standard, special }
    }

    /// Seat of a connection, if seated.
    #[must_use]
    pub fn seat_of(&self, connection: ConnectionId) -> Option<SeatIndex> {
        self.session.registry().seat_of(connection)
    }
}
