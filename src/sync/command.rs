//! Inbound commands.
//!
//! `Command` is what a participant sends over the wire. `Inbound` wraps it
//! with the sending connection and adds the two membership events raised
//! by the transport (admit on connect, release on disconnect).
//!
//! Wire names are kebab-case:
//!
//! ```
//! use tabletop_sync::sync::Command;
//!
//! let cmd: Command = serde_json::from_str(
//!     r#"{ "play-card": { "card": "07", "x": 100.0, "y": 150.0 } }"#,
//! ).unwrap();
//! assert_eq!(cmd.name(), "play-card");
//!
//! let draw: Command = serde_json::from_str(r#""draw-standard""#).unwrap();
//! assert_eq!(draw, Command::DrawStandard);
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::seat::ConnectionId;
use crate::table::{PlacementId, TokenKind};

/// A participant command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// Draw the top standard card into your hand.
    DrawStandard,
    /// Draw the top special card into your hand.
    DrawSpecial,
    /// Reshuffle the standard supply.
    ShuffleStandard,
    /// Reshuffle the special supply.
    ShuffleSpecial,
    /// Play a card from your hand onto the table.
    PlayCard {
        /// Card to play.
        card: Card,
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Move a placed card, addressed by position.
    MoveTableCard {
        /// Position in the placement list.
        index: usize,
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Move a placed card, addressed by id.
    MovePlacement {
        /// Placement id.
        id: PlacementId,
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Return a card from your hand to its supply.
    ReturnCardFromHand {
        /// Card to return.
        card: Card,
    },
    /// Return a placed card to its supply, addressed by position.
    ReturnCardFromTable {
        /// Position in the placement list.
        index: usize,
        /// Card expected at that position.
        card: Card,
    },
    /// Return a placed card to its supply, addressed by id.
    ReturnPlacement {
        /// Placement id.
        id: PlacementId,
        /// Card expected under that id.
        card: Card,
    },
    /// Move a token.
    MoveToken {
        /// Token kind.
        kind: TokenKind,
        /// Index within the kind.
        index: usize,
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Set a token's value.
    UpdateToken {
        /// Token kind.
        kind: TokenKind,
        /// Index within the kind.
        index: usize,
        /// New value, must lie within the kind's range.
        value: i32,
    },
    /// Roll a token's value server-side.
    RollToken {
        /// Token kind.
        kind: TokenKind,
        /// Index within the kind.
        index: usize,
    },
}

impl Command {
    /// Wire name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::DrawStandard => "draw-standard",
            Command::DrawSpecial => "draw-special",
            Command::ShuffleStandard => "shuffle-standard",
            Command::ShuffleSpecial => "shuffle-special",
            Command::PlayCard { .. } => "play-card",
            Command::MoveTableCard { .. } => "move-table-card",
            Command::MovePlacement { .. } => "move-placement",
            Command::ReturnCardFromHand { .. } => "return-card-from-hand",
            Command::ReturnCardFromTable { .. } => "return-card-from-table",
            Command::ReturnPlacement { .. } => "return-placement",
            Command::MoveToken { .. } => "move-token",
            Command::UpdateToken { .. } => "update-token",
            Command::RollToken { .. } => "roll-token",
        }
    }
}

/// Everything the broadcaster accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum Inbound {
    /// A new connection wants a seat.
    Admit(ConnectionId),
    /// A connection went away.
    Release(ConnectionId),
    /// A participant command.
    Command {
        /// Sending connection.
        from: ConnectionId,
        /// The command.
        command: Command,
    },
}

impl Inbound {
    /// Connection this inbound refers to.
    #[must_use]
    pub fn connection(&self) -> ConnectionId {
        match self {
            Inbound::Admit(c) | Inbound::Release(c) => *c,
            Inbound::Command { from, .. } => *from,
        }
    }

    /// Name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Inbound::Admit(_) => "admit",
            Inbound::Release(_) => "release",
            Inbound::Command { command, .. } => command.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        let commands = [
            Command::DrawStandard,
            Command::ShuffleSpecial,
            Command::PlayCard { card: Card::from("01"), x: 0.0, y: 0.0 },
            Command::MoveTableCard { index: 0, x: 0.0, y: 0.0 },
            Command::MovePlacement { id: PlacementId(0), x: 0.0, y: 0.0 },
            Command::ReturnCardFromHand { card: Card::from("01") },
            Command::ReturnCardFromTable { index: 0, card: Card::from("01") },
            Command::ReturnPlacement { id: PlacementId(0), card: Card::from("01") },
            Command::MoveToken { kind: TokenKind::Dot, index: 0, x: 0.0, y: 0.0 },
            Command::UpdateToken { kind: TokenKind::Hex, index: 0, value: 1 },
            Command::RollToken { kind: TokenKind::Square, index: 0 },
        ];
        for command in commands {
            let json = serde_json::to_value(&command).unwrap();
            let tag = match &json {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Object(map) => map.keys().next().unwrap().clone(),
                other => panic!("unexpected encoding {other}"),
            };
            assert_eq!(tag, command.name());
        }
    }

    #[test]
    fn test_decode_token_update() {
        let cmd: Command = serde_json::from_str(
            r#"{ "update-token": { "kind": "hex", "index": 2, "value": 17 } }"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::UpdateToken { kind: TokenKind::Hex, index: 2, value: 17 }
        );
    }

    #[test]
    fn test_inbound_connection() {
        let c = ConnectionId::from_u128(4);
        assert_eq!(Inbound::Admit(c).connection(), c);
        assert_eq!(Inbound::Release(c).name(), "release");
        let cmd = Inbound::Command { from: c, command: Command::DrawSpecial };
        assert_eq!(cmd.connection(), c);
        assert_eq!(cmd.name(), "draw-special");
    }
}
