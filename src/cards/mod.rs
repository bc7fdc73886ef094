//! Cards and the supplies they are drawn from.
//!
//! ## Key Types
//!
//! - `Card`: Opaque identifier string
//! - `Namespace`: Standard (44 cards) or Special (10 cards)
//! - `Supply`: Shuffled draw stack for one namespace
//! - `Supplies`: The pair of supplies owned by a session

pub mod card;
pub mod supply;

pub use card::{Card, Namespace};
pub use supply::{Supplies, Supply};
