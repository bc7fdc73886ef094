//! # tabletop-sync
//!
//! Authoritative shared-state engine for a two-seat tabletop card session.
//!
//! The engine owns the whole board: two draw supplies, each participant's
//! hand, the cards laid on the table, and a fixed set of annotation tokens.
//! Every mutation goes through one entry point and produces full snapshots
//! for the participants that need them.
//!
//! ## Design Principles
//!
//! 1. **Run to completion**: Commands are applied one at a time, in
//!    arrival order. `Broadcaster::apply` is synchronous and the runtime
//!    feeds it from a single queue per session.
//!
//! 2. **Permissive**: Stale or foreign references are declined silently.
//!    Nothing a participant sends can crash the session.
//!
//! 3. **Snapshots, not deltas**: Every emitted event carries the full
//!    current contents of the store it describes.
//!
//! ## Modules
//!
//! - `core`: Connection/seat ids, RNG, configuration, errors
//! - `cards`: Card identifiers and supplies
//! - `hands`: Per-participant hands
//! - `table`: Placements and annotation tokens
//! - `session`: Seat registry and the session aggregate
//! - `sync`: Commands, events, the broadcaster and wire codecs
//! - `runtime`: Tokio worker per session and a room directory

pub mod cards;
pub mod core;
pub mod hands;
pub mod runtime;
pub mod session;
pub mod sync;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    CodecError, ConfigError, ConnectionId, Rejection, SeatIndex, SessionConfig, SessionError,
    SessionRng,
};

pub use crate::cards::{Card, Namespace, Supplies, Supply};

pub use crate::hands::HandStore;

pub use crate::table::{Placement, PlacementId, PlacementRef, TableSurface, Token, TokenKind, TokenSet};

pub use crate::session::{Audit, Session, SessionRegistry};

pub use crate::sync::{
    BinaryCodec, Broadcaster, Command, Delivery, HandCount, Inbound, JsonCodec, Outbound, Outcome,
    ServerEvent, WireCodec,
};

pub use crate::runtime::{Connection, SessionDirectory, SessionHandle};
