//! Synchronization protocol: commands in, snapshots out.
//!
//! ## Key Types
//!
//! - `Command` / `Inbound`: What participants and the transport send
//! - `ServerEvent` / `Outbound`: Snapshots and who receives them
//! - `Broadcaster`: Applies inbounds one at a time and computes fan-out
//! - `WireCodec`: JSON and bincode frame encodings

pub mod broadcaster;
pub mod codec;
pub mod command;
pub mod event;

pub use broadcaster::{Broadcaster, Outcome};
pub use codec::{BinaryCodec, JsonCodec, WireCodec};
pub use command::{Command, Inbound};
pub use event::{Delivery, HandCount, Outbound, Outbox, ServerEvent};
