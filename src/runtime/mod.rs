//! Async runtime around the engine.
//!
//! - `SessionHandle`: spawns the worker task that serializes all commands
//!   for one session and routes events to connections
//! - `Connection`: a participant's send side and event stream
//! - `SessionDirectory`: named rooms, each with its own session

pub mod directory;
pub mod worker;

pub use directory::SessionDirectory;
pub use worker::{Connection, SessionHandle};
