//! Core building blocks: identifiers, RNG, configuration, errors.
//!
//! Everything here is independent of cards, tables and the protocol.

pub mod config;
pub mod error;
pub mod rng;
pub mod seat;

pub use config::{SessionConfig, SurfaceGeometry, ValueRange};
pub use error::{CodecError, ConfigError, Rejection, SessionError};
pub use rng::SessionRng;
pub use seat::{ConnectionId, SeatIndex};
