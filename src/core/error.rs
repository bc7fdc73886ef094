//! Error types.
//!
//! Only `ConfigError`, `CodecError` and `SessionError` are ever returned as
//! `Err`. `Rejection` describes why the engine declined a command; it is
//! reported in the command outcome and logged, never surfaced to the other
//! participants.

use thiserror::Error;

/// Reason a command was declined without touching session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Admission beyond capacity.
    #[error("room is full")]
    RoomFull,
    /// The sending connection holds no seat.
    #[error("connection is not seated")]
    NotAdmitted,
    /// Card, placement or token no longer exists.
    #[error("referenced card, placement or token not found")]
    NotFound,
    /// Token value outside its kind's range.
    #[error("value out of range")]
    OutOfRange,
    /// Card is held by another participant.
    #[error("card belongs to another participant's hand")]
    ForeignHand,
    /// Draw from a supply with no cards left.
    #[error("supply is empty")]
    EmptySupply,
    /// Connection id already has a live connection to the session.
    #[error("connection id is already connected")]
    AlreadyConnected,
    /// Operation has no meaning for the target (e.g. a value on a dot).
    #[error("operation not supported by target")]
    Unsupported,
}

/// Invalid session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Capacity of zero seats.
    #[error("session capacity must be at least 1")]
    ZeroCapacity,
    /// `min > max` for a token value range.
    #[error("{kind} value range {min}..={max} is empty")]
    EmptyRange {
        /// Token kind name.
        kind: &'static str,
        /// Lower bound.
        min: i32,
        /// Upper bound.
        max: i32,
    },
    /// Token count that cannot be split over two columns.
    #[error("{kind} count {count} must be even")]
    OddTokenCount {
        /// Token kind name.
        kind: &'static str,
        /// Offending count.
        count: usize,
    },
    /// Malformed JSON document.
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Frame encode/decode failure.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON text frame.
    #[error("json frame: {0}")]
    Json(#[from] serde_json::Error),
    /// Binary frame.
    #[error("binary frame: {0}")]
    Binary(#[from] bincode::Error),
}

/// Failure talking to a running session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Session worker has shut down.
    #[error("session worker is no longer running")]
    Closed,
    /// Admission was refused.
    #[error("admission refused: {0}")]
    Rejected(Rejection),
}
