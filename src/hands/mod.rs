//! Participant hands.
//!
//! `HandStore` keeps one ordered card list per seated connection.

pub mod store;

pub use store::HandStore;
