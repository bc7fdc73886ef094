//! Session aggregate and seat registry.
//!
//! - `SessionRegistry`: admits and releases connections, assigns seats
//! - `Session`: owns registry, supplies, hands and table for one game

pub mod registry;
pub mod state;

pub use registry::SessionRegistry;
pub use state::{Audit, NamespaceAudit, Session};
