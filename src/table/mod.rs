//! Table surface: placed cards and annotation tokens.
//!
//! ## Key Types
//!
//! - `Placements`: Ordered placed cards, addressable by index or `PlacementId`
//! - `TokenSet`: Fixed set of dots, hexes and squares
//! - `TableSurface`: Both of the above for one session

pub mod placement;
pub mod surface;
pub mod tokens;

pub use placement::{Placement, PlacementId, PlacementRef, Placements};
pub use surface::TableSurface;
pub use tokens::{Token, TokenKind, TokenSet};
