//! The shared play surface: placed cards plus annotation tokens.

use crate::core::config::SessionConfig;

use super::placement::Placements;
use super::tokens::TokenSet;

/// Everything laid on the table.
///
/// Placements and tokens are independent stores; callers reach them
/// through the public fields.
#[derive(Clone, Debug)]
pub struct TableSurface {
    /// Placed cards.
    pub placements: Placements,
    /// Annotation tokens.
    pub tokens: TokenSet,
}

impl TableSurface {
    /// Empty table with the initial token layout.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            placements: Placements::new(),
            tokens: TokenSet::initial(config),
        }
    }

    /// Clear placements and restore the initial token layout.
    pub fn reset(&mut self, config: &SessionConfig) {
        self.placements.clear();
        self.tokens = TokenSet::initial(config);
    }
}
