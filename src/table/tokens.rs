//! Annotation tokens: dots, hexes and squares.
//!
//! The token set is fixed when the session starts. Tokens are only moved
//! or revalued afterwards, never created or destroyed.
//!
//! Hexes and squares carry an integer value bounded by their kind's
//! range. An out-of-range value is rejected and the old value kept.

use serde::{Deserialize, Serialize};

use crate::core::config::{SessionConfig, ValueRange};
use crate::core::error::Rejection;
use crate::core::rng::SessionRng;

/// Token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Position-only marker.
    Dot,
    /// Valued marker, d20 by default.
    Hex,
    /// Valued marker, d6 by default.
    Square,
}

impl TokenKind {
    /// All kinds, in initial-sync order.
    pub const ALL: [TokenKind; 3] = [TokenKind::Dot, TokenKind::Hex, TokenKind::Square];
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Dot => f.write_str("dot"),
            TokenKind::Hex => f.write_str("hex"),
            TokenKind::Square => f.write_str("square"),
        }
    }
}

/// One token on the surface. `value` is `None` for dots.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Current value.
    pub value: Option<i32>,
}

/// Every token of a session, grouped by kind.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenSet {
    dots: Vec<Token>,
    hexes: Vec<Token>,
    squares: Vec<Token>,
    hex_range: ValueRange,
    square_range: ValueRange,
}

impl TokenSet {
    /// Lay out the initial tokens.
    ///
    /// Dots and hexes stand in two columns near the left and right edges,
    /// dots vertically centered and hexes stacked upward above them.
    /// Squares form a row along the top and another along the bottom.
    /// Valued tokens start at the top of their range.
    #[must_use]
    pub fn initial(config: &SessionConfig) -> Self {
        let s = &config.surface;
        let pitch = s.token_size + s.margin;
        let left_x = s.edge_offset;
        let right_x = s.width - s.token_size - s.edge_offset;

        let dots_per_column = config.dot_count / 2;
        let column_height = column_span(dots_per_column, s.token_size, s.margin);
        let dot_top = (s.height - column_height) / 2.0;

        let mut dots = Vec::with_capacity(config.dot_count);
        for x in [left_x, right_x] {
            for i in 0..dots_per_column {
                dots.push(Token {
                    x,
                    y: dot_top + i as f64 * pitch,
                    value: None,
                });
            }
        }

        let hex_base = dot_top - s.margin - s.token_size;
        let mut hexes = Vec::with_capacity(config.hex_count);
        for x in [left_x, right_x] {
            for i in 0..config.hex_count / 2 {
                hexes.push(Token {
                    x,
                    y: hex_base - i as f64 * pitch,
                    value: Some(config.hex_range.max),
                });
            }
        }

        let squares_per_row = config.square_count / 2;
        let row_width = column_span(squares_per_row, s.token_size, s.square_margin);
        let row_left = (s.width - row_width) / 2.0;
        let mut squares = Vec::with_capacity(config.square_count);
        for y in [s.margin, s.height - s.margin - s.token_size] {
            for i in 0..squares_per_row {
                squares.push(Token {
                    x: row_left + i as f64 * (s.token_size + s.square_margin),
                    y,
                    value: Some(config.square_range.max),
                });
            }
        }

        Self {
            dots,
            hexes,
            squares,
            hex_range: config.hex_range,
            square_range: config.square_range,
        }
    }

    /// Tokens of one kind, in index order.
    #[must_use]
    pub fn tokens(&self, kind: TokenKind) -> &[Token] {
        match kind {
            TokenKind::Dot => &self.dots,
            TokenKind::Hex => &self.hexes,
            TokenKind::Square => &self.squares,
        }
    }

    fn tokens_mut(&mut self, kind: TokenKind) -> &mut [Token] {
        match kind {
            TokenKind::Dot => &mut self.dots,
            TokenKind::Hex => &mut self.hexes,
            TokenKind::Square => &mut self.squares,
        }
    }

    /// Accepted value range, `None` for dots.
    #[must_use]
    pub fn range(&self, kind: TokenKind) -> Option<ValueRange> {
        match kind {
            TokenKind::Dot => None,
            TokenKind::Hex => Some(self.hex_range),
            TokenKind::Square => Some(self.square_range),
        }
    }

    /// Move a token.
    pub fn move_token(&mut self, kind: TokenKind, index: usize, x: f64, y: f64) -> Result<(), Rejection> {
        let token = self.tokens_mut(kind).get_mut(index).ok_or(Rejection::NotFound)?;
        token.x = x;
        token.y = y;
        Ok(())
    }

    /// Set a token's value.
    pub fn set_value(&mut self, kind: TokenKind, index: usize, value: i32) -> Result<(), Rejection> {
        let range = self.range(kind).ok_or(Rejection::Unsupported)?;
        let token = self.tokens_mut(kind).get_mut(index).ok_or(Rejection::NotFound)?;
        if !range.contains(value) {
            return Err(Rejection::OutOfRange);
        }
        token.value = Some(value);
        Ok(())
    }

    /// Set a token's value to a uniform roll over its range.
    pub fn roll(&mut self, kind: TokenKind, index: usize, rng: &mut SessionRng) -> Result<i32, Rejection> {
        let range = self.range(kind).ok_or(Rejection::Unsupported)?;
        if index >= self.tokens(kind).len() {
            return Err(Rejection::NotFound);
        }
        let value = rng.roll(range.as_range()).ok_or(Rejection::OutOfRange)?;
        self.set_value(kind, index, value)?;
        Ok(value)
    }
}

fn column_span(count: usize, size: f64, gap: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    count as f64 * size + (count - 1) as f64 * gap
}
