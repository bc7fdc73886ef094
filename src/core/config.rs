//! Session configuration.
//!
//! A session is configured once at creation:
//! - `capacity`: how many participants may be seated at once
//! - token counts per kind and the value range of hexes and squares
//! - `SurfaceGeometry`: dimensions used to lay tokens out initially
//!
//! Defaults reproduce the standard two-seat board. Every field can be
//! overridden with the builder methods or by deserializing a partial JSON
//! document.
//!
//! ```
//! use tabletop_sync::core::SessionConfig;
//!
//! let config = SessionConfig::from_json(r#"{ "square_count": 12 }"#).unwrap();
//! assert_eq!(config.square_count, 12);
//! assert_eq!(config.hex_count, 6);
//! ```

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Inclusive bounds for a token value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Smallest accepted value.
    pub min: i32,
    /// Largest accepted value.
    pub max: i32,
}

impl ValueRange {
    /// Create a range.
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Check whether a value is within bounds.
    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// As a std inclusive range.
    #[must_use]
    pub fn as_range(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }
}

/// Dimensions of the shared play surface, in abstract units.
///
/// Only the initial token layout reads these. Placements and moves are
/// never clamped to the surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceGeometry {
    /// Surface width.
    pub width: f64,
    /// Surface height.
    pub height: f64,
    /// Edge length of a token.
    pub token_size: f64,
    /// Gap between neighbouring tokens in a column.
    pub margin: f64,
    /// Gap between neighbouring squares in a row.
    pub square_margin: f64,
    /// Distance of the token columns from the left and right edges.
    pub edge_offset: f64,
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            token_size: 20.0,
            margin: 10.0,
            square_margin: 10.0,
            edge_offset: 10.0,
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum concurrently seated participants.
    pub capacity: usize,
    /// Number of dot tokens.
    pub dot_count: usize,
    /// Number of hex tokens.
    pub hex_count: usize,
    /// Number of square tokens.
    pub square_count: usize,
    /// Accepted hex values.
    pub hex_range: ValueRange,
    /// Accepted square values.
    pub square_range: ValueRange,
    /// Surface used for the initial layout.
    pub surface: SurfaceGeometry,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: 2,
            dot_count: 10,
            hex_count: 6,
            square_count: 24,
            hex_range: ValueRange::new(1, 20),
            square_range: ValueRange::new(1, 6),
            surface: SurfaceGeometry::default(),
        }
    }
}

impl SessionConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the seat capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the token counts (dots, hexes, squares).
    #[must_use]
    pub fn with_token_counts(mut self, dots: usize, hexes: usize, squares: usize) -> Self {
        self.dot_count = dots;
        self.hex_count = hexes;
        self.square_count = squares;
        self
    }

    /// Set the hex value range.
    #[must_use]
    pub fn with_hex_range(mut self, min: i32, max: i32) -> Self {
        self.hex_range = ValueRange::new(min, max);
        self
    }

    /// Set the square value range.
    #[must_use]
    pub fn with_square_range(mut self, min: i32, max: i32) -> Self {
        self.square_range = ValueRange::new(min, max);
        self
    }

    /// Set the surface geometry.
    #[must_use]
    pub fn with_surface(mut self, surface: SurfaceGeometry) -> Self {
        self.surface = surface;
        self
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        for (kind, range) in [("hex", self.hex_range), ("square", self.square_range)] {
            if range.min > range.max {
                return Err(ConfigError::EmptyRange {
                    kind,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        // Layout splits every kind across two columns/rows.
        for (kind, count) in [
            ("dot", self.dot_count),
            ("hex", self.hex_count),
            ("square", self.square_count),
        ] {
            if count % 2 != 0 {
                return Err(ConfigError::OddTokenCount { kind, count });
            }
        }
        Ok(())
    }
}
