//! Card identifiers and namespaces.
//!
//! Cards are opaque strings. Two disjoint namespaces exist:
//! - `Standard`: `"01"` to `"44"`
//! - `Special`: `"glads/01"` to `"glads/10"`
//!
//! A card's namespace is decided by its prefix, so any string is a `Card`.
//! `Card::is_valid` tells whether it names a card that can actually exist.

use serde::{Deserialize, Serialize};

const SPECIAL_PREFIX: &str = "glads/";

/// Which supply a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Namespace {
    /// The 44-card main supply.
    Standard,
    /// The 10-card special supply.
    Special,
}

impl Namespace {
    /// Both namespaces, standard first.
    pub const ALL: [Namespace; 2] = [Namespace::Standard, Namespace::Special];

    /// Number of distinct cards in this namespace.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Namespace::Standard => 44,
            Namespace::Special => 10,
        }
    }

    /// Every card in this namespace, in identifier order.
    ///
    /// ```
    /// use tabletop_sync::cards::{Card, Namespace};
    ///
    /// let special = Namespace::Special.full_set();
    /// assert_eq!(special.len(), 10);
    /// assert_eq!(special[0], Card::from("glads/01"));
    /// ```
    #[must_use]
    pub fn full_set(self) -> Vec<Card> {
        (1..=self.size() as u32).map(|n| Card::numbered(self, n)).collect()
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Namespace::Standard => f.write_str("standard"),
            Namespace::Special => f.write_str("special"),
        }
    }
}

/// Opaque card identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(String);

impl Card {
    /// The `n`th card (1-based) of a namespace.
    #[must_use]
    pub fn numbered(namespace: Namespace, n: u32) -> Self {
        match namespace {
            Namespace::Standard => Self(format!("{n:02}")),
            Namespace::Special => Self(format!("{SPECIAL_PREFIX}{n:02}")),
        }
    }

    /// The namespace this identifier routes to.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        if self.0.starts_with(SPECIAL_PREFIX) {
            Namespace::Special
        } else {
            Namespace::Standard
        }
    }

    /// Whether this identifier names a real card of its namespace.
    ///
    /// ```
    /// use tabletop_sync::cards::Card;
    ///
    /// assert!(Card::from("07").is_valid());
    /// assert!(Card::from("glads/10").is_valid());
    /// assert!(!Card::from("45").is_valid());
    /// assert!(!Card::from("7").is_valid());
    /// ```
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let namespace = self.namespace();
        let digits = match namespace {
            Namespace::Standard => self.0.as_str(),
            Namespace::Special => &self.0[SPECIAL_PREFIX.len()..],
        };
        match digits.parse::<u32>() {
            Ok(n) if (1..=namespace.size() as u32).contains(&n) => {
                // Reject non-canonical spellings like "7" or "+07".
                Self::numbered(namespace, n) == *self
            }
            _ => false,
        }
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Card {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for Card {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered() {
        assert_eq!(Card::numbered(Namespace::Standard, 7).as_str(), "07");
        assert_eq!(Card::numbered(Namespace::Standard, 44).as_str(), "44");
        assert_eq!(Card::numbered(Namespace::Special, 3).as_str(), "glads/03");
    }

    #[test]
    fn test_namespace_routing() {
        assert_eq!(Card::from("07").namespace(), Namespace::Standard);
        assert_eq!(Card::from("glads/07").namespace(), Namespace::Special);
        // Unknown strings route to standard, like any non-prefixed id.
        assert_eq!(Card::from("joker").namespace(), Namespace::Standard);
    }

    #[test]
    fn test_full_sets_are_disjoint() {
        let standard = Namespace::Standard.full_set();
        let special = Namespace::Special.full_set();

        assert_eq!(standard.len(), 44);
        assert_eq!(special.len(), 10);
        assert!(standard.iter().all(|c| !special.contains(c)));
        assert!(standard.iter().chain(&special).all(Card::is_valid));
    }

    #[test]
    fn test_invalid_ids() {
        for id in ["00", "45", "glads/11", "glads/00", "glads/", "", "joker", "007"] {
            assert!(!Card::from(id).is_valid(), "{id} should be invalid");
        }
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Card::from("glads/02")).unwrap();
        assert_eq!(json, "\"glads/02\"");
    }
}
