//! Identifiers for server-issued game objects.
//!
//! Every card and character the server tells us about carries a numeric id.
//! Ids are assigned by the server and never allocated locally: the client
//! only mirrors what it has been told.
//!
//! ```
//! use fengsheng_core::core::{CardId, CharacterId};
//!
//! let card = CardId::new(42);
//! assert_eq!(card.raw(), 42);
//! assert_eq!(format!("{}", card), "Card(42)");
//!
//! assert!(CharacterId::UNKNOWN.is_unknown());
//! assert!(!CharacterId::new(16).is_unknown());
//! ```

use serde::{Deserialize, Serialize};

/// Server-assigned card identifier.
///
/// Only cards whose identity has been revealed to this client carry an id.
/// Face-down cards in other players' hands are tracked as counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Character (role card) identifier as sent by the server.
///
/// `0` means the character is hidden from this client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl CharacterId {
    /// A character this client cannot see.
    pub const UNKNOWN: CharacterId = CharacterId(0);

    /// Create a new character ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Is this the placeholder for a hidden character?
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Character({})", self.0)
    }
}
