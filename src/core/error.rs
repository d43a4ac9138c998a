//! Error types for the rules core.
//!
//! Stale or duplicate deliveries are not errors: they are dropped by the
//! sequence guard before any handler runs. Disabled buttons are never
//! clickable, so bad user input is not an error either. What remains is
//! protocol desync, lifecycle misuse, configuration and codec failures.

use thiserror::Error;

use super::entity::CardId;
use super::player::PlayerId;

/// Errors surfaced by the rules core.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    // === Protocol desync ===
    #[error("{0} is not a seated player")]
    UnknownPlayer(PlayerId),

    #[error("{card} is not in {zone}")]
    CardNotInZone { card: CardId, zone: String },

    #[error("{player} holds {held} unrevealed hand cards, {wanted} requested")]
    NotEnoughUnknownCards {
        player: PlayerId,
        held: usize,
        wanted: usize,
    },

    #[error("{0} is already tracked in another zone")]
    DuplicateCard(CardId),

    #[error("no message card is in transit")]
    NothingInTransit,

    #[error("a message card is already in transit")]
    TransitOccupied,

    #[error("{player} has no skill in slot {slot}")]
    UnknownSkill { player: PlayerId, slot: usize },

    // === Lifecycle ===
    #[error("identity has already been assigned")]
    IdentityAlreadyAssigned,

    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("invalid player count {0}")]
    InvalidPlayerCount(usize),

    #[error("players have already been initialised")]
    AlreadyInitialized,

    #[error("players have not been initialised")]
    NotInitialized,

    // === Configuration / codec ===
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("codec error: {0}")]
    Codec(String),
}

impl GameError {
    /// Does this error mean the local mirror disagrees with the server?
    ///
    /// Desync is fatal to the current game session.
    #[must_use]
    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            GameError::UnknownPlayer(_)
                | GameError::CardNotInZone { .. }
                | GameError::NotEnoughUnknownCards { .. }
                | GameError::DuplicateCard(_)
                | GameError::NothingInTransit
                | GameError::TransitOccupied
                | GameError::UnknownSkill { .. }
        )
    }

    pub(crate) fn not_in_zone(card: CardId, zone: impl std::fmt::Display) -> Self {
        GameError::CardNotInZone {
            card,
            zone: zone.to_string(),
        }
    }
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Codec(err.to_string())
    }
}

/// Result type alias for rules-core operations.
pub type GameResult<T> = Result<T, GameError>;
