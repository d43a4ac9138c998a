//! Zone tracker for revealed cards.
//!
//! The `ZoneTracker` records which zone every *revealed* card currently
//! occupies. Each card id maps to exactly one [`Zone`]; placing a card that
//! is already tracked is rejected, so a card can never be in two zones at
//! once. Unrevealed cards (other players' hands, the deck) carry no id and
//! are counted by their owning collection instead.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::CardId;
use crate::core::error::GameError;
use crate::core::player::PlayerId;

/// Where a card lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// The shared draw pile. Only appears as an animation source: deck
    /// cards are unrevealed and counted, not tracked.
    Deck,
    /// A player's hand.
    Hand(PlayerId),
    /// A player's message zone (received intelligence, face up).
    Message(PlayerId),
    /// The shared discard pile.
    Discard,
    /// Cards removed from the game.
    Banish,
    /// The single message card travelling between sender and receiver.
    InTransit,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Deck => write!(f, "deck"),
            Zone::Hand(p) => write!(f, "hand of {}", p),
            Zone::Message(p) => write!(f, "message zone of {}", p),
            Zone::Discard => write!(f, "discard pile"),
            Zone::Banish => write!(f, "banish pile"),
            Zone::InTransit => write!(f, "transit slot"),
        }
    }
}

/// Index from revealed card ids to their zone.
///
/// ```
/// use fengsheng_core::core::{CardId, PlayerId};
/// use fengsheng_core::zones::{Zone, ZoneTracker};
///
/// let mut tracker = ZoneTracker::new();
/// tracker.place(CardId(10), Zone::Hand(PlayerId::LOCAL)).unwrap();
///
/// let from = tracker.move_card(CardId(10), Zone::Discard).unwrap();
/// assert_eq!(from, Zone::Hand(PlayerId::LOCAL));
/// assert_eq!(tracker.zone_of(CardId(10)), Some(Zone::Discard));
///
/// // A tracked card cannot be placed a second time.
/// assert!(tracker.place(CardId(10), Zone::Banish).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZoneTracker {
    locations: FxHashMap<CardId, Zone>,
}

impl ZoneTracker {
    /// Create a new empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a card in `zone`.
    pub fn place(&mut self, card: CardId, zone: Zone) -> Result<(), GameError> {
        if self.locations.contains_key(&card) {
            return Err(GameError::DuplicateCard(card));
        }
        self.locations.insert(card, zone);
        Ok(())
    }

    /// Move a tracked card to `to`, returning the zone it left.
    pub fn move_card(&mut self, card: CardId, to: Zone) -> Result<Zone, GameError> {
        let slot = self
            .locations
            .get_mut(&card)
            .ok_or_else(|| GameError::not_in_zone(card, "any tracked zone"))?;
        Ok(std::mem::replace(slot, to))
    }

    /// Stop tracking a card that must currently be in `expected`.
    pub fn remove_from(&mut self, card: CardId, expected: Zone) -> Result<(), GameError> {
        match self.locations.get(&card) {
            Some(zone) if *zone == expected => {
                self.locations.remove(&card);
                Ok(())
            }
            _ => Err(GameError::not_in_zone(card, expected)),
        }
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn zone_of(&self, card: CardId) -> Option<Zone> {
        self.locations.get(&card).copied()
    }

    /// Check if a card is in a specific zone.
    #[must_use]
    pub fn is_in(&self, card: CardId, zone: Zone) -> bool {
        self.locations.get(&card) == Some(&zone)
    }

    /// All tracked cards in a zone, in id order.
    #[must_use]
    pub fn cards_in(&self, zone: Zone) -> Vec<CardId> {
        let mut cards: Vec<_> = self
            .locations
            .iter()
            .filter(|(_, z)| **z == zone)
            .map(|(c, _)| *c)
            .collect();
        cards.sort_unstable();
        cards
    }

    /// Number of tracked cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Is nothing tracked?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Forget every card. Only used at teardown.
    pub fn clear(&mut self) {
        self.locations.clear();
    }
}
