//! Human-readable game log.

use im::Vector;

use crate::cards::GameCard;
use crate::core::player::PlayerId;
use crate::core::state::Player;

/// Bounded history of effect descriptions, oldest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameLog {
    entries: Vector<String>,
    capacity: usize,
}

impl GameLog {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "log capacity must be positive");
        Self {
            entries: Vector::new(),
            capacity,
        }
    }

    /// "Player 2【王田香】", or just the id when the role is unknown.
    #[must_use]
    pub fn format_player(player: &Player) -> String {
        let character = player.character();
        if character.is_known() {
            format!("{}【{}】", player.id(), character)
        } else {
            player.id().to_string()
        }
    }

    /// Fallback for a player this client has not seated.
    #[must_use]
    pub fn format_player_id(player: PlayerId) -> String {
        player.to_string()
    }

    #[must_use]
    pub fn format_card(card: &GameCard) -> String {
        match card {
            GameCard::Known(card) => format!("【{card}】"),
            GameCard::Unknown => "一张牌".to_string(),
        }
    }

    /// Append an entry, dropping the oldest once full.
    pub fn add_entry(&mut self, text: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(text.into());
    }

    #[must_use]
    pub fn entries(&self) -> &Vector<String> {
        &self.entries
    }

    #[must_use]
    pub fn last(&self) -> Option<&String> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
