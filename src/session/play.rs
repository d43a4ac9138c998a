//! Entry points for the local player's own actions: playing a hand card
//! and using an active skill.
//!
//! Both only open an interaction. Nothing here changes [`GameData`]; the
//! change arrives later as a confirmed server message.
//!
//! [`GameData`]: crate::core::GameData

use crate::cards::{behavior, Card, GameCard};
use crate::characters::CharacterStatus;
use crate::core::entity::CardId;
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::skills::{self, FaceRequirement, SkillRef, SkillRole};

use super::game::GameSession;

impl GameSession {
    /// Revealed cards in the local player's hand.
    #[must_use]
    pub fn local_hand(&self) -> Vec<Card> {
        self.data
            .local_player()
            .map(|player| player.hand().iter().filter_map(GameCard::as_known).cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) fn local_hand_ids(&self) -> Vec<CardId> {
        self.local_hand().iter().map(Card::id).collect()
    }

    /// Can the local player use the active skill in `slot` right now?
    #[must_use]
    pub fn can_use_skill(&self, slot: usize) -> bool {
        let Some(player) = self.data.local_player() else {
            return false;
        };
        let character = player.character();
        let Some(skill) = character.skill(slot) else {
            return false;
        };
        let def = skill.def();
        let face_ok = match def.face {
            FaceRequirement::Any => true,
            FaceRequirement::FaceUp => character.status() == CharacterStatus::FaceUp,
            FaceRequirement::FaceDown => character.status() == CharacterStatus::FaceDown,
        };
        let phase_ok = self
            .data
            .phase
            .phase()
            .is_some_and(|phase| def.usable_phases.contains(&phase));

        def.role == SkillRole::Active
            && skill.is_subscribed()
            && phase_ok
            && face_ok
            && !skill.exhausted()
            && !self.data.restrictions.skill_banned
    }

    /// Start the use interaction of the local active skill in `slot`.
    ///
    /// Returns `Ok(false)` if the skill is not usable now.
    pub fn use_skill(&mut self, slot: usize) -> Result<bool, GameError> {
        if !self.can_use_skill(slot) {
            return Ok(false);
        }
        skills::on_use(self, SkillRef::new(PlayerId::LOCAL, slot))
    }

    /// Can the local player play this hand card right now?
    #[must_use]
    pub fn can_play_card(&self, card: CardId) -> bool {
        let Some(card) = self
            .data
            .local_player()
            .and_then(|player| player.hand_card(card))
        else {
            return false;
        };
        self.data
            .phase
            .phase()
            .is_some_and(|phase| card.kind().playable_in(phase))
            && self.data.restrictions.allows_card(card.kind())
    }

    /// Start the play interaction of a hand card.
    ///
    /// Returns `Ok(false)` if the card cannot be played now or has no
    /// interaction of its own.
    pub fn select_card_to_play(&mut self, card: CardId) -> Result<bool, GameError> {
        if !self.can_play_card(card) {
            return Ok(false);
        }
        let Some(card) = self
            .data
            .local_player()
            .and_then(|player| player.hand_card(card))
            .cloned()
        else {
            return Ok(false);
        };
        Ok(behavior::on_selected_to_play(self, &card))
    }
}
