//! Zone transfers with their domain events.
//!
//! Each operation names the cards it moves, changes [`GameData`] through
//! its primitives and then publishes one event naming both ends of the
//! move. A card missing from the expected zone is a desync and comes back
//! as an error before anything is published.
//!
//! [`GameData`]: crate::core::GameData

use crate::cards::{Card, CardData, CardStatus, CardUsage, GameCard, HandPick};
use crate::characters::{Character, CharacterKind, CharacterStatus};
use crate::core::entity::{CardId, CharacterId};
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::events::GameEvent;
use crate::skills;
use crate::zones::Zone;

use super::game::GameSession;

fn known(cards: Vec<GameCard>) -> Vec<Card> {
    cards.into_iter().filter_map(GameCard::into_known).collect()
}

impl GameSession {
    /// Put cards into a player's hand.
    pub fn add_hand_cards(
        &mut self,
        player: PlayerId,
        mut cards: Vec<GameCard>,
        from: Zone,
    ) -> Result<Vec<GameCard>, GameError> {
        for card in &mut cards {
            if let GameCard::Known(card) = card {
                card.set_usage(CardUsage::HandCard);
            }
        }
        self.data.add_hand_cards(player, cards.clone())?;
        self.publish(GameEvent::HandCardsAdded {
            player,
            cards: cards.clone(),
            from,
        })?;
        Ok(cards)
    }

    /// Take cards out of a player's hand towards `to`.
    pub fn remove_hand_cards(
        &mut self,
        player: PlayerId,
        picks: &[HandPick],
        to: Zone,
    ) -> Result<Vec<GameCard>, GameError> {
        let cards = self.data.remove_hand_cards(player, picks)?;
        self.publish(GameEvent::HandCardsRemoved {
            player,
            cards: cards.clone(),
            to,
        })?;
        Ok(cards)
    }

    /// Place a revealed card in a player's message zone.
    pub fn add_message(&mut self, player: PlayerId, mut card: Card, from: Zone) -> Result<Card, GameError> {
        card.set_usage(CardUsage::MessageCard);
        card.set_status(CardStatus::FaceUp);
        self.data.add_messages(player, vec![card.clone()])?;
        self.publish(GameEvent::MessagePlaced {
            player,
            card: card.clone(),
            from,
        })?;
        Ok(card)
    }

    /// Take named cards out of a player's message zone.
    pub fn remove_messages(&mut self, player: PlayerId, cards: &[CardId]) -> Result<Vec<Card>, GameError> {
        let removed = self.data.remove_messages(player, cards)?;
        self.publish(GameEvent::MessagesRemoved {
            player,
            cards: removed.clone(),
        })?;
        Ok(removed)
    }

    pub fn discard(&mut self, cards: Vec<Card>, from: Zone) -> Result<(), GameError> {
        self.data.push_discard(cards.clone())?;
        self.publish(GameEvent::CardsDiscarded { cards, from })
    }

    pub fn banish(&mut self, cards: Vec<Card>, from: Zone) -> Result<(), GameError> {
        self.data.push_banish(cards.clone())?;
        self.publish(GameEvent::CardsBanished { cards, from })
    }

    /// Move the hand cards the server named to the discard pile.
    pub fn discard_from_hand(&mut self, player: PlayerId, cards: &[CardData]) -> Result<Vec<Card>, GameError> {
        let picks: Vec<HandPick> = cards.iter().cloned().map(HandPick::Card).collect();
        let removed = known(self.data.remove_hand_cards(player, &picks)?);
        self.discard(removed.clone(), Zone::Hand(player))?;
        Ok(removed)
    }

    /// Take a played function card out of `player`'s hand.
    ///
    /// The card becomes the card on play. Where it goes next is up to the
    /// caller.
    pub fn play_card(&mut self, player: PlayerId, data: &CardData, target: Option<PlayerId>) -> Result<Card, GameError> {
        if let Some(target) = target {
            self.data.player(target)?;
        }
        let taken = self.data.remove_hand_cards(player, &[HandPick::Card(data.clone())])?;
        let mut card = known(taken)
            .pop()
            .ok_or_else(|| GameError::not_in_zone(data.id, Zone::Hand(player)))?;
        card.on_play();
        self.data.set_card_on_play(Some(card.id()));
        self.publish(GameEvent::CardPlayed {
            player,
            card: card.clone(),
            target,
        })?;
        Ok(card)
    }

    /// Take a card back off the discard pile into a hand.
    pub fn return_from_discard(&mut self, player: PlayerId, card: CardId) -> Result<(), GameError> {
        let card = self.data.take_from_discard(card)?;
        self.add_hand_cards(player, vec![card.into()], Zone::Discard)?;
        Ok(())
    }

    /// A message leaves `sender`'s hand towards `holder`.
    pub fn send_message(&mut self, sender: PlayerId, holder: PlayerId, card: Option<CardData>) -> Result<(), GameError> {
        self.data.player(holder)?;
        let pick = card.map_or(HandPick::Unknown, HandPick::Card);
        let mut taken = self.data.remove_hand_cards(sender, &[pick])?;
        let mut card = taken.pop().unwrap_or(GameCard::Unknown);
        if let GameCard::Known(known) = &mut card {
            known.on_send();
        }
        self.data.begin_transit(sender, holder, card.clone())?;
        self.publish(GameEvent::MessageSent { sender, holder, card })
    }

    /// The in-transit message moves on to `holder`.
    pub fn transmit_message(&mut self, holder: PlayerId) -> Result<(), GameError> {
        self.data.set_transit_holder(holder)?;
        self.publish(GameEvent::MessageTransmitted { holder })
    }

    /// The message in flight is offered to `holder`. A message this
    /// client never saw leave a hand starts its transit here, face down.
    pub fn offer_message(&mut self, from: PlayerId, holder: PlayerId) -> Result<(), GameError> {
        match self.data.in_transit().map(|transit| transit.holder) {
            Some(current) if current == holder => Ok(()),
            Some(_) => self.transmit_message(holder),
            None => {
                self.data.begin_transit(from, holder, GameCard::Unknown)?;
                self.publish(GameEvent::MessageSent {
                    sender: from,
                    holder,
                    card: GameCard::Unknown,
                })
            }
        }
    }

    /// Turn the in-transit message face up without moving it.
    pub fn reveal_message(&mut self, data: &CardData) -> Result<(), GameError> {
        let Some(card) = self.data.reveal_transit(data)? else {
            return Ok(());
        };
        self.publish(GameEvent::CardStatusChanged {
            card: card.id(),
            status: card.status(),
        })?;
        self.publish(GameEvent::MessageRevealed { card })
    }

    /// `player` accepts the in-transit message, now revealed as `data`.
    pub fn receive_message(&mut self, player: PlayerId, data: &CardData) -> Result<Card, GameError> {
        let transit = self.data.take_transit()?;
        let card = transit.card.reveal(data)?;
        self.add_message(player, card, Zone::InTransit)
    }

    // === Characters ===

    /// Apply a role update: reveal, replace or flip the role card.
    pub fn update_role(&mut self, player: PlayerId, role: CharacterId, face_up: bool) -> Result<(), GameError> {
        let status = if face_up {
            CharacterStatus::FaceUp
        } else {
            CharacterStatus::FaceDown
        };
        let current = self.data.player(player)?.character();
        let (current_kind, nullified) = (current.kind(), current.is_nullified());
        let kind = CharacterKind::from_id(role);

        if !role.is_unknown() && kind != current_kind {
            skills::dispose_player(self, player)?;
            // Nullification belongs to the seat until it is lifted, not to the face shown.
            let mut character = Character::new(kind, status);
            character.set_nullified(nullified);
            self.data.replace_character(player, character)?;
            self.publish(GameEvent::CharacterRevealed { player, kind })?;
        } else {
            self.set_character_status(player, status)?;
        }
        skills::sync_player(self, player)
    }

    /// Flip a role card, keeping its skill subscriptions in step.
    pub fn set_character_status(&mut self, player: PlayerId, status: CharacterStatus) -> Result<(), GameError> {
        let changed = self
            .data
            .player_mut(player)?
            .character_mut()
            .set_status(status);
        if changed {
            skills::sync_player(self, player)?;
            self.publish(GameEvent::CharacterStatusChanged { player, status })?;
        }
        Ok(())
    }

    /// Switch a role card's skills off or back on.
    pub fn set_skills_nullified(&mut self, player: PlayerId, nullified: bool) -> Result<(), GameError> {
        self.data
            .player_mut(player)?
            .character_mut()
            .set_nullified(nullified);
        skills::sync_player(self, player)
    }
}
