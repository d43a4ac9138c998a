//! Game data: the local mirror of the authoritative game.
//!
//! `GameData` owns the seated players, the shared piles, the in-transit
//! message and the phase machine. All zone changes go through its
//! primitives, which keep the [`ZoneTracker`] in step with the
//! collections: a revealed card is in exactly one zone, and asking for a
//! card where it is not is reported as a desync instead of being repaired.
//!
//! The primitives change state only. Publishing the matching domain
//! events is the session's job (see [`GameSession`]).
//!
//! Collections use `im` persistent vectors, so cloning a `GameData` for a
//! snapshot is cheap.
//!
//! [`GameSession`]: crate::session::GameSession

use im::Vector;

use super::entity::CardId;
use super::error::GameError;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Card, CardData, CardType, CardUsage, GameCard, HandPick};
use crate::characters::{Character, CharacterKind, CharacterStatus, Identity};
use crate::net::RoleCard;
use crate::phase::PhaseMachine;
use crate::zones::{Zone, ZoneTracker};

/// Largest table the game supports.
pub const MAX_PLAYERS: usize = 9;

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    seat: Option<u8>,
    hand: Vector<GameCard>,
    messages: Vector<Card>,
    character: Character,
    alive: bool,
}

impl Player {
    fn new(id: PlayerId, character: Character) -> Self {
        Self {
            id,
            seat: None,
            hand: Vector::new(),
            messages: Vector::new(),
            character,
            alive: true,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Absolute seat number, once assigned.
    #[must_use]
    pub fn seat(&self) -> Option<u8> {
        self.seat
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<GameCard> {
        &self.hand
    }

    #[must_use]
    pub fn messages(&self) -> &Vector<Card> {
        &self.messages
    }

    #[must_use]
    pub fn message(&self, card: CardId) -> Option<&Card> {
        self.messages.iter().find(|m| m.id() == card)
    }

    #[must_use]
    pub fn hand_card(&self, card: CardId) -> Option<&Card> {
        self.hand
            .iter()
            .filter_map(GameCard::as_known)
            .find(|c| c.id() == card)
    }

    /// Number of hand cards whose identity we do not know.
    #[must_use]
    pub fn unknown_hand_count(&self) -> usize {
        self.hand.iter().filter(|c| !c.is_known()).count()
    }

    #[must_use]
    pub fn character(&self) -> &Character {
        &self.character
    }

    pub(crate) fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Temporary bans on the local player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Restrictions {
    pub card_banned: bool,
    pub skill_banned: bool,
    pub banned_card_types: Vec<CardType>,
}

impl Restrictions {
    /// Forbid every card and skill.
    pub fn confine(&mut self) {
        self.card_banned = true;
        self.skill_banned = true;
        self.banned_card_types = CardType::ALL.to_vec();
    }

    /// Drop every ban.
    pub fn lift(&mut self) {
        *self = Restrictions::default();
    }

    #[must_use]
    pub fn allows_card(&self, kind: CardType) -> bool {
        !self.card_banned && !self.banned_card_types.contains(&kind)
    }
}

/// The message card between sender and receiver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transit {
    pub sender: PlayerId,
    /// Player currently being offered the message.
    pub holder: PlayerId,
    pub card: GameCard,
}

/// Aggregate root of the local game mirror.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameData {
    players: PlayerMap<Player>,
    identity: Option<Identity>,
    discard: Vector<Card>,
    banish: Vector<Card>,
    in_transit: Option<Transit>,
    card_on_play: Option<CardId>,
    deck_count: u32,
    zones: ZoneTracker,
    pub phase: PhaseMachine,
    pub restrictions: Restrictions,
}

impl GameData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Setup ===

    /// Seat the players with the role cards the server dealt.
    ///
    /// Seats without a role card are treated as hidden.
    pub fn init_players(&mut self, player_count: usize, roles: &[RoleCard]) -> Result<(), GameError> {
        if !self.players.is_empty() {
            return Err(GameError::AlreadyInitialized);
        }
        if player_count == 0 || player_count > MAX_PLAYERS {
            return Err(GameError::InvalidPlayerCount(player_count));
        }
        self.players = PlayerMap::seated(player_count, |id| {
            let role = roles.get(id.index()).copied().unwrap_or_else(RoleCard::hidden);
            let status = if role.face_up {
                CharacterStatus::FaceUp
            } else {
                CharacterStatus::FaceDown
            };
            Player::new(id, Character::new(CharacterKind::from_id(role.role), status))
        });
        Ok(())
    }

    /// Record the local player's identity. Only once per game.
    pub fn assign_identity(&mut self, identity: Identity) -> Result<(), GameError> {
        if self.identity.is_some() {
            return Err(GameError::IdentityAlreadyAssigned);
        }
        self.identity = Some(identity);
        Ok(())
    }

    /// Number seats clockwise, starting at `first`.
    pub fn assign_seats(&mut self, first: PlayerId) -> Result<(), GameError> {
        self.players.try_get(first)?;
        let count = self.players.player_count();
        for (id, player) in self.players.iter_mut() {
            player.seat = Some(id.seat_from(first, count));
        }
        Ok(())
    }

    // === Queries ===

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.try_get(id)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players.try_get_mut(id)
    }

    /// The local player, if seated.
    #[must_use]
    pub fn local_player(&self) -> Option<&Player> {
        self.players.try_get(PlayerId::LOCAL).ok()
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard
    }

    #[must_use]
    pub fn banish_pile(&self) -> &Vector<Card> {
        &self.banish
    }

    #[must_use]
    pub fn in_transit(&self) -> Option<&Transit> {
        self.in_transit.as_ref()
    }

    /// The function card currently resolving.
    #[must_use]
    pub fn card_on_play(&self) -> Option<CardId> {
        self.card_on_play
    }

    pub(crate) fn set_card_on_play(&mut self, card: Option<CardId>) {
        self.card_on_play = card;
    }

    #[must_use]
    pub fn deck_count(&self) -> u32 {
        self.deck_count
    }

    /// Returns `true` if the count changed.
    pub fn set_deck_count(&mut self, count: u32) -> bool {
        let changed = self.deck_count != count;
        self.deck_count = count;
        changed
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneTracker {
        &self.zones
    }

    // === Zone primitives ===

    fn place_all(&mut self, cards: &[CardId], zone: Zone) -> Result<(), GameError> {
        for (i, card) in cards.iter().enumerate() {
            if let Err(err) = self.zones.place(*card, zone) {
                for placed in &cards[..i] {
                    self.zones.remove_from(*placed, zone)?;
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Put cards into a player's hand.
    pub fn add_hand_cards(&mut self, player: PlayerId, cards: Vec<GameCard>) -> Result<(), GameError> {
        self.players.try_get(player)?;
        let ids: Vec<CardId> = cards.iter().filter_map(GameCard::id).collect();
        self.place_all(&ids, Zone::Hand(player))?;
        self.players.try_get_mut(player)?.hand.extend(cards);
        Ok(())
    }

    /// Take cards out of a player's hand.
    ///
    /// A named card that is not in the hand consumes an unrevealed
    /// placeholder and comes out revealed. Nothing changes if any pick
    /// cannot be satisfied.
    pub fn remove_hand_cards(&mut self, player: PlayerId, picks: &[HandPick]) -> Result<Vec<GameCard>, GameError> {
        let current = self.players.try_get(player)?;
        let mut hand = current.hand.clone();
        let mut taken = Vec::with_capacity(picks.len());
        let mut tracked = Vec::new();

        for pick in picks {
            let unknown_slot = hand.iter().position(|c| !c.is_known());
            match pick {
                HandPick::Card(data) => {
                    if let Some(pos) = hand.iter().position(|c| c.id() == Some(data.id)) {
                        tracked.push(data.id);
                        taken.push(hand.remove(pos));
                    } else if let Some(pos) = unknown_slot {
                        if self.zones.zone_of(data.id).is_some() {
                            return Err(GameError::DuplicateCard(data.id));
                        }
                        hand.remove(pos);
                        taken.push(GameCard::Known(Card::new(data.clone())));
                    } else {
                        return Err(GameError::not_in_zone(data.id, Zone::Hand(player)));
                    }
                }
                HandPick::Unknown => {
                    let Some(pos) = unknown_slot else {
                        return Err(GameError::NotEnoughUnknownCards {
                            player,
                            held: current.unknown_hand_count(),
                            wanted: picks.iter().filter(|p| **p == HandPick::Unknown).count(),
                        });
                    };
                    taken.push(hand.remove(pos));
                }
            }
        }

        for card in tracked {
            self.zones.remove_from(card, Zone::Hand(player))?;
        }
        self.players.try_get_mut(player)?.hand = hand;
        Ok(taken)
    }

    /// Put cards into a player's message zone.
    pub fn add_messages(&mut self, player: PlayerId, cards: Vec<Card>) -> Result<(), GameError> {
        self.players.try_get(player)?;
        let ids: Vec<CardId> = cards.iter().map(Card::id).collect();
        self.place_all(&ids, Zone::Message(player))?;
        self.players.try_get_mut(player)?.messages.extend(cards);
        Ok(())
    }

    /// Take named cards out of a player's message zone.
    pub fn remove_messages(&mut self, player: PlayerId, cards: &[CardId]) -> Result<Vec<Card>, GameError> {
        let zone = Zone::Message(player);
        let mut messages = self.players.try_get(player)?.messages.clone();
        let mut taken = Vec::with_capacity(cards.len());
        for card in cards {
            let pos = messages
                .iter()
                .position(|m| m.id() == *card)
                .ok_or_else(|| GameError::not_in_zone(*card, zone))?;
            taken.push(messages.remove(pos));
        }
        for card in cards {
            self.zones.remove_from(*card, zone)?;
        }
        self.players.try_get_mut(player)?.messages = messages;
        Ok(taken)
    }

    /// Put cards on the discard pile.
    pub fn push_discard(&mut self, cards: Vec<Card>) -> Result<(), GameError> {
        let ids: Vec<CardId> = cards.iter().map(Card::id).collect();
        self.place_all(&ids, Zone::Discard)?;
        self.discard.extend(cards);
        Ok(())
    }

    /// Take a named card back off the discard pile.
    pub fn take_from_discard(&mut self, card: CardId) -> Result<Card, GameError> {
        let pos = self
            .discard
            .iter()
            .position(|c| c.id() == card)
            .ok_or_else(|| GameError::not_in_zone(card, Zone::Discard))?;
        self.zones.remove_from(card, Zone::Discard)?;
        if self.card_on_play == Some(card) {
            self.card_on_play = None;
        }
        Ok(self.discard.remove(pos))
    }

    /// Remove cards from the game.
    pub fn push_banish(&mut self, cards: Vec<Card>) -> Result<(), GameError> {
        let ids: Vec<CardId> = cards.iter().map(Card::id).collect();
        self.place_all(&ids, Zone::Banish)?;
        self.banish.extend(cards);
        Ok(())
    }

    /// Start a message on its way from `sender` to `holder`.
    pub fn begin_transit(&mut self, sender: PlayerId, holder: PlayerId, card: GameCard) -> Result<(), GameError> {
        if self.in_transit.is_some() {
            return Err(GameError::TransitOccupied);
        }
        self.players.try_get(holder)?;
        if let Some(id) = card.id() {
            self.zones.place(id, Zone::InTransit)?;
        }
        self.in_transit = Some(Transit { sender, holder, card });
        Ok(())
    }

    /// Pass the in-transit message on to `holder`.
    pub fn set_transit_holder(&mut self, holder: PlayerId) -> Result<(), GameError> {
        self.players.try_get(holder)?;
        let transit = self.in_transit.as_mut().ok_or(GameError::NothingInTransit)?;
        transit.holder = holder;
        Ok(())
    }

    /// Reveal the in-transit message where it lies.
    ///
    /// Returns the revealed card, or `None` when this client already knew
    /// it. A known message with another id is a desync.
    pub fn reveal_transit(&mut self, data: &CardData) -> Result<Option<Card>, GameError> {
        let transit = self.in_transit.as_ref().ok_or(GameError::NothingInTransit)?;
        if transit.card.is_known() {
            transit.card.clone().reveal(data)?;
            return Ok(None);
        }
        self.zones.place(data.id, Zone::InTransit)?;
        let card = Card::new(data.clone()).with_usage(CardUsage::MessageCard);
        if let Some(transit) = self.in_transit.as_mut() {
            transit.card = card.clone().into();
        }
        Ok(Some(card))
    }

    /// Take the in-transit message out of its slot.
    pub fn take_transit(&mut self) -> Result<Transit, GameError> {
        let transit = self.in_transit.take().ok_or(GameError::NothingInTransit)?;
        if let Some(id) = transit.card.id() {
            self.zones.remove_from(id, Zone::InTransit)?;
        }
        Ok(transit)
    }

    /// Mark a player dead. Returns `false` if already dead.
    pub fn kill(&mut self, player: PlayerId) -> Result<bool, GameError> {
        let player = self.players.try_get_mut(player)?;
        let was_alive = player.alive;
        player.alive = false;
        Ok(was_alive)
    }

    /// Swap a player's role card, returning the old one.
    pub(crate) fn replace_character(&mut self, player: PlayerId, character: Character) -> Result<Character, GameError> {
        let player = self.players.try_get_mut(player)?;
        Ok(std::mem::replace(&mut player.character, character))
    }

    /// Drop every card from every zone. Teardown only.
    pub fn clear_zones(&mut self) {
        for (_, player) in self.players.iter_mut() {
            player.hand.clear();
            player.messages.clear();
        }
        self.discard.clear();
        self.banish.clear();
        self.in_transit = None;
        self.card_on_play = None;
        self.zones.clear();
    }

    /// Check that the tracker and the collections agree card for card.
    #[must_use]
    pub fn audit_zones(&self) -> bool {
        let mut expected: Vec<(CardId, Zone)> = Vec::new();
        for (id, player) in self.players.iter() {
            expected.extend(player.hand.iter().filter_map(GameCard::id).map(|c| (c, Zone::Hand(id))));
            expected.extend(player.messages.iter().map(|c| (c.id(), Zone::Message(id))));
        }
        expected.extend(self.discard.iter().map(|c| (c.id(), Zone::Discard)));
        expected.extend(self.banish.iter().map(|c| (c.id(), Zone::Banish)));
        if let Some(id) = self.in_transit.as_ref().and_then(|t| t.card.id()) {
            expected.push((id, Zone::InTransit));
        }

        expected.len() == self.zones.len()
            && expected
                .iter()
                .all(|(card, zone)| self.zones.is_in(*card, *zone))
    }
}
