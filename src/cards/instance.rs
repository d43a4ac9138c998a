//! Cards as this client sees them.
//!
//! A [`Card`] is a card whose identity this client knows. Its face and
//! usage change during play; the setters report whether anything changed
//! so the caller can publish exactly one change event per real change.
//!
//! A [`GameCard`] is either a known card or an unrevealed placeholder: the
//! back of a card in another player's hand, or a message sent face down.

use serde::{Deserialize, Serialize};

use super::attributes::{CardColor, CardDirection, CardStatus, CardUsage, ColorSet};
use super::definition::CardType;
use crate::core::entity::CardId;
use crate::core::error::GameError;

/// Card identity as carried on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardData {
    pub id: CardId,
    pub kind: CardType,
    pub colors: ColorSet,
    pub direction: CardDirection,
    pub lockable: bool,
}

impl CardData {
    /// Create card data with no direction and not lockable.
    pub fn new(id: CardId, kind: CardType, colors: impl IntoIterator<Item = CardColor>) -> Self {
        Self {
            id,
            kind,
            colors: colors.into_iter().collect(),
            direction: CardDirection::default(),
            lockable: false,
        }
    }

    /// Set the send direction (builder pattern).
    #[must_use]
    pub fn with_direction(mut self, direction: CardDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Mark as lockable (builder pattern).
    #[must_use]
    pub fn lockable(mut self) -> Self {
        self.lockable = true;
        self
    }
}

/// A card whose identity is known to this client.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    data: CardData,
    status: CardStatus,
    usage: CardUsage,
}

impl Card {
    /// Create a face-up card with unknown usage.
    #[must_use]
    pub fn new(data: CardData) -> Self {
        Self {
            data,
            status: CardStatus::FaceUp,
            usage: CardUsage::Unknown,
        }
    }

    /// Set the initial usage (builder pattern).
    #[must_use]
    pub fn with_usage(mut self, usage: CardUsage) -> Self {
        self.usage = usage;
        self
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.data.id
    }

    #[must_use]
    pub fn kind(&self) -> CardType {
        self.data.kind
    }

    #[must_use]
    pub fn colors(&self) -> &[CardColor] {
        &self.data.colors
    }

    #[must_use]
    pub fn direction(&self) -> CardDirection {
        self.data.direction
    }

    #[must_use]
    pub fn lockable(&self) -> bool {
        self.data.lockable
    }

    #[must_use]
    pub fn status(&self) -> CardStatus {
        self.status
    }

    #[must_use]
    pub fn usage(&self) -> CardUsage {
        self.usage
    }

    /// Wire form of this card.
    #[must_use]
    pub fn data(&self) -> &CardData {
        &self.data
    }

    /// Set the visible face. Returns `true` if it changed.
    pub fn set_status(&mut self, status: CardStatus) -> bool {
        let changed = self.status != status;
        self.status = status;
        changed
    }

    /// Set the usage. Returns `true` if it changed.
    pub fn set_usage(&mut self, usage: CardUsage) -> bool {
        let changed = self.usage != usage;
        self.usage = usage;
        changed
    }

    /// Turn the card over, returning the new face.
    pub fn flip(&mut self) -> CardStatus {
        self.status = self.status.flipped();
        self.status
    }

    #[must_use]
    pub fn has_color(&self, color: CardColor) -> bool {
        self.data.colors.contains(&color)
    }

    #[must_use]
    pub fn is_single_color(&self) -> bool {
        self.data.colors.len() == 1
    }

    /// Mark the card as a function card being played. Returns `true` if
    /// the usage changed.
    pub fn on_play(&mut self) -> bool {
        self.set_status(CardStatus::FaceUp);
        self.set_usage(CardUsage::FunctionCard)
    }

    /// Mark the card as a message being sent face down. Returns `true` if
    /// the usage changed.
    pub fn on_send(&mut self) -> bool {
        self.set_status(CardStatus::FaceDown);
        self.set_usage(CardUsage::MessageCard)
    }
}

impl From<CardData> for Card {
    fn from(data: CardData) -> Self {
        Card::new(data)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.data.kind)?;
        if !self.data.colors.is_empty() {
            let colors: Vec<String> = self.data.colors.iter().map(|c| c.to_string()).collect();
            write!(f, "({})", colors.join("/"))?;
        }
        Ok(())
    }
}

/// A card in a zone, revealed or not.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameCard {
    Known(Card),
    /// Identity hidden from this client. Carries no type or colour.
    Unknown,
}

impl GameCard {
    /// The card id, if revealed.
    #[must_use]
    pub fn id(&self) -> Option<CardId> {
        match self {
            GameCard::Known(card) => Some(card.id()),
            GameCard::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, GameCard::Known(_))
    }

    #[must_use]
    pub fn as_known(&self) -> Option<&Card> {
        match self {
            GameCard::Known(card) => Some(card),
            GameCard::Unknown => None,
        }
    }

    #[must_use]
    pub fn into_known(self) -> Option<Card> {
        match self {
            GameCard::Known(card) => Some(card),
            GameCard::Unknown => None,
        }
    }

    /// Resolve against the identity the server just revealed.
    ///
    /// A placeholder becomes the revealed card. A known card must match
    /// the revealed id, otherwise the mirror is out of sync.
    pub fn reveal(self, data: &CardData) -> Result<Card, GameError> {
        match self {
            GameCard::Known(card) if card.id() == data.id => Ok(card),
            GameCard::Known(card) => Err(GameError::not_in_zone(
                data.id,
                format!("place of {}", card.id()),
            )),
            GameCard::Unknown => Ok(Card::new(data.clone())),
        }
    }
}

impl From<Card> for GameCard {
    fn from(card: Card) -> Self {
        GameCard::Known(card)
    }
}

impl From<CardData> for GameCard {
    fn from(data: CardData) -> Self {
        GameCard::Known(Card::new(data))
    }
}

/// Which hand card a server message refers to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandPick {
    /// A card the server names. If the hand holds it, that card leaves;
    /// otherwise an unrevealed placeholder is consumed and revealed as it.
    Card(CardData),
    /// Some card the server does not reveal to us.
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_cheng_qing(id: u32) -> CardData {
        CardData::new(CardId(id), CardType::ChengQing, [CardColor::Black])
    }

    #[test]
    fn test_setters_report_change() {
        let mut card = Card::new(black_cheng_qing(1));
        assert!(!card.set_status(CardStatus::FaceUp));
        assert!(card.set_status(CardStatus::FaceDown));
        assert!(card.set_usage(CardUsage::HandCard));
        assert!(!card.set_usage(CardUsage::HandCard));
        assert_eq!(card.flip(), CardStatus::FaceUp);
    }

    #[test]
    fn test_on_play_and_send() {
        let mut card = Card::new(black_cheng_qing(1)).with_usage(CardUsage::HandCard);

        assert!(card.on_send());
        assert_eq!(card.status(), CardStatus::FaceDown);
        assert_eq!(card.usage(), CardUsage::MessageCard);

        assert!(card.on_play());
        assert_eq!(card.status(), CardStatus::FaceUp);
        assert_eq!(card.usage(), CardUsage::FunctionCard);
        assert!(!card.on_play());
    }

    #[test]
    fn test_colors() {
        let card = Card::new(CardData::new(
            CardId(2),
            CardType::PoYi,
            [CardColor::Red, CardColor::Black],
        ));
        assert!(card.has_color(CardColor::Black));
        assert!(!card.has_color(CardColor::Blue));
        assert!(!card.is_single_color());
        assert_eq!(card.to_string(), "破译(red/black)");
    }

    #[test]
    fn test_reveal_unknown() {
        let card = GameCard::Unknown.reveal(&black_cheng_qing(4)).unwrap();
        assert_eq!(card.id(), CardId(4));
    }

    #[test]
    fn test_reveal_mismatch_is_desync() {
        let known = GameCard::from(black_cheng_qing(4));
        let err = known.reveal(&black_cheng_qing(5)).unwrap_err();
        assert!(err.is_desync());
    }
}
