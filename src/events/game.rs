//! Game-domain events.
//!
//! Published after local state has changed, so subscribers (log, animation,
//! skills) observe the result without re-deriving the transition. Zone
//! events name both ends of the move.

use crate::cards::{Card, CardStatus, CardUsage, GameCard};
use crate::characters::{CharacterKind, CharacterStatus};
use crate::core::entity::CardId;
use crate::core::player::PlayerId;
use crate::phase::GamePhase;
use crate::skills::SkillKind;
use crate::zones::Zone;

use super::bus::BusEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    // === Phase / turn ===
    PhaseChanged {
        phase: GamePhase,
        turn_player: Option<PlayerId>,
    },
    /// Published on a channel of its own per phase.
    PhaseEnded(GamePhase),
    TurnChanged(PlayerId),
    DeckCountChanged(u32),

    // === Cards ===
    CardStatusChanged {
        card: CardId,
        status: CardStatus,
    },
    CardUsageChanged {
        card: CardId,
        usage: CardUsage,
    },
    CardPlayed {
        player: PlayerId,
        card: Card,
        target: Option<PlayerId>,
    },

    // === Characters ===
    CharacterRevealed {
        player: PlayerId,
        kind: CharacterKind,
    },
    CharacterStatusChanged {
        player: PlayerId,
        status: CharacterStatus,
    },

    // === Zones ===
    HandCardsAdded {
        player: PlayerId,
        cards: Vec<GameCard>,
        from: Zone,
    },
    HandCardsRemoved {
        player: PlayerId,
        cards: Vec<GameCard>,
        to: Zone,
    },
    MessageSent {
        sender: PlayerId,
        holder: PlayerId,
        card: GameCard,
    },
    MessageTransmitted {
        holder: PlayerId,
    },
    /// The in-transit message was turned face up in flight.
    MessageRevealed {
        card: Card,
    },
    MessagePlaced {
        player: PlayerId,
        card: Card,
        from: Zone,
    },
    MessagesRemoved {
        player: PlayerId,
        cards: Vec<Card>,
    },
    CardsDiscarded {
        cards: Vec<Card>,
        from: Zone,
    },
    CardsBanished {
        cards: Vec<Card>,
        from: Zone,
    },

    // === Skills ===
    SkillUsed {
        player: PlayerId,
        skill: SkillKind,
    },
    SkillHandleFinished {
        player: PlayerId,
        skill: SkillKind,
    },

    // === Players ===
    PlayerDying(PlayerId),
    PlayerDied(PlayerId),
    GameOver {
        winners: Vec<PlayerId>,
    },
}

/// Channel of a [`GameEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameEventKind {
    PhaseChanged,
    PhaseEnded(GamePhase),
    TurnChanged,
    DeckCountChanged,
    CardStatusChanged,
    CardUsageChanged,
    CardPlayed,
    CharacterRevealed,
    CharacterStatusChanged,
    HandCardsAdded,
    HandCardsRemoved,
    MessageSent,
    MessageTransmitted,
    MessageRevealed,
    MessagePlaced,
    MessagesRemoved,
    CardsDiscarded,
    CardsBanished,
    SkillUsed,
    SkillHandleFinished,
    PlayerDying,
    PlayerDied,
    GameOver,
}

impl BusEvent for GameEvent {
    type Channel = GameEventKind;

    fn channel(&self) -> GameEventKind {
        match self {
            GameEvent::PhaseChanged { .. } => GameEventKind::PhaseChanged,
            GameEvent::PhaseEnded(phase) => GameEventKind::PhaseEnded(*phase),
            GameEvent::TurnChanged(_) => GameEventKind::TurnChanged,
            GameEvent::DeckCountChanged(_) => GameEventKind::DeckCountChanged,
            GameEvent::CardStatusChanged { .. } => GameEventKind::CardStatusChanged,
            GameEvent::CardUsageChanged { .. } => GameEventKind::CardUsageChanged,
            GameEvent::CardPlayed { .. } => GameEventKind::CardPlayed,
            GameEvent::CharacterRevealed { .. } => GameEventKind::CharacterRevealed,
            GameEvent::CharacterStatusChanged { .. } => GameEventKind::CharacterStatusChanged,
            GameEvent::HandCardsAdded { .. } => GameEventKind::HandCardsAdded,
            GameEvent::HandCardsRemoved { .. } => GameEventKind::HandCardsRemoved,
            GameEvent::MessageSent { .. } => GameEventKind::MessageSent,
            GameEvent::MessageTransmitted { .. } => GameEventKind::MessageTransmitted,
            GameEvent::MessageRevealed { .. } => GameEventKind::MessageRevealed,
            GameEvent::MessagePlaced { .. } => GameEventKind::MessagePlaced,
            GameEvent::MessagesRemoved { .. } => GameEventKind::MessagesRemoved,
            GameEvent::CardsDiscarded { .. } => GameEventKind::CardsDiscarded,
            GameEvent::CardsBanished { .. } => GameEventKind::CardsBanished,
            GameEvent::SkillUsed { .. } => GameEventKind::SkillUsed,
            GameEvent::SkillHandleFinished { .. } => GameEventKind::SkillHandleFinished,
            GameEvent::PlayerDying(_) => GameEventKind::PlayerDying,
            GameEvent::PlayerDied(_) => GameEventKind::PlayerDied,
            GameEvent::GameOver { .. } => GameEventKind::GameOver,
        }
    }
}
