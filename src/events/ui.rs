//! UI-intent events.
//!
//! Requests from the core to whatever drives the screen. Nothing here
//! changes game state.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;
use crate::phase::Seq;

use super::bus::BusEvent;

/// What a countdown is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaitingType {
    SelectCharacter,
    PlayCard,
    SendMessage,
    ReceiveMessage,
    UseSkill,
    HandleSkill,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    StartCountDown {
        player: PlayerId,
        seconds: u32,
        waiting: WaitingType,
        seq: Option<Seq>,
    },
    StopCountDown,
    /// Idle prompt inviting the local player to play a hand card.
    PlayHandCardPrompt { text: String },
    BannedIconShown(PlayerId),
    BannedIconHidden(PlayerId),
}

/// Channel of a [`UiEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiEventKind {
    StartCountDown,
    StopCountDown,
    PlayHandCardPrompt,
    BannedIconShown,
    BannedIconHidden,
}

impl BusEvent for UiEvent {
    type Channel = UiEventKind;

    fn channel(&self) -> UiEventKind {
        match self {
            UiEvent::StartCountDown { .. } => UiEventKind::StartCountDown,
            UiEvent::StopCountDown => UiEventKind::StopCountDown,
            UiEvent::PlayHandCardPrompt { .. } => UiEventKind::PlayHandCardPrompt,
            UiEvent::BannedIconShown(_) => UiEventKind::BannedIconShown,
            UiEvent::BannedIconHidden(_) => UiEventKind::BannedIconHidden,
        }
    }
}
