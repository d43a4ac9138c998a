//! Process/lifecycle events: selection, initialisation, game end.

use crate::characters::CharacterKind;
use crate::core::error::GameError;
use crate::core::player::PlayerId;

use super::bus::BusEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessEvent {
    CharacterSelectionStarted {
        candidates: Vec<CharacterKind>,
        seconds: u32,
    },
    CharacterConfirmed(CharacterKind),
    GameInitialized {
        player_count: usize,
    },
    SeatsAssigned {
        first: PlayerId,
    },
    GameOver {
        winners: Vec<PlayerId>,
    },
    /// The session hit a desync and is shutting down.
    SessionAborted {
        reason: GameError,
    },
    /// Last event before every bus is reset.
    TearingDown,
}

/// Channel of a [`ProcessEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProcessEventKind {
    CharacterSelectionStarted,
    CharacterConfirmed,
    GameInitialized,
    SeatsAssigned,
    GameOver,
    SessionAborted,
    TearingDown,
}

impl BusEvent for ProcessEvent {
    type Channel = ProcessEventKind;

    fn channel(&self) -> ProcessEventKind {
        match self {
            ProcessEvent::CharacterSelectionStarted { .. } => {
                ProcessEventKind::CharacterSelectionStarted
            }
            ProcessEvent::CharacterConfirmed(_) => ProcessEventKind::CharacterConfirmed,
            ProcessEvent::GameInitialized { .. } => ProcessEventKind::GameInitialized,
            ProcessEvent::SeatsAssigned { .. } => ProcessEventKind::SeatsAssigned,
            ProcessEvent::GameOver { .. } => ProcessEventKind::GameOver,
            ProcessEvent::SessionAborted { .. } => ProcessEventKind::SessionAborted,
            ProcessEvent::TearingDown => ProcessEventKind::TearingDown,
        }
    }
}
