//! Phase/turn state machine.
//!
//! Assignments are reactive: the server announces the phase and turn
//! owner, the machine records them. Assigning the value already held is a
//! no-op and reports no change, so redelivered confirmations never cause
//! duplicate notifications.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::seq::{Admission, Seq, SeqGuard};
use crate::core::player::PlayerId;

/// Turn phases, in play order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Draw,
    Main,
    /// Transitional: the turn player is choosing the message to send.
    SendStart,
    Send,
    Fight,
    Receive,
}

impl GamePhase {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GamePhase::Draw => "draw phase",
            GamePhase::Main => "main phase",
            GamePhase::SendStart => "send start phase",
            GamePhase::Send => "send phase",
            GamePhase::Fight => "fight phase",
            GamePhase::Receive => "receive phase",
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A phase change that actually happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseTransition {
    /// The phase that just ended. `None` for the first phase of the game.
    pub ended: Option<GamePhase>,
    pub started: GamePhase,
}

/// Current phase, turn owner and seq of the game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseMachine {
    phase: Option<GamePhase>,
    turn_player: Option<PlayerId>,
    guard: SeqGuard,
    over: bool,
}

impl PhaseMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Option<GamePhase> {
        self.phase
    }

    #[must_use]
    pub fn turn_player(&self) -> Option<PlayerId> {
        self.turn_player
    }

    /// Is the current phase `phase`?
    #[must_use]
    pub fn is(&self, phase: GamePhase) -> bool {
        self.phase == Some(phase)
    }

    /// Offer an inbound seq; see [`SeqGuard::admit`].
    pub fn admit(&mut self, seq: Option<Seq>) -> Admission {
        self.guard.admit(seq)
    }

    /// The seq outbound requests are stamped with.
    #[must_use]
    pub fn seq(&self) -> Seq {
        self.guard.current()
    }

    /// Record the announced phase.
    ///
    /// Returns `None` if the phase is unchanged.
    pub fn set_phase(&mut self, phase: GamePhase) -> Option<PhaseTransition> {
        if self.phase == Some(phase) {
            return None;
        }
        let ended = self.phase.replace(phase);
        info!(?ended, started = %phase, "phase changed");
        Some(PhaseTransition { ended, started: phase })
    }

    /// Record the announced turn owner.
    ///
    /// Returns `false` if the turn owner is unchanged.
    pub fn set_turn_player(&mut self, player: PlayerId) -> bool {
        if self.turn_player == Some(player) {
            return false;
        }
        self.turn_player = Some(player);
        info!(%player, "turn changed");
        true
    }

    /// Enter the terminal state.
    pub fn finish(&mut self) {
        self.over = true;
    }

    /// Has the game ended?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }
}
