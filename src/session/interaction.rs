//! Driving the live action chain from user input.
//!
//! The session holds at most one live chain. Steps build the interaction
//! surface through the session (`prompt_text`, `prompt_buttons`,
//! `select_players`, `select_cards`), which forwards to the presenter.
//! Input only changes the selection or clicks a button; a click on an
//! enabled button becomes `next` or `prev` on the chain.
//!
//! Before every navigation the surface and presenter are cleared, so the
//! step that runs next starts from nothing and re-posts its own UI.

use crate::action::{ActionChain, Button, PickSpec, StepValue, Surface, UiInput};
use crate::core::entity::CardId;
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::events::UiEvent;

use super::game::GameSession;

/// Chain type every card and skill interaction uses.
pub type SessionChain = ActionChain<GameSession, StepValue>;

#[derive(Default)]
pub(crate) struct Interaction {
    pub(crate) chain: Option<SessionChain>,
    pub(crate) surface: Surface,
    /// Bumped whenever a chain is started or dropped, so a chain that
    /// replaced itself from one of its own callbacks is not put back.
    generation: u64,
}

impl std::fmt::Debug for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interaction")
            .field("chain", &self.chain)
            .field("surface", &self.surface)
            .finish()
    }
}

enum Navigate {
    Next(StepValue),
    Prev,
}

impl GameSession {
    /// Start `chain` as the live interaction, replacing any other.
    pub fn begin_interaction(&mut self, mut chain: SessionChain) {
        self.end_interaction();
        let generation = self.interaction.generation;
        chain.start(self);
        self.restore_chain(chain, generation);
    }

    /// Drop the live interaction, if any, and clear its UI.
    pub fn end_interaction(&mut self) {
        self.interaction.generation += 1;
        self.interaction.chain = None;
        self.clear_surface();
    }

    #[must_use]
    pub fn has_interaction(&self) -> bool {
        self.interaction.chain.is_some()
    }

    /// The live step's buttons and selectable targets.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.interaction.surface
    }

    /// Feed one user input to the live interaction.
    ///
    /// Returns `Ok(false)` when the input had no effect: no live chain,
    /// an ineligible target or a disabled button. An error means a request
    /// sent by the interaction failed.
    pub fn handle_input(&mut self, input: UiInput) -> Result<bool, GameError> {
        if self.interaction.chain.is_none() {
            return Ok(false);
        }
        let surface = &mut self.interaction.surface;
        let changed = match input {
            UiInput::SelectPlayer(player) => surface.select_player(player),
            UiInput::DeselectPlayer(player) => surface.deselect_player(player),
            UiInput::SelectCard(card) => surface.select_card(card),
            UiInput::DeselectCard(card) => surface.deselect_card(card),
            UiInput::Click(index) => {
                let navigate = match surface.resolve_click(index) {
                    None => return Ok(false),
                    Some(Some(value)) => Navigate::Next(value),
                    Some(None) => Navigate::Prev,
                };
                self.navigate(navigate);
                self.take_fault()?;
                return Ok(true);
            }
        };
        if changed {
            let views = self.interaction.surface.button_views();
            self.presenter.prompt_buttons(&views);
        }
        Ok(changed)
    }

    fn navigate(&mut self, navigate: Navigate) {
        let Some(mut chain) = self.interaction.chain.take() else {
            return;
        };
        self.clear_surface();
        let generation = self.interaction.generation;
        match navigate {
            Navigate::Next(value) => chain.next(self, value),
            Navigate::Prev => chain.prev(self),
        }
        self.restore_chain(chain, generation);
    }

    fn restore_chain(&mut self, chain: SessionChain, generation: u64) {
        if chain.is_live() && self.interaction.generation == generation {
            self.interaction.chain = Some(chain);
        }
    }

    fn clear_surface(&mut self) {
        self.interaction.surface.clear();
        self.presenter.clear();
    }

    // === Surface building, called from steps ===

    pub fn prompt_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.presenter.prompt_text(&text);
        self.interaction.surface.text = Some(text);
    }

    pub fn prompt_buttons(&mut self, buttons: Vec<Button>) {
        self.interaction.surface.buttons = buttons;
        let views = self.interaction.surface.button_views();
        self.presenter.prompt_buttons(&views);
    }

    /// Offer `eligible` players; `count` may be selected at once.
    pub fn select_players(&mut self, count: usize, eligible: Vec<PlayerId>) {
        self.presenter.show_selectable_players(count, &eligible);
        let surface = &mut self.interaction.surface;
        surface.selection.players.clear();
        surface.players = Some(PickSpec { count, eligible });
    }

    /// Offer `eligible` cards; `count` may be selected at once.
    pub fn select_cards(&mut self, count: usize, eligible: Vec<CardId>) {
        self.presenter.show_selectable_cards(count, &eligible);
        let surface = &mut self.interaction.surface;
        surface.selection.cards.clear();
        surface.cards = Some(PickSpec { count, eligible });
    }

    /// Ask the local player to pick a hand card again, after an
    /// interaction was called off.
    pub(crate) fn prompt_play_hand_card(&mut self) {
        let text = "出牌阶段，请选择要使用的卡牌".to_string();
        if let Err(err) = self.publish_ui(UiEvent::PlayHandCardPrompt { text }) {
            self.record_fault(err);
        }
    }
}
