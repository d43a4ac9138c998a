//! What the core asks of the screen.
//!
//! The core calls a `Presenter` to show prompts, buttons, selectable
//! targets and card movements. It never reads layout or rendering state
//! back; user reactions come in as [`UiInput`] through the session.
//!
//! [`UiInput`]: crate::action::UiInput

use crate::action::ButtonView;
use crate::cards::GameCard;
use crate::core::entity::CardId;
use crate::core::player::PlayerId;
use crate::zones::Zone;

pub trait Presenter {
    /// Let the user pick `count` of `eligible` players.
    fn show_selectable_players(&mut self, count: usize, eligible: &[PlayerId]);

    /// Let the user pick `count` of `eligible` cards.
    fn show_selectable_cards(&mut self, count: usize, eligible: &[CardId]);

    fn prompt_text(&mut self, text: &str);

    /// Replace the prompt buttons. Called again whenever their enabled
    /// state changes.
    fn prompt_buttons(&mut self, buttons: &[ButtonView]);

    fn play_zone_transfer_animation(&mut self, card: &GameCard, from: Zone, to: Zone);

    /// Drop prompts, buttons and selectable highlights.
    fn clear(&mut self) {}
}

/// Presenter that shows nothing. Used headless and for replays.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn show_selectable_players(&mut self, _count: usize, _eligible: &[PlayerId]) {}

    fn show_selectable_cards(&mut self, _count: usize, _eligible: &[CardId]) {}

    fn prompt_text(&mut self, _text: &str) {}

    fn prompt_buttons(&mut self, _buttons: &[ButtonView]) {}

    fn play_zone_transfer_animation(&mut self, _card: &GameCard, _from: Zone, _to: Zone) {}
}
