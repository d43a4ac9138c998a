//! The interaction surface of a live step.
//!
//! A step posts a prompt, a set of buttons, and optionally a set of
//! selectable players or cards. User input only ever changes the
//! selection or clicks a button; a button whose requirement is not met by
//! the selection is disabled and ignores clicks.

use serde::{Deserialize, Serialize};

use crate::core::entity::CardId;
use crate::core::player::PlayerId;

/// Result contributed by one step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepValue {
    Confirmed,
    Player(PlayerId),
    Cards(Vec<CardId>),
    Choice(bool),
}

impl StepValue {
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            StepValue::Player(player) => Some(*player),
            _ => None,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        match self {
            StepValue::Cards(cards) => cards,
            _ => &[],
        }
    }

    #[must_use]
    pub fn choice(&self) -> Option<bool> {
        match self {
            StepValue::Choice(choice) => Some(*choice),
            _ => None,
        }
    }
}

/// What the selection must contain for a button to be enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Always,
    Players(usize),
    Cards(usize),
}

/// What clicking a button does to the live step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    /// Finish the step with a fixed value.
    Next(StepValue),
    /// Finish the step with the single selected player.
    NextWithPlayer,
    /// Finish the step with the selected cards.
    NextWithCards,
    /// Go back (or cancel from the first step).
    Prev,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub requirement: Requirement,
    pub action: ButtonAction,
}

impl Button {
    /// An always-enabled button.
    pub fn new(label: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            label: label.into(),
            requirement: Requirement::Always,
            action,
        }
    }

    /// Set the requirement (builder pattern).
    #[must_use]
    pub fn requires(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// "Cancel": go back one step.
    pub fn back(label: impl Into<String>) -> Self {
        Self::new(label, ButtonAction::Prev)
    }
}

/// A button as the presenter draws it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub enabled: bool,
}

/// User input routed to the live step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiInput {
    SelectPlayer(PlayerId),
    DeselectPlayer(PlayerId),
    SelectCard(CardId),
    DeselectCard(CardId),
    Click(usize),
}

/// How many of which targets may be picked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickSpec<T> {
    pub count: usize,
    pub eligible: Vec<T>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub players: Vec<PlayerId>,
    pub cards: Vec<CardId>,
}

/// Prompt, buttons and selectable targets of the live step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Surface {
    pub text: Option<String>,
    pub buttons: Vec<Button>,
    pub players: Option<PickSpec<PlayerId>>,
    pub cards: Option<PickSpec<CardId>>,
    pub selection: Selection,
}

fn pick<T: Copy + PartialEq>(spec: &Option<PickSpec<T>>, selected: &mut Vec<T>, item: T) -> bool {
    let Some(spec) = spec else {
        return false;
    };
    if spec.count == 0 || !spec.eligible.contains(&item) || selected.contains(&item) {
        return false;
    }
    if selected.len() == spec.count {
        selected.remove(0);
    }
    selected.push(item);
    true
}

fn unpick<T: PartialEq>(selected: &mut Vec<T>, item: &T) -> bool {
    let before = selected.len();
    selected.retain(|s| s != item);
    before != selected.len()
}

impl Surface {
    /// Select a player. At capacity, the oldest selection is replaced.
    /// Returns `false` if the player is not selectable.
    pub fn select_player(&mut self, player: PlayerId) -> bool {
        pick(&self.players, &mut self.selection.players, player)
    }

    pub fn deselect_player(&mut self, player: PlayerId) -> bool {
        unpick(&mut self.selection.players, &player)
    }

    /// Select a card. At capacity, the oldest selection is replaced.
    /// Returns `false` if the card is not selectable.
    pub fn select_card(&mut self, card: CardId) -> bool {
        pick(&self.cards, &mut self.selection.cards, card)
    }

    pub fn deselect_card(&mut self, card: CardId) -> bool {
        unpick(&mut self.selection.cards, &card)
    }

    /// Is the requirement met by the current selection?
    #[must_use]
    pub fn satisfies(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Always => true,
            Requirement::Players(n) => self.selection.players.len() == n,
            Requirement::Cards(n) => self.selection.cards.len() == n,
        }
    }

    #[must_use]
    pub fn button_enabled(&self, index: usize) -> bool {
        self.buttons
            .get(index)
            .is_some_and(|button| self.satisfies(button.requirement))
    }

    #[must_use]
    pub fn button_views(&self) -> Vec<ButtonView> {
        self.buttons
            .iter()
            .map(|button| ButtonView {
                label: button.label.clone(),
                enabled: self.satisfies(button.requirement),
            })
            .collect()
    }

    /// Translate a click into navigation.
    ///
    /// `None` if the button does not exist or is disabled. `Some(None)` is
    /// "go back", `Some(Some(value))` is "advance with value".
    #[must_use]
    pub fn resolve_click(&self, index: usize) -> Option<Option<StepValue>> {
        if !self.button_enabled(index) {
            return None;
        }
        let value = match &self.buttons[index].action {
            ButtonAction::Prev => return Some(None),
            ButtonAction::Next(value) => value.clone(),
            ButtonAction::NextWithPlayer => StepValue::Player(*self.selection.players.first()?),
            ButtonAction::NextWithCards => StepValue::Cards(self.selection.cards.clone()),
        };
        Some(Some(value))
    }

    pub fn clear(&mut self) {
        *self = Surface::default();
    }
}
