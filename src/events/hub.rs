//! Per-session bundle of buses.

use crate::net::{Outbound, ServerMessage};

use super::bus::{EventBus, OwnerId};
use super::game::GameEvent;
use super::process::ProcessEvent;
use super::ui::UiEvent;

/// The five buses of one game session.
///
/// Network-originated messages, outbound requests, domain events, UI
/// intents and lifecycle events travel on separate buses, so a channel of
/// one catalogue can never collide with another's.
pub struct EventHub<C> {
    /// Inbound server messages.
    pub network: EventBus<ServerMessage, C>,
    /// Requests for the server.
    pub outbound: EventBus<Outbound, C>,
    pub game: EventBus<GameEvent, C>,
    pub ui: EventBus<UiEvent, C>,
    pub process: EventBus<ProcessEvent, C>,
}

impl<C> Default for EventHub<C> {
    fn default() -> Self {
        Self {
            network: EventBus::new(),
            outbound: EventBus::new(),
            game: EventBus::new(),
            ui: EventBus::new(),
            process: EventBus::new(),
        }
    }
}

impl<C> Clone for EventHub<C> {
    fn clone(&self) -> Self {
        Self {
            network: self.network.clone(),
            outbound: self.outbound.clone(),
            game: self.game.clone(),
            ui: self.ui.clone(),
            process: self.process.clone(),
        }
    }
}

impl<C> std::fmt::Debug for EventHub<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("network", &self.network)
            .field("outbound", &self.outbound)
            .field("game", &self.game)
            .field("ui", &self.ui)
            .field("process", &self.process)
            .finish()
    }
}

impl<C> EventHub<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove everything `owner` registered on any bus.
    pub fn off_owner(&self, owner: OwnerId) -> usize {
        self.network.off_owner(owner)
            + self.outbound.off_owner(owner)
            + self.game.off_owner(owner)
            + self.ui.off_owner(owner)
            + self.process.off_owner(owner)
    }

    /// Clear every bus.
    pub fn reset(&self) {
        self.network.reset();
        self.outbound.reset();
        self.game.reset();
        self.ui.reset();
        self.process.reset();
    }

    /// Handlers registered across all buses.
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.network.total_listeners()
            + self.outbound.total_listeners()
            + self.game.total_listeners()
            + self.ui.total_listeners()
            + self.process.total_listeners()
    }
}
