//! The per-game session context.
//!
//! A `GameSession` owns everything one game needs: the [`GameData`]
//! mirror, the five event buses, the game log, the live interaction and
//! the presenter. Every handler on every bus receives the session as its
//! context, so there is no process-wide state.
//!
//! ## Inbound flow
//!
//! [`GameSession::dispatch`] checks the message's seq against the phase
//! machine's guard, records it, then publishes the body on the network
//! bus. Core handlers and subscribed skills apply the change and publish
//! domain events. A handler error is a protocol desync: the session
//! aborts and the error is returned.

use tracing::{debug, error, info, warn};

use crate::characters::CharacterKind;
use crate::core::config::SessionConfig;
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::core::state::GameData;
use crate::events::{EventHub, GameEvent, HandlerResult, OwnerId, ProcessEvent, UiEvent};
use crate::net::{decode_message, ClientRequest, InboundMessage, Outbound};
use crate::phase::{Admission, Seq};
use crate::skills;
use crate::ui::Presenter;

use super::interaction::Interaction;
use super::log::GameLog;

/// What happened to an inbound message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Admitted and handled.
    Applied,
    /// Seq not newer than the last applied one; dropped.
    Stale,
    /// Arrived after the game ended; dropped.
    Ignored,
}

pub struct GameSession {
    pub(crate) data: GameData,
    pub(crate) hub: EventHub<GameSession>,
    pub(crate) log: GameLog,
    pub(crate) presenter: Box<dyn Presenter>,
    pub(crate) interaction: Interaction,
    config: SessionConfig,
    fault: Option<GameError>,
    owner: OwnerId,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("data", &self.data)
            .field("hub", &self.hub)
            .field("log", &self.log.len())
            .field("interaction", &self.interaction)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Create a session with its core handlers installed.
    pub fn new(config: SessionConfig, presenter: impl Presenter + 'static) -> Result<Self, GameError> {
        config.validate()?;
        let mut session = Self {
            data: GameData::new(),
            hub: EventHub::new(),
            log: GameLog::new(config.log_capacity),
            presenter: Box::new(presenter),
            interaction: Interaction::default(),
            config,
            fault: None,
            owner: OwnerId::fresh(),
        };
        super::handlers::install(&mut session);
        Ok(session)
    }

    // === Accessors ===

    #[must_use]
    pub fn data(&self) -> &GameData {
        &self.data
    }

    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The session's buses, for application-level subscribers.
    #[must_use]
    pub fn hub(&self) -> &EventHub<GameSession> {
        &self.hub
    }

    /// Owner of the session's own handlers.
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Seq stamped on outbound requests.
    #[must_use]
    pub fn seq(&self) -> Seq {
        self.data.phase.seq()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.data.phase.is_over()
    }

    // === Inbound ===

    /// Apply one inbound message.
    pub fn dispatch(&mut self, message: InboundMessage) -> Result<Dispatch, GameError> {
        let kind = message.body.kind();
        if self.is_over() {
            debug!(?kind, "game over, message ignored");
            return Ok(Dispatch::Ignored);
        }
        if let Admission::Stale { seq, last } = self.data.phase.admit(message.seq) {
            debug!(?kind, %seq, %last, "stale message dropped");
            return Ok(Dispatch::Stale);
        }

        let bus = self.hub.network.clone();
        match bus.emit(self, &message.body) {
            Ok(0) => {
                debug!(?kind, "no handler for message");
                Ok(Dispatch::Applied)
            }
            Ok(_) => Ok(Dispatch::Applied),
            Err(err) => {
                error!(?kind, %err, "protocol desync, aborting session");
                self.abort(err.clone());
                Err(err)
            }
        }
    }

    /// Decode and apply one wire frame.
    pub fn dispatch_bytes(&mut self, bytes: &[u8]) -> Result<Dispatch, GameError> {
        let message = decode_message(bytes)?;
        self.dispatch(message)
    }

    // === Publishing ===

    pub fn publish(&mut self, event: GameEvent) -> HandlerResult {
        let bus = self.hub.game.clone();
        bus.emit(self, &event).map(|_| ())
    }

    pub fn publish_ui(&mut self, event: UiEvent) -> HandlerResult {
        let bus = self.hub.ui.clone();
        bus.emit(self, &event).map(|_| ())
    }

    pub fn publish_process(&mut self, event: ProcessEvent) -> HandlerResult {
        let bus = self.hub.process.clone();
        bus.emit(self, &event).map(|_| ())
    }

    // === Outbound ===

    /// Publish a request on the outbound bus, stamped with the current seq.
    ///
    /// In record mode the request is dropped.
    pub fn send(&mut self, request: ClientRequest) -> HandlerResult {
        if self.config.record_mode {
            debug!(kind = ?request.kind(), "record mode, request dropped");
            return Ok(());
        }
        let outbound = Outbound {
            seq: self.seq(),
            request,
        };
        let bus = self.hub.outbound.clone();
        bus.emit(self, &outbound).map(|_| ())
    }

    /// [`send`](Self::send) from a UI callback; a failure is kept as the
    /// session fault and reported by the input call that caused it.
    pub(crate) fn send_intent(&mut self, request: ClientRequest) {
        if let Err(err) = self.send(request) {
            self.record_fault(err);
        }
    }

    pub(crate) fn record_fault(&mut self, err: GameError) {
        warn!(%err, "interaction fault");
        self.fault.get_or_insert(err);
    }

    pub(crate) fn take_fault(&mut self) -> Result<(), GameError> {
        self.fault.take().map_or(Ok(()), Err)
    }

    // === Lifecycle ===

    /// Pick a role card offered during selection.
    pub fn select_character(&mut self, kind: CharacterKind) -> HandlerResult {
        self.send(ClientRequest::SelectRole { role: kind.id() })
    }

    /// Number the seats starting from `first`.
    pub fn assign_seats(&mut self, first: PlayerId) -> HandlerResult {
        self.data.assign_seats(first)?;
        self.publish_process(ProcessEvent::SeatsAssigned { first })
    }

    /// Abort after a desync: publish the reason, tear down and drop the
    /// now untrustworthy zones.
    pub fn abort(&mut self, reason: GameError) {
        if let Err(err) = self.publish_process(ProcessEvent::SessionAborted { reason }) {
            warn!(%err, "abort handler failed");
        }
        self.teardown();
        self.data.clear_zones();
    }

    /// End the game: dispose skills, clear every bus, the log and the
    /// interaction, and stop accepting messages.
    pub fn teardown(&mut self) {
        if self.is_over() {
            return;
        }
        if let Err(err) = self.publish_process(ProcessEvent::TearingDown) {
            warn!(%err, "teardown handler failed");
        }
        skills::dispose_all(self);
        self.hub.reset();
        self.log.reset();
        self.end_interaction();
        self.data.phase.finish();
        info!("session torn down");
    }
}
