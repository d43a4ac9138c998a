//! # fengsheng-core
//!
//! Client-side rules core for a networked social-deduction card game.
//!
//! The server is authoritative. This crate keeps a local mirror of the
//! game consistent with the stream of server messages, drives the local
//! player's multi-step decisions, and runs card and skill effects through
//! one lifecycle.
//!
//! ## Design Principles
//!
//! 1. **Propose, confirm, apply**: A click never changes game state. An
//!    interaction ends in an outbound request; only the server's
//!    confirmation, applied by an effect handler, mutates [`GameData`].
//!
//! 2. **Seq is the ordering authority**: Every sequenced inbound message
//!    must carry a seq strictly greater than the last one applied, or it
//!    is dropped before any handler sees it.
//!
//! 3. **Desync is fatal**: A card missing from the zone a message names
//!    aborts the session instead of being repaired.
//!
//! 4. **One context per game**: Buses, skill subscriptions and the log
//!    live in a [`GameSession`] and are torn down with it.
//!
//! ## Modules
//!
//! - `core`: Ids, players, configuration, errors, the `GameData` aggregate
//! - `zones`: Zones and the card-to-zone tracker
//! - `cards`: Card attributes, types, instances and play behaviour
//! - `characters`: Role cards and identities
//! - `skills`: Skill definitions, state and the capability table
//! - `events`: Event buses and event catalogues
//! - `net`: Inbound and outbound message catalogues and codec
//! - `phase`: Phases, seq guard and the phase machine
//! - `action`: Action chains and the interaction surface
//! - `ui`: The presenter interface
//! - `session`: The per-game session context

pub mod action;
pub mod cards;
pub mod characters;
pub mod core;
pub mod events;
pub mod net;
pub mod phase;
pub mod session;
pub mod skills;
pub mod ui;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    CardId, CharacterId, GameData, GameError, GameResult, Player, PlayerId, PlayerMap,
    Restrictions, SessionConfig, Transit,
};

pub use crate::zones::{Zone, ZoneTracker};

pub use crate::cards::{
    Card, CardColor, CardData, CardDirection, CardStatus, CardType, CardUsage, GameCard, HandPick,
};

pub use crate::characters::{Character, CharacterKind, CharacterStatus, Identity, IdentityType, SecretTask};

pub use crate::skills::{Skill, SkillKind, SkillRef, SkillRole};

pub use crate::events::{
    BusEvent, EventBus, EventHub, GameEvent, GameEventKind, OwnerId, ProcessEvent, ProcessEventKind,
    UiEvent, UiEventKind, WaitingType,
};

pub use crate::net::{ClientRequest, ClientRequestKind, InboundMessage, Outbound, RoleCard, ServerMessage, ServerMessageKind};

pub use crate::phase::{GamePhase, PhaseMachine, Seq, SeqGuard};

pub use crate::action::{ActionChain, Button, ButtonAction, Requirement, StepValue, Surface, UiInput};

pub use crate::ui::{NullPresenter, Presenter};

pub use crate::session::{Dispatch, GameLog, GameSession, SessionChain};
