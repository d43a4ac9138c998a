//! Event buses and event catalogues.
//!
//! ## Key Types
//!
//! - `EventBus`: Channelled publish/subscribe with owner-based removal
//! - `EventHub`: The five buses of a session
//! - `GameEvent`, `UiEvent`, `ProcessEvent`: Event catalogues

pub mod bus;
pub mod game;
pub mod hub;
pub mod process;
pub mod ui;

pub use bus::{BusEvent, EventBus, HandlerResult, OwnerId};
pub use game::{GameEvent, GameEventKind};
pub use hub::EventHub;
pub use process::{ProcessEvent, ProcessEventKind};
pub use ui::{UiEvent, UiEventKind, WaitingType};
