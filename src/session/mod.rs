//! The game session: one context object per game.
//!
//! ## Key Types
//!
//! - `GameSession`: Owns game data, buses, log, presenter and the live
//!   interaction; routes inbound messages
//! - `Dispatch`: Outcome of one inbound message
//! - `GameLog`: Bounded human-readable effect history
//! - `SessionChain`: The action chain type interactions use

pub mod game;
mod handlers;
pub mod interaction;
pub mod log;
mod play;
mod zones;

pub use game::{Dispatch, GameSession};
pub use interaction::SessionChain;
pub use log::GameLog;
