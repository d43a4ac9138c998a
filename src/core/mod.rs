//! Core types: ids, players, configuration, errors and the game data
//! aggregate.

pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod state;

pub use config::SessionConfig;
pub use entity::{CardId, CharacterId};
pub use error::{GameError, GameResult};
pub use player::{PlayerId, PlayerMap};
pub use state::{GameData, Player, Restrictions, Transit, MAX_PLAYERS};
