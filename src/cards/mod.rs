//! Cards: attributes, the card type table, card instances and the
//! per-type play behaviour.
//!
//! ## Key Types
//!
//! - `CardData`: A card's fixed identity as the server describes it
//! - `Card`: A revealed card with its face and usage state
//! - `GameCard`: A card in a zone, revealed or not
//! - `HandPick`: How an inbound message names a card leaving a hand

pub mod attributes;
pub mod behavior;
pub mod definition;
pub mod instance;

pub use attributes::{CardColor, CardDirection, CardStatus, CardUsage, ColorSet};
pub use definition::CardType;
pub use instance::{Card, CardData, GameCard, HandPick};
