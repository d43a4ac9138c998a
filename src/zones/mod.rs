//! Zone system for card locations.
//!
//! The game has a fixed set of zones: the deck, each player's hand and
//! message zone, the discard and banish piles, and the single in-transit
//! slot. A revealed card occupies exactly one of them at any time.
//!
//! ## Key Types
//!
//! - `Zone`: Zone identifier
//! - `ZoneTracker`: Card id -> zone index

pub mod manager;

pub use manager::{Zone, ZoneTracker};
