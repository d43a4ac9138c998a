//! Characters (role cards) and hidden identities.
//!
//! ## Key Types
//!
//! - `CharacterKind`: Roster entry (name, sex, skills)
//! - `Character`: A seated player's role card with face state and skills
//! - `Identity`: The local player's hidden allegiance and secret task

pub mod character;
pub mod identity;

pub use character::{Character, CharacterKind, CharacterStatus, Sex};
pub use identity::{Identity, IdentityType, SecretTask};
