//! Skills: definitions, per-instance state and the capability table that
//! runs them.
//!
//! ## Key Types
//!
//! - `SkillKind` / `SkillDef`: Which skill, and its static rules
//! - `Skill`: One instance on a role card, with its bus owner id
//! - `SkillHandlers`: Capability table entry (channels, hooks, effect)
//!
//! ## Lifecycle
//!
//! A skill is subscribed while its role card is known to this client, its
//! holder is alive and the card shows a face the skill works from (see
//! [`Character::skill_in_play`]). [`sync_player`] subscribes and
//! unsubscribes accordingly after every role update, flip or
//! nullification.
//!
//! [`Character::skill_in_play`]: crate::characters::Character::skill_in_play

pub mod dispatch;
pub mod skill;

mod jiang_ji_jiu_ji;
mod jin_bi;
mod jiu_ji;
mod lian_luo;
mod xian_fa_zhi_ren;

pub use dispatch::{
    dispose, dispose_all, dispose_player, handlers, init, on_prompt, on_trigger, on_use, sync_player,
    SkillHandlers, SkillPrompt, TriggerOffer,
};
pub use skill::{FaceRequirement, Skill, SkillDef, SkillKind, SkillRef, SkillRole};
