//! Skill state and static skill definitions.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;
use crate::events::OwnerId;
use crate::phase::GamePhase;

/// How a skill comes into effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillRole {
    /// Always on; reacts to qualifying events by itself.
    Passive,
    /// Offers its holder a yes/no decision when something qualifying happens.
    Trigger,
    /// Invoked explicitly by its holder during an eligible phase.
    Active,
}

/// Face the role card must show for an active skill to be usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceRequirement {
    Any,
    FaceUp,
    FaceDown,
}

/// Static description of a skill kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillDef {
    pub name: &'static str,
    pub role: SkillRole,
    pub usable_phases: &'static [GamePhase],
    /// `None` means unlimited.
    pub uses_per_turn: Option<u32>,
    pub face: FaceRequirement,
    /// Listens for events while the role card is face down.
    pub hidden_capable: bool,
}

/// Every skill this client knows how to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    JinBi,
    JiuJi,
    LianLuo,
    XianFaZhiRen,
    JiangJiJiuJi,
}

const JIN_BI: SkillDef = SkillDef {
    name: "禁闭",
    role: SkillRole::Active,
    usable_phases: &[GamePhase::Main],
    uses_per_turn: Some(1),
    face: FaceRequirement::FaceUp,
    hidden_capable: false,
};

const JIU_JI: SkillDef = SkillDef {
    name: "就计",
    role: SkillRole::Trigger,
    usable_phases: &[],
    uses_per_turn: None,
    face: FaceRequirement::Any,
    hidden_capable: true,
};

const LIAN_LUO: SkillDef = SkillDef {
    name: "联络",
    role: SkillRole::Trigger,
    usable_phases: &[GamePhase::Receive],
    uses_per_turn: None,
    face: FaceRequirement::Any,
    hidden_capable: false,
};

const XIAN_FA_ZHI_REN: SkillDef = SkillDef {
    name: "先发制人",
    role: SkillRole::Active,
    usable_phases: &[GamePhase::Fight],
    uses_per_turn: None,
    face: FaceRequirement::FaceDown,
    hidden_capable: true,
};

const JIANG_JI_JIU_JI: SkillDef = SkillDef {
    name: "将计就计",
    role: SkillRole::Passive,
    usable_phases: &[],
    uses_per_turn: None,
    face: FaceRequirement::Any,
    hidden_capable: false,
};

impl SkillKind {
    pub const ALL: [SkillKind; 5] = [
        SkillKind::JinBi,
        SkillKind::JiuJi,
        SkillKind::LianLuo,
        SkillKind::XianFaZhiRen,
        SkillKind::JiangJiJiuJi,
    ];

    #[must_use]
    pub fn def(self) -> &'static SkillDef {
        match self {
            SkillKind::JinBi => &JIN_BI,
            SkillKind::JiuJi => &JIU_JI,
            SkillKind::LianLuo => &LIAN_LUO,
            SkillKind::XianFaZhiRen => &XIAN_FA_ZHI_REN,
            SkillKind::JiangJiJiuJi => &JIANG_JI_JIU_JI,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.def().name
    }
}

impl std::fmt::Display for SkillKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "【{}】", self.name())
    }
}

/// Addresses one skill: the player holding it and its slot on the role card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SkillRef {
    pub player: PlayerId,
    pub slot: usize,
}

impl SkillRef {
    #[must_use]
    pub const fn new(player: PlayerId, slot: usize) -> Self {
        Self { player, slot }
    }
}

/// A skill instance on a role card.
///
/// Each instance has its own [`OwnerId`], used for every bus registration
/// it makes while subscribed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skill {
    kind: SkillKind,
    owner: OwnerId,
    subscribed: bool,
    usage_count: u32,
}

impl Skill {
    #[must_use]
    pub fn new(kind: SkillKind) -> Self {
        Self {
            kind,
            owner: OwnerId::fresh(),
            subscribed: false,
            usage_count: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SkillKind {
        self.kind
    }

    #[must_use]
    pub fn def(&self) -> &'static SkillDef {
        self.kind.def()
    }

    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Whether the skill's handlers are currently registered.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub(crate) fn set_subscribed(&mut self, subscribed: bool) {
        self.subscribed = subscribed;
    }

    #[must_use]
    pub fn usage_count(&self) -> u32 {
        self.usage_count
    }

    pub(crate) fn record_use(&mut self) {
        self.usage_count += 1;
    }

    pub(crate) fn reset_usage(&mut self) {
        self.usage_count = 0;
    }

    /// Has the per-turn limit been reached?
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.def()
            .uses_per_turn
            .is_some_and(|limit| self.usage_count >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owners_are_distinct() {
        let a = Skill::new(SkillKind::JinBi);
        let b = Skill::new(SkillKind::JinBi);
        assert_ne!(a.owner(), b.owner());
    }

    #[test]
    fn test_usage_limit() {
        let mut skill = Skill::new(SkillKind::JinBi);
        assert!(!skill.exhausted());
        skill.record_use();
        assert!(skill.exhausted());
        skill.reset_usage();
        assert!(!skill.exhausted());

        let mut unlimited = Skill::new(SkillKind::XianFaZhiRen);
        unlimited.record_use();
        unlimited.record_use();
        assert!(!unlimited.exhausted());
    }

    #[test]
    fn test_defs() {
        for kind in SkillKind::ALL {
            let def = kind.def();
            if def.role == SkillRole::Active {
                assert!(!def.usable_phases.is_empty(), "{kind} has no phase");
            }
        }
        assert!(SkillKind::XianFaZhiRen.def().hidden_capable);
        assert_eq!(SkillKind::JinBi.to_string(), "【禁闭】");
    }
}
