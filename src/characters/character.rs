//! Role cards.
//!
//! A character is dealt face down or face up and may flip during play.
//! It owns its skills; whether a skill is listening for events depends on
//! whether the character is known to this client and on its face.

use serde::{Deserialize, Serialize};

use crate::core::entity::CharacterId;
use crate::skills::{Skill, SkillKind};

/// Which face of the role card is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterStatus {
    FaceUp,
    FaceDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// Roster of role cards this client knows how to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    /// Not visible to this client.
    Hidden,

    // === Skill-less ===
    XuanQingZi,
    ShaoXiu,
    LaoHan,
    BaiXiaoNian,

    // === With skills ===
    WangTianXiang,
    LaoBie,
    LiNingYu,
    JianXianSheng,
    XiaoJiu,

    /// A character the server named but the roster does not model.
    Unlisted(CharacterId),
}

impl CharacterKind {
    /// Map a server character id onto the roster.
    #[must_use]
    pub fn from_id(id: CharacterId) -> Self {
        match id.raw() {
            0 => CharacterKind::Hidden,
            7 => CharacterKind::WangTianXiang,
            9 => CharacterKind::LaoBie,
            16 => CharacterKind::XuanQingZi,
            18 => CharacterKind::ShaoXiu,
            24 => CharacterKind::LaoHan,
            25 => CharacterKind::BaiXiaoNian,
            26 => CharacterKind::LiNingYu,
            27 => CharacterKind::JianXianSheng,
            29 => CharacterKind::XiaoJiu,
            _ => CharacterKind::Unlisted(id),
        }
    }

    #[must_use]
    pub fn id(self) -> CharacterId {
        match self {
            CharacterKind::Hidden => CharacterId::UNKNOWN,
            CharacterKind::WangTianXiang => CharacterId(7),
            CharacterKind::LaoBie => CharacterId(9),
            CharacterKind::XuanQingZi => CharacterId(16),
            CharacterKind::ShaoXiu => CharacterId(18),
            CharacterKind::LaoHan => CharacterId(24),
            CharacterKind::BaiXiaoNian => CharacterId(25),
            CharacterKind::LiNingYu => CharacterId(26),
            CharacterKind::JianXianSheng => CharacterId(27),
            CharacterKind::XiaoJiu => CharacterId(29),
            CharacterKind::Unlisted(id) => id,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CharacterKind::Hidden => "未知角色",
            CharacterKind::XuanQingZi => "玄青子",
            CharacterKind::ShaoXiu => "邵秀",
            CharacterKind::LaoHan => "老汉",
            CharacterKind::BaiXiaoNian => "白小年",
            CharacterKind::WangTianXiang => "王田香",
            CharacterKind::LaoBie => "老鳖",
            CharacterKind::LiNingYu => "李宁玉",
            CharacterKind::JianXianSheng => "简先生",
            CharacterKind::XiaoJiu => "小九",
            CharacterKind::Unlisted(_) => "未收录角色",
        }
    }

    /// `None` for hidden or unlisted characters.
    #[must_use]
    pub fn sex(self) -> Option<Sex> {
        match self {
            CharacterKind::XuanQingZi
            | CharacterKind::BaiXiaoNian
            | CharacterKind::WangTianXiang
            | CharacterKind::LaoBie
            | CharacterKind::JianXianSheng => Some(Sex::Male),
            CharacterKind::ShaoXiu
            | CharacterKind::LaoHan
            | CharacterKind::LiNingYu
            | CharacterKind::XiaoJiu => Some(Sex::Female),
            CharacterKind::Hidden | CharacterKind::Unlisted(_) => None,
        }
    }

    /// Skills printed on the role card, in slot order.
    #[must_use]
    pub fn skills(self) -> &'static [SkillKind] {
        match self {
            CharacterKind::WangTianXiang => &[SkillKind::JinBi],
            CharacterKind::LaoBie => &[SkillKind::LianLuo],
            CharacterKind::LiNingYu => &[SkillKind::XianFaZhiRen],
            CharacterKind::JianXianSheng => &[SkillKind::JiangJiJiuJi],
            CharacterKind::XiaoJiu => &[SkillKind::JiuJi],
            _ => &[],
        }
    }
}

/// A seated player's role card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Character {
    kind: CharacterKind,
    status: CharacterStatus,
    skills: Vec<Skill>,
    nullified: bool,
}

impl Character {
    /// Build a character with fresh, unsubscribed skills.
    #[must_use]
    pub fn new(kind: CharacterKind, status: CharacterStatus) -> Self {
        Self {
            kind,
            status,
            skills: kind.skills().iter().map(|&k| Skill::new(k)).collect(),
            nullified: false,
        }
    }

    /// A face-down role card this client cannot see.
    #[must_use]
    pub fn hidden() -> Self {
        Self::new(CharacterKind::Hidden, CharacterStatus::FaceDown)
    }

    #[must_use]
    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    #[must_use]
    pub fn status(&self) -> CharacterStatus {
        self.status
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        self.kind != CharacterKind::Hidden
    }

    /// Set the face. Returns `true` if it changed.
    pub fn set_status(&mut self, status: CharacterStatus) -> bool {
        let changed = self.status != status;
        self.status = status;
        changed
    }

    /// Are this card's skills switched off for now?
    #[must_use]
    pub fn is_nullified(&self) -> bool {
        self.nullified
    }

    /// Returns `true` if the flag changed.
    pub fn set_nullified(&mut self, nullified: bool) -> bool {
        let changed = self.nullified != nullified;
        self.nullified = nullified;
        changed
    }

    #[must_use]
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    #[must_use]
    pub fn skill(&self, slot: usize) -> Option<&Skill> {
        self.skills.get(slot)
    }

    pub fn skill_mut(&mut self, slot: usize) -> Option<&mut Skill> {
        self.skills.get_mut(slot)
    }

    /// Should the skill in `slot` currently be listening for events?
    ///
    /// Skills work while the character is known and face up. Skills that
    /// can be used from a face-down card also work while face down.
    /// Nothing works while the card is nullified.
    #[must_use]
    pub fn skill_in_play(&self, slot: usize) -> bool {
        let Some(skill) = self.skills.get(slot) else {
            return false;
        };
        self.is_known()
            && !self.nullified
            && (self.status == CharacterStatus::FaceUp || skill.kind().def().hidden_capable)
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind.name())
    }
}
