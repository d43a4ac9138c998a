//! Card types - static per-type data.
//!
//! Every card in the deck is one of a fixed set of types. A type decides
//! the card's display name and in which phases it may be played from hand.

use serde::{Deserialize, Serialize};

use crate::phase::GamePhase;

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    ChengQing,
    ShiTan,
    WeiBi,
    LiYou,
    PingHeng,
    PoYi,
    JieHuo,
    DiaoBao,
    WuDao,
    FengYunBianHuan,
}

impl CardType {
    /// Every card type, in protocol order.
    pub const ALL: [CardType; 10] = [
        CardType::ChengQing,
        CardType::ShiTan,
        CardType::WeiBi,
        CardType::LiYou,
        CardType::PingHeng,
        CardType::PoYi,
        CardType::JieHuo,
        CardType::DiaoBao,
        CardType::WuDao,
        CardType::FengYunBianHuan,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardType::ChengQing => "澄清",
            CardType::ShiTan => "试探",
            CardType::WeiBi => "威逼",
            CardType::LiYou => "利诱",
            CardType::PingHeng => "平衡",
            CardType::PoYi => "破译",
            CardType::JieHuo => "截获",
            CardType::DiaoBao => "调包",
            CardType::WuDao => "误导",
            CardType::FengYunBianHuan => "风云变幻",
        }
    }

    /// Phases in which the card may be played from hand.
    #[must_use]
    pub const fn available_phases(self) -> &'static [GamePhase] {
        match self {
            CardType::ChengQing => &[GamePhase::Main, GamePhase::Receive],
            CardType::ShiTan
            | CardType::WeiBi
            | CardType::LiYou
            | CardType::PingHeng
            | CardType::FengYunBianHuan => &[GamePhase::Main],
            CardType::PoYi => &[GamePhase::Send],
            CardType::JieHuo | CardType::DiaoBao | CardType::WuDao => &[GamePhase::Fight],
        }
    }

    /// Can a card of this type be played in `phase`?
    #[must_use]
    pub fn playable_in(self, phase: GamePhase) -> bool {
        self.available_phases().contains(&phase)
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
