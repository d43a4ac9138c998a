//! Server-to-client messages.

use serde::{Deserialize, Serialize};

use crate::cards::{CardData, CardDirection, CardType};
use crate::characters::{IdentityType, SecretTask};
use crate::core::entity::{CardId, CharacterId};
use crate::core::player::PlayerId;
use crate::events::BusEvent;
use crate::phase::{GamePhase, Seq};

/// A server message plus its optional sequence number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub seq: Option<Seq>,
    pub body: ServerMessage,
}

impl InboundMessage {
    /// A message the server ordered with `seq`.
    #[must_use]
    pub fn sequenced(seq: u64, body: ServerMessage) -> Self {
        Self {
            seq: Some(Seq(seq)),
            body,
        }
    }

    /// A message with no ordering information.
    #[must_use]
    pub fn unsequenced(body: ServerMessage) -> Self {
        Self { seq: None, body }
    }
}

/// A seat's role card as dealt. Hidden roles arrive as
/// [`CharacterId::UNKNOWN`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCard {
    pub role: CharacterId,
    pub face_up: bool,
}

impl RoleCard {
    #[must_use]
    pub const fn new(role: CharacterId, face_up: bool) -> Self {
        Self { role, face_up }
    }

    /// A role card this client cannot see.
    #[must_use]
    pub const fn hidden() -> Self {
        Self::new(CharacterId::UNKNOWN, false)
    }
}

/// Inbound catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerMessage {
    // === Lifecycle ===
    WaitForSelectRole {
        identity: IdentityType,
        task: Option<SecretTask>,
        candidates: Vec<CharacterId>,
        waiting_second: u32,
    },
    SelectRoleConfirmed {
        role: CharacterId,
    },
    InitGame {
        player_count: usize,
        roles: Vec<RoleCard>,
    },
    NotifyPhase {
        current_player: PlayerId,
        phase: GamePhase,
        waiting_player: Option<PlayerId>,
        waiting_second: u32,
        /// The message in flight is now offered to `waiting_player`;
        /// carries the player who passed it on.
        message_player: Option<PlayerId>,
        /// Identity of the message in flight, when it is revealed to us.
        message_card: Option<CardData>,
    },
    SyncDeckNum {
        num: u32,
        shuffled: bool,
    },
    NotifyRoleUpdate {
        player: PlayerId,
        role: CharacterId,
        face_up: bool,
    },
    NotifyDying {
        player: PlayerId,
    },
    NotifyDie {
        player: PlayerId,
    },
    NotifyWinner {
        winners: Vec<PlayerId>,
    },

    // === Zones ===
    /// Cards drawn from the deck. `cards` are revealed to us, the rest are
    /// counted in `unknown_count`.
    AddCard {
        player: PlayerId,
        cards: Vec<CardData>,
        unknown_count: u32,
    },
    DiscardCard {
        player: PlayerId,
        cards: Vec<CardData>,
    },
    UseCard {
        player: PlayerId,
        target: Option<PlayerId>,
        card: CardData,
    },
    SendMessageCard {
        sender: PlayerId,
        target: PlayerId,
        /// Present only when the sender is us or the card is sent face up.
        card: Option<CardData>,
        direction: CardDirection,
    },
    TransmitMessage {
        holder: PlayerId,
    },
    NotifyReceive {
        player: PlayerId,
        card: CardData,
    },

    // === Cards ===
    UseChengQing {
        player: PlayerId,
        target: PlayerId,
        card: CardData,
        target_card: CardId,
    },

    // === Skills ===
    SkillJinBiA {
        player: PlayerId,
        target: PlayerId,
        waiting_second: u32,
    },
    SkillJinBiB {
        player: PlayerId,
        target: PlayerId,
        cards: Vec<CardData>,
        unknown_count: u32,
    },
    SkillWaitForJiuJi {
        player: PlayerId,
        from: PlayerId,
        card_type: CardType,
        waiting_second: u32,
    },
    SkillJiuJiA {
        player: PlayerId,
    },
    SkillJiuJiB {
        player: PlayerId,
        card: Option<CardData>,
    },
    SkillLianLuo {
        player: PlayerId,
        target: PlayerId,
        card: CardData,
    },
    WaitForSkillXianFaZhiRenA {
        player: PlayerId,
        waiting_second: u32,
    },
    SkillXianFaZhiRenA {
        enable: bool,
        player: PlayerId,
        target: Option<PlayerId>,
        card: Option<CardId>,
        waiting_second: u32,
    },
    SkillXianFaZhiRenB {
        player: PlayerId,
        target: PlayerId,
        face_up: bool,
    },
    SkillJiangJiJiuJi {
        player: PlayerId,
    },
}

/// Channel of a [`ServerMessage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServerMessageKind {
    WaitForSelectRole,
    SelectRoleConfirmed,
    InitGame,
    NotifyPhase,
    SyncDeckNum,
    NotifyRoleUpdate,
    NotifyDying,
    NotifyDie,
    NotifyWinner,
    AddCard,
    DiscardCard,
    UseCard,
    SendMessageCard,
    TransmitMessage,
    NotifyReceive,
    UseChengQing,
    SkillJinBiA,
    SkillJinBiB,
    SkillWaitForJiuJi,
    SkillJiuJiA,
    SkillJiuJiB,
    SkillLianLuo,
    WaitForSkillXianFaZhiRenA,
    SkillXianFaZhiRenA,
    SkillXianFaZhiRenB,
    SkillJiangJiJiuJi,
}

impl ServerMessage {
    #[must_use]
    pub fn kind(&self) -> ServerMessageKind {
        use ServerMessage as M;
        use ServerMessageKind as K;
        match self {
            M::WaitForSelectRole { .. } => K::WaitForSelectRole,
            M::SelectRoleConfirmed { .. } => K::SelectRoleConfirmed,
            M::InitGame { .. } => K::InitGame,
            M::NotifyPhase { .. } => K::NotifyPhase,
            M::SyncDeckNum { .. } => K::SyncDeckNum,
            M::NotifyRoleUpdate { .. } => K::NotifyRoleUpdate,
            M::NotifyDying { .. } => K::NotifyDying,
            M::NotifyDie { .. } => K::NotifyDie,
            M::NotifyWinner { .. } => K::NotifyWinner,
            M::AddCard { .. } => K::AddCard,
            M::DiscardCard { .. } => K::DiscardCard,
            M::UseCard { .. } => K::UseCard,
            M::SendMessageCard { .. } => K::SendMessageCard,
            M::TransmitMessage { .. } => K::TransmitMessage,
            M::NotifyReceive { .. } => K::NotifyReceive,
            M::UseChengQing { .. } => K::UseChengQing,
            M::SkillJinBiA { .. } => K::SkillJinBiA,
            M::SkillJinBiB { .. } => K::SkillJinBiB,
            M::SkillWaitForJiuJi { .. } => K::SkillWaitForJiuJi,
            M::SkillJiuJiA { .. } => K::SkillJiuJiA,
            M::SkillJiuJiB { .. } => K::SkillJiuJiB,
            M::SkillLianLuo { .. } => K::SkillLianLuo,
            M::WaitForSkillXianFaZhiRenA { .. } => K::WaitForSkillXianFaZhiRenA,
            M::SkillXianFaZhiRenA { .. } => K::SkillXianFaZhiRenA,
            M::SkillXianFaZhiRenB { .. } => K::SkillXianFaZhiRenB,
            M::SkillJiangJiJiuJi { .. } => K::SkillJiangJiJiuJi,
        }
    }

    /// The player whose skill this message concerns.
    ///
    /// `None` for messages that are not skill messages.
    #[must_use]
    pub fn acting_player(&self) -> Option<PlayerId> {
        use ServerMessage as M;
        match self {
            M::SkillJinBiA { player, .. }
            | M::SkillJinBiB { player, .. }
            | M::SkillWaitForJiuJi { player, .. }
            | M::SkillJiuJiA { player }
            | M::SkillJiuJiB { player, .. }
            | M::SkillLianLuo { player, .. }
            | M::WaitForSkillXianFaZhiRenA { player, .. }
            | M::SkillXianFaZhiRenA { player, .. }
            | M::SkillXianFaZhiRenB { player, .. }
            | M::SkillJiangJiJiuJi { player } => Some(*player),
            _ => None,
        }
    }
}

impl BusEvent for ServerMessage {
    type Channel = ServerMessageKind;

    fn channel(&self) -> ServerMessageKind {
        self.kind()
    }
}
