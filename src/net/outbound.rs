//! Client-to-server requests.

use serde::{Deserialize, Serialize};

use crate::core::entity::{CardId, CharacterId};
use crate::core::player::PlayerId;
use crate::events::BusEvent;
use crate::phase::Seq;

/// A request stamped with the client's last applied seq.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outbound {
    pub seq: Seq,
    pub request: ClientRequest,
}

/// Outbound catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientRequest {
    SelectRole {
        role: CharacterId,
    },
    GameInitFinished,
    EndReceivePhase,
    UseChengQing {
        card: CardId,
        target: PlayerId,
        target_card: CardId,
    },
    SkillJinBiA {
        target: PlayerId,
    },
    /// Empty `cards` refuses to hand anything over.
    SkillJinBiB {
        cards: Vec<CardId>,
    },
    SkillJiuJiA {
        enable: bool,
    },
    SkillLianLuo {
        card: CardId,
    },
    SkillXianFaZhiRenA {
        enable: bool,
        target: Option<PlayerId>,
        card: Option<CardId>,
    },
    SkillXianFaZhiRenB {
        target: PlayerId,
        face_up: bool,
    },
}

/// Channel of an [`Outbound`] request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientRequestKind {
    SelectRole,
    GameInitFinished,
    EndReceivePhase,
    UseChengQing,
    SkillJinBiA,
    SkillJinBiB,
    SkillJiuJiA,
    SkillLianLuo,
    SkillXianFaZhiRenA,
    SkillXianFaZhiRenB,
}

impl ClientRequest {
    #[must_use]
    pub fn kind(&self) -> ClientRequestKind {
        match self {
            ClientRequest::SelectRole { .. } => ClientRequestKind::SelectRole,
            ClientRequest::GameInitFinished => ClientRequestKind::GameInitFinished,
            ClientRequest::EndReceivePhase => ClientRequestKind::EndReceivePhase,
            ClientRequest::UseChengQing { .. } => ClientRequestKind::UseChengQing,
            ClientRequest::SkillJinBiA { .. } => ClientRequestKind::SkillJinBiA,
            ClientRequest::SkillJinBiB { .. } => ClientRequestKind::SkillJinBiB,
            ClientRequest::SkillJiuJiA { .. } => ClientRequestKind::SkillJiuJiA,
            ClientRequest::SkillLianLuo { .. } => ClientRequestKind::SkillLianLuo,
            ClientRequest::SkillXianFaZhiRenA { .. } => ClientRequestKind::SkillXianFaZhiRenA,
            ClientRequest::SkillXianFaZhiRenB { .. } => ClientRequestKind::SkillXianFaZhiRenB,
        }
    }
}

impl BusEvent for Outbound {
    type Channel = ClientRequestKind;

    fn channel(&self) -> ClientRequestKind {
        self.request.kind()
    }
}
