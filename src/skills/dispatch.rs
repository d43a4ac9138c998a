//! Skill capability table and subscription lifecycle.
//!
//! Each [`SkillKind`] maps to a static [`SkillHandlers`] entry: the
//! network channels its effects arrive on, optional extra subscriptions,
//! and the optional trigger, use and prompt hooks. Only `on_effect`
//! changes game state; the other hooks open an interaction whose
//! completion sends a request.
//!
//! `init` registers everything under the skill's own [`OwnerId`] and
//! `dispose` removes it with one `off_owner` call per bus, so the two
//! always pair up exactly. Disposing a skill that is not subscribed does
//! nothing.

use tracing::debug;

use crate::cards::{Card, CardType};
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::core::state::GameData;
use crate::events::{HandlerResult, OwnerId};
use crate::net::{ServerMessage, ServerMessageKind};
use crate::session::GameSession;

use super::skill::{Skill, SkillKind, SkillRef};
use super::{jiang_ji_jiu_ji, jin_bi, jiu_ji, lian_luo, xian_fa_zhi_ren};

/// Why a trigger skill is being offered to the local player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerOffer {
    /// `from` targeted us with a card of `card_type`.
    JiuJi { from: PlayerId, card_type: CardType },
    /// We just received this single-colour message.
    LianLuo { message: Card },
    /// The server offers a pre-emptive use.
    XianFaZhiRen,
}

/// A follow-up decision the server asked this client for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkillPrompt {
    /// Give two hand cards to `to`, or refuse and be confined.
    JinBiGive { to: PlayerId },
    /// Pick the role card whose skills are nullified.
    XianFaZhiRenB,
}

pub type EffectFn = fn(&mut GameSession, SkillRef, &ServerMessage) -> HandlerResult;

/// What one skill kind can do.
pub struct SkillHandlers {
    pub channels: &'static [ServerMessageKind],
    pub init_extra: Option<fn(&mut GameSession, SkillRef, OwnerId)>,
    pub on_trigger: Option<fn(&mut GameSession, SkillRef, &TriggerOffer)>,
    pub on_use: Option<fn(&mut GameSession, SkillRef)>,
    pub on_prompt: Option<fn(&mut GameSession, SkillRef, &SkillPrompt)>,
    pub on_effect: EffectFn,
}

#[must_use]
pub fn handlers(kind: SkillKind) -> &'static SkillHandlers {
    match kind {
        SkillKind::JinBi => &jin_bi::HANDLERS,
        SkillKind::JiuJi => &jiu_ji::HANDLERS,
        SkillKind::LianLuo => &lian_luo::HANDLERS,
        SkillKind::XianFaZhiRen => &xian_fa_zhi_ren::HANDLERS,
        SkillKind::JiangJiJiuJi => &jiang_ji_jiu_ji::HANDLERS,
    }
}

fn unknown(skill: SkillRef) -> GameError {
    GameError::UnknownSkill {
        player: skill.player,
        slot: skill.slot,
    }
}

pub(crate) fn skill(data: &GameData, skill: SkillRef) -> Result<&Skill, GameError> {
    data.player(skill.player)?
        .character()
        .skill(skill.slot)
        .ok_or_else(|| unknown(skill))
}

pub(crate) fn skill_mut(data: &mut GameData, skill: SkillRef) -> Result<&mut Skill, GameError> {
    data.player_mut(skill.player)?
        .character_mut()
        .skill_mut(skill.slot)
        .ok_or_else(|| unknown(skill))
}

/// Subscribe a skill's handlers. A subscribed skill is left alone.
pub fn init(session: &mut GameSession, target: SkillRef) -> HandlerResult {
    let current = skill(&session.data, target)?;
    if current.is_subscribed() {
        return Ok(());
    }
    let kind = current.kind();
    let owner = current.owner();
    let table = handlers(kind);

    let network = session.hub.network.clone();
    for &channel in table.channels {
        network.on(channel, Some(owner), move |session: &mut GameSession, message: &ServerMessage| {
            if message.acting_player() != Some(target.player) {
                return Ok(());
            }
            (table.on_effect)(session, target, message)
        });
    }
    if let Some(extra) = table.init_extra {
        extra(session, target, owner);
    }
    skill_mut(&mut session.data, target)?.set_subscribed(true);
    debug!(?kind, player = %target.player, %owner, "skill subscribed");
    Ok(())
}

/// Unsubscribe a skill's handlers. An unsubscribed skill is left alone.
pub fn dispose(session: &mut GameSession, target: SkillRef) -> HandlerResult {
    let current = skill_mut(&mut session.data, target)?;
    if !current.is_subscribed() {
        return Ok(());
    }
    current.set_subscribed(false);
    let kind = current.kind();
    let owner = current.owner();
    let removed = session.hub.off_owner(owner);
    debug!(?kind, player = %target.player, removed, "skill unsubscribed");
    Ok(())
}

fn slots(session: &GameSession, player: PlayerId) -> Result<usize, GameError> {
    Ok(session.data.player(player)?.character().skills().len())
}

/// Bring a player's subscriptions in line with their role card: skills
/// in play are subscribed, all others are not.
pub fn sync_player(session: &mut GameSession, player: PlayerId) -> HandlerResult {
    for slot in 0..slots(session, player)? {
        let holder = session.data.player(player)?;
        let wanted = holder.is_alive() && holder.character().skill_in_play(slot);
        let target = SkillRef::new(player, slot);
        if wanted {
            init(session, target)?;
        } else {
            dispose(session, target)?;
        }
    }
    Ok(())
}

/// Unsubscribe every skill on a player's role card.
pub fn dispose_player(session: &mut GameSession, player: PlayerId) -> HandlerResult {
    for slot in 0..slots(session, player)? {
        dispose(session, SkillRef::new(player, slot))?;
    }
    Ok(())
}

/// Unsubscribe every skill in the game.
pub fn dispose_all(session: &mut GameSession) {
    let players: Vec<PlayerId> = session.data.players().player_ids().collect();
    for player in players {
        if let Err(err) = dispose_player(session, player) {
            debug!(%err, "skill disposal skipped");
        }
    }
}

/// Run a skill's use hook. Returns `false` if the kind has none.
pub fn on_use(session: &mut GameSession, target: SkillRef) -> Result<bool, GameError> {
    let kind = skill(&session.data, target)?.kind();
    let Some(hook) = handlers(kind).on_use else {
        return Ok(false);
    };
    hook(session, target);
    Ok(true)
}

/// Offer a trigger skill. Returns `false` if the kind has no trigger.
pub fn on_trigger(session: &mut GameSession, target: SkillRef, offer: &TriggerOffer) -> Result<bool, GameError> {
    let kind = skill(&session.data, target)?.kind();
    let Some(hook) = handlers(kind).on_trigger else {
        return Ok(false);
    };
    hook(session, target, offer);
    Ok(true)
}

/// Run a skill's server-requested follow-up.
pub fn on_prompt(session: &mut GameSession, target: SkillRef, prompt: &SkillPrompt) -> Result<bool, GameError> {
    let kind = skill(&session.data, target)?.kind();
    let Some(hook) = handlers(kind).on_prompt else {
        return Ok(false);
    };
    hook(session, target, prompt);
    Ok(true)
}
