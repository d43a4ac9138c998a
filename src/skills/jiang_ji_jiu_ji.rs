//! 将计就计: passive; the server resolves it and tells us it fired.

use crate::events::{GameEvent, HandlerResult};
use crate::net::{ServerMessage, ServerMessageKind};
use crate::session::GameSession;

use super::dispatch::SkillHandlers;
use super::skill::{SkillKind, SkillRef};

pub(super) static HANDLERS: SkillHandlers = SkillHandlers {
    channels: &[ServerMessageKind::SkillJiangJiJiuJi],
    init_extra: None,
    on_trigger: None,
    on_use: None,
    on_prompt: None,
    on_effect,
};

fn on_effect(session: &mut GameSession, _skill: SkillRef, message: &ServerMessage) -> HandlerResult {
    let ServerMessage::SkillJiangJiJiuJi { player } = message else {
        return Ok(());
    };
    session.publish(GameEvent::SkillUsed {
        player: *player,
        skill: SkillKind::JiangJiJiuJi,
    })?;
    let text = format!("{}发动了【将计就计】", session.player_label(*player));
    session.log.add_entry(text);
    session.publish(GameEvent::SkillHandleFinished {
        player: *player,
        skill: SkillKind::JiangJiJiuJi,
    })
}
