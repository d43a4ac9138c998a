//! 联络: after receiving a single-colour message, put a hand card of
//! another colour into the sender's message zone. Declining ends the
//! receive phase.

use crate::action::{Button, ButtonAction, Requirement, StepValue};
use crate::cards::{Card, HandPick};
use crate::events::{GameEvent, GameEventKind, HandlerResult, OwnerId};
use crate::net::{ClientRequest, ServerMessage, ServerMessageKind};
use crate::phase::GamePhase;
use crate::session::{GameLog, GameSession, SessionChain};
use crate::zones::Zone;

use super::dispatch::{self, SkillHandlers, TriggerOffer};
use super::skill::{SkillKind, SkillRef};

pub(super) static HANDLERS: SkillHandlers = SkillHandlers {
    channels: &[ServerMessageKind::SkillLianLuo],
    init_extra: Some(init_extra),
    on_trigger: Some(on_trigger),
    on_use: None,
    on_prompt: None,
    on_effect,
};

fn init_extra(session: &mut GameSession, skill: SkillRef, owner: OwnerId) {
    session.hub.game.on(
        GameEventKind::MessagePlaced,
        Some(owner),
        move |session: &mut GameSession, event: &GameEvent| {
            let GameEvent::MessagePlaced {
                player,
                card,
                from: Zone::InTransit,
            } = event
            else {
                return Ok(());
            };
            if *player == skill.player
                && player.is_local()
                && session.data.phase.is(GamePhase::Receive)
                && card.is_single_color()
            {
                let offer = TriggerOffer::LianLuo {
                    message: card.clone(),
                };
                dispatch::on_trigger(session, skill, &offer)?;
            }
            Ok(())
        },
    );
}

fn on_trigger(session: &mut GameSession, _skill: SkillRef, offer: &TriggerOffer) {
    let TriggerOffer::LianLuo { message } = offer else {
        return;
    };
    let eligible: Vec<_> = session
        .local_hand()
        .iter()
        .filter(|card| !message.colors().iter().any(|&color| card.has_color(color)))
        .map(Card::id)
        .collect();

    let chain = SessionChain::new()
        .add_step(|session, _, _| {
            session.prompt_text("你接收了单色情报，是否使用【联络】？");
            session.prompt_buttons(vec![
                Button::new("确定", ButtonAction::Next(StepValue::Confirmed)),
                Button::back("取消"),
            ]);
        })
        .add_step(move |session, _, _| {
            session.prompt_text("请选择一张与该情报颜色不同的手牌");
            session.select_cards(1, eligible.clone());
            session.prompt_buttons(vec![
                Button::new("确定", ButtonAction::NextWithCards).requires(Requirement::Cards(1)),
                Button::back("返回"),
            ]);
        })
        .on_complete(|session, results| {
            if let Some(&card) = results.get(1).and_then(|v| v.cards().first()) {
                session.send_intent(ClientRequest::SkillLianLuo { card });
            }
        })
        .on_cancel(|session| session.send_intent(ClientRequest::EndReceivePhase));
    session.begin_interaction(chain);
}

fn on_effect(session: &mut GameSession, _skill: SkillRef, message: &ServerMessage) -> HandlerResult {
    let ServerMessage::SkillLianLuo { player, target, card } = message else {
        return Ok(());
    };
    session.data.player(*target)?;
    session.publish(GameEvent::SkillUsed {
        player: *player,
        skill: SkillKind::LianLuo,
    })?;
    let taken = session.remove_hand_cards(*player, &[HandPick::Card(card.clone())], Zone::Message(*target))?;
    for placed in taken.into_iter().filter_map(|c| c.into_known()) {
        let placed = session.add_message(*target, placed, Zone::Hand(*player))?;
        let text = format!(
            "{}使用技能【联络】，将手牌{}置入{}的情报区",
            session.player_label(*player),
            GameLog::format_card(&placed.into()),
            session.player_label(*target)
        );
        session.log.add_entry(text);
    }
    session.publish(GameEvent::SkillHandleFinished {
        player: *player,
        skill: SkillKind::LianLuo,
    })
}
