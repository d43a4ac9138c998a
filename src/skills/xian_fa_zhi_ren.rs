//! 先发制人: flip this role card, discard one message from any message
//! zone, then nullify a role card's skills until the receive phase ends,
//! optionally revealing it.
//!
//! Usable from a face-down card during the fight phase, and offered by
//! the server after a card is placed into a message zone by a skill.

use crate::action::{Button, ButtonAction, Requirement, StepValue};
use crate::cards::Card;
use crate::characters::CharacterStatus;
use crate::core::player::PlayerId;
use crate::events::{GameEvent, GameEventKind, HandlerResult, UiEvent, WaitingType};
use crate::net::{ClientRequest, ServerMessage, ServerMessageKind};
use crate::phase::GamePhase;
use crate::session::{GameSession, SessionChain};
use crate::zones::Zone;

use super::dispatch::{self, SkillHandlers, SkillPrompt, TriggerOffer};
use super::skill::{SkillKind, SkillRef};

pub(super) static HANDLERS: SkillHandlers = SkillHandlers {
    channels: &[
        ServerMessageKind::WaitForSkillXianFaZhiRenA,
        ServerMessageKind::SkillXianFaZhiRenA,
        ServerMessageKind::SkillXianFaZhiRenB,
    ],
    init_extra: None,
    on_trigger: Some(on_trigger),
    on_use: Some(on_use),
    on_prompt: Some(on_prompt),
    on_effect,
};

fn decline(session: &mut GameSession) {
    session.send_intent(ClientRequest::SkillXianFaZhiRenA {
        enable: false,
        target: None,
        card: None,
    });
}

fn on_trigger(session: &mut GameSession, skill: SkillRef, offer: &TriggerOffer) {
    if *offer != TriggerOffer::XianFaZhiRen {
        return;
    }
    let chain = SessionChain::new()
        .add_step(|session, _, _| {
            session.prompt_text("是否使用【先发制人】？");
            session.prompt_buttons(vec![
                Button::new("确定", ButtonAction::Next(StepValue::Confirmed)),
                Button::new("取消", ButtonAction::Next(StepValue::Choice(false))),
            ]);
        })
        .on_complete(move |session, results| match results.first() {
            Some(StepValue::Confirmed) => choose_message(session, skill, true),
            _ => decline(session),
        });
    session.begin_interaction(chain);
}

fn on_use(session: &mut GameSession, skill: SkillRef) {
    choose_message(session, skill, false);
}

/// Pick a player with messages, then one of their messages.
fn choose_message(session: &mut GameSession, _skill: SkillRef, offered: bool) {
    let holders: Vec<PlayerId> = session
        .data
        .players()
        .iter()
        .filter(|(_, player)| !player.messages().is_empty())
        .map(|(id, _)| id)
        .collect();
    if holders.is_empty() {
        session.end_interaction();
        session.prompt_text("场上没有情报，不能使用【先发制人】");
        if offered {
            decline(session);
        }
        return;
    }

    let chain = SessionChain::new()
        .add_step(move |session, _, _| {
            session.prompt_text("请选择一名角色");
            session.select_players(1, holders.clone());
            session.prompt_buttons(vec![
                Button::new("确定", ButtonAction::NextWithPlayer).requires(Requirement::Players(1)),
                Button::back("取消"),
            ]);
        })
        .add_step(|session, results, _| {
            let messages: Vec<_> = results
                .first()
                .and_then(StepValue::player)
                .and_then(|player| session.data().player(player).ok())
                .map(|player| player.messages().iter().map(Card::id).collect())
                .unwrap_or_default();
            session.prompt_text("请选择一张情报弃置");
            session.select_cards(1, messages);
            session.prompt_buttons(vec![
                Button::new("确定", ButtonAction::NextWithCards).requires(Requirement::Cards(1)),
                Button::back("返回"),
            ]);
        })
        .on_complete(|session, results| {
            let target = results.first().and_then(StepValue::player);
            let card = results.get(1).and_then(|v| v.cards().first().copied());
            session.send_intent(ClientRequest::SkillXianFaZhiRenA {
                enable: true,
                target,
                card,
            });
        })
        .on_cancel(move |session| {
            if offered {
                decline(session);
            }
        });
    session.begin_interaction(chain);
}

fn on_prompt(session: &mut GameSession, _skill: SkillRef, prompt: &SkillPrompt) {
    if *prompt != SkillPrompt::XianFaZhiRenB {
        return;
    }
    let candidates: Vec<PlayerId> = session
        .data
        .players()
        .iter()
        .filter(|(_, player)| player.is_alive())
        .map(|(id, _)| id)
        .collect();

    let chain = SessionChain::new()
        .add_step(move |session, _, _| {
            session.prompt_text("请选择一张角色牌，令其本回合所有技能无效");
            session.select_players(1, candidates.clone());
            session.prompt_buttons(vec![
                Button::new("确定", ButtonAction::NextWithPlayer).requires(Requirement::Players(1))
            ]);
        })
        .add_step(|session, results, controls| {
            let face_down = results
                .first()
                .and_then(StepValue::player)
                .and_then(|player| session.data().player(player).ok())
                .is_some_and(|player| player.character().status() == CharacterStatus::FaceDown);
            if !face_down {
                controls.next(StepValue::Choice(false));
                return;
            }
            session.prompt_text("是否翻开该角色牌？");
            session.prompt_buttons(vec![
                Button::new("翻开", ButtonAction::Next(StepValue::Choice(true))),
                Button::new("不翻开", ButtonAction::Next(StepValue::Choice(false))),
                Button::back("返回"),
            ]);
        })
        .on_complete(|session, results| {
            let target = results.first().and_then(StepValue::player);
            let face_up = results.get(1).and_then(StepValue::choice).unwrap_or(false);
            if let Some(target) = target {
                session.send_intent(ClientRequest::SkillXianFaZhiRenB { target, face_up });
            }
        });
    session.begin_interaction(chain);
}

fn nullify_until_receive_ends(session: &mut GameSession, target: PlayerId) -> HandlerResult {
    session.set_skills_nullified(target, true)?;
    if target.is_local() {
        session.data.restrictions.skill_banned = true;
        session.publish_ui(UiEvent::BannedIconShown(target))?;
    }
    let receive_ended = GameEventKind::PhaseEnded(GamePhase::Receive);
    session.hub.game.once(receive_ended, None, move |session: &mut GameSession, _: &GameEvent| {
        if target.is_local() {
            session.data.restrictions.skill_banned = false;
            session.publish_ui(UiEvent::BannedIconHidden(target))?;
        }
        session.set_skills_nullified(target, false)
    });
    Ok(())
}

fn on_effect(session: &mut GameSession, skill: SkillRef, message: &ServerMessage) -> HandlerResult {
    match message {
        ServerMessage::WaitForSkillXianFaZhiRenA { player, waiting_second } => {
            session.start_countdown(*player, *waiting_second, WaitingType::UseSkill)?;
            if player.is_local() {
                dispatch::on_trigger(session, skill, &TriggerOffer::XianFaZhiRen)?;
            }
            Ok(())
        }

        ServerMessage::SkillXianFaZhiRenA {
            enable,
            player,
            target,
            card,
            waiting_second,
        } => {
            if !enable {
                return Ok(());
            }
            session.publish(GameEvent::SkillUsed {
                player: *player,
                skill: SkillKind::XianFaZhiRen,
            })?;
            session.set_character_status(*player, CharacterStatus::FaceUp)?;
            let mut text = format!("{}使用技能【先发制人】", session.player_label(*player));
            if let (Some(target), Some(card)) = (target, card) {
                let removed = session.remove_messages(*target, &[*card])?;
                session.discard(removed, Zone::Message(*target))?;
                text = format!("{}，弃置了{}的一张情报", text, session.player_label(*target));
            }
            session.log.add_entry(text);
            session.start_countdown(*player, *waiting_second, WaitingType::HandleSkill)?;
            if player.is_local() {
                dispatch::on_prompt(session, skill, &SkillPrompt::XianFaZhiRenB)?;
            }
            Ok(())
        }

        ServerMessage::SkillXianFaZhiRenB {
            player,
            target,
            face_up,
        } => {
            session.data.player(*target)?;
            nullify_until_receive_ends(session, *target)?;
            let mut text = format!(
                "{}令{}的技能本回合无效",
                session.player_label(*player),
                session.player_label(*target)
            );
            if *face_up {
                text.push_str("，并翻开了其角色牌");
            }
            session.log.add_entry(text);
            session.publish(GameEvent::SkillHandleFinished {
                player: *player,
                skill: SkillKind::XianFaZhiRen,
            })
        }

        _ => Ok(()),
    }
}
