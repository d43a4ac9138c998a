//! 禁闭: once per main phase, name a player. They either hand over two
//! hand cards or are confined until the receive phase ends.

use crate::action::{Button, ButtonAction, Requirement, StepValue};
use crate::cards::HandPick;
use crate::core::player::PlayerId;
use crate::events::{GameEvent, GameEventKind, HandlerResult, OwnerId, UiEvent, WaitingType};
use crate::net::{ClientRequest, ServerMessage, ServerMessageKind};
use crate::phase::GamePhase;
use crate::session::{GameSession, SessionChain};
use crate::zones::Zone;

use super::dispatch::{self, SkillHandlers, SkillPrompt};
use super::skill::{SkillKind, SkillRef};

pub(super) static HANDLERS: SkillHandlers = SkillHandlers {
    channels: &[ServerMessageKind::SkillJinBiA, ServerMessageKind::SkillJinBiB],
    init_extra: Some(init_extra),
    on_trigger: None,
    on_use: Some(on_use),
    on_prompt: Some(on_prompt),
    on_effect,
};

fn init_extra(session: &mut GameSession, skill: SkillRef, owner: OwnerId) {
    let main_ended = GameEventKind::PhaseEnded(GamePhase::Main);
    session.hub.game.on(main_ended, Some(owner), move |session: &mut GameSession, _: &GameEvent| {
        dispatch::skill_mut(&mut session.data, skill)?.reset_usage();
        Ok(())
    });
}

fn on_use(session: &mut GameSession, _skill: SkillRef) {
    let targets: Vec<PlayerId> = session
        .data
        .players()
        .iter()
        .filter(|(id, player)| !id.is_local() && player.is_alive())
        .map(|(id, _)| id)
        .collect();

    let chain = SessionChain::new()
        .add_step(move |session, _, _| {
            session.prompt_text("请选择一名角色");
            session.select_players(1, targets.clone());
            session.prompt_buttons(vec![
                Button::new("确定", ButtonAction::NextWithPlayer).requires(Requirement::Players(1)),
                Button::back("取消"),
            ]);
        })
        .on_complete(|session, results| {
            if let Some(target) = results.first().and_then(StepValue::player) {
                session.send_intent(ClientRequest::SkillJinBiA { target });
            }
        })
        .on_cancel(GameSession::prompt_play_hand_card);
    session.begin_interaction(chain);
}

fn on_prompt(session: &mut GameSession, _skill: SkillRef, prompt: &SkillPrompt) {
    let SkillPrompt::JinBiGive { to } = prompt else {
        return;
    };
    let text = format!("请选择两张手牌交给{}", session.player_label(*to));
    let hand = session.local_hand_ids();

    let chain = SessionChain::new()
        .add_step(move |session, _, _| {
            session.prompt_text(text.clone());
            session.select_cards(2, hand.clone());
            session.prompt_buttons(vec![
                Button::new("确定", ButtonAction::NextWithCards).requires(Requirement::Cards(2)),
                Button::new("取消", ButtonAction::Next(StepValue::Cards(Vec::new()))),
            ]);
        })
        .on_complete(|session, results| {
            let cards = results.first().map(|v| v.cards().to_vec()).unwrap_or_default();
            session.send_intent(ClientRequest::SkillJinBiB { cards });
        });
    session.begin_interaction(chain);
}

fn confine(session: &mut GameSession, target: PlayerId) -> HandlerResult {
    if target.is_local() {
        session.data.restrictions.confine();
    }
    session.publish_ui(UiEvent::BannedIconShown(target))?;
    let receive_ended = GameEventKind::PhaseEnded(GamePhase::Receive);
    session.hub.game.once(receive_ended, None, move |session: &mut GameSession, _: &GameEvent| {
        if target.is_local() {
            session.data.restrictions.lift();
        }
        session.publish_ui(UiEvent::BannedIconHidden(target))
    });
    Ok(())
}

fn on_effect(session: &mut GameSession, skill: SkillRef, message: &ServerMessage) -> HandlerResult {
    match message {
        ServerMessage::SkillJinBiA {
            player,
            target,
            waiting_second,
        } => {
            session.data.player(*target)?;
            session.publish(GameEvent::SkillUsed {
                player: *player,
                skill: SkillKind::JinBi,
            })?;
            session.start_countdown(*target, *waiting_second, WaitingType::HandleSkill)?;
            let text = format!(
                "{}使用技能【禁闭】，指定{}",
                session.player_label(*player),
                session.player_label(*target)
            );
            session.log.add_entry(text);
            if target.is_local() {
                dispatch::on_prompt(session, skill, &SkillPrompt::JinBiGive { to: *player })?;
            }
            Ok(())
        }

        ServerMessage::SkillJinBiB {
            player,
            target,
            cards,
            unknown_count,
        } => {
            if cards.is_empty() && *unknown_count == 0 {
                session.data.player(*target)?;
                confine(session, *target)?;
                let text = format!("{}被【禁闭】", session.player_label(*target));
                session.log.add_entry(text);
            } else {
                let picks: Vec<HandPick> = if *unknown_count > 0 {
                    vec![HandPick::Unknown; *unknown_count as usize]
                } else {
                    cards.iter().cloned().map(HandPick::Card).collect()
                };
                let given = session.remove_hand_cards(*target, &picks, Zone::Hand(*player))?;
                session.add_hand_cards(*player, given, Zone::Hand(*target))?;
                let text = format!(
                    "{}交给{}两张手牌",
                    session.player_label(*target),
                    session.player_label(*player)
                );
                session.log.add_entry(text);
            }
            dispatch::skill_mut(&mut session.data, skill)?.record_use();
            session.publish(GameEvent::SkillHandleFinished {
                player: *player,
                skill: SkillKind::JinBi,
            })
        }

        _ => Ok(()),
    }
}
