//! 就计: when targeted by certain cards, flip and draw; the card that
//! triggered it later joins the holder's hand.

use crate::action::{Button, ButtonAction, StepValue};
use crate::events::{GameEvent, HandlerResult, WaitingType};
use crate::net::{ClientRequest, ServerMessage, ServerMessageKind};
use crate::session::{GameSession, SessionChain};

use super::dispatch::{self, SkillHandlers, TriggerOffer};
use super::skill::{SkillKind, SkillRef};

pub(super) static HANDLERS: SkillHandlers = SkillHandlers {
    channels: &[
        ServerMessageKind::SkillWaitForJiuJi,
        ServerMessageKind::SkillJiuJiA,
        ServerMessageKind::SkillJiuJiB,
    ],
    init_extra: None,
    on_trigger: Some(on_trigger),
    on_use: None,
    on_prompt: None,
    on_effect,
};

fn on_trigger(session: &mut GameSession, _skill: SkillRef, offer: &TriggerOffer) {
    let TriggerOffer::JiuJi { from, card_type } = offer else {
        return;
    };
    let text = format!(
        "{}对你使用【{}】，是否使用【就计】？",
        session.player_label(*from),
        card_type
    );

    let chain = SessionChain::new()
        .add_step(move |session, _, _| {
            session.prompt_text(text.clone());
            session.prompt_buttons(vec![
                Button::new("确定", ButtonAction::Next(StepValue::Choice(true))),
                Button::new("取消", ButtonAction::Next(StepValue::Choice(false))),
            ]);
        })
        .on_complete(|session, results| {
            let enable = results.first().and_then(StepValue::choice).unwrap_or(false);
            session.send_intent(ClientRequest::SkillJiuJiA { enable });
        });
    session.begin_interaction(chain);
}

fn on_effect(session: &mut GameSession, skill: SkillRef, message: &ServerMessage) -> HandlerResult {
    match message {
        ServerMessage::SkillWaitForJiuJi {
            player,
            from,
            card_type,
            waiting_second,
        } => {
            session.data.player(*from)?;
            session.start_countdown(*player, *waiting_second, WaitingType::UseSkill)?;
            if player.is_local() {
                let offer = TriggerOffer::JiuJi {
                    from: *from,
                    card_type: *card_type,
                };
                dispatch::on_trigger(session, skill, &offer)?;
            }
            Ok(())
        }

        ServerMessage::SkillJiuJiA { player } => {
            let text = format!("{}使用技能【就计】", session.player_label(*player));
            session.log.add_entry(text);
            session.publish(GameEvent::SkillUsed {
                player: *player,
                skill: SkillKind::JiuJi,
            })
        }

        ServerMessage::SkillJiuJiB { player, card } => {
            if let Some(card) = card {
                session.return_from_discard(*player, card.id)?;
                let text = format!(
                    "{}把【{}】加入手牌",
                    session.player_label(*player),
                    card.kind
                );
                session.log.add_entry(text);
            }
            session.publish(GameEvent::SkillHandleFinished {
                player: *player,
                skill: SkillKind::JiuJi,
            })
        }

        _ => Ok(()),
    }
}
