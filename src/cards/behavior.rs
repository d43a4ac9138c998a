//! Card behaviour table.
//!
//! Most function cards resolve entirely on the server; the client only
//! moves them from hand to the discard pile. A card that needs the player
//! to choose targets before it is played gets an interaction here, and an
//! `on_effect` for its confirmation.

use crate::action::{Button, ButtonAction, Requirement, StepValue};
use crate::core::entity::CardId;
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::events::HandlerResult;
use crate::net::{ClientRequest, ServerMessage};
use crate::session::{GameLog, GameSession, SessionChain};
use crate::zones::Zone;

use super::attributes::CardColor;
use super::definition::CardType;
use super::instance::{Card, CardData};

/// Open the play interaction for `card`.
///
/// Returns `false` for card types without one.
pub fn on_selected_to_play(session: &mut GameSession, card: &Card) -> bool {
    match card.kind() {
        CardType::ChengQing => {
            cheng_qing_select(session, card);
            true
        }
        _ => false,
    }
}

/// Apply a confirmed card resolution.
pub fn on_effect(session: &mut GameSession, message: &ServerMessage) -> HandlerResult {
    match message {
        ServerMessage::UseChengQing {
            player,
            target,
            card,
            target_card,
        } => cheng_qing_effect(session, *player, *target, card, *target_card),
        _ => Ok(()),
    }
}

// === 澄清 ===

fn black_messages(session: &GameSession, player: PlayerId) -> Vec<CardId> {
    session
        .data()
        .player(player)
        .map(|player| {
            player
                .messages()
                .iter()
                .filter(|message| message.has_color(CardColor::Black))
                .map(Card::id)
                .collect()
        })
        .unwrap_or_default()
}

fn cheng_qing_select(session: &mut GameSession, card: &Card) {
    let card = card.id();
    let targets: Vec<_> = session
        .data()
        .players()
        .player_ids()
        .filter(|&player| !black_messages(session, player).is_empty())
        .collect();

    let chain = SessionChain::new()
        .add_step(move |session, _, _| {
            session.prompt_text("请选择要澄清的目标");
            session.select_players(1, targets.clone());
            session.prompt_buttons(vec![
                Button::new("确定", ButtonAction::NextWithPlayer).requires(Requirement::Players(1)),
                Button::back("取消"),
            ]);
        })
        .add_step(|session, results, _| {
            let messages = results
                .first()
                .and_then(StepValue::player)
                .map(|player| black_messages(session, player))
                .unwrap_or_default();
            session.prompt_text("选择一张黑色情报弃置");
            session.select_cards(1, messages);
            session.prompt_buttons(vec![
                Button::new("确定", ButtonAction::NextWithCards).requires(Requirement::Cards(1)),
                Button::back("取消"),
            ]);
        })
        .on_complete(move |session, results| {
            let target = results.first().and_then(StepValue::player);
            let target_card = results.get(1).and_then(|v| v.cards().first().copied());
            if let (Some(target), Some(target_card)) = (target, target_card) {
                session.send_intent(ClientRequest::UseChengQing {
                    card,
                    target,
                    target_card,
                });
            }
        })
        .on_cancel(GameSession::prompt_play_hand_card);
    session.begin_interaction(chain);
}

fn cheng_qing_effect(
    session: &mut GameSession,
    player: PlayerId,
    target: PlayerId,
    card: &CardData,
    target_card: CardId,
) -> Result<(), GameError> {
    let played = session.play_card(player, card, Some(target))?;
    let removed = session.remove_messages(target, &[target_card])?;
    let text = format!(
        "{}对{}使用了{}",
        session.player_label(player),
        session.player_label(target),
        GameLog::format_card(&played.clone().into())
    );
    session.log.add_entry(text);

    session.discard(vec![played], Zone::Hand(player))?;
    for message in &removed {
        let text = format!(
            "{}的情报{}被弃置",
            session.player_label(target),
            GameLog::format_card(&message.clone().into())
        );
        session.log.add_entry(text);
    }
    session.discard(removed, Zone::Message(target))
}
