//! The session's own subscriptions: core inbound handlers, the seat
//! assignment hook and the animation bridge.

use tracing::info;

use crate::cards::{behavior, GameCard};
use crate::characters::{CharacterKind, Identity};
use crate::core::player::PlayerId;
use crate::events::{GameEvent, GameEventKind, HandlerResult, ProcessEvent, UiEvent, WaitingType};
use crate::net::{ClientRequest, ServerMessage, ServerMessageKind};
use crate::phase::GamePhase;
use crate::skills;
use crate::zones::Zone;

use super::game::GameSession;
use super::log::GameLog;

const CORE_CHANNELS: [ServerMessageKind; 16] = [
    ServerMessageKind::WaitForSelectRole,
    ServerMessageKind::SelectRoleConfirmed,
    ServerMessageKind::InitGame,
    ServerMessageKind::NotifyPhase,
    ServerMessageKind::SyncDeckNum,
    ServerMessageKind::NotifyRoleUpdate,
    ServerMessageKind::NotifyDying,
    ServerMessageKind::NotifyDie,
    ServerMessageKind::NotifyWinner,
    ServerMessageKind::AddCard,
    ServerMessageKind::DiscardCard,
    ServerMessageKind::UseCard,
    ServerMessageKind::SendMessageCard,
    ServerMessageKind::TransmitMessage,
    ServerMessageKind::NotifyReceive,
    ServerMessageKind::UseChengQing,
];

pub(super) fn install(session: &mut GameSession) {
    let owner = Some(session.owner());
    let network = session.hub.network.clone();
    for channel in CORE_CHANNELS {
        network.on(channel, owner, apply);
    }
    if session.config().auto_assign_seats {
        network.once(ServerMessageKind::NotifyPhase, owner, |session, message| {
            match message {
                ServerMessage::NotifyPhase { current_player, .. } => session.assign_seats(*current_player),
                _ => Ok(()),
            }
        });
    }

    let game = session.hub.game.clone();
    for channel in [
        GameEventKind::HandCardsAdded,
        GameEventKind::MessageSent,
        GameEventKind::MessagePlaced,
        GameEventKind::CardsDiscarded,
        GameEventKind::CardsBanished,
    ] {
        game.on(channel, owner, animate);
    }
}

/// Forward arrivals to the presenter's transfer animation.
fn animate(session: &mut GameSession, event: &GameEvent) -> HandlerResult {
    let presenter = &mut session.presenter;
    match event {
        GameEvent::HandCardsAdded { player, cards, from } => {
            for card in cards {
                presenter.play_zone_transfer_animation(card, *from, Zone::Hand(*player));
            }
        }
        GameEvent::MessageSent { sender, card, .. } => {
            presenter.play_zone_transfer_animation(card, Zone::Hand(*sender), Zone::InTransit);
        }
        GameEvent::MessagePlaced { player, card, from } => {
            presenter.play_zone_transfer_animation(&card.clone().into(), *from, Zone::Message(*player));
        }
        GameEvent::CardsDiscarded { cards, from } => {
            for card in cards {
                presenter.play_zone_transfer_animation(&card.clone().into(), *from, Zone::Discard);
            }
        }
        GameEvent::CardsBanished { cards, from } => {
            for card in cards {
                presenter.play_zone_transfer_animation(&card.clone().into(), *from, Zone::Banish);
            }
        }
        _ => {}
    }
    Ok(())
}

fn waiting_for(phase: GamePhase) -> WaitingType {
    match phase {
        GamePhase::SendStart | GamePhase::Send => WaitingType::SendMessage,
        GamePhase::Receive => WaitingType::ReceiveMessage,
        GamePhase::Draw | GamePhase::Main | GamePhase::Fight => WaitingType::PlayCard,
    }
}

impl GameSession {
    pub(crate) fn player_label(&self, player: PlayerId) -> String {
        self.data
            .player(player)
            .map_or_else(|_| GameLog::format_player_id(player), GameLog::format_player)
    }

    /// Start a countdown stamped with the seq of the message being applied.
    pub(crate) fn start_countdown(&mut self, player: PlayerId, seconds: u32, waiting: WaitingType) -> HandlerResult {
        let seq = Some(self.seq());
        self.publish_ui(UiEvent::StartCountDown {
            player,
            seconds,
            waiting,
            seq,
        })
    }
}

fn apply(session: &mut GameSession, message: &ServerMessage) -> HandlerResult {
    match message {
        ServerMessage::WaitForSelectRole {
            identity,
            task,
            candidates,
            waiting_second,
        } => {
            session.data.assign_identity(Identity::new(*identity, *task)?)?;
            let candidates = candidates.iter().copied().map(CharacterKind::from_id).collect();
            session.publish_process(ProcessEvent::CharacterSelectionStarted {
                candidates,
                seconds: *waiting_second,
            })?;
            session.start_countdown(PlayerId::LOCAL, *waiting_second, WaitingType::SelectCharacter)
        }

        ServerMessage::SelectRoleConfirmed { role } => {
            session.publish_process(ProcessEvent::CharacterConfirmed(CharacterKind::from_id(*role)))
        }

        ServerMessage::InitGame { player_count, roles } => {
            session.data.init_players(*player_count, roles)?;
            for player in PlayerId::all(*player_count) {
                skills::sync_player(session, player)?;
            }
            session.publish_process(ProcessEvent::GameInitialized {
                player_count: *player_count,
            })?;
            session.send(ClientRequest::GameInitFinished)
        }

        ServerMessage::NotifyPhase {
            current_player,
            phase,
            waiting_player,
            waiting_second,
            message_player,
            message_card,
        } => {
            session.data.player(*current_player)?;
            if let Some(waiting) = waiting_player {
                session.data.player(*waiting)?;
            }
            let turn_changed = session.data.phase.set_turn_player(*current_player);
            let transition = session.data.phase.set_phase(*phase);

            if let Some(ended) = transition.and_then(|t| t.ended) {
                session.publish(GameEvent::PhaseEnded(ended))?;
            }
            if turn_changed {
                session.publish(GameEvent::TurnChanged(*current_player))?;
            }
            if transition.is_some() {
                session.publish(GameEvent::PhaseChanged {
                    phase: *phase,
                    turn_player: Some(*current_player),
                })?;
            }
            if let Some(waiting) = waiting_player {
                session.start_countdown(*waiting, *waiting_second, waiting_for(*phase))?;
            }
            if let Some(from) = message_player {
                session.data.player(*from)?;
                if let Some(holder) = waiting_player {
                    session.offer_message(*from, *holder)?;
                }
            }
            if let Some(card) = message_card {
                session.reveal_message(card)?;
            }
            if let Some(waiting) = waiting_player {
                if waiting.is_local() && *phase == GamePhase::Main && current_player.is_local() {
                    session.prompt_play_hand_card();
                }
            }
            Ok(())
        }

        ServerMessage::SyncDeckNum { num, shuffled } => {
            if *shuffled {
                session.log.add_entry("牌堆已洗牌");
            }
            if session.data.set_deck_count(*num) {
                session.publish(GameEvent::DeckCountChanged(*num))?;
            }
            Ok(())
        }

        ServerMessage::NotifyRoleUpdate { player, role, face_up } => {
            session.update_role(*player, *role, *face_up)
        }

        ServerMessage::NotifyDying { player } => {
            session.data.player(*player)?;
            let text = format!("{}濒死", session.player_label(*player));
            session.log.add_entry(text);
            session.publish(GameEvent::PlayerDying(*player))
        }

        ServerMessage::NotifyDie { player } => {
            if session.data.kill(*player)? {
                skills::dispose_player(session, *player)?;
                let text = format!("{}死亡", session.player_label(*player));
                session.log.add_entry(text);
                session.publish(GameEvent::PlayerDied(*player))?;
            }
            Ok(())
        }

        ServerMessage::NotifyWinner { winners } => {
            for winner in winners {
                session.data.player(*winner)?;
            }
            info!(?winners, "game over");
            session.publish(GameEvent::GameOver {
                winners: winners.clone(),
            })?;
            session.publish_process(ProcessEvent::GameOver {
                winners: winners.clone(),
            })?;
            session.teardown();
            Ok(())
        }

        ServerMessage::AddCard {
            player,
            cards,
            unknown_count,
        } => {
            let mut added: Vec<GameCard> = cards.iter().cloned().map(GameCard::from).collect();
            added.extend((0..*unknown_count).map(|_| GameCard::Unknown));
            let count = added.len();
            session.add_hand_cards(*player, added, Zone::Deck)?;
            let text = format!("{}摸了{}张牌", session.player_label(*player), count);
            session.log.add_entry(text);
            Ok(())
        }

        ServerMessage::DiscardCard { player, cards } => {
            let discarded = session.discard_from_hand(*player, cards)?;
            let names: Vec<String> = discarded
                .into_iter()
                .map(|card| GameLog::format_card(&card.into()))
                .collect();
            let text = format!("{}弃置了{}", session.player_label(*player), names.join(""));
            session.log.add_entry(text);
            Ok(())
        }

        ServerMessage::UseCard { player, target, card } => {
            let played = session.play_card(*player, card, *target)?;
            let mut text = format!(
                "{}使用了{}",
                session.player_label(*player),
                GameLog::format_card(&played.clone().into())
            );
            if let Some(target) = target {
                text = format!("{}，目标是{}", text, session.player_label(*target));
            }
            session.log.add_entry(text);
            session.discard(vec![played], Zone::Hand(*player))
        }

        ServerMessage::SendMessageCard {
            sender,
            target,
            card,
            direction,
        } => {
            session.send_message(*sender, *target, card.clone())?;
            let text = format!(
                "{}传出情报，方向{}，传给{}",
                session.player_label(*sender),
                direction,
                session.player_label(*target)
            );
            session.log.add_entry(text);
            Ok(())
        }

        ServerMessage::TransmitMessage { holder } => session.transmit_message(*holder),

        ServerMessage::NotifyReceive { player, card } => {
            let card = session.receive_message(*player, card)?;
            let text = format!(
                "{}接收了情报{}",
                session.player_label(*player),
                GameLog::format_card(&card.into())
            );
            session.log.add_entry(text);
            Ok(())
        }

        ServerMessage::UseChengQing { .. } => behavior::on_effect(session, message),

        _ => Ok(()),
    }
}
