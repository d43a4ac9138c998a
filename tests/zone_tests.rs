//! Integration tests for zone transfers: the mirror, the events they
//! publish and the desync handling around them.

mod common;

use proptest::prelude::*;

use fengsheng_core::{
    BusEvent, Card, CardColor, CardData, CardId, CardStatus, CardType, CardUsage, GameCard, GameData, GameError,
    GameEvent, GameEventKind, GamePhase, HandPick, PlayerId, ProcessEventKind, ServerMessage, Zone,
};

use common::{card, role, watch_game, watch_process, Harness, P0, P1, P2, XUAN_QING_ZI};

const ZONE_CHANNELS: [GameEventKind; 9] = [
    GameEventKind::HandCardsAdded,
    GameEventKind::HandCardsRemoved,
    GameEventKind::CardPlayed,
    GameEventKind::MessageSent,
    GameEventKind::MessageTransmitted,
    GameEventKind::MessagePlaced,
    GameEventKind::MessagesRemoved,
    GameEventKind::CardsDiscarded,
    GameEventKind::CardsBanished,
];

fn three_player_game() -> Harness {
    let mut harness = Harness::new();
    harness.start(&[role(XUAN_QING_ZI), role(XUAN_QING_ZI), role(XUAN_QING_ZI)]);
    harness
}

fn shi_tan(id: u32) -> CardData {
    card(id, CardType::ShiTan, &[CardColor::Blue])
}

/// Drawn cards land in hand, unrevealed ones as placeholders.
#[test]
fn test_draw_adds_known_and_unknown_cards() {
    let mut harness = three_player_game();
    let seen = watch_game(&harness.session, &ZONE_CHANNELS);

    harness.apply(ServerMessage::AddCard {
        player: P1,
        cards: vec![shi_tan(1)],
        unknown_count: 2,
    });

    let player = harness.session.data().player(P1).unwrap();
    assert_eq!(player.hand().len(), 3);
    assert_eq!(player.unknown_hand_count(), 2);
    assert_eq!(player.hand_card(CardId(1)).unwrap().usage(), CardUsage::HandCard);
    assert_eq!(harness.session.data().zones().zone_of(CardId(1)), Some(Zone::Hand(P1)));

    let events = seen.borrow();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        GameEvent::HandCardsAdded { player, cards, from: Zone::Deck } if *player == P1 && cards.len() == 3
    ));
    assert_eq!(harness.presenter.transfers(), vec![(Zone::Deck, Zone::Hand(P1)); 3]);
    assert_eq!(
        harness.session.log().last().map(String::as_str),
        Some("Player 1【玄青子】摸了3张牌")
    );
}

/// Discarding a card we could not see consumes a placeholder and reveals it.
#[test]
fn test_discard_reveals_placeholder() {
    let mut harness = three_player_game();
    harness.deal_unknown(P1, 2);

    harness.apply(ServerMessage::DiscardCard {
        player: P1,
        cards: vec![shi_tan(5)],
    });

    let data = harness.session.data();
    assert_eq!(data.player(P1).unwrap().unknown_hand_count(), 1);
    assert_eq!(data.discard_pile().len(), 1);
    assert_eq!(data.discard_pile()[0].id(), CardId(5));
    assert_eq!(data.zones().zone_of(CardId(5)), Some(Zone::Discard));
    assert!(data.audit_zones());
}

/// A played card is on play, then goes to the discard pile.
#[test]
fn test_use_card_plays_then_discards() {
    let mut harness = three_player_game();
    harness.deal(P0, vec![shi_tan(3)]);
    let seen = watch_game(&harness.session, &ZONE_CHANNELS);

    harness.apply(ServerMessage::UseCard {
        player: P0,
        target: Some(P2),
        card: shi_tan(3),
    });

    let events = seen.borrow();
    assert_eq!(events.len(), 2);
    match &events[0] {
        GameEvent::CardPlayed { player, card, target } => {
            assert_eq!(*player, P0);
            assert_eq!(card.id(), CardId(3));
            assert_eq!(card.usage(), CardUsage::FunctionCard);
            assert_eq!(*target, Some(P2));
        }
        other => panic!("expected CardPlayed, got {other:?}"),
    }
    assert!(matches!(&events[1], GameEvent::CardsDiscarded { from: Zone::Hand(p), .. } if *p == P0));

    let data = harness.session.data();
    assert_eq!(data.card_on_play(), Some(CardId(3)));
    assert!(data.player(P0).unwrap().hand().is_empty());
    assert_eq!(data.zones().zone_of(CardId(3)), Some(Zone::Discard));
}

/// A message travels hand, transit, message zone.
#[test]
fn test_message_send_transmit_receive() {
    let mut harness = three_player_game();
    harness.deal_unknown(P1, 1);
    harness.presenter.forget();
    let seen = watch_game(&harness.session, &ZONE_CHANNELS);

    harness.apply(ServerMessage::SendMessageCard {
        sender: P1,
        target: P2,
        card: None,
        direction: Default::default(),
    });
    assert_eq!(harness.session.data().in_transit().map(|t| t.holder), Some(P2));

    harness.apply(ServerMessage::TransmitMessage { holder: P0 });
    harness.apply(ServerMessage::NotifyReceive {
        player: P0,
        card: card(8, CardType::PoYi, &[CardColor::Red]),
    });

    let events = seen.borrow();
    assert!(matches!(&events[0], GameEvent::MessageSent { card: GameCard::Unknown, .. }));
    let kinds: Vec<GameEventKind> = events.iter().map(BusEvent::channel).collect();
    assert_eq!(
        kinds,
        vec![
            GameEventKind::MessageSent,
            GameEventKind::MessageTransmitted,
            GameEventKind::MessagePlaced,
        ]
    );

    let data = harness.session.data();
    assert!(data.in_transit().is_none());
    let message = data.player(P0).unwrap().message(CardId(8)).unwrap();
    assert_eq!(message.usage(), CardUsage::MessageCard);
    assert_eq!(data.player(P1).unwrap().hand().len(), 0);
    assert_eq!(
        harness.presenter.transfers(),
        vec![(Zone::Hand(P1), Zone::InTransit), (Zone::InTransit, Zone::Message(P0))]
    );
}

fn send_phase(waiting: PlayerId, message_player: Option<PlayerId>, message_card: Option<CardData>) -> ServerMessage {
    ServerMessage::NotifyPhase {
        current_player: P1,
        phase: GamePhase::Send,
        waiting_player: Some(waiting),
        waiting_second: 15,
        message_player,
        message_card,
    }
}

/// A phase notice can pass the message on and reveal it in flight; the
/// revealed card is then received as itself.
#[test]
fn test_message_revealed_in_flight() {
    let mut harness = three_player_game();
    harness.deal_unknown(P1, 1);
    harness.apply(ServerMessage::SendMessageCard {
        sender: P1,
        target: P2,
        card: None,
        direction: Default::default(),
    });
    let seen = watch_game(
        &harness.session,
        &[
            GameEventKind::MessageTransmitted,
            GameEventKind::CardStatusChanged,
            GameEventKind::MessageRevealed,
        ],
    );
    let red = card(8, CardType::PoYi, &[CardColor::Red]);

    harness.apply(send_phase(P0, Some(P2), Some(red.clone())));

    let transit = harness.session.data().in_transit().unwrap().clone();
    assert_eq!(transit.holder, P0);
    let revealed = transit.card.as_known().unwrap();
    assert_eq!(revealed.id(), CardId(8));
    assert_eq!(revealed.status(), CardStatus::FaceUp);
    assert_eq!(harness.session.data().zones().zone_of(CardId(8)), Some(Zone::InTransit));
    let kinds: Vec<GameEventKind> = seen.borrow().iter().map(BusEvent::channel).collect();
    assert_eq!(
        kinds,
        vec![
            GameEventKind::MessageTransmitted,
            GameEventKind::CardStatusChanged,
            GameEventKind::MessageRevealed,
        ]
    );

    // Already known: a second notice changes nothing.
    harness.apply(send_phase(P0, Some(P2), Some(red.clone())));
    assert_eq!(seen.borrow().len(), 3);

    harness.apply(ServerMessage::NotifyReceive { player: P0, card: red });
    let data = harness.session.data();
    assert!(data.player(P0).unwrap().message(CardId(8)).is_some());
    assert!(data.audit_zones());
}

/// A message this client never saw sent starts its transit face down.
#[test]
fn test_message_offered_before_seen_sent() {
    let mut harness = three_player_game();
    let seen = watch_game(&harness.session, &[GameEventKind::MessageSent]);

    harness.apply(send_phase(P2, Some(P1), None));

    let transit = harness.session.data().in_transit().unwrap();
    assert_eq!((transit.sender, transit.holder), (P1, P2));
    assert_eq!(transit.card, GameCard::Unknown);
    assert_eq!(seen.borrow().len(), 1);
}

/// Revealing a message when none is in flight is a desync.
#[test]
fn test_reveal_without_transit_aborts() {
    let mut harness = three_player_game();

    let result = harness.feed(send_phase(P0, None, Some(shi_tan(3))));

    assert_eq!(result, Err(GameError::NothingInTransit));
    assert!(harness.session.is_over());
}

/// A card played on, or a message sent to, an unseated player is a
/// desync and leaves no trace on the board.
#[test]
fn test_unseated_targets_abort_before_moving_cards() {
    let mut harness = three_player_game();
    harness.deal(P1, vec![shi_tan(1)]);
    let seen = watch_game(&harness.session, &ZONE_CHANNELS);

    let result = harness.feed(ServerMessage::UseCard {
        player: P1,
        target: Some(PlayerId(6)),
        card: shi_tan(1),
    });
    assert_eq!(result, Err(GameError::UnknownPlayer(PlayerId(6))));
    assert!(seen.borrow().is_empty());

    let mut harness = three_player_game();
    harness.deal(P1, vec![shi_tan(2)]);
    let result = harness.feed(ServerMessage::SendMessageCard {
        sender: P1,
        target: PlayerId(4),
        card: Some(shi_tan(2)),
        direction: Default::default(),
    });
    assert_eq!(result, Err(GameError::UnknownPlayer(PlayerId(4))));
}

/// Banishing through the session publishes the move and animates it.
#[test]
fn test_banish_from_hand() {
    let mut harness = three_player_game();
    harness.deal(P0, vec![shi_tan(4)]);
    harness.presenter.forget();
    let seen = watch_game(&harness.session, &[GameEventKind::CardsBanished]);

    let session = &mut harness.session;
    let taken = session
        .remove_hand_cards(P0, &[HandPick::Card(shi_tan(4))], Zone::Banish)
        .unwrap();
    let cards: Vec<Card> = taken.into_iter().filter_map(GameCard::into_known).collect();
    session.banish(cards, Zone::Hand(P0)).unwrap();

    assert_eq!(session.data().banish_pile().len(), 1);
    assert_eq!(session.data().zones().zone_of(CardId(4)), Some(Zone::Banish));
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(harness.presenter.transfers(), vec![(Zone::Hand(P0), Zone::Banish)]);
}

/// Receiving with nothing in transit is a desync: the session aborts and
/// its zones are dropped.
#[test]
fn test_receive_without_transit_aborts() {
    let mut harness = three_player_game();
    harness.deal(P0, vec![shi_tan(1)]);
    let aborted = watch_process(&harness.session, &[ProcessEventKind::SessionAborted]);

    let result = harness.feed(ServerMessage::NotifyReceive {
        player: P0,
        card: shi_tan(2),
    });

    assert_eq!(result, Err(GameError::NothingInTransit));
    assert_eq!(aborted.borrow().len(), 1);
    assert!(harness.session.is_over());
    assert!(harness.session.data().zones().is_empty());
    assert!(harness.session.data().player(P0).unwrap().hand().is_empty());
}

/// Discarding a card the hand does not hold aborts without publishing.
#[test]
fn test_discard_missing_card_is_desync() {
    let mut harness = three_player_game();
    harness.deal(P1, vec![shi_tan(1)]);
    let seen = watch_game(&harness.session, &[GameEventKind::CardsDiscarded]);

    let err = harness
        .feed(ServerMessage::DiscardCard {
            player: P1,
            cards: vec![shi_tan(9)],
        })
        .unwrap_err();

    assert!(err.is_desync());
    assert!(seen.borrow().is_empty());
}

/// Death is published once.
#[test]
fn test_player_dies_once() {
    let mut harness = three_player_game();
    let seen = watch_game(&harness.session, &[GameEventKind::PlayerDied]);

    harness.apply(ServerMessage::NotifyDie { player: P2 });
    harness.apply(ServerMessage::NotifyDie { player: P2 });

    assert!(!harness.session.data().player(P2).unwrap().is_alive());
    assert_eq!(*seen.borrow(), vec![GameEvent::PlayerDied(P2)]);
}

// === Zone bookkeeping under arbitrary moves ===

#[derive(Clone, Debug)]
enum Move {
    Draw { player: u8, id: u32, known: bool },
    Discard { player: u8, id: u32 },
    ToMessage { from: u8, to: u8, id: u32 },
    DiscardMessage { player: u8, id: u32 },
    Banish { player: u8, id: u32 },
    Reclaim { player: u8, id: u32 },
}

fn any_move() -> impl Strategy<Value = Move> {
    let player = 0u8..3;
    let id = 0u32..12;
    prop_oneof![
        (player.clone(), id.clone(), any::<bool>()).prop_map(|(player, id, known)| Move::Draw { player, id, known }),
        (player.clone(), id.clone()).prop_map(|(player, id)| Move::Discard { player, id }),
        (player.clone(), player.clone(), id.clone()).prop_map(|(from, to, id)| Move::ToMessage { from, to, id }),
        (player.clone(), id.clone()).prop_map(|(player, id)| Move::DiscardMessage { player, id }),
        (player.clone(), id.clone()).prop_map(|(player, id)| Move::Banish { player, id }),
        (player, id).prop_map(|(player, id)| Move::Reclaim { player, id }),
    ]
}

fn take_from_hand(data: &mut GameData, player: u8, id: u32) -> Result<Vec<Card>, GameError> {
    let taken = data.remove_hand_cards(PlayerId(player), &[HandPick::Card(shi_tan(id))])?;
    Ok(taken.into_iter().filter_map(GameCard::into_known).collect())
}

fn apply_move(data: &mut GameData, step: &Move) -> Result<(), GameError> {
    match *step {
        Move::Draw { player, id, known } => {
            let card = if known {
                GameCard::from(shi_tan(id))
            } else {
                GameCard::Unknown
            };
            data.add_hand_cards(PlayerId(player), vec![card])
        }
        Move::Discard { player, id } => {
            let cards = take_from_hand(data, player, id)?;
            data.push_discard(cards)
        }
        Move::ToMessage { from, to, id } => {
            let cards = take_from_hand(data, from, id)?;
            data.add_messages(PlayerId(to), cards)
        }
        Move::DiscardMessage { player, id } => {
            let cards = data.remove_messages(PlayerId(player), &[CardId(id)])?;
            data.push_discard(cards)
        }
        Move::Banish { player, id } => {
            let cards = take_from_hand(data, player, id)?;
            data.push_banish(cards)
        }
        Move::Reclaim { player, id } => {
            let card = data.take_from_discard(CardId(id))?;
            data.add_hand_cards(PlayerId(player), vec![card.into()])
        }
    }
}

proptest! {
    /// Whatever moves succeed or fail, every revealed card sits in
    /// exactly one zone and the tracker agrees with the collections.
    #[test]
    fn prop_every_card_in_exactly_one_zone(moves in prop::collection::vec(any_move(), 0..40)) {
        let mut data = GameData::new();
        data.init_players(3, &[]).unwrap();

        for step in &moves {
            let before = data.clone();
            if apply_move(&mut data, step).is_err() {
                // Failed single-primitive moves leave no trace.
                if matches!(step, Move::Draw { .. } | Move::Reclaim { .. }) {
                    prop_assert_eq!(&data, &before);
                }
            }
            prop_assert!(data.audit_zones(), "zones out of step after {:?}", step);
        }
    }
}
