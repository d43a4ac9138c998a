//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use fengsheng_core::action::ButtonView;
use fengsheng_core::events::{GameEvent, GameEventKind, ProcessEvent, ProcessEventKind, UiEvent, UiEventKind};
use fengsheng_core::net::{ClientRequest, ClientRequestKind, InboundMessage, Outbound, RoleCard, ServerMessage};
use fengsheng_core::{
    CardColor, CardData, CardId, CardType, CharacterId, Dispatch, GameCard, GameError, GamePhase,
    GameSession, PlayerId, Presenter, SessionConfig, Zone,
};

pub const P0: PlayerId = PlayerId::LOCAL;
pub const P1: PlayerId = PlayerId(1);
pub const P2: PlayerId = PlayerId(2);

pub const WANG_TIAN_XIANG: CharacterId = CharacterId(7);
pub const LAO_BIE: CharacterId = CharacterId(9);
pub const XUAN_QING_ZI: CharacterId = CharacterId(16);
pub const LI_NING_YU: CharacterId = CharacterId(26);
pub const JIAN_XIAN_SHENG: CharacterId = CharacterId(27);
pub const XIAO_JIU: CharacterId = CharacterId(29);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One presenter call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shown {
    Players(usize, Vec<PlayerId>),
    Cards(usize, Vec<CardId>),
    Text(String),
    Buttons(Vec<ButtonView>),
    Transfer(GameCard, Zone, Zone),
    Cleared,
}

/// Presenter that records every call. Clones share the record.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Rc<RefCell<Vec<Shown>>>,
}

impl RecordingPresenter {
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Shown::Text(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn transfers(&self) -> Vec<(Zone, Zone)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Shown::Transfer(_, from, to) => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn forget(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Presenter for RecordingPresenter {
    fn show_selectable_players(&mut self, count: usize, eligible: &[PlayerId]) {
        self.calls.borrow_mut().push(Shown::Players(count, eligible.to_vec()));
    }

    fn show_selectable_cards(&mut self, count: usize, eligible: &[CardId]) {
        self.calls.borrow_mut().push(Shown::Cards(count, eligible.to_vec()));
    }

    fn prompt_text(&mut self, text: &str) {
        self.calls.borrow_mut().push(Shown::Text(text.to_string()));
    }

    fn prompt_buttons(&mut self, buttons: &[ButtonView]) {
        self.calls.borrow_mut().push(Shown::Buttons(buttons.to_vec()));
    }

    fn play_zone_transfer_animation(&mut self, card: &GameCard, from: Zone, to: Zone) {
        self.calls.borrow_mut().push(Shown::Transfer(card.clone(), from, to));
    }

    fn clear(&mut self) {
        self.calls.borrow_mut().push(Shown::Cleared);
    }
}

/// A session plus a stand-in server that stamps increasing seqs.
pub struct Harness {
    pub session: GameSession,
    pub presenter: RecordingPresenter,
    pub sent: Rc<RefCell<Vec<Outbound>>>,
    next_seq: u64,
}

const REQUEST_KINDS: [ClientRequestKind; 10] = [
    ClientRequestKind::SelectRole,
    ClientRequestKind::GameInitFinished,
    ClientRequestKind::EndReceivePhase,
    ClientRequestKind::UseChengQing,
    ClientRequestKind::SkillJinBiA,
    ClientRequestKind::SkillJinBiB,
    ClientRequestKind::SkillJiuJiA,
    ClientRequestKind::SkillLianLuo,
    ClientRequestKind::SkillXianFaZhiRenA,
    ClientRequestKind::SkillXianFaZhiRenB,
];

impl Harness {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        init_tracing();
        let presenter = RecordingPresenter::default();
        let session = GameSession::new(config, presenter.clone()).expect("valid config");
        let sent = Rc::new(RefCell::new(Vec::new()));
        for kind in REQUEST_KINDS {
            let sent = Rc::clone(&sent);
            session.hub().outbound.on(kind, None, move |_: &mut GameSession, out: &Outbound| {
                sent.borrow_mut().push(out.clone());
                Ok(())
            });
        }
        Self {
            session,
            presenter,
            sent,
            next_seq: 1,
        }
    }

    /// Deliver `body` with the next seq.
    pub fn feed(&mut self, body: ServerMessage) -> Result<Dispatch, GameError> {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.session.dispatch(InboundMessage::sequenced(seq, body))
    }

    /// Deliver `body` and require it to apply.
    pub fn apply(&mut self, body: ServerMessage) {
        assert_eq!(self.feed(body), Ok(Dispatch::Applied));
    }

    /// Seat `roles.len()` players, all roles face up unless hidden.
    pub fn start(&mut self, roles: &[RoleCard]) {
        self.apply(ServerMessage::InitGame {
            player_count: roles.len(),
            roles: roles.to_vec(),
        });
    }

    pub fn phase(&mut self, current_player: PlayerId, phase: GamePhase) {
        self.apply(ServerMessage::NotifyPhase {
            current_player,
            phase,
            waiting_player: Some(current_player),
            waiting_second: 15,
            message_player: None,
            message_card: None,
        });
    }

    pub fn deal(&mut self, player: PlayerId, cards: Vec<CardData>) {
        self.apply(ServerMessage::AddCard {
            player,
            cards,
            unknown_count: 0,
        });
    }

    pub fn deal_unknown(&mut self, player: PlayerId, count: u32) {
        self.apply(ServerMessage::AddCard {
            player,
            cards: Vec::new(),
            unknown_count: count,
        });
    }

    /// Put `card` straight into `player`'s message zone through the
    /// send/receive flow, sent by `sender` from an unrevealed hand card.
    pub fn give_message(&mut self, sender: PlayerId, player: PlayerId, card: CardData) {
        self.deal_unknown(sender, 1);
        self.apply(ServerMessage::SendMessageCard {
            sender,
            target: player,
            card: None,
            direction: Default::default(),
        });
        self.apply(ServerMessage::NotifyReceive { player, card });
    }

    pub fn requests(&self) -> Vec<ClientRequest> {
        self.sent.borrow().iter().map(|out| out.request.clone()).collect()
    }

    pub fn last_request(&self) -> Option<ClientRequest> {
        self.sent.borrow().last().map(|out| out.request.clone())
    }

    pub fn clear_requests(&self) {
        self.sent.borrow_mut().clear();
    }

    pub fn click(&mut self, index: usize) -> bool {
        self.session
            .handle_input(fengsheng_core::UiInput::Click(index))
            .expect("input handled")
    }

    pub fn select_player(&mut self, player: PlayerId) -> bool {
        self.session
            .handle_input(fengsheng_core::UiInput::SelectPlayer(player))
            .expect("input handled")
    }

    pub fn select_card(&mut self, card: CardId) -> bool {
        self.session
            .handle_input(fengsheng_core::UiInput::SelectCard(card))
            .expect("input handled")
    }

    pub fn button_labels(&self) -> Vec<String> {
        self.session
            .surface()
            .buttons
            .iter()
            .map(|button| button.label.clone())
            .collect()
    }
}

pub fn role(id: CharacterId) -> RoleCard {
    RoleCard::new(id, true)
}

pub fn face_down(id: CharacterId) -> RoleCard {
    RoleCard::new(id, false)
}

pub fn card(id: u32, kind: CardType, colors: &[CardColor]) -> CardData {
    CardData::new(CardId(id), kind, colors.iter().copied())
}

/// Record every game event on `kinds`.
pub fn watch_game(session: &GameSession, kinds: &[GameEventKind]) -> Rc<RefCell<Vec<GameEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    for &kind in kinds {
        let seen = Rc::clone(&seen);
        session.hub().game.on(kind, None, move |_: &mut GameSession, event: &GameEvent| {
            seen.borrow_mut().push(event.clone());
            Ok(())
        });
    }
    seen
}

pub fn watch_ui(session: &GameSession, kinds: &[UiEventKind]) -> Rc<RefCell<Vec<UiEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    for &kind in kinds {
        let seen = Rc::clone(&seen);
        session.hub().ui.on(kind, None, move |_: &mut GameSession, event: &UiEvent| {
            seen.borrow_mut().push(event.clone());
            Ok(())
        });
    }
    seen
}

pub fn watch_process(session: &GameSession, kinds: &[ProcessEventKind]) -> Rc<RefCell<Vec<ProcessEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    for &kind in kinds {
        let seen = Rc::clone(&seen);
        session.hub().process.on(kind, None, move |_: &mut GameSession, event: &ProcessEvent| {
            seen.borrow_mut().push(event.clone());
            Ok(())
        });
    }
    seen
}
