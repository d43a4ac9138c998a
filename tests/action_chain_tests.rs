//! Integration tests for action chains, alone and driven through a
//! session's interaction surface.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use fengsheng_core::action::ButtonView;
use fengsheng_core::{
    ActionChain, Button, ButtonAction, PlayerId, Requirement, SessionChain, StepValue, UiInput,
};

use common::{Harness, Shown, P1, P2};

/// Context that records which step ran with how many prior results.
type Trace = Vec<String>;

fn three_steps(done: Rc<RefCell<Vec<Vec<char>>>>, cancelled: Rc<RefCell<u32>>) -> ActionChain<Trace, char> {
    ActionChain::new()
        .add_step(|trace: &mut Trace, seen: &[char], _| trace.push(format!("s1:{seen:?}")))
        .add_step(|trace: &mut Trace, seen: &[char], _| trace.push(format!("s2:{seen:?}")))
        .add_step(|trace: &mut Trace, seen: &[char], _| trace.push(format!("s3:{seen:?}")))
        .on_complete(move |_, results| done.borrow_mut().push(results))
        .on_cancel(move |_| *cancelled.borrow_mut() += 1)
}

/// Three `next` calls complete once with every result in order.
#[test]
fn test_three_steps_complete_once() {
    let done = Rc::new(RefCell::new(Vec::new()));
    let cancelled = Rc::new(RefCell::new(0));
    let mut chain = three_steps(Rc::clone(&done), Rc::clone(&cancelled));
    let mut trace = Trace::new();

    chain.start(&mut trace);
    chain.next(&mut trace, 'a');
    chain.next(&mut trace, 'b');
    chain.next(&mut trace, 'c');

    assert_eq!(*done.borrow(), vec![vec!['a', 'b', 'c']]);
    assert_eq!(*cancelled.borrow(), 0);
    assert!(chain.is_finished());
    assert_eq!(trace, vec!["s1:[]", "s2:['a']", "s3:['a', 'b']"]);
}

/// Going back from step 2 re-runs step 1 with the results it first saw.
#[test]
fn test_prev_reruns_previous_step() {
    let done = Rc::new(RefCell::new(Vec::new()));
    let cancelled = Rc::new(RefCell::new(0));
    let mut chain = three_steps(Rc::clone(&done), Rc::clone(&cancelled));
    let mut trace = Trace::new();

    chain.start(&mut trace);
    chain.next(&mut trace, 'a');
    chain.prev(&mut trace);
    assert_eq!(chain.current_step(), Some(0));
    assert!(chain.results().is_empty());

    chain.next(&mut trace, 'x');
    chain.next(&mut trace, 'y');
    chain.next(&mut trace, 'z');

    assert_eq!(*done.borrow(), vec![vec!['x', 'y', 'z']]);
    assert_eq!(trace, vec!["s1:[]", "s2:['a']", "s1:[]", "s2:['x']", "s3:['x', 'y']"]);
}

/// Going back from the first step cancels without completing.
#[test]
fn test_prev_from_first_step_cancels() {
    let done = Rc::new(RefCell::new(Vec::new()));
    let cancelled = Rc::new(RefCell::new(0));
    let mut chain = three_steps(Rc::clone(&done), Rc::clone(&cancelled));
    let mut trace = Trace::new();

    chain.start(&mut trace);
    chain.prev(&mut trace);

    assert_eq!(*cancelled.borrow(), 1);
    assert!(done.borrow().is_empty());
    assert!(chain.is_finished());
}

/// Navigating a finished chain is a caller bug.
#[test]
#[should_panic(expected = "not live")]
fn test_next_after_completion_panics() {
    let mut chain: ActionChain<Trace, char> = ActionChain::new().add_step(|_, _, _| {});
    let mut trace = Trace::new();
    chain.start(&mut trace);
    chain.next(&mut trace, 'a');
    chain.next(&mut trace, 'b');
}

/// A step can finish itself synchronously when there is nothing to ask.
#[test]
fn test_step_can_skip_itself() {
    let done = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&done);
    let mut chain: ActionChain<Trace, char> = ActionChain::new()
        .add_step(|_, _, _| {})
        .add_step(|_, _, controls| controls.next('-'))
        .on_complete(move |_, results| *sink.borrow_mut() = Some(results));
    let mut trace = Trace::new();

    chain.start(&mut trace);
    chain.next(&mut trace, 'a');

    assert_eq!(*done.borrow(), Some(vec!['a', '-']));
}

// === Driven through a session ===

fn pick_player_chain(picked: Rc<RefCell<Vec<PlayerId>>>, cancelled: Rc<RefCell<bool>>) -> SessionChain {
    SessionChain::new()
        .add_step(|session, _, _| {
            session.prompt_text("pick");
            session.select_players(1, vec![P1, P2]);
            session.prompt_buttons(vec![
                Button::new("ok", ButtonAction::NextWithPlayer).requires(Requirement::Players(1)),
                Button::back("cancel"),
            ]);
        })
        .add_step(|session, _, _| {
            session.prompt_text("confirm");
            session.prompt_buttons(vec![
                Button::new("yes", ButtonAction::Next(StepValue::Confirmed)),
                Button::back("back"),
            ]);
        })
        .on_complete(move |_, results| {
            picked.borrow_mut().extend(results.first().and_then(StepValue::player));
        })
        .on_cancel(move |_| *cancelled.borrow_mut() = true)
}

/// Clicks on a disabled button are ignored until the selection meets
/// its requirement.
#[test]
fn test_disabled_button_ignores_clicks() {
    let mut harness = Harness::new();
    let picked = Rc::new(RefCell::new(Vec::new()));
    let cancelled = Rc::new(RefCell::new(false));
    harness
        .session
        .begin_interaction(pick_player_chain(Rc::clone(&picked), Rc::clone(&cancelled)));

    assert!(!harness.click(0));
    assert_eq!(harness.button_labels(), vec!["ok", "cancel"]);

    // Selecting re-posts the buttons with the new enabled state.
    harness.presenter.forget();
    assert!(harness.select_player(P2));
    assert_eq!(
        *harness.presenter.calls.borrow(),
        vec![Shown::Buttons(vec![
            ButtonView {
                label: "ok".into(),
                enabled: true
            },
            ButtonView {
                label: "cancel".into(),
                enabled: true
            },
        ])]
    );

    assert!(harness.click(0));
    assert_eq!(harness.button_labels(), vec!["yes", "back"]);
    assert!(harness.click(0));

    assert_eq!(*picked.borrow(), vec![P2]);
    assert!(!*cancelled.borrow());
    assert!(!harness.session.has_interaction());
}

/// Ineligible targets cannot be selected.
#[test]
fn test_ineligible_player_is_rejected() {
    let mut harness = Harness::new();
    let picked = Rc::new(RefCell::new(Vec::new()));
    let cancelled = Rc::new(RefCell::new(false));
    harness
        .session
        .begin_interaction(pick_player_chain(picked, cancelled));

    assert!(!harness.select_player(PlayerId::LOCAL));
    assert!(harness.session.surface().selection.players.is_empty());
}

/// Going back clears the surface and the earlier step posts its UI again.
#[test]
fn test_back_reposts_previous_step() {
    let mut harness = Harness::new();
    let picked = Rc::new(RefCell::new(Vec::new()));
    let cancelled = Rc::new(RefCell::new(false));
    harness
        .session
        .begin_interaction(pick_player_chain(Rc::clone(&picked), Rc::clone(&cancelled)));

    harness.select_player(P1);
    harness.click(0);
    harness.presenter.forget();
    assert!(harness.click(1));

    let calls = harness.presenter.calls.borrow().clone();
    assert_eq!(calls.first(), Some(&Shown::Cleared));
    assert!(calls.contains(&Shown::Players(1, vec![P1, P2])));
    assert!(harness.session.surface().selection.players.is_empty());

    // Back again from the first step cancels.
    assert!(harness.click(1));
    assert!(*cancelled.borrow());
    assert!(picked.borrow().is_empty());
    assert!(!harness.session.has_interaction());
}

/// Starting another interaction drops the live one without callbacks.
#[test]
fn test_new_interaction_replaces_live_one() {
    let mut harness = Harness::new();
    let first_picked = Rc::new(RefCell::new(Vec::new()));
    let first_cancelled = Rc::new(RefCell::new(false));
    harness.session.begin_interaction(pick_player_chain(
        Rc::clone(&first_picked),
        Rc::clone(&first_cancelled),
    ));

    let second_picked = Rc::new(RefCell::new(Vec::new()));
    let second_cancelled = Rc::new(RefCell::new(false));
    harness.session.begin_interaction(pick_player_chain(
        Rc::clone(&second_picked),
        Rc::clone(&second_cancelled),
    ));

    harness.select_player(P1);
    harness.click(0);
    harness.click(0);

    assert!(first_picked.borrow().is_empty());
    assert!(!*first_cancelled.borrow());
    assert_eq!(*second_picked.borrow(), vec![P1]);
}

/// Input with no live interaction does nothing.
#[test]
fn test_input_without_interaction_is_ignored() {
    let mut harness = Harness::new();
    assert_eq!(harness.session.handle_input(UiInput::Click(0)), Ok(false));
    assert_eq!(harness.session.handle_input(UiInput::SelectPlayer(P1)), Ok(false));
}
