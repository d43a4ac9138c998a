//! Integration tests for the publish/subscribe buses.
//!
//! These drive a bare `EventBus` with a plain `Vec<String>` context, so
//! registration and removal semantics are checked independently of the
//! game session.

use fengsheng_core::events::{BusEvent, EventBus, EventHub, GameEvent, GameEventKind, OwnerId, UiEvent, UiEventKind};
use fengsheng_core::{GameError, GamePhase, PlayerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Topic {
    Alpha,
    Beta,
}

#[derive(Debug)]
struct Note {
    topic: Topic,
    text: &'static str,
}

impl BusEvent for Note {
    type Channel = Topic;

    fn channel(&self) -> Topic {
        self.topic
    }
}

type Log = Vec<String>;
type Bus = EventBus<Note, Log>;

fn alpha(text: &'static str) -> Note {
    Note {
        topic: Topic::Alpha,
        text,
    }
}

fn record(tag: &'static str) -> impl FnMut(&mut Log, &Note) -> Result<(), GameError> {
    move |log, note| {
        log.push(format!("{tag}:{}", note.text));
        Ok(())
    }
}

/// Handlers on a channel run in registration order.
#[test]
fn test_handlers_run_in_registration_order() {
    let bus = Bus::new();
    bus.on(Topic::Alpha, None, record("a"));
    bus.on(Topic::Alpha, None, record("b"));
    bus.on(Topic::Beta, None, record("c"));

    let mut log = Log::new();
    let invoked = bus.emit(&mut log, &alpha("x")).unwrap();

    assert_eq!(invoked, 2);
    assert_eq!(log, vec!["a:x", "b:x"]);
}

/// A handler registered while an emit is running waits for the next emit.
#[test]
fn test_registration_during_emit_waits_for_next_emit() {
    let bus = Bus::new();
    let handle = bus.clone();
    let mut added = false;
    bus.on(Topic::Alpha, None, move |log: &mut Log, note: &Note| {
        log.push(format!("first:{}", note.text));
        if !added {
            added = true;
            handle.on(Topic::Alpha, None, record("late"));
        }
        Ok(())
    });

    let mut log = Log::new();
    bus.emit(&mut log, &alpha("1")).unwrap();
    assert_eq!(log, vec!["first:1"]);

    bus.emit(&mut log, &alpha("2")).unwrap();
    assert_eq!(log, vec!["first:1", "first:2", "late:2"]);
}

/// A handler removed by an earlier handler of the same emit is skipped.
#[test]
fn test_removal_during_emit_skips_the_removed_handler() {
    let bus = Bus::new();
    let victim = OwnerId::fresh();
    let handle = bus.clone();
    bus.on(Topic::Alpha, None, move |log: &mut Log, _: &Note| {
        log.push("remover".into());
        handle.off(Topic::Alpha, Some(victim));
        Ok(())
    });
    bus.on(Topic::Alpha, Some(victim), record("victim"));

    let mut log = Log::new();
    let invoked = bus.emit(&mut log, &alpha("x")).unwrap();

    assert_eq!(invoked, 1);
    assert_eq!(log, vec!["remover"]);
    assert_eq!(bus.listener_count(Topic::Alpha), 1);
}

/// A once handler that re-emits its own channel still runs only once.
#[test]
fn test_once_handler_runs_once_under_reentry() {
    let bus = Bus::new();
    let handle = bus.clone();
    bus.once(Topic::Alpha, None, move |log: &mut Log, note: &Note| {
        log.push(format!("once:{}", note.text));
        handle.emit(log, &alpha("inner")).map(|_| ())
    });

    let mut log = Log::new();
    bus.emit(&mut log, &alpha("outer")).unwrap();
    bus.emit(&mut log, &alpha("again")).unwrap();

    assert_eq!(log, vec!["once:outer"]);
    assert_eq!(bus.total_listeners(), 0);
}

/// Removing from a channel nobody registered on is a no-op.
#[test]
fn test_off_on_empty_channel_is_noop() {
    let bus = Bus::new();
    assert_eq!(bus.off(Topic::Beta, None), 0);
    assert_eq!(bus.off(Topic::Beta, Some(OwnerId::fresh())), 0);
    assert_eq!(bus.off_owner(OwnerId::fresh()), 0);
}

/// Removal by owner leaves other owners' handlers on the same channel.
#[test]
fn test_off_by_owner_is_selective() {
    let bus = Bus::new();
    let mine = OwnerId::fresh();
    let theirs = OwnerId::fresh();
    bus.on(Topic::Alpha, Some(mine), record("mine"));
    bus.on(Topic::Beta, Some(mine), record("mine"));
    bus.on(Topic::Alpha, Some(theirs), record("theirs"));
    bus.on(Topic::Alpha, None, record("anon"));

    assert_eq!(bus.off_owner(mine), 2);

    let mut log = Log::new();
    bus.emit(&mut log, &alpha("x")).unwrap();
    assert_eq!(log, vec!["theirs:x", "anon:x"]);

    // Without an owner, the whole channel goes.
    assert_eq!(bus.off(Topic::Alpha, None), 2);
    assert_eq!(bus.total_listeners(), 0);
}

/// The first handler error stops the emit and is returned.
#[test]
fn test_handler_error_stops_emit() {
    let bus = Bus::new();
    bus.on(Topic::Alpha, None, |_: &mut Log, _: &Note| {
        Err(GameError::InvalidConfig("broken".into()))
    });
    bus.on(Topic::Alpha, None, record("after"));

    let mut log = Log::new();
    let err = bus.emit(&mut log, &alpha("x")).unwrap_err();

    assert_eq!(err, GameError::InvalidConfig("broken".into()));
    assert!(log.is_empty());
}

/// Resetting the bus from a handler silences the rest of the emit.
#[test]
fn test_reset_during_emit_silences_remaining_handlers() {
    let bus = Bus::new();
    let handle = bus.clone();
    bus.on(Topic::Alpha, None, move |log: &mut Log, _: &Note| {
        log.push("reset".into());
        handle.reset();
        Ok(())
    });
    bus.on(Topic::Alpha, None, record("later"));

    let mut log = Log::new();
    bus.emit(&mut log, &alpha("x")).unwrap();

    assert_eq!(log, vec!["reset"]);
    assert_eq!(bus.total_listeners(), 0);
}

/// Each hub bus keeps its own registrations; owner removal spans all of them.
#[test]
fn test_hub_owner_removal_spans_buses() {
    let hub: EventHub<Log> = EventHub::new();
    let owner = OwnerId::fresh();
    hub.game.on(GameEventKind::PhaseChanged, Some(owner), |log: &mut Log, _: &GameEvent| {
        log.push("game".into());
        Ok(())
    });
    hub.ui.on(UiEventKind::BannedIconShown, Some(owner), |log: &mut Log, _: &UiEvent| {
        log.push("ui".into());
        Ok(())
    });
    hub.ui.on(UiEventKind::BannedIconShown, None, |log: &mut Log, _: &UiEvent| {
        log.push("ui-anon".into());
        Ok(())
    });

    let mut log = Log::new();
    hub.game
        .emit(
            &mut log,
            &GameEvent::PhaseChanged {
                phase: GamePhase::Main,
                turn_player: None,
            },
        )
        .unwrap();
    assert_eq!(log, vec!["game"]);

    assert_eq!(hub.off_owner(owner), 2);
    assert_eq!(hub.total_listeners(), 1);

    hub.ui.emit(&mut log, &UiEvent::BannedIconShown(PlayerId(1))).unwrap();
    assert_eq!(log, vec!["game", "ui-anon"]);

    hub.reset();
    assert_eq!(hub.total_listeners(), 0);
}
