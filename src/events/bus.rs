//! Generic publish/subscribe bus.
//!
//! A bus delivers events of one catalogue `E` to handlers that receive a
//! mutable context `C` (the game session) alongside the event. Each event
//! value names its own channel through [`BusEvent`], so a payload can never
//! be published on the wrong channel.
//!
//! ## Delivery rules
//!
//! - Handlers on a channel run synchronously in registration order.
//! - Registration and removal take effect immediately. A handler added
//!   during an emit is not called for that emit; a handler removed during
//!   an emit is not called afterwards, even if it was already queued.
//! - A `once` handler is removed before it runs.
//! - The first handler error stops the emit and is returned to the caller.
//! - A handler that re-enters an emit which would call itself again is
//!   skipped for the nested call.
//!
//! Handlers are removed by channel and owner, never by comparing closures.
//! Every component that subscribes takes an [`OwnerId`] and removes
//! everything it registered with one call to [`EventBus::off_owner`].

use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::core::error::GameError;

/// Result returned by every handler.
pub type HandlerResult = Result<(), GameError>;

type Handler<E, C> = Rc<RefCell<dyn FnMut(&mut C, &E) -> HandlerResult>>;

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Identity of a subscriber, used to remove its handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocate an owner id no other subscriber has.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Owner({})", self.0)
    }
}

/// An event that knows which channel it belongs to.
pub trait BusEvent {
    type Channel: Copy + Eq + Hash + Debug;

    fn channel(&self) -> Self::Channel;
}

struct Listener<E, C> {
    id: u64,
    owner: Option<OwnerId>,
    once: bool,
    live: Rc<Cell<bool>>,
    handler: Handler<E, C>,
}

impl<E, C> Clone for Listener<E, C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            owner: self.owner,
            once: self.once,
            live: Rc::clone(&self.live),
            handler: Rc::clone(&self.handler),
        }
    }
}

struct Registry<E: BusEvent, C> {
    channels: FxHashMap<E::Channel, Vec<Listener<E, C>>>,
    next_id: u64,
}

impl<E: BusEvent, C> Registry<E, C> {
    fn retain(&mut self, channel: E::Channel, mut keep: impl FnMut(&Listener<E, C>) -> bool) -> usize {
        let Some(list) = self.channels.get_mut(&channel) else {
            return 0;
        };
        let before = list.len();
        list.retain(|listener| {
            let kept = keep(listener);
            if !kept {
                listener.live.set(false);
            }
            kept
        });
        let removed = before - list.len();
        if list.is_empty() {
            self.channels.remove(&channel);
        }
        removed
    }
}

/// A single publish/subscribe bus.
///
/// Cloning a bus yields another handle to the same registrations.
///
/// ```
/// use fengsheng_core::events::{BusEvent, EventBus, OwnerId};
///
/// #[derive(Debug)]
/// struct Ping(u32);
///
/// impl BusEvent for Ping {
///     type Channel = ();
///     fn channel(&self) -> () {}
/// }
///
/// let bus: EventBus<Ping, Vec<u32>> = EventBus::new();
/// let owner = OwnerId::fresh();
/// bus.on((), Some(owner), |seen: &mut Vec<u32>, ping: &Ping| {
///     seen.push(ping.0);
///     Ok(())
/// });
///
/// let mut seen = Vec::new();
/// bus.emit(&mut seen, &Ping(1)).unwrap();
/// bus.off_owner(owner);
/// bus.emit(&mut seen, &Ping(2)).unwrap();
///
/// assert_eq!(seen, vec![1]);
/// ```
pub struct EventBus<E: BusEvent, C> {
    inner: Rc<RefCell<Registry<E, C>>>,
}

impl<E: BusEvent, C> Clone for EventBus<E, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: BusEvent, C> Default for EventBus<E, C> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                channels: FxHashMap::default(),
                next_id: 0,
            })),
        }
    }
}

impl<E: BusEvent, C> Debug for EventBus<E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.total_listeners())
            .finish()
    }
}

impl<E: BusEvent, C> EventBus<E, C> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler on `channel`.
    pub fn on<F>(&self, channel: E::Channel, owner: Option<OwnerId>, handler: F)
    where
        F: FnMut(&mut C, &E) -> HandlerResult + 'static,
    {
        self.register(channel, owner, false, Rc::new(RefCell::new(handler)));
    }

    /// Register a handler that is removed after its first invocation.
    pub fn once<F>(&self, channel: E::Channel, owner: Option<OwnerId>, handler: F)
    where
        F: FnMut(&mut C, &E) -> HandlerResult + 'static,
    {
        self.register(channel, owner, true, Rc::new(RefCell::new(handler)));
    }

    fn register(&self, channel: E::Channel, owner: Option<OwnerId>, once: bool, handler: Handler<E, C>) {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.channels.entry(channel).or_default().push(Listener {
            id,
            owner,
            once,
            live: Rc::new(Cell::new(true)),
            handler,
        });
        trace!(?channel, ?owner, once, "handler registered");
    }

    /// Remove handlers from `channel`.
    ///
    /// With an owner, only that owner's handlers go; without one, every
    /// handler on the channel goes. Returns how many were removed.
    /// Removing from an empty channel is a no-op.
    pub fn off(&self, channel: E::Channel, owner: Option<OwnerId>) -> usize {
        self.inner.borrow_mut().retain(channel, |listener| match owner {
            Some(owner) => listener.owner != Some(owner),
            None => false,
        })
    }

    /// Remove every handler registered by `owner`, on every channel.
    pub fn off_owner(&self, owner: OwnerId) -> usize {
        let mut registry = self.inner.borrow_mut();
        let channels: Vec<E::Channel> = registry.channels.keys().copied().collect();
        channels
            .into_iter()
            .map(|channel| registry.retain(channel, |listener| listener.owner != Some(owner)))
            .sum()
    }

    fn remove_listener(&self, channel: E::Channel, id: u64) {
        self.inner
            .borrow_mut()
            .retain(channel, |listener| listener.id != id);
    }

    /// Publish `event` to its channel.
    ///
    /// Returns the number of handlers invoked, or the first handler error.
    pub fn emit(&self, ctx: &mut C, event: &E) -> Result<usize, GameError> {
        let channel = event.channel();
        let snapshot: Vec<Listener<E, C>> = self
            .inner
            .borrow()
            .channels
            .get(&channel)
            .map(|list| list.to_vec())
            .unwrap_or_default();

        let mut invoked = 0;
        for listener in snapshot {
            if !listener.live.get() {
                continue;
            }
            if listener.once {
                self.remove_listener(channel, listener.id);
            }
            let Ok(mut handler) = listener.handler.try_borrow_mut() else {
                warn!(?channel, "skipping re-entrant handler");
                continue;
            };
            invoked += 1;
            (&mut *handler)(ctx, event)?;
        }
        Ok(invoked)
    }

    /// Number of handlers on `channel`.
    #[must_use]
    pub fn listener_count(&self, channel: E::Channel) -> usize {
        self.inner
            .borrow()
            .channels
            .get(&channel)
            .map_or(0, Vec::len)
    }

    /// Number of handlers on every channel.
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.inner.borrow().channels.values().map(Vec::len).sum()
    }

    /// Remove every registration.
    pub fn reset(&self) {
        let mut registry = self.inner.borrow_mut();
        for listener in registry.channels.values().flatten() {
            listener.live.set(false);
        }
        registry.channels.clear();
    }
}
