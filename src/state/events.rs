//! Remote Events - directional event channel and listener handles
//!
//! - [`EventChannel`] - anything that can deliver [`RemoteEvent`]s to listeners
//! - [`RemoteEmitter`] - in-process channel, cloned freely, single-threaded
//! - [`Subscription`] - removes its listener on `remove()` or drop
//! - [`EventHandler`] - enable/disable wrapper that degrades to a no-op when
//!   the platform has no remote channel
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::state::events::{EventHandler, RemoteEmitter};
//!
//! let emitter = RemoteEmitter::new();
//! let mut handler = EventHandler::new();
//! handler.enable(Some(&emitter), |event| println!("{}", event.event_type));
//!
//! emitter.emit(&RemoteEvent::new("right"));
//! handler.disable();
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::types::RemoteEvent;

// =============================================================================
// TYPES
// =============================================================================

/// Callback receiving remote events.
pub type Listener = Box<dyn FnMut(&RemoteEvent)>;

/// Source of remote events.
pub trait EventChannel {
    /// Attach a listener. It stays attached until the subscription goes away.
    fn add_listener(&self, listener: Listener) -> Subscription;
}

/// Keeps a listener attached. Dropping it detaches the listener.
#[must_use = "dropping a Subscription detaches its listener"]
pub struct Subscription {
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cleanup: impl FnOnce() + 'static) -> Self {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// Detach the listener now.
    pub fn remove(mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cleanup.is_some())
            .finish()
    }
}

// =============================================================================
// EMITTER
// =============================================================================

#[derive(Default)]
struct EmitterInner {
    listeners: Vec<(usize, Listener)>,
    next_id: usize,
    dispatching: bool,
    // Listeners removed while an emit had them checked out
    removed: Vec<usize>,
}

impl EmitterInner {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Listeners checked out for one emit. Puts them back on drop, so a
/// panicking listener leaves the emitter usable.
struct Dispatch<'a> {
    inner: &'a RefCell<EmitterInner>,
    listeners: Vec<(usize, Listener)>,
}

impl Drop for Dispatch<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.dispatching = false;
        let removed = std::mem::take(&mut inner.removed);
        let mut listeners = std::mem::take(&mut self.listeners);
        listeners.retain(|(id, _)| !removed.contains(id));
        // Keep listeners added during the emit after the existing ones
        listeners.append(&mut inner.listeners);
        inner.listeners = listeners;
    }
}

/// In-process remote event channel.
///
/// Listeners run in registration order. Listeners added or removed during an
/// emit take effect once it completes.
#[derive(Clone, Default)]
pub struct RemoteEmitter {
    inner: Rc<RefCell<EmitterInner>>,
}

impl RemoteEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener. Returns how many were called.
    pub fn emit(&self, event: &RemoteEvent) -> usize {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            if inner.dispatching {
                warn!(event = %event.event_type, "nested remote event dropped");
                return 0;
            }
            inner.dispatching = true;
            std::mem::take(&mut inner.listeners)
        };
        let mut dispatch = Dispatch {
            inner: &self.inner,
            listeners,
        };

        let mut delivered = 0;
        for (id, listener) in dispatch.listeners.iter_mut() {
            let removed = self.inner.borrow().removed.contains(id);
            if !removed {
                listener(event);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl EventChannel for RemoteEmitter {
    fn add_listener(&self, listener: Listener) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id();
            inner.listeners.push((id, listener));
            id
        };

        let weak: Weak<RefCell<EmitterInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.borrow_mut();
                inner.listeners.retain(|(listener_id, _)| *listener_id != id);
                if inner.dispatching {
                    inner.removed.push(id);
                }
            }
        })
    }
}

impl std::fmt::Debug for RemoteEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteEmitter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

// =============================================================================
// EVENT HANDLER
// =============================================================================

static MISSING_CHANNEL_WARNED: AtomicBool = AtomicBool::new(false);

/// Enable/disable wrapper around a channel subscription.
#[derive(Debug, Default)]
pub struct EventHandler {
    subscription: Option<Subscription>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `callback` to `channel`, replacing any earlier subscription.
    ///
    /// With no channel the handler stays disabled and a warning is logged
    /// once per process. Returns whether the handler is now enabled.
    pub fn enable(
        &mut self,
        channel: Option<&dyn EventChannel>,
        callback: impl FnMut(&RemoteEvent) + 'static,
    ) -> bool {
        self.disable();

        self.subscribe(channel, callback, &MISSING_CHANNEL_WARNED)
    }

    fn subscribe(
        &mut self,
        channel: Option<&dyn EventChannel>,
        callback: impl FnMut(&RemoteEvent) + 'static,
        warned: &AtomicBool,
    ) -> bool {
        let Some(channel) = channel else {
            if !warned.swap(true, Ordering::Relaxed) {
                warn!("remote event channel not available; navigation disabled");
            }
            return false;
        };

        self.subscription = Some(channel.add_listener(Box::new(callback)));
        true
    }

    pub fn disable(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.remove();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.subscription.is_some()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::sync::atomic::AtomicUsize;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    fn counter() -> (Rc<Cell<usize>>, impl FnMut(&RemoteEvent) + 'static) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        (count, move |_: &RemoteEvent| count_clone.set(count_clone.get() + 1))
    }

    #[test]
    fn test_emit_reaches_listeners() {
        let emitter = RemoteEmitter::new();
        let (count, listener) = counter();
        let _sub = emitter.add_listener(Box::new(listener));

        assert_eq!(emitter.emit(&RemoteEvent::new("right")), 1);
        assert_eq!(emitter.emit(&RemoteEvent::new("select")), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_subscription_drop_detaches() {
        let emitter = RemoteEmitter::new();
        let (count, listener) = counter();
        let sub = emitter.add_listener(Box::new(listener));
        assert_eq!(emitter.listener_count(), 1);

        drop(sub);
        assert_eq!(emitter.listener_count(), 0);
        emitter.emit(&RemoteEvent::new("right"));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_listener_order() {
        let emitter = RemoteEmitter::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let log = log.clone();
                emitter.add_listener(Box::new(move |_: &RemoteEvent| log.borrow_mut().push(i)))
            })
            .collect();

        emitter.emit(&RemoteEvent::new("left"));
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn test_remove_during_emit() {
        let emitter = RemoteEmitter::new();
        let (count, listener) = counter();

        // First listener detaches the second one mid-emit
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let victim_clone = victim.clone();
        let _killer = emitter.add_listener(Box::new(move |_: &RemoteEvent| {
            if let Some(sub) = victim_clone.borrow_mut().take() {
                sub.remove();
            }
        }));
        *victim.borrow_mut() = Some(emitter.add_listener(Box::new(listener)));

        assert_eq!(emitter.emit(&RemoteEvent::new("right")), 1);
        assert_eq!(count.get(), 0);
        assert_eq!(emitter.listener_count(), 1);
    }

    #[test]
    fn test_add_during_emit_applies_next_time() {
        let emitter = RemoteEmitter::new();
        let (count, listener) = counter();
        let listener = RefCell::new(Some(listener));
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

        let emitter_clone = emitter.clone();
        let late_clone = late.clone();
        let _adder = emitter.add_listener(Box::new(move |_: &RemoteEvent| {
            if let Some(listener) = listener.borrow_mut().take() {
                let sub = emitter_clone.add_listener(Box::new(listener));
                late_clone.borrow_mut().push(sub);
            }
        }));

        assert_eq!(emitter.emit(&RemoteEvent::new("right")), 1);
        assert_eq!(count.get(), 0);

        assert_eq!(emitter.emit(&RemoteEvent::new("right")), 2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_nested_emit_dropped() {
        let emitter = RemoteEmitter::new();
        let nested = Rc::new(Cell::new(usize::MAX));

        let emitter_clone = emitter.clone();
        let nested_clone = nested.clone();
        let _sub = emitter.add_listener(Box::new(move |_: &RemoteEvent| {
            nested_clone.set(emitter_clone.emit(&RemoteEvent::new("left")));
        }));

        emitter.emit(&RemoteEvent::new("right"));
        assert_eq!(nested.get(), 0);
    }

    #[test]
    fn test_handler_enable_disable() {
        let emitter = RemoteEmitter::new();
        let (count, listener) = counter();
        let mut handler = EventHandler::new();

        assert!(handler.enable(Some(&emitter), listener));
        assert!(handler.is_enabled());
        emitter.emit(&RemoteEvent::new("right"));
        assert_eq!(count.get(), 1);

        handler.disable();
        assert!(!handler.is_enabled());
        emitter.emit(&RemoteEvent::new("right"));
        assert_eq!(count.get(), 1);
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn test_handler_reenable_replaces() {
        let emitter = RemoteEmitter::new();
        let (first, first_listener) = counter();
        let (second, second_listener) = counter();
        let mut handler = EventHandler::new();

        handler.enable(Some(&emitter), first_listener);
        handler.enable(Some(&emitter), second_listener);
        assert_eq!(emitter.listener_count(), 1);

        emitter.emit(&RemoteEvent::new("down"));
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_handler_without_channel_is_disabled() {
        let (count, listener) = counter();
        let mut handler = EventHandler::new();

        assert!(!handler.enable(None, listener));
        assert!(!handler.is_enabled());
        // A second attempt is just as quiet and just as harmless
        let (_, listener) = counter();
        assert!(!handler.enable(None, listener));
        handler.disable();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_panicking_listener_leaves_emitter_usable() {
        let emitter = RemoteEmitter::new();
        let (count, listener) = counter();
        let armed = Rc::new(Cell::new(true));

        let armed_clone = armed.clone();
        let _bomb = emitter.add_listener(Box::new(move |_: &RemoteEvent| {
            if armed_clone.replace(false) {
                panic!("listener failed");
            }
        }));
        let _counter = emitter.add_listener(Box::new(listener));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            emitter.emit(&RemoteEvent::new("right"))
        }));
        assert!(result.is_err());
        assert_eq!(emitter.listener_count(), 2);

        assert_eq!(emitter.emit(&RemoteEvent::new("right")), 2);
        assert_eq!(count.get(), 1);
    }

    /// Counts WARN events on the current thread.
    struct WarnCounter(std::sync::Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn test_missing_channel_warns_once() {
        let warnings = std::sync::Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));
        let warned = AtomicBool::new(false);

        tracing::subscriber::with_default(subscriber, || {
            let mut handler = EventHandler::new();
            let (_, listener) = counter();
            assert!(!handler.subscribe(None, listener, &warned));
            let (_, listener) = counter();
            assert!(!handler.subscribe(None, listener, &warned));
        });

        assert_eq!(warnings.load(Ordering::Relaxed), 1);
        assert!(warned.load(Ordering::Relaxed));
    }
}
