// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The input bus: a single-threaded broadcast of pointer and keyboard events.
//!
//! ## Usage
//!
//! 1) The host owns an [`InputBus`] and calls [`InputBus::dispatch`] for every
//!    platform event after translating it into an [`InputEvent`].
//! 2) Consumers register listeners with [`InputBus::on_pointer`] or
//!    [`InputBus::on_key`] and keep the returned [`Subscription`].
//! 3) Dropping (or [cancelling](Subscription::cancel)) the subscription removes the
//!    listener before the call returns.
//!
//! ## Re-entrancy
//!
//! Listeners may subscribe, unsubscribe and even dispatch from inside a listener.
//! Dispatch takes a snapshot of the channel's listeners and checks each one's
//! liveness right before invoking it:
//!
//! - a listener removed while an event is being dispatched is not invoked for that event;
//! - a listener added while an event is being dispatched first sees the next event.
//!
//! ## Minimal example
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use kurbo::Point;
//! use understory_input::{InputBus, PointerInput};
//!
//! let bus = InputBus::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let sub = {
//!     let seen = seen.clone();
//!     bus.on_pointer(move |_| seen.set(seen.get() + 1))
//! };
//! bus.dispatch(&PointerInput::down(Point::new(5.0, 5.0)).into());
//! assert_eq!(seen.get(), 1);
//!
//! drop(sub);
//! assert_eq!(bus.listener_count(), 0);
//! bus.dispatch(&PointerInput::down(Point::new(5.0, 5.0)).into());
//! assert_eq!(seen.get(), 1);
//! ```

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;

use crate::log::{debug, trace};
use ui_events::keyboard::KeyboardEvent;

use crate::{InputEvent, PointerInput};

/// Listener channels on the bus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Pointer events.
    Pointer,
    /// Keyboard events.
    Key,
}

struct Entry<E> {
    id: u64,
    alive: Rc<Cell<bool>>,
    listener: Rc<dyn Fn(&E)>,
}

impl<E> Clone for Entry<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            alive: self.alive.clone(),
            listener: self.listener.clone(),
        }
    }
}

struct Registry {
    pointer: Vec<Entry<PointerInput>>,
    key: Vec<Entry<KeyboardEvent>>,
    next_id: u64,
}

impl Registry {
    fn new() -> Self {
        Self {
            pointer: Vec::new(),
            key: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn remove(&mut self, channel: Channel, id: u64) {
        match channel {
            Channel::Pointer => self.pointer.retain(|e| e.id != id),
            Channel::Key => self.key.retain(|e| e.id != id),
        }
    }

    fn prune(&mut self) {
        self.pointer.retain(|e| e.alive.get());
        self.key.retain(|e| e.alive.get());
    }
}

/// A shared, single-threaded source of input events.
///
/// Cloning an `InputBus` produces another handle to the same listener registry.
#[derive(Clone)]
pub struct InputBus {
    registry: Rc<RefCell<Registry>>,
}

impl Default for InputBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InputBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputBus")
            .field("pointer_listeners", &self.listener_count_for(Channel::Pointer))
            .field("key_listeners", &self.listener_count_for(Channel::Key))
            .finish()
    }
}

impl InputBus {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new())),
        }
    }

    /// Subscribe to pointer events.
    pub fn on_pointer(&self, listener: impl Fn(&PointerInput) + 'static) -> Subscription {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id();
        let alive = Rc::new(Cell::new(true));
        reg.pointer.push(Entry {
            id,
            alive: alive.clone(),
            listener: Rc::new(listener),
        });
        debug!("input bus: subscribed pointer listener {}", id);
        self.subscription(Channel::Pointer, id, alive)
    }

    /// Subscribe to keyboard events.
    pub fn on_key(&self, listener: impl Fn(&KeyboardEvent) + 'static) -> Subscription {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id();
        let alive = Rc::new(Cell::new(true));
        reg.key.push(Entry {
            id,
            alive: alive.clone(),
            listener: Rc::new(listener),
        });
        debug!("input bus: subscribed key listener {}", id);
        self.subscription(Channel::Key, id, alive)
    }

    fn subscription(&self, channel: Channel, id: u64, alive: Rc<Cell<bool>>) -> Subscription {
        Subscription {
            registry: Rc::downgrade(&self.registry),
            channel,
            id,
            alive,
        }
    }

    /// Deliver an event to every live listener of its channel.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &InputEvent) -> usize {
        match event {
            InputEvent::Pointer(e) => self.dispatch_pointer(e),
            InputEvent::Key(e) => self.dispatch_key(e),
        }
    }

    /// Deliver a pointer event.
    pub fn dispatch_pointer(&self, event: &PointerInput) -> usize {
        let snapshot: SmallVec<[Entry<PointerInput>; 8]> = {
            let mut reg = self.registry.borrow_mut();
            reg.prune();
            reg.pointer.iter().cloned().collect()
        };
        trace!(
            "input bus: pointer {:?} to {} listeners",
            event.phase(),
            snapshot.len()
        );
        run(&snapshot, event)
    }

    /// Deliver a keyboard event.
    pub fn dispatch_key(&self, event: &KeyboardEvent) -> usize {
        let snapshot: SmallVec<[Entry<KeyboardEvent>; 8]> = {
            let mut reg = self.registry.borrow_mut();
            reg.prune();
            reg.key.iter().cloned().collect()
        };
        trace!("input bus: key {} to {} listeners", event.key, snapshot.len());
        run(&snapshot, event)
    }

    /// Number of live listeners across all channels.
    pub fn listener_count(&self) -> usize {
        self.listener_count_for(Channel::Pointer) + self.listener_count_for(Channel::Key)
    }

    /// Number of live listeners on one channel.
    pub fn listener_count_for(&self, channel: Channel) -> usize {
        let reg = self.registry.borrow();
        match channel {
            Channel::Pointer => reg.pointer.iter().filter(|e| e.alive.get()).count(),
            Channel::Key => reg.key.iter().filter(|e| e.alive.get()).count(),
        }
    }
}

fn run<E>(snapshot: &[Entry<E>], event: &E) -> usize {
    let mut invoked = 0;
    for entry in snapshot {
        // Re-checked per entry: an earlier listener may have cancelled this one.
        if entry.alive.get() {
            (entry.listener)(event);
            invoked += 1;
        }
    }
    invoked
}

/// A scoped listener registration.
///
/// The listener stays registered for as long as this value lives. Dropping it
/// removes the listener synchronously; the listener will not be invoked again,
/// even by a dispatch that is already in progress.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    channel: Channel,
    id: u64,
    alive: Rc<Cell<bool>>,
}

impl Subscription {
    /// The channel this subscription listens on.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Whether the listener is still registered.
    ///
    /// This is `true` until the subscription is dropped, which means it is always
    /// `true` for a subscription you can still observe.
    pub fn is_active(&self) -> bool {
        self.alive.get()
    }

    /// Unsubscribe now. Equivalent to dropping the subscription.
    pub fn cancel(self) {}
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("id", &self.id)
            .field("alive", &self.alive.get())
            .finish_non_exhaustive()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.alive.set(false);
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // If the registry is busy, the dead entry is pruned on the next dispatch.
        if let Ok(mut reg) = registry.try_borrow_mut() {
            reg.remove(self.channel, self.id);
        }
        debug!("input bus: unsubscribed {:?} listener {}", self.channel, self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Point;
    use ui_events::keyboard::Key;

    use crate::key_down;

    fn pointer() -> InputEvent {
        PointerInput::down(Point::new(1.0, 1.0)).into()
    }

    fn key(c: &str) -> InputEvent {
        key_down(Key::Character(c.into())).into()
    }

    #[test]
    fn channels_are_independent() {
        let bus = InputBus::new();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let h = hits.clone();
        let _p = bus.on_pointer(move |_| h.borrow_mut().push("pointer"));
        let h = hits.clone();
        let _k = bus.on_key(move |_| h.borrow_mut().push("key"));

        assert_eq!(bus.listener_count_for(Channel::Pointer), 1);
        assert_eq!(bus.listener_count_for(Channel::Key), 1);

        assert_eq!(bus.dispatch(&pointer()), 1);
        assert_eq!(bus.dispatch(&key("a")), 1);
        assert_eq!(*hits.borrow(), vec!["pointer", "key"]);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let bus = InputBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let order = order.clone();
                bus.on_pointer(move |_| order.borrow_mut().push(i))
            })
            .collect();
        bus.dispatch(&pointer());
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        drop(subs);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn cancel_removes_immediately() {
        let bus = InputBus::new();
        let sub = bus.on_key(|_| {});
        assert!(sub.is_active());
        assert_eq!(sub.channel(), Channel::Key);
        sub.cancel();
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn listener_cancelled_mid_dispatch_is_skipped() {
        let bus = InputBus::new();
        let victim_calls = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let s = slot.clone();
        let _killer = bus.on_pointer(move |_| {
            s.borrow_mut().take();
        });
        let calls = victim_calls.clone();
        *slot.borrow_mut() = Some(bus.on_pointer(move |_| calls.set(calls.get() + 1)));

        assert_eq!(bus.dispatch(&pointer()), 1);
        assert_eq!(victim_calls.get(), 0);
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn listener_added_mid_dispatch_sees_next_event() {
        let bus = InputBus::new();
        let late_calls = Rc::new(Cell::new(0));
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

        let b = bus.clone();
        let l = late.clone();
        let c = late_calls.clone();
        let _adder = bus.on_pointer(move |_| {
            let c = c.clone();
            l.borrow_mut().push(b.on_pointer(move |_| c.set(c.get() + 1)));
        });

        bus.dispatch(&pointer());
        assert_eq!(late_calls.get(), 0);
        bus.dispatch(&pointer());
        assert_eq!(late_calls.get(), 1);
    }

    #[test]
    fn self_cancelling_listener_runs_once() {
        let bus = InputBus::new();
        let calls = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let s = slot.clone();
        let c = calls.clone();
        *slot.borrow_mut() = Some(bus.on_key(move |_| {
            c.set(c.get() + 1);
            s.borrow_mut().take();
        }));

        bus.dispatch(&key("x"));
        bus.dispatch(&key("x"));
        assert_eq!(calls.get(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_bus_drops_cleanly() {
        let bus = InputBus::new();
        let sub = bus.on_pointer(|_| {});
        drop(bus);
        assert!(sub.is_active());
        drop(sub);
    }
}
