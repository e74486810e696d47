// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dismissal watcher.
//!
//! ## Lifecycle
//!
//! - While active, the watcher holds exactly one pointer [`Subscription`] and one
//!   key [`Subscription`] on its [`InputBus`].
//! - Deactivating drops both before returning. Because bus dispatch checks
//!   liveness per listener, an event that is already being dispatched will not
//!   reach a watcher that was deactivated earlier in the same dispatch.
//! - Dropping the watcher deactivates it.
//!
//! ## Configuration
//!
//! Boundary, exclusions, callback, cancel key and trigger phase live in a cell
//! that the listeners read on every event. Changing them never re-registers
//! listeners and never leaves a listener looking at old values.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use smallvec::SmallVec;
use ui_events::keyboard::{Key, KeyboardEvent, NamedKey};
use understory_input::{InputBus, PointerInput, PointerPhase, Subscription};
use understory_region::{RegionId, RegionResolver};

use crate::log::{debug, trace};
use crate::{evaluate, is_cancel};

/// Construction-time configuration for a [`DismissWatcher`].
#[derive(Clone, Debug, PartialEq)]
pub struct DismissOptions {
    /// Start listening immediately. Defaults to `true`.
    pub active: bool,
    /// Regions outside the boundary that must not trigger dismissal.
    pub excluded: SmallVec<[RegionId; 4]>,
    /// Key whose press dismisses unconditionally. Defaults to Escape.
    pub cancel_key: Key,
    /// Pointer phase that is evaluated. Defaults to [`PointerPhase::Down`].
    pub trigger: PointerPhase,
}

impl Default for DismissOptions {
    fn default() -> Self {
        Self {
            active: true,
            excluded: SmallVec::new(),
            cancel_key: Key::Named(NamedKey::Escape),
            trigger: PointerPhase::Down,
        }
    }
}

impl DismissOptions {
    /// Set the initial activation flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set the excluded regions.
    #[must_use]
    pub fn with_excluded(mut self, excluded: impl IntoIterator<Item = RegionId>) -> Self {
        self.excluded = excluded.into_iter().collect();
        self
    }

    /// Set the cancel key.
    #[must_use]
    pub fn with_cancel_key(mut self, key: impl Into<Key>) -> Self {
        self.cancel_key = key.into();
        self
    }

    /// Set the pointer phase that is evaluated.
    #[must_use]
    pub fn with_trigger(mut self, trigger: PointerPhase) -> Self {
        self.trigger = trigger;
        self
    }
}

struct Config {
    boundary: Option<RegionId>,
    excluded: SmallVec<[RegionId; 4]>,
    cancel_key: Key,
    trigger: PointerPhase,
    on_dismiss: Rc<dyn Fn()>,
}

struct Listeners {
    _pointer: Subscription,
    _key: Subscription,
}

struct Shared<R> {
    bus: InputBus,
    resolver: R,
    config: RefCell<Config>,
    listeners: RefCell<Option<Listeners>>,
}

impl<R: RegionResolver + 'static> Shared<R> {
    /// The callback to run for `event`, if it dismisses.
    fn on_pointer(&self, event: &PointerInput) -> Option<Rc<dyn Fn()>> {
        let config = self.config.try_borrow().ok()?;
        if event.phase() != Some(config.trigger) {
            return None;
        }
        let verdict = evaluate(&self.resolver, config.boundary, &config.excluded, &event.hit);
        trace!(
            "dismiss: {:?} at {:?} -> {:?}",
            config.boundary, event.hit.position, verdict
        );
        verdict.dismisses().then(|| config.on_dismiss.clone())
    }

    fn on_key(&self, event: &KeyboardEvent) -> Option<Rc<dyn Fn()>> {
        let config = self.config.try_borrow().ok()?;
        if !is_cancel(event, &config.cancel_key) {
            return None;
        }
        trace!("dismiss: cancel key {} pressed", event.key);
        Some(config.on_dismiss.clone())
    }

    fn is_active(&self) -> bool {
        self.listeners.borrow().is_some()
    }

    fn activate(self: &Rc<Self>) {
        let mut listeners = self.listeners.borrow_mut();
        if listeners.is_some() {
            return;
        }

        let weak: Weak<Self> = Rc::downgrade(self);
        let pointer = self.bus.on_pointer(move |event| {
            // The callback runs with no borrows held so it may reconfigure or
            // deactivate this watcher.
            let Some(shared) = weak.upgrade() else { return };
            let callback = shared.on_pointer(event);
            drop(shared);
            if let Some(callback) = callback {
                callback();
            }
        });

        let weak: Weak<Self> = Rc::downgrade(self);
        let key = self.bus.on_key(move |event| {
            let Some(shared) = weak.upgrade() else { return };
            let callback = shared.on_key(event);
            drop(shared);
            if let Some(callback) = callback {
                callback();
            }
        });

        *listeners = Some(Listeners {
            _pointer: pointer,
            _key: key,
        });
        debug!("dismiss: activated for {:?}", self.config.borrow().boundary);
    }

    fn deactivate(&self) {
        // Take first, then drop outside the borrow.
        let taken = self.listeners.borrow_mut().take();
        if taken.is_some() {
            debug!("dismiss: deactivated");
        }
        drop(taken);
    }

    fn set_active(self: &Rc<Self>, active: bool) {
        if active {
            self.activate();
        } else {
            self.deactivate();
        }
    }
}

/// Watches global input and reports interactions outside a region.
///
/// See the [crate documentation](crate) for the full contract.
pub struct DismissWatcher<R> {
    shared: Rc<Shared<R>>,
}

impl<R: RegionResolver + 'static> DismissWatcher<R> {
    /// Create a watcher with default options (active, no exclusions, Escape cancels).
    pub fn new(
        bus: &InputBus,
        resolver: R,
        boundary: Option<RegionId>,
        on_dismiss: impl Fn() + 'static,
    ) -> Self {
        Self::with_options(bus, resolver, boundary, on_dismiss, DismissOptions::default())
    }

    /// Create a watcher with explicit options.
    pub fn with_options(
        bus: &InputBus,
        resolver: R,
        boundary: Option<RegionId>,
        on_dismiss: impl Fn() + 'static,
        options: DismissOptions,
    ) -> Self {
        let shared = Rc::new(Shared {
            bus: bus.clone(),
            resolver,
            config: RefCell::new(Config {
                boundary,
                excluded: options.excluded,
                cancel_key: options.cancel_key,
                trigger: options.trigger,
                on_dismiss: Rc::new(on_dismiss),
            }),
            listeners: RefCell::new(None),
        });
        shared.set_active(options.active);
        Self { shared }
    }

    /// A weak handle for controlling activation from inside callbacks.
    pub fn handle(&self) -> DismissHandle<R> {
        DismissHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Whether the watcher is listening.
    pub fn is_active(&self) -> bool {
        self.shared.is_active()
    }

    /// Set the activation flag. Setting the current value again is a no-op.
    pub fn set_active(&self, active: bool) {
        self.shared.set_active(active);
    }

    /// Start listening, if not already.
    pub fn activate(&self) {
        self.shared.activate();
    }

    /// Stop listening, if not already. Listeners are gone when this returns.
    pub fn deactivate(&self) {
        self.shared.deactivate();
    }

    /// The boundary region.
    pub fn boundary(&self) -> Option<RegionId> {
        self.shared.config.borrow().boundary
    }

    /// Re-bind the boundary region. `None` means not mounted.
    pub fn set_boundary(&self, boundary: Option<RegionId>) {
        self.shared.config.borrow_mut().boundary = boundary;
    }

    /// The excluded regions.
    pub fn excluded(&self) -> SmallVec<[RegionId; 4]> {
        self.shared.config.borrow().excluded.clone()
    }

    /// Replace the excluded regions.
    pub fn set_excluded(&self, excluded: impl IntoIterator<Item = RegionId>) {
        self.shared.config.borrow_mut().excluded = excluded.into_iter().collect();
    }

    /// Add one excluded region.
    pub fn exclude(&self, region: RegionId) {
        let mut config = self.shared.config.borrow_mut();
        if !config.excluded.contains(&region) {
            config.excluded.push(region);
        }
    }

    /// Replace the dismissal callback.
    pub fn set_on_dismiss(&self, on_dismiss: impl Fn() + 'static) {
        self.shared.config.borrow_mut().on_dismiss = Rc::new(on_dismiss);
    }

    /// The cancel key.
    pub fn cancel_key(&self) -> Key {
        self.shared.config.borrow().cancel_key.clone()
    }

    /// Replace the cancel key.
    pub fn set_cancel_key(&self, key: impl Into<Key>) {
        self.shared.config.borrow_mut().cancel_key = key.into();
    }

    /// The pointer phase that is evaluated.
    pub fn trigger(&self) -> PointerPhase {
        self.shared.config.borrow().trigger
    }

    /// Replace the pointer phase that is evaluated.
    pub fn set_trigger(&self, trigger: PointerPhase) {
        self.shared.config.borrow_mut().trigger = trigger;
    }

    /// The region resolver.
    pub fn resolver(&self) -> &R {
        &self.shared.resolver
    }
}

impl<R> fmt::Debug for DismissWatcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.shared.config.try_borrow();
        f.debug_struct("DismissWatcher")
            .field("active", &self.shared.listeners.try_borrow().map(|l| l.is_some()).ok())
            .field("boundary", &config.as_ref().map(|c| c.boundary).ok())
            .field("excluded", &config.as_ref().map(|c| c.excluded.clone()).ok())
            .finish_non_exhaustive()
    }
}

/// A weak handle to a [`DismissWatcher`].
///
/// Dismissal callbacks usually need to turn the watcher off. Capturing the
/// watcher itself in its own callback would create a reference cycle; capture a
/// handle instead. All operations are no-ops once the watcher is dropped.
pub struct DismissHandle<R> {
    shared: Weak<Shared<R>>,
}

impl<R> Clone for DismissHandle<R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<R: RegionResolver + 'static> DismissHandle<R> {
    /// Whether the watcher still exists and is listening.
    pub fn is_active(&self) -> bool {
        self.shared.upgrade().is_some_and(|s| s.is_active())
    }

    /// Set the activation flag, if the watcher still exists.
    pub fn set_active(&self, active: bool) {
        if let Some(shared) = self.shared.upgrade() {
            shared.set_active(active);
        }
    }

    /// Start listening, if the watcher still exists.
    pub fn activate(&self) {
        self.set_active(true);
    }

    /// Stop listening, if the watcher still exists.
    pub fn deactivate(&self) {
        self.set_active(false);
    }
}

impl<R> fmt::Debug for DismissHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissHandle")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}
