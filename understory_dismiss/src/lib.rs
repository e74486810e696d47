// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dismiss --heading-base-level=0

//! Understory Dismiss: detect interactions outside a region.
//!
//! ## Overview
//!
//! Popovers, menus and dropdowns close when the user presses somewhere else or
//! hits Escape. [`DismissWatcher`] turns the global input stream of an
//! [`InputBus`](understory_input::InputBus) into that single signal:
//!
//! - a pointer press whose hit is outside the *boundary* region and outside every
//!   *excluded* region (for example the button that toggles the popover) invokes
//!   the dismissal callback once;
//! - a press of the *cancel key* (Escape by default) invokes it once, wherever the
//!   pointer is.
//!
//! Region geometry is answered by a [`RegionResolver`](understory_region::RegionResolver),
//! so the watcher works with any host renderer and is trivially testable with
//! [`RegionMap`](understory_region::RegionMap).
//!
//! ## Rules
//!
//! - Inactive watchers hold no listeners and never invoke the callback.
//! - Active watchers hold exactly one pointer and one key listener.
//! - Only pointer presses are evaluated by default; see [`DismissOptions::with_trigger`].
//! - Hits on the boundary's edge are inside.
//! - Unbound or missing boundaries fail open: nothing is dismissed.
//! - There is no debouncing. Every qualifying event invokes the callback; turn the
//!   watcher off in the callback if you only want the first one.
//! - Configuration changes apply to the next event.
//!
//! ## Example
//!
//! ```
//! use core::cell::{Cell, RefCell};
//! use std::rc::Rc;
//! use kurbo::{Point, Rect};
//! use understory_dismiss::{DismissOptions, DismissWatcher};
//! use ui_events::keyboard::{Key, NamedKey};
//! use understory_input::{InputBus, PointerInput, key_down};
//! use understory_region::RegionMap;
//!
//! let bus = InputBus::new();
//! let regions = Rc::new(RefCell::new(RegionMap::new()));
//! let (panel, toggle) = {
//!     let mut r = regions.borrow_mut();
//!     (
//!         r.insert(None, Some(Rect::new(0.0, 40.0, 200.0, 240.0))).unwrap(),
//!         r.insert(None, Some(Rect::new(0.0, 0.0, 80.0, 30.0))).unwrap(),
//!     )
//! };
//!
//! let open = Rc::new(Cell::new(true));
//! let watcher = DismissWatcher::with_options(
//!     &bus,
//!     regions.clone(),
//!     Some(panel),
//!     || {},
//!     DismissOptions::default().with_excluded([toggle]),
//! );
//!
//! // Close the panel and stop listening on the first dismissal.
//! let handle = watcher.handle();
//! let flag = open.clone();
//! watcher.set_on_dismiss(move || {
//!     flag.set(false);
//!     handle.deactivate();
//! });
//!
//! bus.dispatch(&PointerInput::down(Point::new(100.0, 100.0)).into()); // inside
//! bus.dispatch(&PointerInput::down(Point::new(40.0, 15.0)).into()); // toggle
//! assert!(open.get());
//!
//! bus.dispatch(&PointerInput::down(Point::new(400.0, 400.0)).into()); // outside
//! assert!(!open.get());
//! assert!(!watcher.is_active());
//! assert_eq!(bus.listener_count(), 0);
//!
//! // Escape works the same way once re-armed.
//! open.set(true);
//! watcher.activate();
//! bus.dispatch(&key_down(Key::Named(NamedKey::Escape)).into());
//! assert!(!open.get());
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for activation changes and pointer verdicts.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod log;
mod verdict;
mod watcher;

pub use verdict::{Verdict, evaluate, is_cancel};
pub use watcher::{DismissHandle, DismissOptions, DismissWatcher};
