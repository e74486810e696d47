// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_resize --heading-base-level=0

//! Understory Resize: report region size changes across layout passes.
//!
//! Some layouts depend on the rendered size of another element. A sticky footer
//! that is revealed as the page scrolls away, for instance, needs the page to
//! reserve exactly the footer's height, and that height changes when the footer's
//! content wraps or the window resizes.
//!
//! - [`SizeState`]: a per-region state machine turning successive sizes into
//!   [`SizeChange`] transitions.
//! - [`ResizeObserver`]: a set of observed regions; call
//!   [`update`](ResizeObserver::update) after layout to get [`ResizeEvent`]s.
//!
//! Sizes come from [`RegionResolver::extent`](understory_region::RegionResolver::extent).
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_region::RegionMap;
//! use understory_resize::{ResizeEvent, ResizeObserver};
//!
//! let mut regions = RegionMap::new();
//! let footer = regions.insert(None, Some(Rect::new(0.0, 0.0, 800.0, 120.0))).unwrap();
//!
//! let mut observer = ResizeObserver::new();
//! observer.observe(footer);
//!
//! let mut reserved_height = 0.0;
//! for event in observer.update(&regions) {
//!     if let Some(size) = event.size() {
//!         reserved_height = size.height;
//!     }
//! }
//! assert_eq!(reserved_height, 120.0);
//!
//! regions.set_extent(footer, Rect::new(0.0, 0.0, 800.0, 160.0)).unwrap();
//! let events = observer.update(&regions);
//! assert!(matches!(events.as_slice(), [ResizeEvent::Resized { .. }]));
//! assert_eq!(observer.size(footer), Some(Size::new(800.0, 160.0)));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for observed size changes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod log;
mod observer;
mod state;

pub use observer::{ResizeEvent, ResizeObserver};
pub use state::{SizeChange, SizeState};
