// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_region --heading-base-level=0

//! Understory Region: generational region handles and region resolution.
//!
//! Interaction helpers such as `understory_dismiss` need to ask two questions
//! about a rendered region without knowing anything about the host renderer:
//!
//! - Is this region currently bound to something live on screen?
//! - Does this region contain the place where the pointer landed?
//!
//! This crate names those questions as the [`RegionResolver`] capability and
//! provides [`RegionMap`], a small reference implementation backed by Kurbo
//! rectangles and parent links.
//!
//! ## Handles
//!
//! A [`RegionId`] is a copyable generational handle. Removing a region frees its
//! slot; reusing the slot bumps the generation, so a stale handle never aliases a
//! different live region. A region that changes identity (for example a panel that
//! is torn down and mounted again) gets a new handle.
//!
//! ## Containment
//!
//! A [`PointerHit`] carries the root-space position of an interaction and, when the
//! host already performed hit testing, the innermost region that was hit.
//!
//! - With a target, containment follows the region hierarchy: a region contains the
//!   hit when it is the target or one of its ancestors.
//! - Without a target (or with a stale one), containment is geometric and edges are
//!   inclusive: a point on the border of a region is inside it.
//! - An unbound or removed region contains nothing.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_region::{PointerHit, RegionMap, RegionResolver};
//!
//! let mut regions = RegionMap::new();
//! let button = regions
//!     .insert(None, Some(Rect::new(100.0, 100.0, 200.0, 140.0)))
//!     .unwrap();
//!
//! assert!(regions.contains(button, &PointerHit::at(Point::new(150.0, 120.0))));
//! assert!(regions.contains(button, &PointerHit::at(Point::new(200.0, 140.0))));
//! assert!(!regions.contains(button, &PointerHit::at(Point::new(50.0, 50.0))));
//!
//! // Unbinding keeps the handle alive but the region stops containing anything.
//! regions.unbind(button).unwrap();
//! assert!(regions.is_alive(button));
//! assert!(!regions.is_bound(button));
//! assert!(!regions.contains(button, &PointerHit::at(Point::new(150.0, 120.0))));
//! ```
//!
//! ## Sharing
//!
//! Listeners that live on an input bus usually outlive a single borrow of the
//! resolver. [`RegionResolver`] is implemented for `&R`, `Box<R>`, `Rc<R>` and
//! `RefCell<R>`, so a host can keep an `Rc<RefCell<RegionMap>>`, mutate it between
//! events, and hand clones of the `Rc` to its watchers.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod map;
mod resolver;
mod types;

pub use error::RegionError;
pub use map::RegionMap;
pub use resolver::RegionResolver;
pub use types::{PointerHit, RegionId, contains_inclusive};
