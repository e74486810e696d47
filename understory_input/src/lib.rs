// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_input --heading-base-level=0

//! Understory Input: a single-threaded global input bus for UI.
//!
//! ## Overview
//!
//! Some interactions are not routed to a single target. A popover that closes
//! when the user clicks elsewhere, or a menu that closes on Escape, needs to see
//! *every* pointer press and key press, wherever it lands. This crate provides the
//! shared broadcast source for that:
//!
//! - [`InputEvent`]: a `ui-events` keyboard event, or a `ui-events` pointer event
//!   paired with its [`PointerHit`] as a [`PointerInput`].
//! - [`InputBus`]: per-channel listener registry with synchronous dispatch.
//! - [`Subscription`]: a scoped registration that unsubscribes on drop.
//!
//! Routed delivery (capture → target → bubble) is a separate concern; see
//! `understory_responder`. The bus is for global observers.
//!
//! ## Threading
//!
//! The bus is built on `Rc` and `RefCell` and is intentionally `!Send`. All
//! dispatch and all subscription changes happen on the thread that owns the UI.
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for subscription changes and dispatch.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bus;
mod event;
mod log;

pub use bus::{Channel, InputBus, Subscription};
pub use event::{InputEvent, PointerInput, PointerPhase, key_down, key_up};
pub use understory_region::{PointerHit, RegionId};
