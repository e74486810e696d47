// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events carried by the [`InputBus`](crate::InputBus).
//!
//! Pointer and keyboard payloads are the `ui-events` types, so hosts that
//! already translate platform input with `ui-events-winit` (or similar) can
//! forward events unchanged. Pointer events additionally carry a
//! [`PointerHit`]: the root-space position and, if the host hit-tested, the
//! innermost region under the pointer.

use kurbo::Point;
use ui_events::keyboard::{Key, KeyState, KeyboardEvent};
use ui_events::pointer::{
    PointerButton, PointerButtonEvent, PointerEvent, PointerId, PointerInfo, PointerState,
    PointerType,
};
use understory_region::{PointerHit, RegionId};

/// The press/release phase of a pointer button event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// A button or contact went down.
    Down,
    /// A button or contact was released.
    Up,
}

impl PointerPhase {
    /// The phase of `event`, if it is a button press or release.
    pub fn of(event: &PointerEvent) -> Option<Self> {
        match event {
            PointerEvent::Down(_) => Some(Self::Down),
            PointerEvent::Up(_) => Some(Self::Up),
            _ => None,
        }
    }
}

/// A `ui-events` pointer event together with where it landed.
#[derive(Clone, Debug)]
pub struct PointerInput {
    /// The platform event.
    pub event: PointerEvent,
    /// Root-space position and innermost hit region.
    pub hit: PointerHit,
}

impl PointerInput {
    /// Pair a pointer event with its hit.
    pub fn new(event: PointerEvent, hit: impl Into<PointerHit>) -> Self {
        Self {
            event,
            hit: hit.into(),
        }
    }

    /// A primary mouse button press at `hit`.
    pub fn down(hit: impl Into<PointerHit>) -> Self {
        let hit = hit.into();
        Self::new(primary_button(PointerPhase::Down, hit.position), hit)
    }

    /// A primary mouse button release at `hit`.
    pub fn up(hit: impl Into<PointerHit>) -> Self {
        let hit = hit.into();
        Self::new(primary_button(PointerPhase::Up, hit.position), hit)
    }

    /// Attach the innermost region the host resolved for this event.
    #[must_use]
    pub fn with_target(mut self, target: RegionId) -> Self {
        self.hit.target = Some(target);
        self
    }

    /// Press or release, or `None` for moves, scrolls, gestures and the like.
    pub fn phase(&self) -> Option<PointerPhase> {
        PointerPhase::of(&self.event)
    }

    /// Root-space position of the interaction.
    pub fn position(&self) -> Point {
        self.hit.position
    }
}

fn primary_button(phase: PointerPhase, position: Point) -> PointerEvent {
    let mut state = PointerState::default();
    state.position.x = position.x;
    state.position.y = position.y;
    state.count = 1;
    let event = PointerButtonEvent {
        button: Some(PointerButton::Primary),
        pointer: PointerInfo {
            pointer_id: Some(PointerId::PRIMARY),
            persistent_device_id: None,
            pointer_type: PointerType::Mouse,
        },
        state,
    };
    match phase {
        PointerPhase::Down => PointerEvent::Down(event),
        PointerPhase::Up => PointerEvent::Up(event),
    }
}

/// A key press of `key`.
pub fn key_down(key: Key) -> KeyboardEvent {
    KeyboardEvent {
        state: KeyState::Down,
        key,
        ..Default::default()
    }
}

/// A key release of `key`.
pub fn key_up(key: Key) -> KeyboardEvent {
    KeyboardEvent {
        state: KeyState::Up,
        key,
        ..Default::default()
    }
}

/// Any event the bus can carry.
#[derive(Clone, Debug)]
pub enum InputEvent {
    /// A pointer interaction.
    Pointer(PointerInput),
    /// A keyboard event.
    Key(KeyboardEvent),
}

impl From<PointerInput> for InputEvent {
    fn from(e: PointerInput) -> Self {
        Self::Pointer(e)
    }
}

impl From<KeyboardEvent> for InputEvent {
    fn from(e: KeyboardEvent) -> Self {
        Self::Key(e)
    }
}
