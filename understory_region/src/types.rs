// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: region handles and pointer hits.

use core::fmt;

use kurbo::{Point, Rect};

/// Identifier for a region.
///
/// This is a small, copyable handle that stays stable while the region lives and
/// becomes stale when the region is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `RegionId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `RegionId`.
///
/// Use [`RegionMap::is_alive`](crate::RegionMap::is_alive) to check whether a handle
/// still refers to a live region.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct RegionId(pub(crate) u32, pub(crate) u32);

impl RegionId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// The generation of the slot this handle was issued for.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

impl fmt::Debug for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionId({}v{})", self.0, self.1)
    }
}

/// Where a pointer interaction landed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerHit {
    /// Position of the interaction in root coordinates.
    pub position: Point,
    /// Innermost region under the pointer, if the host resolved one.
    pub target: Option<RegionId>,
}

impl PointerHit {
    /// A hit described only by its position.
    pub const fn at(position: Point) -> Self {
        Self {
            position,
            target: None,
        }
    }

    /// A hit on a resolved target region.
    pub const fn on(target: RegionId, position: Point) -> Self {
        Self {
            position,
            target: Some(target),
        }
    }
}

impl From<Point> for PointerHit {
    fn from(position: Point) -> Self {
        Self::at(position)
    }
}

/// Inclusive point-in-rectangle test.
///
/// Unlike [`Rect::contains`], points on the right and bottom edges are inside.
/// The rectangle is normalized first, so negative widths and heights are fine.
pub fn contains_inclusive(rect: Rect, pt: Point) -> bool {
    let r = rect.abs();
    pt.x >= r.x0 && pt.x <= r.x1 && pt.y >= r.y0 && pt.y <= r.y1
}
