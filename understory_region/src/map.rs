// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A reference region store: extents, binding state, and parent links.

use alloc::vec::Vec;

use kurbo::Rect;
use smallvec::SmallVec;

use crate::{PointerHit, RegionError, RegionId, RegionResolver, contains_inclusive};

#[derive(Clone, Debug)]
struct Entry {
    extent: Option<Rect>,
    parent: Option<RegionId>,
    children: SmallVec<[RegionId; 4]>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// A hierarchy of regions with optional root-space extents.
///
/// A region is *bound* while it has an extent. Binding and unbinding keep the
/// handle alive; removing a region (and its subtree) makes the handles stale.
///
/// This store does no layout and no spatial indexing. Hosts write the extents
/// their own layout pass produced, and queries are linear in the depth of the
/// hierarchy.
#[derive(Clone, Debug, Default)]
pub struct RegionMap {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

fn check_finite(extent: Option<Rect>) -> Result<Option<Rect>, RegionError> {
    match extent {
        Some(r) if ![r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite()) => {
            Err(RegionError::NonFinite { extent: r })
        }
        other => Ok(other.map(|r| r.abs())),
    }
}

impl RegionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live regions.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether there are no live regions.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Insert a region under `parent` (or as a root), bound to `extent` if given.
    ///
    /// Extents are stored normalized. Fails if `parent` is stale or `extent` is
    /// not finite.
    pub fn insert(
        &mut self,
        parent: Option<RegionId>,
        extent: Option<Rect>,
    ) -> Result<RegionId, RegionError> {
        let extent = check_finite(extent)?;
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return Err(RegionError::Stale(p));
        }

        let entry = Entry {
            extent,
            parent,
            children: SmallVec::new(),
        };
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.entry = Some(entry);
            RegionId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len())
                .expect("RegionMap: too many regions for u32 RegionId");
            self.slots.push(Slot {
                generation: 1,
                entry: Some(entry),
            });
            RegionId::new(idx, 1)
        };

        if let Some(p) = parent
            && let Some(pe) = self.entry_mut(p)
        {
            pe.children.push(id);
        }
        self.live += 1;
        Ok(id)
    }

    /// Remove a region and all of its descendants.
    ///
    /// Returns `false` if `id` was already stale.
    pub fn remove(&mut self, id: RegionId) -> bool {
        let Some(parent) = self.entry(id).map(|e| e.parent) else {
            return false;
        };
        if let Some(p) = parent
            && let Some(pe) = self.entry_mut(p)
        {
            pe.children.retain(|c| *c != id);
        }

        let mut stack: SmallVec<[RegionId; 16]> = SmallVec::new();
        stack.push(id);
        while let Some(next) = stack.pop() {
            let slot = &mut self.slots[next.idx()];
            if let Some(entry) = slot.entry.take() {
                stack.extend(entry.children);
                self.free.push(next.0);
                self.live -= 1;
            }
        }
        true
    }

    /// Whether `id` refers to a live region (bound or not).
    pub fn is_alive(&self, id: RegionId) -> bool {
        self.entry(id).is_some()
    }

    /// Parent of a live region.
    pub fn parent(&self, id: RegionId) -> Option<RegionId> {
        self.entry(id).and_then(|e| e.parent)
    }

    /// Bind a region to a new extent (or move a bound region).
    pub fn set_extent(&mut self, id: RegionId, extent: Rect) -> Result<(), RegionError> {
        let extent = check_finite(Some(extent))?;
        let entry = self.entry_mut(id).ok_or(RegionError::Stale(id))?;
        entry.extent = extent;
        Ok(())
    }

    /// Unbind a region, keeping its handle and its place in the hierarchy.
    pub fn unbind(&mut self, id: RegionId) -> Result<(), RegionError> {
        let entry = self.entry_mut(id).ok_or(RegionError::Stale(id))?;
        entry.extent = None;
        Ok(())
    }

    /// Whether `ancestor` is `descendant` or one of its ancestors.
    ///
    /// Both handles must be live.
    pub fn is_ancestor_or_self(&self, ancestor: RegionId, descendant: RegionId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut cursor = Some(descendant);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.entry(current).and_then(|e| e.parent);
        }
        false
    }

    fn entry(&self, id: RegionId) -> Option<&Entry> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, id: RegionId) -> Option<&mut Entry> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.entry.as_mut()
    }
}

impl RegionResolver for RegionMap {
    fn is_bound(&self, region: RegionId) -> bool {
        self.entry(region).is_some_and(|e| e.extent.is_some())
    }

    fn contains(&self, region: RegionId, hit: &PointerHit) -> bool {
        let Some(extent) = self.entry(region).and_then(|e| e.extent) else {
            return false;
        };
        match hit.target {
            Some(target) if self.is_alive(target) => self.is_ancestor_or_self(region, target),
            // No resolved target, or it was removed since hit testing: fall back to geometry.
            _ => contains_inclusive(extent, hit.position),
        }
    }

    fn extent(&self, region: RegionId) -> Option<Rect> {
        self.entry(region).and_then(|e| e.extent)
    }
}
