// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observe the sizes of several regions across layout passes.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Size;
use understory_region::{RegionId, RegionResolver};

use crate::log::{debug, trace};
use crate::{SizeChange, SizeState};

/// A size transition of an observed region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResizeEvent {
    /// The region was measured for the first time since it was observed or re-bound.
    Measured {
        /// The observed region.
        region: RegionId,
        /// Its size.
        size: Size,
    },
    /// The region changed size.
    Resized {
        /// The observed region.
        region: RegionId,
        /// Previously reported size.
        old: Size,
        /// Current size.
        new: Size,
    },
    /// The region is no longer bound.
    Unbound {
        /// The observed region.
        region: RegionId,
    },
}

impl ResizeEvent {
    /// The region this event is about.
    pub fn region(&self) -> RegionId {
        match *self {
            Self::Measured { region, .. }
            | Self::Resized { region, .. }
            | Self::Unbound { region } => region,
        }
    }

    /// The current size, if the region is bound.
    pub fn size(&self) -> Option<Size> {
        match *self {
            Self::Measured { size, .. } => Some(size),
            Self::Resized { new, .. } => Some(new),
            Self::Unbound { .. } => None,
        }
    }

    fn from_change(region: RegionId, change: SizeChange) -> Self {
        match change {
            SizeChange::Measured(size) => Self::Measured { region, size },
            SizeChange::Resized { old, new } => Self::Resized { region, old, new },
            SizeChange::Unbound => Self::Unbound { region },
        }
    }
}

/// Tracks the sizes of a set of regions.
///
/// Call [`ResizeObserver::update`] after every layout pass. Events are reported
/// in a stable order: the order in which regions were observed, except that
/// unobserving a region moves the most recently observed region into its place.
#[derive(Clone, Debug, Default)]
pub struct ResizeObserver {
    entries: Vec<(RegionId, SizeState)>,
    index: HashMap<RegionId, usize>,
    tolerance: f64,
}

impl ResizeObserver {
    /// Create an observer that reports every size change.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore changes of at most `tolerance` in both dimensions.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// The current tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Start observing `region`. Returns `false` if it was already observed.
    ///
    /// The first [`update`](Self::update) that finds the region bound reports
    /// [`ResizeEvent::Measured`].
    pub fn observe(&mut self, region: RegionId) -> bool {
        if self.index.contains_key(&region) {
            return false;
        }
        self.index.insert(region, self.entries.len());
        self.entries.push((region, SizeState::default()));
        debug!("resize: observing {:?}", region);
        true
    }

    /// Stop observing `region`. Returns `false` if it was not observed.
    pub fn unobserve(&mut self, region: RegionId) -> bool {
        let Some(idx) = self.index.remove(&region) else {
            return false;
        };
        self.entries.swap_remove(idx);
        if let Some((moved, _)) = self.entries.get(idx) {
            self.index.insert(*moved, idx);
        }
        debug!("resize: stopped observing {:?}", region);
        true
    }

    /// Whether `region` is observed.
    pub fn is_observing(&self, region: RegionId) -> bool {
        self.index.contains_key(&region)
    }

    /// Number of observed regions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no regions are observed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last reported size of `region`, if it is observed and bound.
    pub fn size(&self, region: RegionId) -> Option<Size> {
        let idx = *self.index.get(&region)?;
        self.entries[idx].1.last
    }

    /// Re-measure every observed region and report the changes.
    pub fn update<R: RegionResolver + ?Sized>(&mut self, resolver: &R) -> Vec<ResizeEvent> {
        let mut events = Vec::new();
        for (region, state) in &mut self.entries {
            let size = resolver.extent(*region).map(|r| r.size());
            if let Some(change) = state.update(size, self.tolerance) {
                let event = ResizeEvent::from_change(*region, change);
                trace!("resize: {:?}", event);
                events.push(event);
            }
        }
        events
    }
}
