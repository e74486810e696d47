// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The region resolution capability.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::Rect;

use crate::{PointerHit, RegionId};

/// Answers geometry questions about regions on behalf of the host renderer.
///
/// Implementations must never panic for unknown or stale handles; they should
/// report them as unbound, containing nothing and having no extent.
pub trait RegionResolver {
    /// Whether `region` is currently bound to a live rendered element.
    fn is_bound(&self, region: RegionId) -> bool;

    /// Whether `region` contains the interaction described by `hit`.
    ///
    /// Returns `false` for unbound regions.
    fn contains(&self, region: RegionId, hit: &PointerHit) -> bool;

    /// The current rendered extent of `region` in root coordinates.
    fn extent(&self, region: RegionId) -> Option<Rect>;
}

impl<R: RegionResolver + ?Sized> RegionResolver for &R {
    fn is_bound(&self, region: RegionId) -> bool {
        (**self).is_bound(region)
    }

    fn contains(&self, region: RegionId, hit: &PointerHit) -> bool {
        (**self).contains(region, hit)
    }

    fn extent(&self, region: RegionId) -> Option<Rect> {
        (**self).extent(region)
    }
}

impl<R: RegionResolver + ?Sized> RegionResolver for Box<R> {
    fn is_bound(&self, region: RegionId) -> bool {
        (**self).is_bound(region)
    }

    fn contains(&self, region: RegionId, hit: &PointerHit) -> bool {
        (**self).contains(region, hit)
    }

    fn extent(&self, region: RegionId) -> Option<Rect> {
        (**self).extent(region)
    }
}

impl<R: RegionResolver + ?Sized> RegionResolver for Rc<R> {
    fn is_bound(&self, region: RegionId) -> bool {
        (**self).is_bound(region)
    }

    fn contains(&self, region: RegionId, hit: &PointerHit) -> bool {
        (**self).contains(region, hit)
    }

    fn extent(&self, region: RegionId) -> Option<Rect> {
        (**self).extent(region)
    }
}

/// Shared, host-mutable resolvers.
///
/// If the cell is mutably borrowed while a query runs (the host is in the middle
/// of updating it), the region is reported as unbound rather than panicking.
impl<R: RegionResolver + ?Sized> RegionResolver for RefCell<R> {
    fn is_bound(&self, region: RegionId) -> bool {
        self.try_borrow().is_ok_and(|r| r.is_bound(region))
    }

    fn contains(&self, region: RegionId, hit: &PointerHit) -> bool {
        self.try_borrow().is_ok_and(|r| r.contains(region, hit))
    }

    fn extent(&self, region: RegionId) -> Option<Rect> {
        self.try_borrow().ok().and_then(|r| r.extent(region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegionMap;
    use kurbo::Point;

    #[test]
    fn refcell_reports_unbound_while_mutably_borrowed() {
        let cell = RefCell::new(RegionMap::new());
        let id = cell
            .borrow_mut()
            .insert(None, Some(Rect::new(0.0, 0.0, 10.0, 10.0)))
            .unwrap();
        let hit = PointerHit::at(Point::new(5.0, 5.0));

        assert!(cell.is_bound(id));
        assert!(cell.contains(id, &hit));

        let _guard = cell.borrow_mut();
        assert!(!cell.is_bound(id));
        assert!(!cell.contains(id, &hit));
        assert_eq!(cell.extent(id), None);
    }

    #[test]
    fn rc_refcell_forwards() {
        let shared = Rc::new(RefCell::new(RegionMap::new()));
        let id = shared
            .borrow_mut()
            .insert(None, Some(Rect::new(0.0, 0.0, 10.0, 10.0)))
            .unwrap();
        let resolver: &dyn RegionResolver = &shared;
        assert_eq!(resolver.extent(id), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }
}
