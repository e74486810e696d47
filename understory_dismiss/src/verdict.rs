// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure classification of input events against a watched region.
//!
//! [`DismissWatcher`](crate::DismissWatcher) runs these on every event; they are
//! public so hosts with their own event plumbing can reuse the exact rules.

use ui_events::keyboard::{Key, KeyboardEvent};
use understory_region::{PointerHit, RegionId, RegionResolver};

/// How a pointer hit relates to a boundary region and its exclusions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// There is no boundary, or it is not bound to a live region. Nothing is evaluated.
    Unbound,
    /// The hit is inside the boundary (edges included).
    Inside,
    /// The hit is outside the boundary but inside an excluded region.
    Excluded,
    /// The hit is outside the boundary and every excluded region.
    Outside,
}

impl Verdict {
    /// Whether this verdict triggers a dismissal.
    pub const fn dismisses(self) -> bool {
        matches!(self, Self::Outside)
    }
}

/// Classify `hit` against `boundary` and `excluded`.
///
/// An unbound boundary fails open: the result is [`Verdict::Unbound`] and the
/// excluded regions are not consulted. Excluded regions that are themselves
/// unbound contain nothing and therefore never suppress a dismissal.
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_dismiss::{Verdict, evaluate};
/// use understory_region::{PointerHit, RegionMap};
///
/// let mut regions = RegionMap::new();
/// let panel = regions.insert(None, Some(Rect::new(0.0, 0.0, 100.0, 100.0))).unwrap();
/// let toggle = regions.insert(None, Some(Rect::new(200.0, 0.0, 240.0, 30.0))).unwrap();
///
/// let at = |x, y| PointerHit::at(Point::new(x, y));
/// assert_eq!(evaluate(&regions, Some(panel), &[toggle], &at(50.0, 50.0)), Verdict::Inside);
/// assert_eq!(evaluate(&regions, Some(panel), &[toggle], &at(220.0, 10.0)), Verdict::Excluded);
/// assert_eq!(evaluate(&regions, Some(panel), &[toggle], &at(500.0, 500.0)), Verdict::Outside);
/// assert_eq!(evaluate(&regions, None, &[toggle], &at(500.0, 500.0)), Verdict::Unbound);
/// ```
pub fn evaluate<R: RegionResolver + ?Sized>(
    resolver: &R,
    boundary: Option<RegionId>,
    excluded: &[RegionId],
    hit: &PointerHit,
) -> Verdict {
    let Some(boundary) = boundary else {
        return Verdict::Unbound;
    };
    if !resolver.is_bound(boundary) {
        return Verdict::Unbound;
    }
    if resolver.contains(boundary, hit) {
        return Verdict::Inside;
    }
    if excluded.iter().any(|&region| resolver.contains(region, hit)) {
        return Verdict::Excluded;
    }
    Verdict::Outside
}

/// Whether `event` is a press of `cancel_key`.
///
/// Releases never cancel. Auto-repeat presses do, like any other press. Key
/// presses that are part of an IME composition belong to the composition and
/// are ignored.
pub fn is_cancel(event: &KeyboardEvent, cancel_key: &Key) -> bool {
    event.state.is_down() && !event.is_composing && event.key == *cancel_key
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Rect};
    use ui_events::keyboard::NamedKey;
    use understory_input::{key_down, key_up};
    use understory_region::RegionMap;

    fn at(x: f64, y: f64) -> PointerHit {
        PointerHit::at(Point::new(x, y))
    }

    #[test]
    fn boundary_edges_are_inside() {
        let mut map = RegionMap::new();
        let a = map.insert(None, Some(Rect::new(100.0, 100.0, 200.0, 140.0))).unwrap();
        for hit in [at(100.0, 100.0), at(200.0, 140.0), at(100.0, 140.0), at(150.0, 100.0)] {
            assert_eq!(evaluate(&map, Some(a), &[], &hit), Verdict::Inside);
        }
        assert_eq!(evaluate(&map, Some(a), &[], &at(99.9, 120.0)), Verdict::Outside);
    }

    #[test]
    fn unbound_boundary_ignores_exclusions() {
        let mut map = RegionMap::new();
        let a = map.insert(None, None).unwrap();
        let t = map.insert(None, Some(Rect::new(0.0, 0.0, 10.0, 10.0))).unwrap();
        assert_eq!(evaluate(&map, Some(a), &[t], &at(5.0, 5.0)), Verdict::Unbound);
        assert_eq!(evaluate(&map, Some(a), &[t], &at(50.0, 50.0)), Verdict::Unbound);
    }

    #[test]
    fn stale_boundary_is_unbound() {
        let mut map = RegionMap::new();
        let a = map.insert(None, Some(Rect::new(0.0, 0.0, 10.0, 10.0))).unwrap();
        map.remove(a);
        assert_eq!(evaluate(&map, Some(a), &[], &at(50.0, 50.0)), Verdict::Unbound);
    }

    #[test]
    fn unbound_exclusion_does_not_suppress() {
        let mut map = RegionMap::new();
        let a = map.insert(None, Some(Rect::new(0.0, 0.0, 10.0, 10.0))).unwrap();
        let t = map.insert(None, Some(Rect::new(20.0, 0.0, 30.0, 10.0))).unwrap();
        map.unbind(t).unwrap();
        assert_eq!(evaluate(&map, Some(a), &[t], &at(25.0, 5.0)), Verdict::Outside);
    }

    #[test]
    fn inside_wins_over_overlapping_exclusion() {
        let mut map = RegionMap::new();
        let a = map.insert(None, Some(Rect::new(0.0, 0.0, 10.0, 10.0))).unwrap();
        let t = map.insert(None, Some(Rect::new(5.0, 5.0, 15.0, 15.0))).unwrap();
        assert_eq!(evaluate(&map, Some(a), &[t], &at(7.0, 7.0)), Verdict::Inside);
        assert_eq!(evaluate(&map, Some(a), &[t], &at(12.0, 12.0)), Verdict::Excluded);
    }

    #[test]
    fn only_outside_dismisses() {
        assert!(Verdict::Outside.dismisses());
        assert!(!Verdict::Inside.dismisses());
        assert!(!Verdict::Excluded.dismisses());
        assert!(!Verdict::Unbound.dismisses());
    }

    #[test]
    fn cancel_requires_a_press_of_the_cancel_key() {
        let escape = Key::Named(NamedKey::Escape);
        let q = Key::Character("q".into());

        assert!(is_cancel(&key_down(escape.clone()), &escape));
        let repeat = KeyboardEvent {
            repeat: true,
            ..key_down(escape.clone())
        };
        assert!(is_cancel(&repeat, &escape));
        assert!(!is_cancel(&key_up(escape.clone()), &escape));
        assert!(!is_cancel(&key_down(Key::Character("a".into())), &escape));
        assert!(!is_cancel(&key_down(Key::Named(NamedKey::Enter)), &escape));
        assert!(is_cancel(&key_down(q.clone()), &q));
    }

    #[test]
    fn composing_presses_do_not_cancel() {
        let escape = Key::Named(NamedKey::Escape);
        let composing = KeyboardEvent {
            is_composing: true,
            ..key_down(escape.clone())
        };
        assert!(!is_cancel(&composing, &escape));
    }
}
