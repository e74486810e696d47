// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size state helper: compute size transitions for one region.
//!
//! ## Usage
//!
//! 1) After each layout pass, read the region's current size (or `None` if it is unbound).
//! 2) Call [`SizeState::update`] with that size.
//! 3) React to the returned [`SizeChange`], if any.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Size;
//! use understory_resize::{SizeChange, SizeState};
//!
//! let mut footer = SizeState::default();
//!
//! // First measurement is always reported.
//! assert_eq!(footer.update(Some(Size::new(800.0, 120.0)), 0.0), Some(SizeChange::Measured(Size::new(800.0, 120.0))));
//!
//! // Same size again: nothing to do.
//! assert_eq!(footer.update(Some(Size::new(800.0, 120.0)), 0.0), None);
//!
//! // The footer wrapped onto another line.
//! assert_eq!(
//!     footer.update(Some(Size::new(800.0, 160.0)), 0.0),
//!     Some(SizeChange::Resized { old: Size::new(800.0, 120.0), new: Size::new(800.0, 160.0) })
//! );
//! ```

use kurbo::Size;

/// A size transition of one region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SizeChange {
    /// First size seen since the region was bound.
    Measured(Size),
    /// The size changed by more than the tolerance.
    Resized {
        /// Last reported size.
        old: Size,
        /// Current size.
        new: Size,
    },
    /// The region was measured before and is now unbound.
    Unbound,
}

/// Tracks the last reported size of one region.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SizeState {
    /// Last reported size, `None` before the first measurement or after unbinding.
    pub last: Option<Size>,
}

fn differs(a: f64, b: f64, tolerance: f64) -> bool {
    let d = a - b;
    d > tolerance || d < -tolerance
}

impl SizeState {
    /// Feed the current size and return the resulting transition.
    ///
    /// Changes of at most `tolerance` in both dimensions are ignored, and the
    /// reported size is not updated for them, so slow drift below the tolerance
    /// still accumulates into a change.
    pub fn update(&mut self, size: Option<Size>, tolerance: f64) -> Option<SizeChange> {
        match (self.last, size) {
            (None, None) => None,
            (Some(_), None) => {
                self.last = None;
                Some(SizeChange::Unbound)
            }
            (None, Some(new)) => {
                self.last = Some(new);
                Some(SizeChange::Measured(new))
            }
            (Some(old), Some(new)) => {
                if differs(old.width, new.width, tolerance)
                    || differs(old.height, new.height, tolerance)
                {
                    self.last = Some(new);
                    Some(SizeChange::Resized { old, new })
                } else {
                    None
                }
            }
        }
    }

    /// Forget the last size; the next bound update reports [`SizeChange::Measured`].
    pub fn reset(&mut self) {
        self.last = None;
    }
}
