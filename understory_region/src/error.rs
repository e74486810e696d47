// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Rect;

use crate::RegionId;

/// Error returned by [`RegionMap`](crate::RegionMap) bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionError {
    /// The handle refers to a region that was removed.
    Stale(RegionId),
    /// The extent has a NaN or infinite coordinate.
    NonFinite {
        /// The rejected extent.
        extent: Rect,
    },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stale(id) => write!(f, "region {id:?} is no longer alive"),
            Self::NonFinite { extent } => {
                write!(f, "region extent {extent:?} has a non-finite coordinate")
            }
        }
    }
}

impl core::error::Error for RegionError {}
