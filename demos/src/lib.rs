// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scaffolding for the demo programs.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_region::{RegionId, RegionMap};

/// A toolbar toggle that opens a dropdown panel with one item.
#[derive(Clone, Debug)]
pub struct DropdownScene {
    /// Shared region geometry.
    pub regions: Rc<RefCell<RegionMap>>,
    /// The toolbar button that toggles the panel.
    pub toggle: RegionId,
    /// The dropdown panel.
    pub panel: RegionId,
    /// An item inside the panel.
    pub item: RegionId,
}

impl DropdownScene {
    /// Lay out the scene in a 800x600 window.
    pub fn new() -> Self {
        let mut map = RegionMap::new();
        let toggle = map
            .insert(None, Some(Rect::new(20.0, 10.0, 120.0, 40.0)))
            .expect("finite extent");
        let panel = map
            .insert(None, Some(Rect::new(20.0, 44.0, 220.0, 244.0)))
            .expect("finite extent");
        let item = map
            .insert(Some(panel), Some(Rect::new(24.0, 48.0, 216.0, 80.0)))
            .expect("live parent");
        Self {
            regions: Rc::new(RefCell::new(map)),
            toggle,
            panel,
            item,
        }
    }
}

impl Default for DropdownScene {
    fn default() -> Self {
        Self::new()
    }
}

/// Install a `tracing` subscriber honoring `RUST_LOG` (default `debug`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
