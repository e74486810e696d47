// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Footer reveal spacing.
//!
//! A fixed footer sits under the page content; the page reserves a spacer as
//! tall as the footer so the footer is revealed when scrolling to the end. The
//! spacer follows the footer's measured height through a `ResizeObserver`.
//!
//! Run:
//! - `cargo run -p understory_demos --example resize_footer`

use kurbo::Rect;
use understory_demos::init_logging;
use understory_region::RegionMap;
use understory_resize::{ResizeEvent, ResizeObserver};

fn main() {
    init_logging();

    let mut regions = RegionMap::new();
    let footer = regions
        .insert(None, Some(Rect::new(0.0, 480.0, 800.0, 600.0)))
        .expect("finite extent");

    let mut observer = ResizeObserver::new().with_tolerance(0.5);
    observer.observe(footer);
    let mut spacer = 0.0;

    // Simulated layout passes: initial, sub-pixel jitter, narrow window wraps
    // the footer links, footer unmounted.
    let passes: [Option<Rect>; 4] = [
        Some(Rect::new(0.0, 480.0, 800.0, 600.0)),
        Some(Rect::new(0.0, 480.0, 800.0, 600.3)),
        Some(Rect::new(0.0, 440.0, 420.0, 600.0)),
        None,
    ];

    for (pass, extent) in passes.into_iter().enumerate() {
        match extent {
            Some(rect) => regions.set_extent(footer, rect).expect("live footer"),
            None => regions.unbind(footer).expect("live footer"),
        }
        for event in observer.update(&regions) {
            match event {
                ResizeEvent::Measured { size, .. } | ResizeEvent::Resized { new: size, .. } => {
                    spacer = size.height;
                }
                ResizeEvent::Unbound { .. } => spacer = 0.0,
            }
            println!("pass {pass}: {event:?}");
        }
        println!("pass {pass}: spacer height = {spacer}");
    }

    assert_eq!(spacer, 0.0);
}
