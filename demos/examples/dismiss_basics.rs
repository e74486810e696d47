// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissal basics.
//!
//! Open a dropdown, then feed a scripted sequence of presses and keys through an
//! `InputBus` and watch which ones close it.
//!
//! Run:
//! - `cargo run -p understory_demos --example dismiss_basics`
//! - `RUST_LOG=trace cargo run -p understory_demos --example dismiss_basics` to see verdicts

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Point;
use understory_demos::{DropdownScene, init_logging};
use understory_dismiss::{DismissOptions, DismissWatcher};
use ui_events::keyboard::{Key, NamedKey};
use understory_input::{InputBus, InputEvent, PointerInput, key_down};

fn main() {
    init_logging();

    let scene = DropdownScene::new();
    let bus = InputBus::new();
    let open = Rc::new(Cell::new(true));

    let watcher = DismissWatcher::with_options(
        &bus,
        scene.regions.clone(),
        Some(scene.panel),
        || {},
        DismissOptions::default().with_excluded([scene.toggle]),
    );
    let handle = watcher.handle();
    let flag = open.clone();
    watcher.set_on_dismiss(move || {
        flag.set(false);
        handle.deactivate();
    });

    let script: [(&str, InputEvent); 5] = [
        (
            "press on item",
            PointerInput::down(Point::new(50.0, 60.0))
                .with_target(scene.item)
                .into(),
        ),
        ("press on toggle", PointerInput::down(Point::new(60.0, 20.0)).into()),
        ("type 'a'", key_down(Key::Character("a".into())).into()),
        ("press on empty canvas", PointerInput::down(Point::new(600.0, 400.0)).into()),
        ("press Escape", key_down(Key::Named(NamedKey::Escape)).into()),
    ];

    for (label, event) in &script {
        let was_open = open.get();
        bus.dispatch(event);
        println!(
            "{label:<24} open: {was_open} -> {}  (listeners: {})",
            open.get(),
            bus.listener_count()
        );
    }

    assert!(!open.get());
    assert_eq!(bus.listener_count(), 0);

    // Re-open and close with Escape.
    open.set(true);
    watcher.activate();
    bus.dispatch(&key_down(Key::Named(NamedKey::Escape)).into());
    println!("re-opened, pressed Escape: open = {}", open.get());
    assert!(!open.get());
}
