// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_dismiss::{DismissOptions, DismissWatcher, evaluate};
use understory_input::{InputBus, InputEvent, PointerInput};
use understory_region::{PointerHit, RegionId, RegionMap};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn next_coord(&mut self, extent: f64) -> f64 {
        f64::from(self.next_u32() % 10_000) / 10_000.0 * extent
    }
}

fn random_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| Point::new(rng.next_coord(1920.0), rng.next_coord(1080.0)))
        .collect()
}

/// A grid of `n` 40x40 regions, 50 units apart.
fn grid(map: &mut RegionMap, n: usize) -> Vec<RegionId> {
    (0..n)
        .map(|i| {
            let x = (i % 32) as f64 * 50.0;
            let y = (i / 32) as f64 * 50.0;
            map.insert(None, Some(Rect::new(x, y, x + 40.0, y + 40.0)))
                .unwrap()
        })
        .collect()
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dismiss/dispatch");
    let points = random_points(1_024, 7);

    for watchers in [1usize, 8, 64, 256] {
        let bus = InputBus::new();
        let regions = Rc::new(RefCell::new(RegionMap::new()));
        let ids = grid(&mut regions.borrow_mut(), watchers);
        let fired = Rc::new(Cell::new(0u64));
        let _watchers: Vec<_> = ids
            .iter()
            .map(|id| {
                let fired = fired.clone();
                DismissWatcher::new(&bus, regions.clone(), Some(*id), move || {
                    fired.set(fired.get() + 1);
                })
            })
            .collect();
        let events: Vec<InputEvent> = points
            .iter()
            .map(|p| PointerInput::down(*p).into())
            .collect();

        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(watchers), &events, |b, events| {
            b.iter(|| {
                for e in events {
                    black_box(bus.dispatch(e));
                }
            });
        });
        black_box(fired.get());
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("dismiss/evaluate");
    let points = random_points(1_024, 11);

    for exclusions in [0usize, 4, 32] {
        let mut map = RegionMap::new();
        let boundary = map
            .insert(None, Some(Rect::new(800.0, 400.0, 1100.0, 700.0)))
            .unwrap();
        let excluded = grid(&mut map, exclusions);

        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(exclusions),
            &points,
            |b, points| {
                b.iter(|| {
                    for p in points {
                        black_box(evaluate(&map, Some(boundary), &excluded, &PointerHit::at(*p)));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    let bus = InputBus::new();
    let regions = Rc::new(RefCell::new(RegionMap::new()));
    let panel = regions
        .borrow_mut()
        .insert(None, Some(Rect::new(0.0, 0.0, 100.0, 100.0)))
        .unwrap();
    let watcher = DismissWatcher::with_options(
        &bus,
        regions,
        Some(panel),
        || {},
        DismissOptions::default().with_active(false),
    );

    c.bench_function("dismiss/activate_deactivate", |b| {
        b.iter(|| {
            watcher.activate();
            watcher.deactivate();
        });
    });
}

criterion_group!(benches, bench_dispatch, bench_evaluate, bench_toggle);
criterion_main!(benches);
