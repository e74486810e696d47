// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_region::{RegionId, RegionMap};
use understory_resize::ResizeObserver;

/// `n` stacked rows, 18 units tall.
fn rows(n: usize) -> (RegionMap, Vec<RegionId>) {
    let mut map = RegionMap::new();
    let ids = (0..n)
        .map(|i| {
            let y = i as f64 * 20.0;
            map.insert(None, Some(Rect::new(0.0, y, 400.0, y + 18.0)))
                .unwrap()
        })
        .collect();
    (map, ids)
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize/update");

    for n in [16usize, 256, 4_096] {
        let (map, ids) = rows(n);
        let mut observer = ResizeObserver::new();
        for id in &ids {
            observer.observe(*id);
        }
        observer.update(&map);

        // Same layout, except every tenth row wrapped onto a second line.
        let mut grown = map.clone();
        for (i, id) in ids.iter().enumerate().step_by(10) {
            let y = i as f64 * 20.0;
            grown
                .set_extent(*id, Rect::new(0.0, y, 400.0, y + 36.0))
                .unwrap();
        }

        group.bench_with_input(BenchmarkId::new("unchanged", n), &map, |b, map| {
            let mut o = observer.clone();
            b.iter(|| black_box(o.update(map)));
        });

        group.bench_with_input(BenchmarkId::new("tenth_changed", n), &grown, |b, grown| {
            b.iter_batched(
                || observer.clone(),
                |mut o| black_box(o.update(grown)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
