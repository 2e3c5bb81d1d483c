// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use shelf_virtual_scroll::{
    HeightModel, HeightRule, LayoutEngine, RangeStrategy, compute_visible_range,
};

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
}

/// A layout whose items are between 80 and 400 tall, like cover cards with
/// varying synopsis lengths.
fn varied_layout(len: usize, seed: u64) -> LayoutEngine<f64> {
    let mut rng = Lcg::new(seed);
    let heights: Vec<f64> = (0..len)
        .map(|_| 80.0 + f64::from(rng.next_u32() % 320))
        .collect();
    let mut engine = LayoutEngine::new(200.0);
    engine.rebuild(&heights, &HeightRule::per_item(|h: &f64, _| *h));
    engine
}

fn bench_visible_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_range");

    for &len in &[1_000_usize, 100_000, 1_000_000] {
        for strategy in [RangeStrategy::Average, RangeStrategy::Exact] {
            let mut engine = varied_layout(len, 0x5E1F_0000_0000_0001);
            let extent = engine.total_extent();
            let step = extent / 997.0;
            group.bench_function(format!("{strategy:?}(n={len})"), |b| {
                let mut offset = 0.0;
                b.iter(|| {
                    offset = (offset + step) % extent;
                    black_box(compute_visible_range(
                        &mut engine,
                        black_box(offset),
                        800.0,
                        5,
                        strategy,
                    ))
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_visible_range);
criterion_main!(benches);
