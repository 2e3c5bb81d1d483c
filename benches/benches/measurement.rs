// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use shelf_virtual_scroll::{
    HeightRule, ScrollBehavior, ScrollHost, ScrollerConfig, VirtualScroller,
};

#[derive(Debug, Default)]
struct NullHost;

impl ScrollHost<f64> for NullHost {
    fn scroll_to(&mut self, _offset: f64, _behavior: ScrollBehavior) {}
}

fn scroller(len: u32) -> VirtualScroller<u32, u32, NullHost> {
    let config = ScrollerConfig::default()
        .with_container_height(800.0)
        .with_estimated_item_height(220.0);
    let mut scroller = VirtualScroller::new(config, |id: &u32| *id)
        .with_height_rule(HeightRule::Estimated);
    scroller.set_items((0..len).collect());
    scroller.mount(NullHost);
    scroller
}

fn bench_measurement(c: &mut Criterion) {
    let mut group = c.benchmark_group("measurement");
    group.sample_size(50);

    for &len in &[10_000_u32, 200_000] {
        // A frame's worth of measurements near the top, then one relayout.
        // Only the prefix up to the window is rebuilt.
        group.bench_function(format!("measure_window_then_frame(n={len})"), |b| {
            b.iter_batched(
                || {
                    let mut s = scroller(len);
                    s.on_frame();
                    s
                },
                |mut s| {
                    for i in 0..12 {
                        s.record_measurement(i, 180.0 + f64::from(i as u32) * 7.0);
                    }
                    black_box(s.on_frame());
                    s
                },
                BatchSize::LargeInput,
            );
        });

        // Scrolling through the list while every rendered item reports a
        // measurement, as a host does on first render.
        group.bench_function(format!("scroll_and_measure(n={len})"), |b| {
            b.iter_batched(
                || scroller(len),
                |mut s| {
                    let mut offset = 0.0;
                    for _ in 0..200 {
                        offset += 450.0;
                        let events = s.on_scroll(offset);
                        black_box(&events);
                        if let Some(range) = s.visible_range() {
                            for i in range.indices() {
                                s.record_measurement(i, 200.0);
                            }
                        }
                        s.on_frame();
                    }
                    s
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("refresh(n={len})"), |b| {
            b.iter_batched(
                || {
                    let mut s = scroller(len);
                    for i in 0..len as usize {
                        s.record_measurement(i, 210.0);
                    }
                    s
                },
                |mut s| {
                    s.refresh();
                    black_box(s.total_extent());
                    s
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_measurement);
criterion_main!(benches);
