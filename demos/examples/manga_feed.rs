// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An infinite manga feed driven by a simulated scroll container.
//!
//! This example shows how a host:
//! - mounts a container and forwards scroll, resize, and frame callbacks,
//! - renders only the window between two spacers,
//! - reports measured heights that differ from the estimate,
//! - fetches pages when the scroller asks for more.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p shelf_virtual_scroll_demos --example manga_feed`

use std::cell::Cell;
use std::rc::Rc;

use shelf_virtual_scroll::{
    Footer, HeightRule, ScrollBehavior, ScrollHost, ScrollerConfig, ScrollerEvent,
    VirtualScroller,
};

const PAGE_SIZE: u32 = 40;
const PAGES: u32 = 4;

#[derive(Clone, Debug)]
struct Series {
    id: u32,
    title: String,
    synopsis_lines: u32,
}

/// Stand-in for a catalogue API.
fn fetch_page(page: u32) -> Vec<Series> {
    (page * PAGE_SIZE..(page + 1) * PAGE_SIZE)
        .map(|id| Series {
            id,
            title: format!("Series #{id}"),
            synopsis_lines: 1 + id % 5,
        })
        .collect()
}

/// Layout the host's renderer would produce: cover row plus synopsis lines.
fn rendered_height(series: &Series) -> f64 {
    160.0 + f64::from(series.synopsis_lines) * 18.0
}

/// A scroll container that applies programmatic scrolls on the next tick.
#[derive(Debug, Default)]
struct Container {
    pending_scroll: Rc<Cell<Option<f64>>>,
    observing: bool,
}

impl ScrollHost<f64> for Container {
    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) {
        log::info!("container asked to scroll to {offset} ({behavior:?})");
        self.pending_scroll.set(Some(offset));
    }

    fn observe_resize(&mut self) {
        self.observing = true;
    }

    fn unobserve_resize(&mut self) {
        self.observing = false;
    }
}

fn handle(events: &[ScrollerEvent<u32, f64>], wants_page: &mut bool) {
    for event in events {
        match event {
            ScrollerEvent::Scroll(metrics) => {
                log::debug!("scrolled, {} px remaining", metrics.remaining());
            }
            ScrollerEvent::LoadMore => *wants_page = true,
            ScrollerEvent::ItemVisible { key, .. } => log::info!("series {key} on screen"),
            ScrollerEvent::ItemHidden { key, .. } => log::info!("series {key} off screen"),
        }
    }
}

fn main() {
    env_logger::init();

    let config = ScrollerConfig::default()
        .with_container_height(640.0)
        .with_estimated_item_height(200.0)
        .with_overscan(3)
        .with_load_more_threshold(400.0)
        .with_end_message(Some("You reached the end of the catalogue"));
    let mut feed = VirtualScroller::new(config, |s: &Series| s.id)
        .with_height_rule(HeightRule::Estimated);

    let pending_scroll = Rc::new(Cell::new(None));
    feed.mount(Container {
        pending_scroll: Rc::clone(&pending_scroll),
        observing: false,
    });

    let mut next_page = 0;
    let mut wants_page = true;
    let mut offset = 0.0;

    for tick in 0..120 {
        // Paging is owned by the host.
        if wants_page && !feed.loading() && next_page < PAGES {
            feed.set_loading(true);
            feed.append_items(fetch_page(next_page));
            next_page += 1;
            feed.set_has_more(next_page < PAGES);
            feed.set_loading(false);
            log::info!("loaded page {next_page}, {} series", feed.len());
        }
        wants_page = false;

        if tick == 60 {
            // The window got taller.
            feed.on_resize(900.0);
        }

        // The user flicks down; a programmatic scroll wins if one is pending.
        offset = pending_scroll.take().unwrap_or(offset + 150.0);
        let events = feed.on_scroll(offset);
        handle(&events, &mut wants_page);

        // Render the window and report what it actually measured.
        let spacers = feed.spacers();
        let measured: Vec<(usize, f64)> = feed
            .rendered_items()
            .map(|r| {
                log::trace!("render {} at {}", r.item.title, r.offset);
                (r.index, rendered_height(r.item))
            })
            .collect();
        for (index, height) in measured {
            feed.record_measurement(index, height);
        }
        let events = feed.on_frame();
        handle(&events, &mut wants_page);

        if tick % 20 == 0 {
            let range = feed.visible_range();
            println!(
                "tick {tick:3}: offset {offset:8.1}, window {range:?}, spacers {:.0}/{:.0}, extent {:.0}",
                spacers.before,
                spacers.after,
                feed.total_extent(),
            );
        }

        if tick == 100 {
            feed.scroll_to_index(10, ScrollBehavior::Smooth);
        }
    }

    match feed.footer() {
        Footer::Hidden => println!("footer: none"),
        Footer::Loading => println!("footer: loading"),
        Footer::End(message) => println!("footer: {message}"),
    }
    println!(
        "{} series, {} measured, resize observed: {}",
        feed.len(),
        feed.layout().measured_count(),
        feed.host().is_some_and(|c| c.observing),
    );

    let container = feed.unmount();
    assert!(container.is_some_and(|c| !c.observing));
}
