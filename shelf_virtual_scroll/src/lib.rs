// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelf Virtual Scroll: a headless windowed-rendering list.
//!
//! This crate decides which slice of a large item collection a host view
//! should render, where each rendered item goes, which items entered or left
//! the viewport, and when the next page should be fetched. It owns no
//! widgets and performs no I/O; any UI runtime with a scroll container can
//! drive it.
//!
//! The pieces:
//!
//! - [`LayoutEngine`]: per-item heights with the priority *measured → rule →
//!   estimate*, and a lazily rebuilt cumulative-offset cache.
//! - [`compute_visible_range`]: maps a scroll offset and viewport size to an
//!   inclusive [`VisibleRange`] widened by an item-count overscan, either by
//!   extrapolating from the average height ([`RangeStrategy::Average`]) or
//!   by searching the offsets ([`RangeStrategy::Exact`]).
//! - [`visibility::VisibilityTracker`]: enter/exit transitions for rendered
//!   items, reported once per transition.
//! - [`ScrollHost`]: the seam to the real scroll container, used for
//!   programmatic scrolling and resize observation.
//! - [`VirtualScroller`]: ties the above together behind scroll, resize, and
//!   frame callbacks that return [`ScrollerEvent`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use shelf_virtual_scroll::{
//!     HeightRule, ScrollBehavior, ScrollHost, ScrollerConfig, ScrollerEvent, VirtualScroller,
//! };
//!
//! #[derive(Default)]
//! struct Container {
//!     requested: Option<f64>,
//! }
//!
//! impl ScrollHost<f64> for Container {
//!     fn scroll_to(&mut self, offset: f64, _behavior: ScrollBehavior) {
//!         self.requested = Some(offset);
//!     }
//! }
//!
//! let config = ScrollerConfig::default()
//!     .with_container_height(600.0)
//!     .with_overscan(5);
//! let mut shelf = VirtualScroller::new(config, |volume: &u32| *volume)
//!     .with_height_rule(HeightRule::Fixed(200.0));
//! shelf.set_items((0..10_000).collect());
//! shelf.mount(Container::default());
//!
//! let events = shelf.on_scroll(2000.0);
//! assert!(matches!(events[0], ScrollerEvent::Scroll(_)));
//!
//! // Three items fill the viewport, plus five on each side.
//! let range = shelf.visible_range().unwrap();
//! assert_eq!((range.start, range.end), (5, 17));
//!
//! assert!(shelf.scroll_to_index(9999, ScrollBehavior::Smooth));
//! assert_eq!(shelf.host().unwrap().requested, Some(1_999_800.0));
//! ```
//!
//! ## Measured heights
//!
//! Hosts that cannot know heights up front render with an estimate, measure
//! what they rendered, and report it with
//! [`VirtualScroller::record_measurement`]. Offsets are rebuilt lazily, and
//! the window is recomputed once on the next [`VirtualScroller::on_frame`],
//! however many measurements arrived in between.
//!
//! ## Logging
//!
//! Ignored calls (out-of-range indices, scrolling while unmounted) are
//! reported at `debug` level and rejected heights at `warn` level through the
//! [`log`] facade. The crate never installs a logger.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`ScrollerConfig`] and the small
//!   value types, with camelCase field names.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod event;
mod height;
mod layout;
mod model;
mod scalar;
mod scroller;
pub mod visibility;

pub use config::ScrollerConfig;
pub use controller::{ScrollAlign, ScrollBehavior, ScrollHost, aligned_offset, should_load_more};
pub use event::{ScrollMetrics, ScrollerEvent, ScrollerEvents};
pub use height::HeightRule;
pub use layout::LayoutEngine;
pub use model::{
    HeightModel, RangeStrategy, Spacers, VisibleRange, compute_visible_range, spacers_for,
};
pub use scalar::Scalar;
pub use scroller::{Footer, RenderedItem, VirtualScroller};
