// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport enter/exit tracking for rendered items.
//!
//! [`VisibilityTracker`] remembers, for each item in the rendered window,
//! whether it intersected the viewport on the previous pass, and reports
//! only the transitions:
//!
//! ```rust
//! use shelf_virtual_scroll::{HeightRule, LayoutEngine, VisibleRange};
//! use shelf_virtual_scroll::visibility::{VisibilityChange, VisibilityTracker};
//!
//! let items = [(); 10];
//! let mut layout = LayoutEngine::new(20.0_f64);
//! layout.rebuild(&items, &HeightRule::Fixed(20.0));
//! let mut tracker = VisibilityTracker::new();
//!
//! let window = Some(VisibleRange::new(0, 4));
//! let changes = tracker.update(&mut layout, window, 0.0, 40.0);
//! assert_eq!(changes.as_slice(), &[VisibilityChange::Entered(0), VisibilityChange::Entered(1)]);
//!
//! // Same viewport again: nothing changed, nothing reported.
//! assert!(tracker.update(&mut layout, window, 0.0, 40.0).is_empty());
//!
//! let changes = tracker.update(&mut layout, window, 20.0, 40.0);
//! assert_eq!(changes.as_slice(), &[VisibilityChange::Exited(0), VisibilityChange::Entered(2)]);
//! ```

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::{HeightModel, Scalar, VisibleRange};

/// A visibility transition for one item index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    /// The item started intersecting the viewport.
    Entered(usize),
    /// The item stopped intersecting the viewport, or left the rendered
    /// window while it was visible.
    Exited(usize),
}

/// Transitions produced by one [`VisibilityTracker::update`] pass.
///
/// Exits come first, then entries, each in ascending index order.
pub type VisibilityChanges = SmallVec<[VisibilityChange; 8]>;

/// Per-item visibility state, bounded to the rendered window.
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    visible: HashMap<usize, bool>,
}

impl VisibilityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `index` was visible on the last pass.
    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(&index).copied().unwrap_or(false)
    }

    /// Number of items currently tracked (the last rendered window).
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.visible.len()
    }

    /// Forgets all state without reporting anything.
    pub fn clear(&mut self) {
        self.visible.clear();
    }

    /// Forgets all state and returns the indices that were visible, in
    /// ascending order, so the caller can report them as exited.
    pub fn take_visible(&mut self) -> SmallVec<[usize; 8]> {
        let mut visible: SmallVec<[usize; 8]> = self
            .visible
            .drain()
            .filter_map(|(index, was_visible)| was_visible.then_some(index))
            .collect();
        visible.sort_unstable();
        visible
    }

    /// Recomputes visibility for every item in `window`.
    ///
    /// An item is visible iff `bottom > 0 && top < viewport_size`, where
    /// `top = offset - scroll_offset`. Entries outside `window` are dropped;
    /// those that were visible report [`VisibilityChange::Exited`].
    pub fn update<M: HeightModel>(
        &mut self,
        model: &mut M,
        window: Option<VisibleRange>,
        scroll_offset: M::Scalar,
        viewport_size: M::Scalar,
    ) -> VisibilityChanges {
        let mut exited: SmallVec<[usize; 8]> = SmallVec::new();
        let mut entered: SmallVec<[usize; 8]> = SmallVec::new();

        self.visible.retain(|&index, &mut was_visible| {
            let keep = window.is_some_and(|w| w.contains(index));
            if !keep && was_visible {
                exited.push(index);
            }
            keep
        });

        if let Some(window) = window {
            let zero = M::Scalar::zero();
            for index in window.indices() {
                let top = model.offset_before(index) - scroll_offset;
                let bottom = top + model.height_of(index);
                let now = bottom > zero && top < viewport_size;
                let before = self.visible.insert(index, now).unwrap_or(false);
                match (before, now) {
                    (false, true) => entered.push(index),
                    (true, false) => exited.push(index),
                    _ => {}
                }
            }
        }

        exited.sort_unstable();
        exited
            .into_iter()
            .map(VisibilityChange::Exited)
            .chain(entered.into_iter().map(VisibilityChange::Entered))
            .collect()
    }
}
