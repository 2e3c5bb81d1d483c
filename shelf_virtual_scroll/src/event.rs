// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events raised to the host view.

use smallvec::SmallVec;

use crate::Scalar;

/// Scroll position and extents reported with every scroll tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScrollMetrics<S: Scalar> {
    /// Current scroll position.
    pub scroll_offset: S,
    /// Total content height.
    pub scroll_extent: S,
    /// Visible height of the container.
    pub viewport_size: S,
}

impl<S: Scalar> ScrollMetrics<S> {
    /// Content left below the viewport, never negative.
    #[must_use]
    pub fn remaining(&self) -> S {
        (self.scroll_extent - self.scroll_offset - self.viewport_size).clamp_non_negative()
    }
}

/// Something the host view should react to.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollerEvent<K, S: Scalar> {
    /// The container scrolled.
    Scroll(ScrollMetrics<S>),
    /// The end of the list is near; fetch the next page.
    LoadMore,
    /// An item started intersecting the viewport.
    ItemVisible {
        /// Index in the item collection.
        index: usize,
        /// The item's key.
        key: K,
    },
    /// An item stopped intersecting the viewport.
    ItemHidden {
        /// Index in the item collection.
        index: usize,
        /// The item's key.
        key: K,
    },
}

/// Events from one scroll, resize, or frame callback, in emission order.
pub type ScrollerEvents<K, S> = SmallVec<[ScrollerEvent<K, S>; 8]>;
