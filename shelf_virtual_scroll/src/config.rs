// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroller configuration.

use alloc::string::String;

use crate::{RangeStrategy, Scalar};

/// Options a host view passes to a [`VirtualScroller`](crate::VirtualScroller).
///
/// With the `serde` feature this (de)serializes with camelCase field names and
/// fills missing fields from [`Default`], so a host can hand over its view
/// props as-is.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ScrollerConfig<S: Scalar> {
    /// Initial viewport size, used until the first resize notification.
    pub container_height: S,
    /// Height assumed for items without a rule result or measurement.
    pub estimated_item_height: S,
    /// Items rendered beyond each side of the visible ones.
    pub overscan: usize,
    /// Remaining distance below the viewport under which the next page is
    /// requested.
    pub load_more_threshold: S,
    /// Footer text once `has_more` is false. `None` hides the footer.
    pub end_message: Option<String>,
    /// How scroll offsets map to indices.
    pub range_strategy: RangeStrategy,
    /// When set, measurements further than this many items outside the
    /// rendered window are forgotten after each layout pass.
    pub retain_margin: Option<usize>,
}

impl<S: Scalar> Default for ScrollerConfig<S> {
    fn default() -> Self {
        Self {
            container_height: S::from_usize(600),
            estimated_item_height: S::from_usize(50),
            overscan: 5,
            load_more_threshold: S::from_usize(200),
            end_message: Some(String::from("No more items")),
            range_strategy: RangeStrategy::Average,
            retain_margin: None,
        }
    }
}

impl<S: Scalar> ScrollerConfig<S> {
    /// Sets [`ScrollerConfig::container_height`].
    #[must_use]
    pub fn with_container_height(mut self, height: S) -> Self {
        self.container_height = height;
        self
    }

    /// Sets [`ScrollerConfig::estimated_item_height`].
    #[must_use]
    pub fn with_estimated_item_height(mut self, height: S) -> Self {
        self.estimated_item_height = height;
        self
    }

    /// Sets [`ScrollerConfig::overscan`].
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Sets [`ScrollerConfig::load_more_threshold`].
    #[must_use]
    pub fn with_load_more_threshold(mut self, threshold: S) -> Self {
        self.load_more_threshold = threshold;
        self
    }

    /// Sets [`ScrollerConfig::end_message`].
    #[must_use]
    pub fn with_end_message(mut self, message: Option<impl Into<String>>) -> Self {
        self.end_message = message.map(Into::into);
        self
    }

    /// Sets [`ScrollerConfig::range_strategy`].
    #[must_use]
    pub fn with_range_strategy(mut self, strategy: RangeStrategy) -> Self {
        self.range_strategy = strategy;
        self
    }

    /// Sets [`ScrollerConfig::retain_margin`].
    #[must_use]
    pub fn with_retain_margin(mut self, margin: Option<usize>) -> Self {
        self.retain_margin = margin;
        self
    }
}
