// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host seam, index alignment, and the infinite-scroll trigger.

use crate::{HeightModel, Scalar};

/// Animation requested for a programmatic scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ScrollBehavior {
    /// Jump straight to the target.
    #[default]
    Instant,
    /// Let the host animate towards the target.
    Smooth,
}

/// Alignment mode when scrolling a specific index into view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ScrollAlign {
    /// Align the top of the item with the top of the viewport.
    #[default]
    Start,
    /// Center the item within the viewport.
    Center,
    /// Align the bottom of the item with the bottom of the viewport.
    End,
    /// Move just enough to make the item fully visible.
    Nearest,
}

/// The scroll container owned by the host UI runtime.
///
/// A scroller only talks to its container while mounted. Resize observation
/// is registered on mount and released on unmount or drop; new sizes come
/// back through [`VirtualScroller::on_resize`](crate::VirtualScroller::on_resize).
pub trait ScrollHost<S: Scalar> {
    /// Scrolls the container so its top edge sits at `offset`.
    ///
    /// Hosts clamp `offset` to their own scrollable range.
    fn scroll_to(&mut self, offset: S, behavior: ScrollBehavior);

    /// Starts delivering container resize notifications.
    fn observe_resize(&mut self) {}

    /// Stops delivering container resize notifications.
    fn unobserve_resize(&mut self) {}
}

/// Scroll offset that brings item `index` into view with `align`.
///
/// `index` is clamped to the model; an empty model yields zero.
pub fn aligned_offset<M: HeightModel>(
    model: &mut M,
    index: usize,
    align: ScrollAlign,
    current: M::Scalar,
    viewport_size: M::Scalar,
) -> M::Scalar {
    let zero = M::Scalar::zero();
    let len = model.len();
    if len == 0 {
        return zero;
    }
    let index = index.min(len - 1);
    let item_start = model.offset_before(index);
    let item_end = item_start + model.height_of(index);

    match align {
        ScrollAlign::Start => item_start,
        ScrollAlign::End => (item_end - viewport_size).max(zero),
        ScrollAlign::Center => {
            let two = M::Scalar::from_usize(2);
            ((item_start + item_end) / two - viewport_size / two).max(zero)
        }
        ScrollAlign::Nearest => {
            if item_start >= current && item_end <= current + viewport_size {
                current
            } else if item_start < current {
                item_start
            } else {
                (item_end - viewport_size).max(zero)
            }
        }
    }
}

/// Returns `true` if the host should fetch the next page.
///
/// The remaining distance is `scroll_extent - scroll_offset - viewport_size`.
/// While `loading` is set nothing is requested, so a pending fetch is never
/// signalled twice.
pub fn should_load_more<S: Scalar>(
    scroll_extent: S,
    scroll_offset: S,
    viewport_size: S,
    threshold: S,
    has_more: bool,
    loading: bool,
) -> bool {
    if !has_more || loading {
        return false;
    }
    scroll_extent - scroll_offset - viewport_size < threshold
}
