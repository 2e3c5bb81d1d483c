// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Height model trait and visible-range computation.

use core::ops::RangeInclusive;

use crate::Scalar;

/// An inclusive, non-empty window of item indices `[start, end]`.
///
/// With the `serde` feature, deserialization goes through
/// [`VisibleRange::new`], so reversed bounds are swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VisibleRange {
    /// First rendered index.
    pub start: usize,
    /// Last rendered index (inclusive).
    pub end: usize,
}

impl VisibleRange {
    /// Creates a range, swapping the bounds if they are reversed.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Number of indices in the range. Never zero.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.end - self.start + 1
    }

    /// Returns `true` if `index` lies inside the range.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Iterator-friendly view of the range.
    #[must_use]
    pub const fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Widens the range by `margin` on both sides, clamped to `0..len`.
    ///
    /// `len` must be greater than `end`.
    #[must_use]
    pub fn widen(&self, margin: usize, len: usize) -> Self {
        debug_assert!(self.end < len, "range {self:?} exceeds item count {len}");
        Self {
            start: self.start.saturating_sub(margin),
            end: self.end.saturating_add(margin).min(len.saturating_sub(1)),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for VisibleRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Bounds {
            start: usize,
            end: usize,
        }
        let Bounds { start, end } = Bounds::deserialize(deserializer)?;
        Ok(Self::new(start, end))
    }
}

/// How [`compute_visible_range`] maps a scroll offset to indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum RangeStrategy {
    /// Divide by the average item height.
    ///
    /// Cheap and adequate for roughly uniform heights. When heights vary a lot
    /// the window can be off by a few items; overscan usually hides it, and
    /// the range is recomputed on every scroll.
    #[default]
    Average,
    /// Binary search over the cumulative offsets. Always exact.
    Exact,
}

/// Leading and trailing spacer extents around a rendered window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacers<S: Scalar> {
    /// Extent of all items before the window.
    pub before: S,
    /// Extent of all items after the window.
    pub after: S,
}

/// A 1D strip of items with per-item heights and prefix-sum queries.
///
/// Methods that consult cumulative offsets take `&mut self` so
/// implementations can keep lazily rebuilt caches.
pub trait HeightModel {
    /// Scalar type used for heights and offsets.
    type Scalar: Scalar;

    /// Number of items.
    fn len(&self) -> usize;

    /// Returns `true` if there are no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height of item `index`. Must be finite and positive, including for
    /// out-of-range indices.
    fn height_of(&self, index: usize) -> Self::Scalar;

    /// Cumulative height of all items strictly before `index`.
    ///
    /// `offset_before(0)` is zero and `offset_before(len())` equals
    /// [`HeightModel::total_extent`]; larger indices clamp to `len()`.
    fn offset_before(&mut self, index: usize) -> Self::Scalar;

    /// Sum of all item heights.
    fn total_extent(&mut self) -> Self::Scalar;

    /// Index of the item covering `offset`, clamped into `0..len()`.
    ///
    /// Returns `0` for an empty model.
    fn index_at_offset(&mut self, offset: Self::Scalar) -> usize;

    /// Height used to extrapolate indices from offsets.
    fn average_height(&self) -> Self::Scalar;
}

/// Computes which items to render for a viewport.
///
/// - `scroll_offset`: top of the viewport in content coordinates.
/// - `viewport_size`: visible extent of the container.
/// - `overscan`: extra items rendered on each side of the visible items.
///
/// Returns `None` when the model is empty. Otherwise the range is clamped to
/// `0..len` and always has `start <= end`.
pub fn compute_visible_range<M>(
    model: &mut M,
    scroll_offset: M::Scalar,
    viewport_size: M::Scalar,
    overscan: usize,
    strategy: RangeStrategy,
) -> Option<VisibleRange>
where
    M: HeightModel,
{
    let len = model.len();
    if len == 0 {
        return None;
    }
    let zero = M::Scalar::zero();
    // `max` also maps NaN to zero.
    let scroll_offset = scroll_offset.max(zero);
    let viewport_size = viewport_size.max(zero);

    let visible = match strategy {
        RangeStrategy::Average => average_window(model, scroll_offset, viewport_size),
        RangeStrategy::Exact => exact_window(model, scroll_offset, viewport_size),
    };
    Some(visible.widen(overscan, len))
}

/// Visible items (no overscan) by extrapolating from the average height.
fn average_window<M: HeightModel>(
    model: &M,
    scroll_offset: M::Scalar,
    viewport_size: M::Scalar,
) -> VisibleRange {
    let last = isize::try_from(model.len() - 1).unwrap_or(isize::MAX);
    let average = model.average_height();
    debug_assert!(
        average.is_usable_height(),
        "average height must be positive; got {average:?}"
    );

    let first = (scroll_offset / average).floor_to_isize();
    let count = (viewport_size / average).ceil_to_isize().max(1);
    let end = first.saturating_add(count - 1);

    let clamp = |i: isize| -> usize { i.clamp(0, last).unsigned_abs() };
    VisibleRange::new(clamp(first), clamp(end))
}

/// Visible items (no overscan) by searching the cumulative offsets.
fn exact_window<M: HeightModel>(
    model: &mut M,
    scroll_offset: M::Scalar,
    viewport_size: M::Scalar,
) -> VisibleRange {
    let first = model.index_at_offset(scroll_offset);
    let bottom = scroll_offset + viewport_size;
    let mut last = model.index_at_offset(bottom);
    // An item starting exactly at the bottom edge is not visible.
    while last > first && model.offset_before(last) >= bottom {
        last -= 1;
    }
    VisibleRange::new(first, last)
}

/// Spacer extents surrounding `range`.
pub fn spacers_for<M: HeightModel>(
    model: &mut M,
    range: Option<VisibleRange>,
) -> Spacers<M::Scalar> {
    let total = model.total_extent();
    match range {
        None => Spacers {
            before: M::Scalar::zero(),
            after: total,
        },
        Some(range) => {
            let before = model.offset_before(range.start);
            let after = (total - model.offset_before(range.end + 1)).clamp_non_negative();
            Spacers { before, after }
        }
    }
}
