// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-index heights with measurements and a lazily maintained offset cache.

use alloc::vec::Vec;

use crate::{HeightModel, HeightRule, Scalar, VisibleRange};

/// Height and offset bookkeeping for a list of items.
///
/// Every index has a *baseline* height taken from the [`HeightRule`] (or the
/// estimate when the rule has nothing usable), plus an optional *measured*
/// height reported by the host after rendering. Measured heights always win.
///
/// Offsets are cumulative sums cached in `starts`. Changing any height only
/// records the first stale index; the cache is rebuilt from there on the next
/// offset query, so any number of measurements arriving in the same rendering
/// pass cost a single recomputation.
#[derive(Clone, Debug)]
pub struct LayoutEngine<S: Scalar> {
    estimated: S,
    fixed: Option<S>,
    baseline: Vec<S>,
    measured: Vec<Option<S>>,
    starts: Vec<S>,
    dirty_from: Option<usize>,
    measured_sum: S,
    measured_count: usize,
}

impl<S: Scalar> LayoutEngine<S> {
    /// Creates an empty engine that falls back to `estimated_height`.
    ///
    /// An unusable estimate (zero, negative, or not finite) is replaced by
    /// `1.0` so that layout never collapses.
    #[must_use]
    pub fn new(estimated_height: S) -> Self {
        Self {
            estimated: sanitize_estimate(estimated_height),
            fixed: None,
            baseline: Vec::new(),
            measured: Vec::new(),
            starts: Vec::new(),
            dirty_from: None,
            measured_sum: S::zero(),
            measured_count: 0,
        }
    }

    /// The fallback height for items without a rule or measurement.
    #[must_use]
    pub fn estimated_height(&self) -> S {
        self.estimated
    }

    /// Replaces every baseline height from `items` and `rule`, dropping all
    /// measurements.
    pub fn rebuild<T>(&mut self, items: &[T], rule: &HeightRule<T, S>) {
        self.baseline.clear();
        self.measured.clear();
        self.starts.clear();
        self.measured_sum = S::zero();
        self.measured_count = 0;
        self.extend(items, rule);
        self.dirty_from = Some(0);
    }

    /// Appends baseline heights for `items[self.len()..]`, keeping existing
    /// measurements.
    pub fn extend<T>(&mut self, items: &[T], rule: &HeightRule<T, S>) {
        self.fixed = rule.fixed_height();
        let from = self.baseline.len();
        if items.len() <= from {
            return;
        }
        for (index, item) in items.iter().enumerate().skip(from) {
            let height = rule.evaluate(Some(item), index).unwrap_or(self.estimated);
            self.baseline.push(height);
        }
        self.measured.resize(items.len(), None);
        self.starts.resize(items.len(), S::zero());
        self.mark_dirty(from);
    }

    /// Recomputes baseline heights after the rule or estimate changed,
    /// keeping measurements.
    pub fn reestimate<T>(&mut self, items: &[T], rule: &HeightRule<T, S>, estimated: S) {
        self.estimated = sanitize_estimate(estimated);
        self.fixed = rule.fixed_height();
        let len = self.baseline.len().min(items.len());
        for (index, item) in items.iter().enumerate().take(len) {
            self.baseline[index] = rule.evaluate(Some(item), index).unwrap_or(self.estimated);
        }
        self.mark_dirty(0);
    }

    /// Height of `index`: measured, else baseline, else the estimate.
    #[must_use]
    pub fn height_of(&self, index: usize) -> S {
        match self.measured.get(index) {
            Some(Some(h)) => *h,
            Some(None) => self.baseline[index],
            None => self.estimated,
        }
    }

    /// Returns `true` if `index` has a measured height.
    #[must_use]
    pub fn is_measured(&self, index: usize) -> bool {
        matches!(self.measured.get(index), Some(Some(_)))
    }

    /// Number of indices with a measured height.
    #[must_use]
    pub fn measured_count(&self) -> usize {
        self.measured_count
    }

    /// Records a measured height for `index`.
    ///
    /// Returns `true` if the stored height changed. Out-of-range indices and
    /// unusable heights are ignored. Recording the same height twice is a
    /// no-op.
    pub fn record_measurement(&mut self, index: usize, height: S) -> bool {
        if index >= self.measured.len() {
            log::debug!(
                "ignoring measurement for index {index}; only {} items",
                self.measured.len()
            );
            return false;
        }
        if !height.is_usable_height() {
            log::warn!("ignoring unusable measured height {height:?} for index {index}");
            return false;
        }
        match self.measured[index] {
            Some(prev) if prev == height => return false,
            Some(prev) => self.measured_sum = self.measured_sum - prev + height,
            None => {
                self.measured_sum = self.measured_sum + height;
                self.measured_count += 1;
            }
        }
        self.measured[index] = Some(height);
        self.mark_dirty(index);
        true
    }

    /// Drops every measurement; heights revert to the rule or estimate.
    ///
    /// Heights folded into the baseline by
    /// [`forget_measurements_outside`](Self::forget_measurements_outside)
    /// stay until the next [`reestimate`](Self::reestimate) or
    /// [`rebuild`](Self::rebuild).
    pub fn clear_measurements(&mut self) {
        if self.measured_count == 0 {
            return;
        }
        self.measured.fill(None);
        self.measured_sum = S::zero();
        self.measured_count = 0;
        self.mark_dirty(0);
    }

    /// Forgets measurements for indices outside `window` widened by `margin`.
    ///
    /// Returns how many measurements were dropped.
    ///
    /// Items after the kept range fall back to their rule or estimate. Items
    /// before it keep their measured height as baseline, so the offsets of
    /// the kept range and the scroll position over it do not move; they only
    /// stop counting as measured.
    pub fn forget_measurements_outside(&mut self, window: VisibleRange, margin: usize) -> usize {
        if self.measured_count == 0 || self.measured.is_empty() {
            return 0;
        }
        let keep = window.widen(margin, self.measured.len().max(window.end + 1));
        let mut dropped = 0;
        let mut first_dropped = None;
        for (index, slot) in self.measured.iter_mut().enumerate() {
            if keep.contains(index) {
                continue;
            }
            if let Some(h) = slot.take() {
                self.measured_sum = self.measured_sum - h;
                dropped += 1;
                if index < keep.start {
                    self.baseline[index] = h;
                } else {
                    first_dropped.get_or_insert(index);
                }
            }
        }
        self.measured_count -= dropped;
        if self.measured_count == 0 {
            // Avoid carrying float drift into the next average.
            self.measured_sum = S::zero();
        }
        if let Some(index) = first_dropped {
            self.mark_dirty(index);
        }
        dropped
    }

    /// Returns `true` if some offsets need recomputing.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.dirty_from.is_some()
    }

    fn mark_dirty(&mut self, index: usize) {
        self.dirty_from = Some(self.dirty_from.map_or(index, |d| d.min(index)));
    }

    fn ensure_starts_through(&mut self, through: usize) {
        let len = self.baseline.len();
        if len == 0 || through >= len {
            return;
        }
        let dirty_from = match self.dirty_from {
            Some(d) if d <= through => d,
            _ => return,
        };

        let mut pos = if dirty_from == 0 {
            S::zero()
        } else {
            self.starts[dirty_from - 1] + self.height_of(dirty_from - 1)
        };
        for i in dirty_from..=through {
            self.starts[i] = pos;
            pos = pos + self.height_of(i);
        }

        self.dirty_from = if through + 1 >= len {
            None
        } else {
            Some(through + 1)
        };
    }
}

fn sanitize_estimate<S: Scalar>(estimated: S) -> S {
    if estimated.is_usable_height() {
        estimated
    } else {
        log::warn!("unusable estimated item height {estimated:?}; using 1.0");
        S::from_usize(1)
    }
}

impl<S: Scalar> HeightModel for LayoutEngine<S> {
    type Scalar = S;

    fn len(&self) -> usize {
        self.baseline.len()
    }

    fn height_of(&self, index: usize) -> S {
        Self::height_of(self, index)
    }

    fn offset_before(&mut self, index: usize) -> S {
        let len = self.baseline.len();
        if index == 0 || len == 0 {
            return S::zero();
        }
        if index >= len {
            return self.total_extent();
        }
        self.ensure_starts_through(index);
        self.starts[index]
    }

    fn total_extent(&mut self) -> S {
        let len = self.baseline.len();
        if len == 0 {
            return S::zero();
        }
        let last = len - 1;
        self.ensure_starts_through(last);
        self.starts[last] + self.height_of(last)
    }

    fn index_at_offset(&mut self, offset: S) -> usize {
        let len = self.baseline.len();
        if len == 0 {
            return 0;
        }
        self.ensure_starts_through(len - 1);
        let target = offset.max(S::zero());
        match self.starts.binary_search_by(|start| {
            start
                .partial_cmp(&target)
                .unwrap_or(core::cmp::Ordering::Equal)
        }) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }

    fn average_height(&self) -> S {
        if self.measured_count > 0 {
            let average = self.measured_sum / S::from_usize(self.measured_count);
            if average.is_usable_height() {
                return average;
            }
        }
        self.fixed.unwrap_or(self.estimated)
    }
}
