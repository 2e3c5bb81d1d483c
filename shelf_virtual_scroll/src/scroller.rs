// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The windowed-rendering scroller a host view drives.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::controller::{aligned_offset, should_load_more};
use crate::visibility::{VisibilityChange, VisibilityTracker};
use crate::{
    HeightModel, HeightRule, LayoutEngine, ScrollAlign, ScrollBehavior, ScrollHost, ScrollMetrics,
    Scalar, ScrollerConfig, ScrollerEvent, ScrollerEvents, Spacers, VisibleRange,
    compute_visible_range, spacers_for,
};

/// One item of the rendered window with its absolute position.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem<'a, T, K, S: Scalar> {
    /// Index in the item collection.
    pub index: usize,
    /// The item's key.
    pub key: K,
    /// Distance from the top of the content.
    pub offset: S,
    /// Height the layout currently assumes.
    pub height: S,
    /// The item itself.
    pub item: &'a T,
}

/// What the host should render after the last item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footer<'a> {
    /// Nothing.
    Hidden,
    /// A page is being fetched.
    Loading,
    /// Every page has been loaded.
    End(&'a str),
}

/// A windowed list over a host-owned scroll container.
///
/// The scroller owns the current item collection, per-item height state, and
/// the visibility of rendered items. The host:
///
/// - [mounts](Self::mount) its container, which registers resize observation,
/// - forwards [scroll](Self::on_scroll), [resize](Self::on_resize), and
///   [frame](Self::on_frame) callbacks and reacts to the returned events,
/// - renders [`rendered_items`](Self::rendered_items) between the two
///   [`spacers`](Self::spacers), and reports measured heights back through
///   [`record_measurement`](Self::record_measurement),
/// - owns paging: it sets [`loading`](Self::set_loading) and
///   [`has_more`](Self::set_has_more) and appends fetched pages.
///
/// All recomputation happens synchronously inside those calls; nothing runs
/// in the background.
pub struct VirtualScroller<T, K, H, S = f64>
where
    S: Scalar,
    H: ScrollHost<S>,
{
    items: Vec<T>,
    key_of: Box<dyn Fn(&T) -> K>,
    height_rule: HeightRule<T, S>,
    config: ScrollerConfig<S>,
    layout: LayoutEngine<S>,
    visibility: VisibilityTracker,
    host: Option<H>,
    scroll_offset: S,
    viewport_size: S,
    range: Option<VisibleRange>,
    relayout_pending: bool,
    retired: ScrollerEvents<K, S>,
    loading: bool,
    has_more: bool,
}

impl<T, K, H, S> VirtualScroller<T, K, H, S>
where
    K: PartialEq,
    S: Scalar,
    H: ScrollHost<S>,
{
    /// Creates an unmounted scroller with no items.
    ///
    /// `key_of` extracts the identity of an item; it is used to tell appended
    /// pages from a replaced collection and is reported with visibility
    /// events.
    pub fn new(config: ScrollerConfig<S>, key_of: impl Fn(&T) -> K + 'static) -> Self {
        let layout = LayoutEngine::new(config.estimated_item_height);
        Self {
            items: Vec::new(),
            key_of: Box::new(key_of),
            height_rule: HeightRule::Estimated,
            viewport_size: config.container_height.max(S::zero()),
            config,
            layout,
            visibility: VisibilityTracker::new(),
            host: None,
            scroll_offset: S::zero(),
            range: None,
            relayout_pending: true,
            retired: ScrollerEvents::new(),
            loading: false,
            has_more: false,
        }
    }

    /// Sets the height rule, builder style.
    #[must_use]
    pub fn with_height_rule(mut self, rule: HeightRule<T, S>) -> Self {
        self.set_height_rule(rule);
        self
    }

    /// Replaces the height rule. Measurements are kept.
    pub fn set_height_rule(&mut self, rule: HeightRule<T, S>) {
        self.height_rule = rule;
        self.layout.reestimate(
            &self.items,
            &self.height_rule,
            self.config.estimated_item_height,
        );
        self.relayout_pending = true;
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ScrollerConfig<S> {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// `container_height` only seeds the viewport before the first resize
    /// notification, so changing it here does not move the viewport.
    pub fn set_config(&mut self, config: ScrollerConfig<S>) {
        let reestimate = config.estimated_item_height != self.config.estimated_item_height;
        self.config = config;
        if reestimate {
            self.layout.reestimate(
                &self.items,
                &self.height_rule,
                self.config.estimated_item_height,
            );
        }
        self.relayout_pending = true;
    }

    // --- items ---

    /// The current item collection.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The item at `index`, if any.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the item collection.
    ///
    /// If the current items are a key-wise prefix of `items`, this is treated
    /// as an append and every measurement survives. When the keys are
    /// unchanged and nothing was appended, the items are taken as updated in
    /// place and a [`HeightRule::PerItem`] rule is re-evaluated for them.
    /// Anything else (a filter change, a reorder, a shrink) invalidates all
    /// per-item state, like [`refresh`](Self::refresh), and the items that
    /// were visible are reported as [`ScrollerEvent::ItemHidden`] with their
    /// old keys on the next scroll or frame.
    pub fn set_items(&mut self, items: Vec<T>) {
        let old_len = self.items.len();
        let is_append = items.len() >= old_len
            && self
                .items
                .iter()
                .zip(&items)
                .all(|(old, new)| (self.key_of)(old) == (self.key_of)(new));
        if !is_append {
            self.retire_visible();
        }
        self.items = items;
        if is_append {
            let updated_in_place = self.items.len() == old_len;
            if updated_in_place && matches!(self.height_rule, HeightRule::PerItem(_)) {
                self.layout.reestimate(
                    &self.items,
                    &self.height_rule,
                    self.config.estimated_item_height,
                );
            }
            self.layout.extend(&self.items, &self.height_rule);
        } else {
            log::debug!(
                "item collection replaced; dropping {} measurements",
                self.layout.measured_count()
            );
            self.layout.rebuild(&self.items, &self.height_rule);
            self.range = None;
        }
        self.relayout_pending = true;
    }

    /// Clears visibility state, queueing an `ItemHidden` for every item that
    /// was visible under its current key.
    fn retire_visible(&mut self) {
        for index in self.visibility.take_visible() {
            let Some(item) = self.items.get(index) else {
                continue;
            };
            let key = (self.key_of)(item);
            self.retired.push(ScrollerEvent::ItemHidden { index, key });
        }
    }

    /// Appends a fetched page, keeping all measurements.
    pub fn append_items(&mut self, page: impl IntoIterator<Item = T>) {
        let before = self.items.len();
        self.items.extend(page);
        if self.items.len() != before {
            self.layout.extend(&self.items, &self.height_rule);
            self.relayout_pending = true;
        }
    }

    // --- paging flags ---

    /// Whether the host is currently fetching a page.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Sets whether the host is fetching a page. While set, no
    /// [`ScrollerEvent::LoadMore`] is raised.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether more pages exist.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Sets whether more pages exist.
    pub fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }

    /// What to render after the last item.
    #[must_use]
    pub fn footer(&self) -> Footer<'_> {
        if self.loading {
            Footer::Loading
        } else if !self.has_more && !self.items.is_empty() {
            self.config
                .end_message
                .as_deref()
                .map_or(Footer::Hidden, Footer::End)
        } else {
            Footer::Hidden
        }
    }

    // --- mounting ---

    /// Attaches the scroll container and starts observing its size.
    ///
    /// A previously mounted container is released first.
    pub fn mount(&mut self, mut host: H) {
        if self.unmount().is_some() {
            log::debug!("replacing the mounted container");
        }
        host.observe_resize();
        self.host = Some(host);
        self.relayout_pending = true;
    }

    /// Detaches the scroll container, releasing its resize observation.
    pub fn unmount(&mut self) -> Option<H> {
        let mut host = self.host.take()?;
        host.unobserve_resize();
        Some(host)
    }

    /// Returns `true` while a container is attached.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.host.is_some()
    }

    /// The attached container, if any.
    #[must_use]
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// The attached container, if any, mutably.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    // --- host callbacks ---

    /// Handles a scroll event from the container.
    ///
    /// Recomputes the rendered window and visibility, then reports
    /// [`ScrollerEvent::Scroll`], any visibility transitions, and
    /// [`ScrollerEvent::LoadMore`] if the end is near.
    pub fn on_scroll(&mut self, scroll_offset: S) -> ScrollerEvents<K, S> {
        self.scroll_offset = scroll_offset.max(S::zero());
        let mut events = ScrollerEvents::new();
        events.push(ScrollerEvent::Scroll(self.scroll_metrics()));
        self.relayout(&mut events);
        events
    }

    /// Records a new container size.
    ///
    /// The window is recomputed on the next scroll or frame, not here.
    pub fn on_resize(&mut self, viewport_size: S) {
        if !viewport_size.is_finite() {
            log::warn!("ignoring non-finite viewport size {viewport_size:?}");
            return;
        }
        let viewport_size = viewport_size.clamp_non_negative();
        if viewport_size != self.viewport_size {
            self.viewport_size = viewport_size;
            self.relayout_pending = true;
        }
    }

    /// Applies a pending relayout once per rendering frame.
    ///
    /// Measurements, resizes, and item changes since the last pass are folded
    /// into a single recomputation. Returns visibility transitions and, since
    /// the content may have shrunk below the viewport, a possible
    /// [`ScrollerEvent::LoadMore`].
    pub fn on_frame(&mut self) -> ScrollerEvents<K, S> {
        let mut events = ScrollerEvents::new();
        if self.relayout_pending {
            self.relayout(&mut events);
        }
        events
    }

    /// Returns `true` if a relayout is waiting for the next frame.
    #[must_use]
    pub fn needs_relayout(&self) -> bool {
        self.relayout_pending
    }

    fn relayout(&mut self, events: &mut ScrollerEvents<K, S>) {
        events.extend(self.retired.drain(..));
        self.range = compute_visible_range(
            &mut self.layout,
            self.scroll_offset,
            self.viewport_size,
            self.config.overscan,
            self.config.range_strategy,
        );
        let changes = self.visibility.update(
            &mut self.layout,
            self.range,
            self.scroll_offset,
            self.viewport_size,
        );
        for change in changes {
            let (index, visible) = match change {
                VisibilityChange::Entered(index) => (index, true),
                VisibilityChange::Exited(index) => (index, false),
            };
            let Some(item) = self.items.get(index) else {
                continue;
            };
            let key = (self.key_of)(item);
            events.push(if visible {
                ScrollerEvent::ItemVisible { index, key }
            } else {
                ScrollerEvent::ItemHidden { index, key }
            });
        }
        if let (Some(margin), Some(range)) = (self.config.retain_margin, self.range) {
            let dropped = self.layout.forget_measurements_outside(range, margin);
            if dropped > 0 {
                log::trace!("forgot {dropped} measurements outside {range:?}");
            }
        }
        self.relayout_pending = false;

        let metrics = self.scroll_metrics();
        if should_load_more(
            metrics.scroll_extent,
            metrics.scroll_offset,
            metrics.viewport_size,
            self.config.load_more_threshold,
            self.has_more,
            self.loading,
        ) {
            log::trace!("requesting next page at {metrics:?}");
            events.push(ScrollerEvent::LoadMore);
        }
    }

    // --- layout queries ---

    /// The rendered window from the last layout pass, or `None` when empty
    /// or not laid out yet.
    #[must_use]
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.range
    }

    /// Current scroll position, extent, and viewport size.
    pub fn scroll_metrics(&mut self) -> ScrollMetrics<S> {
        ScrollMetrics {
            scroll_offset: self.scroll_offset,
            scroll_extent: self.layout.total_extent(),
            viewport_size: self.viewport_size,
        }
    }

    /// Height of item `index`; the estimate for unknown indices.
    #[must_use]
    pub fn height_of(&self, index: usize) -> S {
        self.layout.height_of(index)
    }

    /// Cumulative height of all items before `index`.
    pub fn offset_before(&mut self, index: usize) -> S {
        self.layout.offset_before(index)
    }

    /// Sum of all item heights.
    pub fn total_extent(&mut self) -> S {
        self.layout.total_extent()
    }

    /// Leading and trailing spacer extents around the rendered window.
    pub fn spacers(&mut self) -> Spacers<S> {
        spacers_for(&mut self.layout, self.range)
    }

    /// Items of the rendered window with their absolute offsets.
    pub fn rendered_items(&mut self) -> impl Iterator<Item = RenderedItem<'_, T, K, S>> {
        let mut offset = match self.range {
            Some(range) => self.layout.offset_before(range.start),
            None => S::zero(),
        };
        let this = &*self;
        let indices = this.range.into_iter().flat_map(|range| range.indices());
        indices.filter_map(move |index| {
            let item = this.items.get(index)?;
            let height = this.layout.height_of(index);
            let rendered = RenderedItem {
                index,
                key: (this.key_of)(item),
                offset,
                height,
                item,
            };
            offset = offset + height;
            Some(rendered)
        })
    }

    /// Read access to the layout engine.
    #[must_use]
    pub fn layout(&self) -> &LayoutEngine<S> {
        &self.layout
    }

    // --- measurement ---

    /// Reports the rendered height of item `index`.
    ///
    /// Returns `true` if the height changed, in which case positions are
    /// recomputed on the next frame. Unknown indices and unusable heights
    /// are ignored.
    pub fn record_measurement(&mut self, index: usize, height: S) -> bool {
        let changed = self.layout.record_measurement(index, height);
        if changed {
            self.relayout_pending = true;
        }
        changed
    }

    /// Drops every measurement and all visibility state.
    ///
    /// The next pass lays out from the height rule and estimate alone, as if
    /// freshly mounted with the same items. Items that were visible are
    /// reported hidden on that pass, before the new visibility.
    pub fn refresh(&mut self) {
        self.layout.clear_measurements();
        self.layout.reestimate(
            &self.items,
            &self.height_rule,
            self.config.estimated_item_height,
        );
        self.retire_visible();
        self.range = None;
        self.relayout_pending = true;
    }

    // --- programmatic scrolling ---

    /// Asks the container to scroll item `index` to the top of the viewport.
    ///
    /// Returns `false` without doing anything if `index` is out of range or
    /// no container is mounted.
    pub fn scroll_to_index(&mut self, index: usize, behavior: ScrollBehavior) -> bool {
        self.scroll_to_index_aligned(index, ScrollAlign::Start, behavior)
    }

    /// Like [`scroll_to_index`](Self::scroll_to_index) with an alignment.
    pub fn scroll_to_index_aligned(
        &mut self,
        index: usize,
        align: ScrollAlign,
        behavior: ScrollBehavior,
    ) -> bool {
        if index >= self.items.len() {
            log::debug!("scroll_to_index({index}) ignored; {} items", self.items.len());
            return false;
        }
        if self.host.is_none() {
            log::debug!("scroll_to_index({index}) ignored; container not mounted");
            return false;
        }
        let offset = aligned_offset(
            &mut self.layout,
            index,
            align,
            self.scroll_offset,
            self.viewport_size,
        );
        self.request_scroll(offset, behavior)
    }

    /// Asks the container to scroll to the top.
    pub fn scroll_to_top(&mut self, behavior: ScrollBehavior) -> bool {
        self.request_scroll(S::zero(), behavior)
    }

    /// Asks the container to scroll to the end of the content.
    pub fn scroll_to_bottom(&mut self, behavior: ScrollBehavior) -> bool {
        let extent = self.layout.total_extent();
        self.request_scroll(extent, behavior)
    }

    fn request_scroll(&mut self, offset: S, behavior: ScrollBehavior) -> bool {
        let Some(host) = self.host.as_mut() else {
            log::debug!("scroll to {offset:?} ignored; container not mounted");
            return false;
        };
        host.scroll_to(offset, behavior);
        true
    }
}

impl<T, K, H, S> Drop for VirtualScroller<T, K, H, S>
where
    S: Scalar,
    H: ScrollHost<S>,
{
    fn drop(&mut self) {
        if let Some(host) = self.host.as_mut() {
            host.unobserve_resize();
        }
    }
}

impl<T, K, H, S> fmt::Debug for VirtualScroller<T, K, H, S>
where
    S: Scalar,
    H: ScrollHost<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualScroller")
            .field("len", &self.items.len())
            .field("height_rule", &self.height_rule)
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("mounted", &self.host.is_some())
            .field("scroll_offset", &self.scroll_offset)
            .field("viewport_size", &self.viewport_size)
            .field("range", &self.range)
            .field("relayout_pending", &self.relayout_pending)
            .field("loading", &self.loading)
            .field("has_more", &self.has_more)
            .finish_non_exhaustive()
    }
}
