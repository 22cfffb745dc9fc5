//! Headless rendering surface and a virtual-time driver
//!
//! [`UniformStrip`] lays out equally sized cards with a fixed gap and computes
//! intersection ratios the way a browser intersection observer would.
//! [`Simulation`] couples it to a carousel running on a [`ManualClock`], so
//! scroll gestures, clicks and timer-driven work can be replayed
//! deterministically. Used by the showcase binary and the integration tests.

use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use crate::carousel::{
    CarouselItem, InfiniteCarousel, ItemGeometry, ViewportSampler, VisibilityCriteria, VisibleItem,
    leftmost_visible,
};
use crate::infra::runtime_config::RuntimeConfig;
use crate::infra::time::{Clock, ManualClock};

/// Guard against a timer storm inside a single `advance` call.
const MAX_TIMERS_PER_ADVANCE: usize = 100_000;

#[derive(Debug, Clone)]
pub struct UniformStrip {
    item_width: f32,
    gap: f32,
    viewport_width: f32,
    len: usize,
    offset: f32,
    unmounted: HashSet<usize>,
    notifications: VecDeque<f32>,
}

impl UniformStrip {
    pub fn new(item_width: f32, gap: f32, viewport_width: f32) -> Self {
        Self {
            item_width: item_width.max(0.0),
            gap: gap.max(0.0),
            viewport_width: viewport_width.max(0.0),
            len: 0,
            offset: 0.0,
            unmounted: HashSet::new(),
            notifications: VecDeque::new(),
        }
    }

    pub fn pitch(&self) -> f32 {
        self.item_width + self.gap
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn content_width(&self) -> f32 {
        if self.len == 0 {
            0.0
        } else {
            self.len as f32 * self.pitch() - self.gap
        }
    }

    /// User-driven scroll: moves the viewport without queuing a notification,
    /// since the caller reports the event itself. Returns the clamped offset.
    pub fn user_scroll_to(&mut self, offset: f32) -> f32 {
        self.offset = offset.clamp(0.0, self.max_scroll_offset());
        self.offset
    }

    /// Scroll events caused by programmatic offset changes, oldest first.
    pub fn take_notifications(&mut self) -> Vec<f32> {
        self.notifications.drain(..).collect()
    }

    /// Stop laying out an instance, as if it had not been rendered yet.
    pub fn unmount(&mut self, absolute_index: usize) {
        self.unmounted.insert(absolute_index);
    }

    pub fn mount(&mut self, absolute_index: usize) {
        self.unmounted.remove(&absolute_index);
    }

    /// Resize the viewport. The offset is clamped to the new scroll range
    /// without a notification; hosts report the layout change instead.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Absolute index of the leftmost instance visible under `criteria`.
    pub fn leading_item(&self, criteria: &VisibilityCriteria) -> Option<usize> {
        leftmost_visible(&self.visible_items(criteria), criteria)
    }
}

impl ViewportSampler for UniformStrip {
    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn max_scroll_offset(&self) -> f32 {
        (self.content_width() - self.viewport_width).max(0.0)
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        let clamped = offset.clamp(0.0, self.max_scroll_offset());
        if (clamped - self.offset).abs() > f32::EPSILON {
            self.offset = clamped;
            self.notifications.push_back(clamped);
        }
    }

    fn measure(&self, absolute_index: usize) -> Option<ItemGeometry> {
        if absolute_index >= self.len || self.unmounted.contains(&absolute_index) {
            return None;
        }
        Some(ItemGeometry {
            left: absolute_index as f32 * self.pitch(),
            width: self.item_width,
        })
    }

    fn visible_items(&self, _criteria: &VisibilityCriteria) -> Vec<VisibleItem> {
        let pitch = self.pitch();
        if self.len == 0 || pitch <= 0.0 || self.item_width <= 0.0 {
            return Vec::new();
        }
        let view_start = self.offset;
        let view_end = self.offset + self.viewport_width;
        let first = (view_start / pitch).floor().max(0.0) as usize;

        (first..self.len)
            .take_while(|abs| (*abs as f32 * pitch) < view_end)
            .filter(|abs| !self.unmounted.contains(abs))
            .filter_map(|abs| {
                let left = abs as f32 * pitch;
                let right = left + self.item_width;
                let shown = right.min(view_end) - left.max(view_start);
                (shown > 0.0).then(|| VisibleItem {
                    absolute_index: abs,
                    left,
                    ratio: (shown / self.item_width).min(1.0),
                })
            })
            .collect()
    }

    fn on_buffer_rebuilt(&mut self, len: usize) {
        self.len = len;
        self.unmounted.retain(|abs| *abs < len);
        self.offset = self.offset.clamp(0.0, self.max_scroll_offset());
    }
}

/// A carousel on a [`UniformStrip`] driven by virtual time.
#[derive(Debug)]
pub struct Simulation<T: CarouselItem> {
    carousel: InfiniteCarousel<T, UniformStrip>,
    clock: ManualClock,
}

impl<T: CarouselItem> Simulation<T> {
    /// Build the carousel and perform the first layout.
    pub fn new(items: Vec<T>, strip: UniformStrip, config: &RuntimeConfig) -> Self {
        Self::unlaid(items, strip, config).laid_out()
    }

    /// Build the carousel without laying it out; call [`Self::layout`] later.
    pub fn unlaid(items: Vec<T>, strip: UniformStrip, config: &RuntimeConfig) -> Self {
        let clock = ManualClock::new();
        let carousel = InfiniteCarousel::with_clock(items, strip, config, Rc::new(clock.clone()));
        Self { carousel, clock }
    }

    fn laid_out(mut self) -> Self {
        self.layout();
        self
    }

    pub fn layout(&mut self) {
        self.carousel.on_layout();
        self.pump();
    }

    /// Resize the viewport and report the new layout to the carousel.
    pub fn resize(&mut self, viewport_width: f32) {
        self.strip_mut().set_viewport_width(viewport_width);
        self.layout();
    }

    pub fn carousel(&self) -> &InfiniteCarousel<T, UniformStrip> {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut InfiniteCarousel<T, UniformStrip> {
        &mut self.carousel
    }

    pub fn strip(&self) -> &UniformStrip {
        self.carousel.surface()
    }

    pub fn strip_mut(&mut self) -> &mut UniformStrip {
        self.carousel.surface_mut()
    }

    pub fn offset(&self) -> f32 {
        self.strip().scroll_offset()
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Logical index of the leftmost sufficiently visible instance.
    pub fn leading_logical(&self) -> Option<usize> {
        let criteria = &self.carousel.tuning().criteria;
        self.strip()
            .leading_item(criteria)
            .and_then(|abs| self.carousel.buffer().logical_of(abs))
    }

    pub fn user_scroll_to(&mut self, offset: f32) {
        let offset = self.strip_mut().user_scroll_to(offset);
        self.carousel.on_scroll(offset);
        self.pump();
    }

    pub fn user_scroll_by(&mut self, delta: f32) {
        let target = self.offset() + delta;
        self.user_scroll_to(target);
    }

    /// Scroll `distance` in steps of `step_px`, one step every `step_ms`.
    pub fn drag(&mut self, distance: f32, step_px: f32, step_ms: u64) {
        let step = step_px.abs().max(f32::EPSILON).copysign(distance);
        let mut remaining = distance;
        while remaining.abs() > f32::EPSILON {
            let delta = if remaining.abs() < step.abs() { remaining } else { step };
            self.user_scroll_by(delta);
            self.advance_ms(step_ms);
            remaining -= delta;
        }
    }

    /// Click the rendered instance at `absolute_index`.
    pub fn click(&mut self, absolute_index: usize) {
        if let Some(logical) = self.carousel.buffer().logical_of(absolute_index) {
            self.carousel.navigate_to(absolute_index, logical);
            self.pump();
        } else {
            log::debug!("Click on {absolute_index} outside the buffered sequence");
        }
    }

    pub fn visit(&mut self, logical_index: usize) {
        self.carousel.scroll_to_logical_index(logical_index);
        self.pump();
    }

    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Move virtual time forward, firing every timer at its own deadline and
    /// feeding programmatic scroll events back to the carousel.
    pub fn advance(&mut self, duration: Duration) {
        let target = self.clock.now() + duration;
        let mut fired = 0;
        while let Some(deadline) = self.carousel.next_deadline() {
            if deadline > target || fired >= MAX_TIMERS_PER_ADVANCE {
                break;
            }
            let now = self.clock.now();
            self.clock.advance(deadline.saturating_duration_since(now));
            fired += self.carousel.poll();
            self.pump();
        }
        let now = self.clock.now();
        self.clock.advance(target.saturating_duration_since(now));
        self.carousel.poll();
        self.pump();
    }

    fn pump(&mut self) {
        loop {
            let pending = self.strip_mut().take_notifications();
            if pending.is_empty() {
                break;
            }
            for offset in pending {
                self.carousel.on_scroll(offset);
            }
        }
    }
}
