//! InfiniteCarousel: per-instance state record and event dispatch
//!
//! The engine owns the buffered sequence, the viewport sampler and a timer
//! queue. Hosts feed it scroll events ([`InfiniteCarousel::on_scroll`]),
//! clicks ([`InfiniteCarousel::navigate_to`]) and time
//! ([`InfiniteCarousel::poll`]). Scroll monitoring lives in `monitor.rs`,
//! directed navigation in `navigation.rs`.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use crate::infra::constants::infinite_carousel::buffer;
use crate::infra::runtime_config::RuntimeConfig;
use crate::infra::time::{Clock, SystemClock};
use crate::infra::timers::{TimerKind, TimerQueue, TimerToken};

use super::animator::ScrollAnimator;
use super::buffer::BufferedSequence;
use super::messages::{CarouselEvent, JumpReason};
use super::monitor::{LoopJump, ScrollMetrics};
use super::sampler::ViewportSampler;
use super::types::{BufferKey, CarouselItem, CarouselPhase, CarouselTuning};

/// Events kept for [`InfiniteCarousel::drain_events`]; older ones are dropped.
const MAX_PENDING_EVENTS: usize = 256;

pub type ActiveIndexListener = Box<dyn FnMut(usize)>;

/// Scalar bookkeeping shared by the monitor and the navigation controller.
#[derive(Debug, Clone, Default)]
pub(crate) struct CarouselState {
    pub phase: CarouselPhase,
    pub active_index: usize,
    /// Last offset accepted as movement (direction detection baseline).
    pub last_offset: f32,
    /// Latest offset reported in the current frame.
    pub pending_offset: Option<f32>,
    pub pending_frame: Option<TimerToken>,
    pub animation_frame: Option<TimerToken>,
    pub settle_timer: Option<TimerToken>,
    pub placement_timer: Option<TimerToken>,
    pub placement_pending: bool,
    pub visibility_signature: Vec<(usize, usize, bool)>,
}

/// One rendered buffered instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem<Id, V> {
    pub key: BufferKey<Id>,
    pub absolute_index: usize,
    pub logical_index: usize,
    pub in_home_copy: bool,
    pub view: V,
}

pub struct InfiniteCarousel<T: CarouselItem, S: ViewportSampler> {
    pub(crate) items: Vec<T>,
    pub(crate) buffer: BufferedSequence<T::Id>,
    pub(crate) surface: S,
    pub(crate) tuning: CarouselTuning,
    pub(crate) clock: Rc<dyn Clock>,
    pub(crate) timers: TimerQueue,
    pub(crate) animator: ScrollAnimator,
    pub(crate) state: CarouselState,
    listener: Option<ActiveIndexListener>,
    events: VecDeque<CarouselEvent>,
}

impl<T: CarouselItem, S: ViewportSampler> InfiniteCarousel<T, S> {
    /// Create a carousel driven by real time.
    pub fn new(items: Vec<T>, surface: S, config: &RuntimeConfig) -> Self {
        Self::with_clock(items, surface, config, Rc::new(SystemClock))
    }

    /// Create a carousel driven by the given clock.
    pub fn with_clock(
        items: Vec<T>,
        surface: S,
        config: &RuntimeConfig,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let tuning = CarouselTuning::from_runtime_config(config);
        let mut carousel = Self {
            items: Vec::new(),
            buffer: BufferedSequence::empty(tuning.copies),
            surface,
            tuning,
            clock,
            timers: TimerQueue::new(),
            animator: ScrollAnimator::new(),
            state: CarouselState::default(),
            listener: None,
            events: VecDeque::new(),
        };
        carousel.items = items;
        carousel.rebuild();
        carousel
    }

    /// Register the callback invoked on every active index transition.
    pub fn on_active_index_change(mut self, listener: impl FnMut(usize) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_active_index_listener(&mut self, listener: Option<ActiveIndexListener>) {
        self.listener = listener;
    }

    /// Replace the item list. The buffered sequence is rebuilt and the strip
    /// re-placed on the home copy when the item count changes; otherwise only
    /// the keys are refreshed and the scroll position is kept.
    pub fn set_items(&mut self, items: Vec<T>) {
        let count_changed = items.len() != self.items.len();
        self.items = items;
        if count_changed {
            self.rebuild();
        } else {
            self.buffer = BufferedSequence::build(&self.items, self.tuning.copies);
        }
    }

    fn rebuild(&mut self) {
        self.buffer = BufferedSequence::build(&self.items, self.tuning.copies);
        self.surface.on_buffer_rebuilt(self.buffer.len());
        log::debug!(
            "Rebuilt carousel buffer: {} items x {} copies",
            self.buffer.logical_len(),
            self.buffer.copies()
        );

        if self.state.phase.is_detached() {
            return;
        }
        self.cancel_pending_work();
        self.timers.cancel_slot(&mut self.state.placement_timer);
        self.state.phase = CarouselPhase::Idle;
        self.state.last_offset = self.surface.scroll_offset();
        self.state.visibility_signature.clear();
        self.state.placement_pending = !self.buffer.is_empty();

        let n = self.buffer.logical_len();
        if n > 0 && self.state.active_index >= n {
            self.set_active_index(0);
        } else if n == 0 {
            self.state.active_index = 0;
        }
    }

    /// Notify the carousel that the surface has been laid out or resized.
    ///
    /// The first call performs the pending home-copy placement. Later calls
    /// widen the buffer when the viewport outgrew it, refresh the active index
    /// and move the view out of an outermost copy.
    pub fn on_layout(&mut self) {
        if self.state.phase.is_detached() {
            return;
        }
        if self.state.placement_pending || self.ensure_copy_headroom() {
            self.try_initial_placement();
            return;
        }
        if self.state.phase.is_suppressed() {
            return;
        }
        self.state.visibility_signature.clear();
        self.refresh_active_index();
        let offset = self.surface.scroll_offset();
        self.state.last_offset = offset;
        if let Some(jump) = self.metrics().and_then(|m| m.settle_jump(offset)) {
            self.jump_to(jump, JumpReason::Settle);
        }
    }

    /// Raise the copy count when the home copy is not fully reachable, which
    /// happens when the viewport is wide compared with one set. Returns true
    /// when the buffer was rebuilt.
    fn ensure_copy_headroom(&mut self) -> bool {
        let Some(metrics) = self.metrics() else {
            return false;
        };
        let required = metrics.required_copies().min(buffer::MAX_COPIES);
        if required <= self.tuning.copies {
            return false;
        }
        log::warn!(
            "{} copies of {} items are too narrow for the viewport; using {}",
            self.tuning.copies,
            metrics.item_count,
            required
        );
        self.tuning.copies = required;
        self.rebuild();
        true
    }

    fn try_initial_placement(&mut self) {
        while self.ensure_copy_headroom() {}

        let active = self.state.active_index;
        let home = self.buffer.home_absolute(active);
        let Some(geometry) = home.and_then(|abs| self.surface.measure(abs)) else {
            if self.state.placement_timer.is_none() {
                log::trace!("Initial placement deferred; home copy not measured");
                let token = self.timers.schedule(
                    TimerKind::InitialPlacement,
                    self.now(),
                    self.tuning.initial_placement_delay,
                );
                self.state.placement_timer = Some(token);
            }
            return;
        };

        self.state.placement_pending = false;
        self.timers.cancel_slot(&mut self.state.placement_timer);
        let max_scroll = self.surface.max_scroll_offset().max(0.0);
        let target = if geometry.left <= max_scroll {
            geometry.left
        } else {
            // Nearest lower copy whose instance is reachable.
            (0..self.buffer.home_copy())
                .rev()
                .filter_map(|copy| self.buffer.instance_in_copy(active, copy))
                .filter_map(|abs| self.surface.measure(abs))
                .map(|g| g.left)
                .find(|left| *left <= max_scroll)
                .unwrap_or(max_scroll)
        };
        let from = self.surface.scroll_offset();
        self.jump_to(LoopJump { from, to: target }, JumpReason::InitialPlacement);
    }

    /// Fire every timer that is due. Returns the number of timers fired.
    pub fn poll(&mut self) -> usize {
        let now = self.now();
        let mut fired = 0;
        while let Some((token, kind)) = self.timers.pop_due(now) {
            fired += 1;
            self.dispatch(token, kind);
        }
        fired
    }

    fn dispatch(&mut self, token: TimerToken, kind: TimerKind) {
        match kind {
            TimerKind::Frame => {
                if self.state.pending_frame == Some(token) {
                    self.state.pending_frame = None;
                    self.on_frame();
                }
            }
            TimerKind::ScrollSettle => {
                if self.state.settle_timer == Some(token) {
                    self.state.settle_timer = None;
                    self.on_scroll_settled();
                }
            }
            TimerKind::JumpCooldown => {
                if let CarouselPhase::Jumping { cooldown } = self.state.phase
                    && cooldown == token
                {
                    self.on_jump_cooldown_elapsed();
                }
            }
            TimerKind::AnimationFrame => {
                if self.state.animation_frame == Some(token) {
                    self.state.animation_frame = None;
                    self.on_animation_frame();
                }
            }
            TimerKind::NavigationSettle => {
                if let CarouselPhase::Navigating { settle, .. } = self.state.phase
                    && settle == token
                {
                    self.on_navigation_settled();
                }
            }
            TimerKind::InitialPlacement => {
                if self.state.placement_timer == Some(token) {
                    self.state.placement_timer = None;
                    if self.state.placement_pending {
                        self.try_initial_placement();
                    }
                }
            }
        }
    }

    /// Detach from the host view: every timer is cleared and further input is
    /// ignored. Also runs on drop.
    pub fn detach(&mut self) {
        if self.state.phase.is_detached() {
            return;
        }
        self.timers.clear();
        self.animator.cancel();
        self.state = CarouselState {
            phase: CarouselPhase::Detached,
            active_index: self.state.active_index,
            last_offset: self.state.last_offset,
            ..CarouselState::default()
        };
        log::debug!("Carousel detached");
    }

    /// Render every buffered instance through
    /// `render_item(item, logical_index, is_active)`.
    pub fn render<V>(
        &self,
        mut render_item: impl FnMut(&T, usize, bool) -> V,
    ) -> Vec<RenderedItem<T::Id, V>> {
        let active = self.active_index();
        self.buffer
            .slots()
            .iter()
            .map(|slot| RenderedItem {
                key: slot.key.clone(),
                absolute_index: slot.absolute_index,
                logical_index: slot.logical_index,
                in_home_copy: self.buffer.is_home(slot.absolute_index),
                view: render_item(
                    &self.items[slot.logical_index],
                    slot.logical_index,
                    active == Some(slot.logical_index),
                ),
            })
            .collect()
    }

    /// Logical index at the leading edge, or `None` for an empty carousel.
    pub fn active_index(&self) -> Option<usize> {
        (!self.buffer.is_empty()).then_some(self.state.active_index)
    }

    pub fn active_item(&self) -> Option<&T> {
        self.active_index().and_then(|i| self.items.get(i))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn buffer(&self) -> &BufferedSequence<T::Id> {
        &self.buffer
    }

    pub fn phase(&self) -> CarouselPhase {
        self.state.phase
    }

    /// True while offset changes are self-caused (loop-jump or navigation).
    pub fn is_suppressed(&self) -> bool {
        self.state.phase.is_suppressed()
    }

    pub fn tuning(&self) -> &CarouselTuning {
        &self.tuning
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Earliest pending timer deadline, for hosts that sleep between polls.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        self.events.drain(..).collect()
    }

    pub(crate) fn now(&self) -> Instant {
        self.clock.now()
    }

    pub(crate) fn emit(&mut self, event: CarouselEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Report a new active index if it differs from the current one.
    pub(crate) fn set_active_index(&mut self, index: usize) {
        if self.buffer.is_empty() || index == self.state.active_index {
            return;
        }
        self.state.active_index = index;
        log::trace!("Active index -> {index}");
        self.emit(CarouselEvent::ActiveIndexChanged(index));
        if let Some(listener) = self.listener.as_mut() {
            listener(index);
        }
    }

    /// Geometry derived from the home copy's first instance; `None` until it
    /// has been laid out with a positive width.
    pub(crate) fn metrics(&self) -> Option<ScrollMetrics> {
        let n = self.buffer.logical_len();
        if n == 0 {
            return None;
        }
        let geometry = self.surface.measure(self.buffer.home_range().start)?;
        if !(geometry.width.is_finite() && geometry.width > 0.0) {
            return None;
        }
        let pitch = geometry.width + self.tuning.item_gap;
        Some(ScrollMetrics {
            pitch,
            set_width: pitch * n as f32,
            item_count: n,
            copies: self.buffer.copies(),
            max_scroll: self.surface.max_scroll_offset().max(0.0),
        })
    }

    /// Invalidate queued evaluation, cooldown, animation and settle work.
    pub(crate) fn cancel_pending_work(&mut self) {
        self.timers.cancel_slot(&mut self.state.pending_frame);
        self.timers.cancel_slot(&mut self.state.animation_frame);
        self.timers.cancel_slot(&mut self.state.settle_timer);
        self.state.pending_offset = None;
        match self.state.phase {
            CarouselPhase::Jumping { cooldown } => {
                self.timers.cancel(cooldown);
            }
            CarouselPhase::Navigating { settle, .. } => {
                self.timers.cancel(settle);
                self.animator.cancel();
            }
            _ => {}
        }
    }

    /// Queue a coalesced evaluation of `offset` for the next frame.
    pub(crate) fn request_frame(&mut self, offset: f32) {
        self.state.pending_offset = Some(offset);
        if self.state.pending_frame.is_none() {
            let token = self.timers.schedule(
                TimerKind::Frame,
                self.now(),
                self.tuning.frame_interval,
            );
            self.state.pending_frame = Some(token);
        }
    }

    /// Move the offset instantly under suppression and start the cooldown.
    pub(crate) fn jump_to(&mut self, jump: LoopJump, reason: JumpReason) {
        self.cancel_pending_work();
        log::debug!("Loop-jump ({reason:?}): {:.1} -> {:.1}", jump.from, jump.to);
        self.surface.set_scroll_offset(jump.to);
        self.state.last_offset = jump.to;
        self.state.visibility_signature.clear();
        let cooldown = self.timers.schedule(
            TimerKind::JumpCooldown,
            self.now(),
            self.tuning.jump_cooldown,
        );
        self.state.phase = CarouselPhase::Jumping { cooldown };
        self.emit(CarouselEvent::LoopJumped {
            from: jump.from,
            to: jump.to,
            reason,
        });
    }
}

impl<T: CarouselItem, S: ViewportSampler> Drop for InfiniteCarousel<T, S> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<T, S> fmt::Debug for InfiniteCarousel<T, S>
where
    T: CarouselItem,
    S: ViewportSampler + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfiniteCarousel")
            .field("items", &self.items.len())
            .field("buffer", &self.buffer.len())
            .field("surface", &self.surface)
            .field("tuning", &self.tuning)
            .field("state", &self.state)
            .field("pending_timers", &self.timers.len())
            .field("listener", &self.listener.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
