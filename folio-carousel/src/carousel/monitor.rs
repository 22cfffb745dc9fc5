//! Scroll-position monitor
//!
//! Observes organic scroll events, keeps the active index in sync with the
//! leftmost sufficiently visible item and relocates the view with an
//! invisible loop-jump whenever the user drifts into an outermost copy.
//!
//! Scroll events are coalesced per frame: `on_scroll` only records the latest
//! offset and the evaluation runs when the frame timer fires.

use crate::infra::constants::infinite_carousel::monitor::EDGE_EPSILON_PX;
use crate::infra::timers::TimerKind;

use super::engine::InfiniteCarousel;
use super::messages::JumpReason;
use super::sampler::{ViewportSampler, leftmost_visible, visibility_signature};
use super::types::{CarouselItem, CarouselPhase, Direction};

/// Strip geometry for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Item width plus the inter-item gap.
    pub pitch: f32,
    /// Width of one full copy of the logical sequence.
    pub set_width: f32,
    pub item_count: usize,
    pub copies: usize,
    pub max_scroll: f32,
}

/// An instant offset correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopJump {
    pub from: f32,
    pub to: f32,
}

impl ScrollMetrics {
    pub fn home_copy(&self) -> usize {
        self.copies / 2
    }

    /// Copy under `offset`, clamped to the buffered range.
    pub fn copy_of(&self, offset: f32) -> usize {
        if self.set_width <= 0.0 {
            return 0;
        }
        let copy = (offset.max(0.0) / self.set_width).floor() as usize;
        copy.min(self.copies.saturating_sub(1))
    }

    pub fn position_in_set(&self, offset: f32) -> f32 {
        if self.set_width <= 0.0 {
            return 0.0;
        }
        offset.rem_euclid(self.set_width)
    }

    /// Same relative position inside another copy.
    pub fn equivalent_in_copy(&self, offset: f32, copy: usize) -> f32 {
        copy as f32 * self.set_width + self.position_in_set(offset)
    }

    /// Forward travel at or past this offset triggers a loop-jump. Capped by
    /// the hard scroll end so a wide viewport can still trigger it.
    pub fn forward_trigger(&self, threshold: f32) -> f32 {
        let trailing = (self.copies.saturating_sub(1) as f32 + threshold) * self.set_width;
        trailing.min(self.max_scroll - EDGE_EPSILON_PX)
    }

    /// Backward travel at or before this offset triggers a loop-jump.
    pub fn backward_trigger(&self, threshold: f32) -> f32 {
        (1.0 - threshold) * self.set_width
    }

    /// Inner copy adjacent to home on the side opposite travel, leaving the
    /// most runway in the direction the user is moving.
    pub fn landing_copy(&self, direction: Direction) -> usize {
        let home = self.home_copy();
        let inner_max = self.copies.saturating_sub(2).max(1);
        let landing = match direction {
            Direction::Forward => home.saturating_sub(1),
            Direction::Backward => home + 1,
        };
        landing.clamp(1, inner_max)
    }

    /// Smallest odd copy count for which every position of the home copy is
    /// reachable. Each extra pair of copies adds two sets of scroll range and
    /// moves home one set further, so the shortfall shrinks by one set per pair.
    pub fn required_copies(&self) -> usize {
        if self.set_width <= 0.0 {
            return self.copies;
        }
        let needed = (self.home_copy() + 1) as f32 * self.set_width;
        if needed <= self.max_scroll {
            return self.copies;
        }
        let pairs = ((needed - self.max_scroll) / self.set_width).ceil() as usize;
        self.copies + 2 * pairs.max(1)
    }

    /// Loop-jump required by moving `direction` to `offset`, if any.
    pub fn boundary_jump(
        &self,
        offset: f32,
        direction: Direction,
        threshold: f32,
    ) -> Option<LoopJump> {
        if self.max_scroll <= 0.0 || self.set_width <= 0.0 {
            return None;
        }
        let crossed = match direction {
            Direction::Forward => offset >= self.forward_trigger(threshold),
            Direction::Backward => offset <= self.backward_trigger(threshold),
        };
        if !crossed {
            return None;
        }
        let landing = self.landing_copy(direction);
        let home = self.home_copy();
        let candidates: Vec<usize> = if landing <= home {
            (landing..=home).collect()
        } else {
            (home..=landing).rev().collect()
        };
        self.relocate(offset, direction, candidates)
    }

    /// Correction for an offset at rest inside an outermost copy.
    pub fn settle_jump(&self, offset: f32) -> Option<LoopJump> {
        if self.max_scroll <= 0.0 || self.set_width <= 0.0 {
            return None;
        }
        let copy = self.copy_of(offset);
        let direction = if copy == 0 {
            Direction::Backward
        } else if copy + 1 >= self.copies {
            Direction::Forward
        } else {
            return None;
        };
        // Home first, then the inner copies below it, which stay reachable
        // when the tail of the home copy is past the scroll end.
        let candidates = (1..=self.home_copy()).rev();
        self.relocate(offset, direction, candidates)
    }

    /// First candidate copy holding the same position within the scroll
    /// range. A jump relocates against the direction of travel; one shorter
    /// than half an item would be visible and cannot help.
    fn relocate(
        &self,
        offset: f32,
        direction: Direction,
        candidates: impl IntoIterator<Item = usize>,
    ) -> Option<LoopJump> {
        let from_copy = self.copy_of(offset);
        candidates
            .into_iter()
            .filter(|&copy| copy != from_copy)
            .map(|copy| self.equivalent_in_copy(offset, copy))
            .find(|&to| {
                let against_travel = match direction {
                    Direction::Forward => to < offset,
                    Direction::Backward => to > offset,
                };
                against_travel && to <= self.max_scroll && (to - offset).abs() >= self.pitch * 0.5
            })
            .map(|to| LoopJump { from: offset, to })
    }
}

impl<T: CarouselItem, S: ViewportSampler> InfiniteCarousel<T, S> {
    /// Report a scroll event from the surface.
    ///
    /// Self-caused offsets (while a loop-jump cooldown or a navigation is in
    /// flight) only update the last-known-offset bookkeeping.
    pub fn on_scroll(&mut self, offset: f32) {
        if self.state.phase.is_detached() || self.buffer.is_empty() {
            return;
        }
        if !offset.is_finite() {
            log::warn!("Ignoring non-finite scroll offset");
            return;
        }
        if self.state.phase.is_suppressed() {
            self.state.last_offset = offset;
            return;
        }
        // No movement since the last accepted offset: an echo, not activity.
        if (offset - self.state.last_offset).abs() < self.tuning.scroll_noise_px
            && self.state.pending_frame.is_none()
        {
            return;
        }

        self.request_frame(offset);
        if matches!(self.state.phase, CarouselPhase::Idle) {
            self.state.phase = CarouselPhase::Monitoring;
        }
        self.timers.cancel_slot(&mut self.state.settle_timer);
        let token = self.timers.schedule(
            TimerKind::ScrollSettle,
            self.now(),
            self.tuning.scroll_settle,
        );
        self.state.settle_timer = Some(token);
    }

    /// Coalesced per-frame evaluation of the latest offset.
    pub(crate) fn on_frame(&mut self) {
        let Some(offset) = self.state.pending_offset.take() else {
            return;
        };
        if self.state.phase.is_suppressed() {
            return;
        }
        let Some(metrics) = self.metrics() else {
            log::trace!("Deferring scroll evaluation: item geometry not measured");
            return;
        };

        self.refresh_active_index();

        let delta = offset - self.state.last_offset;
        let Some(direction) = Direction::from_delta(delta, self.tuning.scroll_noise_px) else {
            return;
        };
        self.state.last_offset = offset;

        log::trace!(
            "Frame: offset={offset:.1} copy={} pos={:.1} dir={direction:?}",
            metrics.copy_of(offset),
            metrics.position_in_set(offset)
        );

        if let Some(jump) = metrics.boundary_jump(
            offset,
            direction,
            self.tuning.loop_threshold_fraction,
        ) {
            self.jump_to(jump, JumpReason::Boundary);
        }
    }

    /// Recompute the active index when the set of visible items changed.
    pub(crate) fn refresh_active_index(&mut self) {
        let visible = self.surface.visible_items(&self.tuning.criteria);
        let signature = visibility_signature(&visible, &self.tuning.criteria);
        if signature == self.state.visibility_signature {
            return;
        }
        self.state.visibility_signature = signature;

        if let Some(logical) = leftmost_visible(&visible, &self.tuning.criteria)
            .and_then(|abs| self.buffer.logical_of(abs))
        {
            self.set_active_index(logical);
        }
    }

    pub(crate) fn on_jump_cooldown_elapsed(&mut self) {
        self.state.phase = CarouselPhase::Idle;
        let offset = self.surface.scroll_offset();
        self.state.last_offset = offset;
        // Catch up on anything that moved while suppressed.
        self.request_frame(offset);
    }

    pub(crate) fn on_scroll_settled(&mut self) {
        if !matches!(self.state.phase, CarouselPhase::Monitoring) {
            return;
        }
        self.state.phase = CarouselPhase::Idle;
        let offset = self.surface.scroll_offset();
        if let Some(jump) = self.metrics().and_then(|m| m.settle_jump(offset)) {
            self.jump_to(jump, JumpReason::Settle);
        }
    }
}
