//! Directed navigation controller
//!
//! Brings a clicked instance to the leading edge with an animated scroll. The
//! active index is updated optimistically, and the monitor stays suppressed
//! until the animation's full duration has elapsed. A new click while an
//! animation is in flight retargets it (last click wins).

use crate::infra::timers::TimerKind;

use super::engine::InfiniteCarousel;
use super::messages::{CarouselEvent, JumpReason};
use super::monitor::ScrollMetrics;
use super::sampler::ViewportSampler;
use super::types::{CarouselItem, CarouselPhase, ItemGeometry};

impl<T: CarouselItem, S: ViewportSampler> InfiniteCarousel<T, S> {
    /// Bring the instance at `clicked_absolute` (logical `logical_index`) to
    /// the leading edge. Falls back to the home-copy instance when the clicked
    /// instance cannot be located. Out-of-range indices are ignored.
    pub fn navigate_to(&mut self, clicked_absolute: usize, logical_index: usize) {
        if self.state.phase.is_detached() {
            return;
        }
        if logical_index >= self.buffer.logical_len() {
            log::debug!(
                "Ignoring navigation to {logical_index}: carousel has {} items",
                self.buffer.logical_len()
            );
            return;
        }

        self.set_active_index(logical_index);

        let Some((absolute, geometry)) =
            self.resolve_instance(clicked_absolute, logical_index)
        else {
            log::debug!(
                "Navigation to {logical_index} skipped: no rendered instance measured yet"
            );
            return;
        };

        self.cancel_pending_work();
        self.state.placement_pending = false;
        self.timers.cancel_slot(&mut self.state.placement_timer);

        let mut from = self.surface.scroll_offset();
        let mut target = geometry.left;
        if let Some(metrics) = self.metrics() {
            (from, target) = self.rebase_for_target(metrics, absolute, from, target);
        }
        let target = target.clamp(0.0, self.surface.max_scroll_offset().max(0.0));

        let now = self.now();
        self.animator.start(
            from,
            target,
            now,
            self.tuning.navigation_duration,
            self.tuning.navigation_easing,
        );
        let settle = self.timers.schedule(
            TimerKind::NavigationSettle,
            now,
            self.tuning.navigation_duration,
        );
        let frame = self.timers.schedule(
            TimerKind::AnimationFrame,
            now,
            self.tuning.frame_interval,
        );
        self.state.animation_frame = Some(frame);
        self.state.last_offset = from;
        self.state.visibility_signature.clear();
        self.state.phase = CarouselPhase::Navigating {
            logical_index,
            target_offset: target,
            settle,
        };

        log::debug!(
            "Navigating to item {logical_index} (instance {absolute}): {from:.1} -> {target:.1}"
        );
        self.emit(CarouselEvent::NavigationStarted {
            logical_index,
            absolute_index: absolute,
            from,
            to: target,
        });
    }

    /// Navigate to the instance of `logical_index` closest to the leading edge.
    pub fn scroll_to_logical_index(&mut self, logical_index: usize) {
        if logical_index >= self.buffer.logical_len() {
            log::debug!("Ignoring scroll to out-of-range item {logical_index}");
            return;
        }
        let offset = self.surface.scroll_offset();
        let absolute = self
            .nearest_instance(logical_index, offset)
            .or_else(|| self.buffer.home_absolute(logical_index));
        if let Some(absolute) = absolute {
            self.navigate_to(absolute, logical_index);
        }
    }

    /// Re-align the active item's instance with the leading edge.
    pub fn snap_to_active(&mut self) {
        let Some(active) = self.active_index() else {
            return;
        };
        let offset = self.surface.scroll_offset();
        let absolute = self
            .surface
            .visible_items(&self.tuning.criteria)
            .into_iter()
            .filter(|item| self.buffer.logical_of(item.absolute_index) == Some(active))
            .min_by(|a, b| a.left.total_cmp(&b.left))
            .map(|item| item.absolute_index)
            .or_else(|| self.nearest_instance(active, offset));
        if let Some(absolute) = absolute {
            self.navigate_to(absolute, active);
        }
    }

    pub(crate) fn on_animation_frame(&mut self) {
        if !matches!(self.state.phase, CarouselPhase::Navigating { .. }) {
            return;
        }
        let now = self.now();
        if let Some(offset) = self.animator.sample(now) {
            self.surface.set_scroll_offset(offset);
            self.state.last_offset = offset;
        }
        if self.animator.is_active() {
            let token = self.timers.schedule(
                TimerKind::AnimationFrame,
                now,
                self.tuning.frame_interval,
            );
            self.state.animation_frame = Some(token);
        }
    }

    pub(crate) fn on_navigation_settled(&mut self) {
        let CarouselPhase::Navigating { logical_index, .. } = self.state.phase else {
            return;
        };
        self.timers.cancel_slot(&mut self.state.animation_frame);
        let target = self.animator.finish();
        self.surface.set_scroll_offset(target);
        let offset = self.surface.scroll_offset();
        self.state.last_offset = offset;
        self.state.phase = CarouselPhase::Idle;

        log::debug!("Navigation to item {logical_index} settled at {offset:.1}");
        self.emit(CarouselEvent::NavigationSettled {
            logical_index,
            offset,
        });

        if let Some(jump) = self.metrics().and_then(|m| m.settle_jump(offset)) {
            self.jump_to(jump, JumpReason::Settle);
        } else {
            self.request_frame(offset);
        }
    }

    /// The clicked instance when it is laid out and matches `logical_index`,
    /// otherwise the home-copy instance.
    fn resolve_instance(
        &self,
        clicked_absolute: usize,
        logical_index: usize,
    ) -> Option<(usize, ItemGeometry)> {
        if self.buffer.logical_of(clicked_absolute) == Some(logical_index)
            && let Some(geometry) = self.surface.measure(clicked_absolute)
        {
            return Some((clicked_absolute, geometry));
        }
        let home = self.buffer.home_absolute(logical_index)?;
        log::debug!(
            "Instance {clicked_absolute} unavailable; falling back to home instance {home}"
        );
        self.surface.measure(home).map(|geometry| (home, geometry))
    }

    /// Shift the view by whole sets toward home when the target instance sits
    /// in an outermost copy or past the scroll end. The shift is invisible and
    /// keeps the direction of travel intact.
    fn rebase_for_target(
        &mut self,
        metrics: ScrollMetrics,
        absolute: usize,
        from: f32,
        target: f32,
    ) -> (f32, f32) {
        let Some(copy) = self.buffer.copy_of(absolute) else {
            return (from, target);
        };
        if !self.buffer.is_outermost_copy(copy) && target <= metrics.max_scroll {
            return (from, target);
        }
        let sets = metrics.home_copy() as f32 - copy as f32;
        let shift = sets * metrics.set_width;
        let rebased = (from + shift).clamp(0.0, metrics.max_scroll);
        if (rebased - from).abs() >= f32::EPSILON {
            self.surface.set_scroll_offset(rebased);
            self.emit(CarouselEvent::LoopJumped {
                from,
                to: rebased,
                reason: JumpReason::NavigationRebase,
            });
        }
        (rebased, target + shift)
    }

    /// Instance of `logical_index` whose left edge is closest to `offset`.
    fn nearest_instance(&self, logical_index: usize, offset: f32) -> Option<usize> {
        let metrics = self.metrics()?;
        let copy = metrics.copy_of(offset);
        let candidates = [copy.checked_sub(1), Some(copy), Some(copy + 1)];
        candidates
            .into_iter()
            .flatten()
            .filter_map(|c| self.buffer.instance_in_copy(logical_index, c))
            .filter_map(|abs| self.surface.measure(abs).map(|g| (abs, g)))
            .min_by(|(_, a), (_, b)| {
                (a.left - offset).abs().total_cmp(&(b.left - offset).abs())
            })
            .map(|(abs, _)| abs)
    }
}
