//! Simple time-based tween animator for directed navigation

use std::time::{Duration, Instant};

use crate::infra::runtime_config::EasingKind;

#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    active: bool,
    start: f32,
    target: f32,
    started_at: Option<Instant>,
    duration: Duration,
    easing: EasingKind,
}

impl ScrollAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(
        &mut self,
        current: f32,
        target: f32,
        now: Instant,
        duration: Duration,
        easing: EasingKind,
    ) {
        self.active = true;
        self.start = current;
        self.target = target;
        self.started_at = Some(now);
        self.duration = duration;
        self.easing = easing;
    }

    /// Returns Some(next_offset) when animating, or None when finished/inactive
    pub fn sample(&mut self, now: Instant) -> Option<f32> {
        if !self.active {
            return None;
        }
        let started_at = self.started_at.unwrap_or(now);
        let elapsed = now.saturating_duration_since(started_at);
        if elapsed >= self.duration {
            self.active = false;
            return Some(self.target);
        }
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32())
            .clamp(0.0, 1.0);
        let te = self.easing.apply(t);
        Some(self.start + (self.target - self.start) * te)
    }

    /// Jump to the end of the animation and return the target.
    pub fn finish(&mut self) -> f32 {
        self.active = false;
        self.target
    }

    /// Cancel the current animation immediately.
    pub fn cancel(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_progress_toward_target() {
        let t0 = Instant::now();
        let mut anim = ScrollAnimator::new();
        anim.start(
            0.0,
            600.0,
            t0,
            Duration::from_millis(600),
            EasingKind::Linear,
        );

        let mid = anim.sample(t0 + Duration::from_millis(300)).unwrap();
        assert!((mid - 300.0).abs() < 1e-3);
        assert!(anim.is_active());

        assert_eq!(anim.sample(t0 + Duration::from_millis(600)), Some(600.0));
        assert!(!anim.is_active());
        assert_eq!(anim.sample(t0 + Duration::from_millis(700)), None);
    }

    #[test]
    fn zero_duration_completes_on_first_sample() {
        let t0 = Instant::now();
        let mut anim = ScrollAnimator::new();
        anim.start(10.0, 50.0, t0, Duration::ZERO, EasingKind::EaseInOut);
        assert_eq!(anim.sample(t0), Some(50.0));
        assert!(!anim.is_active());
    }

    #[test]
    fn cancel_stops_sampling() {
        let t0 = Instant::now();
        let mut anim = ScrollAnimator::new();
        anim.start(0.0, 100.0, t0, Duration::from_millis(200), EasingKind::EaseOut);
        anim.cancel();
        assert_eq!(anim.sample(t0 + Duration::from_millis(50)), None);
        assert_eq!(anim.finish(), 100.0);
    }
}
