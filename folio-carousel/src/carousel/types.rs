//! Shared types for the infinite carousel module

use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use crate::infra::runtime_config::{EasingKind, RuntimeConfig};
use crate::infra::timers::TimerToken;

use super::sampler::VisibilityCriteria;

/// An item shown in the carousel. The engine only cares about identity; the
/// content is handed back untouched to the caller's renderer.
pub trait CarouselItem {
    type Id: Clone + Eq + Hash + fmt::Debug;

    fn id(&self) -> Self::Id;
}

/// Composite key for one buffered instance. The same logical item appears once
/// per copy, so the absolute index disambiguates the copies for reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BufferKey<Id> {
    pub id: Id,
    pub absolute_index: usize,
}

impl<Id: fmt::Display> fmt::Display for BufferKey<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id, self.absolute_index)
    }
}

/// On-screen geometry of one rendered instance, in strip coordinates
/// (distance from the start of the buffered sequence).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemGeometry {
    pub left: f32,
    pub width: f32,
}

/// Direction of travel along the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Sign of `delta`, or `None` when the movement is below the noise floor.
    pub fn from_delta(delta: f32, noise: f32) -> Option<Self> {
        if !delta.is_finite() || delta.abs() < noise.max(f32::EPSILON) {
            None
        } else if delta > 0.0 {
            Some(Self::Forward)
        } else {
            Some(Self::Backward)
        }
    }
}

/// Per-instance interaction state.
///
/// The suppression flag is derived from the phase: offset changes observed
/// while `Jumping` or `Navigating` are self-caused and never treated as user
/// activity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CarouselPhase {
    #[default]
    Idle,
    /// Organic scrolling observed; the active index updates live.
    Monitoring,
    /// An instant offset correction happened; suppression lasts until the
    /// cooldown timer fires.
    Jumping { cooldown: TimerToken },
    /// Animated scroll toward a clicked instance.
    Navigating {
        logical_index: usize,
        target_offset: f32,
        settle: TimerToken,
    },
    /// Host view unmounted; all input is ignored.
    Detached,
}

impl CarouselPhase {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Jumping { .. } | Self::Navigating { .. })
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, Self::Detached)
    }
}

/// Resolved tuning for one carousel instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselTuning {
    pub copies: usize,
    pub item_gap: f32,
    pub loop_threshold_fraction: f32,
    pub jump_cooldown: Duration,
    pub frame_interval: Duration,
    pub scroll_settle: Duration,
    pub scroll_noise_px: f32,
    pub navigation_duration: Duration,
    pub navigation_easing: EasingKind,
    pub initial_placement_delay: Duration,
    pub criteria: VisibilityCriteria,
}

impl CarouselTuning {
    pub fn from_runtime_config(rc: &RuntimeConfig) -> Self {
        Self {
            copies: rc.buffer_copies(),
            item_gap: rc.item_gap(),
            loop_threshold_fraction: rc.loop_threshold_fraction(),
            jump_cooldown: rc.jump_cooldown(),
            frame_interval: rc.frame_interval(),
            scroll_settle: rc.scroll_settle(),
            scroll_noise_px: rc.scroll_noise_px(),
            navigation_duration: rc.navigation_duration(),
            navigation_easing: rc.navigation_easing(),
            initial_placement_delay: rc.initial_placement_delay(),
            criteria: VisibilityCriteria {
                thresholds: rc.visibility_thresholds(),
                min_ratio: rc.min_visible_ratio(),
            },
        }
    }
}

impl Default for CarouselTuning {
    fn default() -> Self {
        Self::from_runtime_config(&RuntimeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_ignores_sub_pixel_noise() {
        assert_eq!(Direction::from_delta(0.4, 1.0), None);
        assert_eq!(Direction::from_delta(-0.99, 1.0), None);
        assert_eq!(Direction::from_delta(1.0, 1.0), Some(Direction::Forward));
        assert_eq!(Direction::from_delta(-3.0, 1.0), Some(Direction::Backward));
        assert_eq!(Direction::from_delta(f32::NAN, 1.0), None);
    }

    #[test]
    fn buffer_key_displays_as_composite() {
        let key = BufferKey {
            id: "thribo",
            absolute_index: 7,
        };
        assert_eq!(key.to_string(), "thribo-7");
    }
}
