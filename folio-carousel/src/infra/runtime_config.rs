//! Runtime configuration for user-adjustable constants
//!
//! This module provides a RuntimeConfig struct with Option<T> fields that override
//! the default constants. Accessor methods fall back to constants when None.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigLoadError;
use crate::infra::constants::infinite_carousel::{buffer, layout, monitor, navigation, visibility};

/// Environment variable pointing at an explicit carousel config file.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CAROUSEL_CONFIG";

/// Easing function type for animations
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingKind {
    Linear = 0,
    EaseIn = 1,
    EaseOut = 2,
    #[default]
    EaseInOut = 3,
}

impl EasingKind {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Linear,
            1 => Self::EaseIn,
            2 => Self::EaseOut,
            3 => Self::EaseInOut,
            _ => Self::EaseInOut,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Map linear progress `t` in `[0, 1]` onto the eased curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }

    pub const ALL: [Self; 4] = [Self::Linear, Self::EaseIn, Self::EaseOut, Self::EaseInOut];
}

impl std::fmt::Display for EasingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::EaseIn => write!(f, "Ease In"),
            Self::EaseOut => write!(f, "Ease Out"),
            Self::EaseInOut => write!(f, "Ease In/Out"),
        }
    }
}

/// Runtime configuration with optional overrides for constants.
/// Fields are None by default, falling back to compiled constants.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    // ========== BUFFER ==========
    /// Repeated copies of the logical sequence
    pub buffer_copies: Option<usize>,

    // ========== LAYOUT ==========
    /// Gap between adjacent items (px)
    pub item_gap: Option<f32>,

    // ========== MONITOR ==========
    /// Fraction into an outermost copy that triggers a loop-jump
    pub loop_threshold_fraction: Option<f32>,
    /// Suppression window after a loop-jump (ms)
    pub jump_cooldown_ms: Option<u64>,
    /// Frame cadence for scroll evaluation (ms)
    pub frame_interval_ms: Option<u64>,
    /// Quiet period before a scroll counts as settled (ms)
    pub scroll_settle_ms: Option<u64>,
    /// Deltas below this are ignored as noise (px)
    pub scroll_noise_px: Option<f32>,

    // ========== NAVIGATION ==========
    /// Animated scroll duration for click navigation (ms)
    pub navigation_duration_ms: Option<u64>,
    /// Easing for click navigation
    pub navigation_easing: Option<EasingKind>,
    /// Retry delay for the initial placement (ms)
    pub initial_placement_delay_ms: Option<u64>,

    // ========== VISIBILITY ==========
    /// Ratios at which visibility changes are observed
    pub visibility_thresholds: Option<Vec<f32>>,
    /// Minimum visible ratio for an item to count as visible
    pub min_visible_ratio: Option<f32>,
}

impl RuntimeConfig {
    /// Number of copies in the buffered sequence, normalized to an odd value >= 3.
    pub fn buffer_copies(&self) -> usize {
        let requested = self.buffer_copies.unwrap_or(buffer::COPIES);
        let mut copies = requested.max(buffer::MIN_COPIES);
        if copies % 2 == 0 {
            copies += 1;
        }
        if copies != requested {
            log::warn!(
                "buffer_copies={} is not an odd value >= {}; using {}",
                requested,
                buffer::MIN_COPIES,
                copies
            );
        }
        copies
    }

    pub fn item_gap(&self) -> f32 {
        self.item_gap.unwrap_or(layout::ITEM_GAP).max(0.0)
    }

    pub fn loop_threshold_fraction(&self) -> f32 {
        self.loop_threshold_fraction
            .unwrap_or(monitor::LOOP_THRESHOLD_FRACTION)
            .clamp(0.0, 1.0)
    }

    pub fn jump_cooldown(&self) -> Duration {
        Duration::from_millis(
            self.jump_cooldown_ms.unwrap_or(monitor::JUMP_COOLDOWN_MS),
        )
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(
            self.frame_interval_ms
                .unwrap_or(monitor::FRAME_INTERVAL_MS)
                .max(1),
        )
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(
            self.scroll_settle_ms.unwrap_or(monitor::SCROLL_SETTLE_MS),
        )
    }

    pub fn scroll_noise_px(&self) -> f32 {
        self.scroll_noise_px
            .unwrap_or(monitor::SCROLL_NOISE_PX)
            .max(0.0)
    }

    pub fn navigation_duration(&self) -> Duration {
        Duration::from_millis(
            self.navigation_duration_ms
                .unwrap_or(navigation::DURATION_MS),
        )
    }

    pub fn navigation_easing(&self) -> EasingKind {
        self.navigation_easing
            .unwrap_or_else(|| EasingKind::from_u8(navigation::EASING_KIND))
    }

    pub fn initial_placement_delay(&self) -> Duration {
        Duration::from_millis(
            self.initial_placement_delay_ms
                .unwrap_or(navigation::INITIAL_PLACEMENT_DELAY_MS),
        )
    }

    pub fn visibility_thresholds(&self) -> Vec<f32> {
        let mut thresholds = self
            .visibility_thresholds
            .clone()
            .unwrap_or_else(|| visibility::THRESHOLDS.to_vec());
        thresholds.retain(|t| t.is_finite());
        thresholds.sort_by(f32::total_cmp);
        thresholds.dedup();
        thresholds
    }

    pub fn min_visible_ratio(&self) -> f32 {
        self.min_visible_ratio
            .unwrap_or(visibility::MIN_RATIO)
            .clamp(0.0, 1.0)
    }

    /// Reject values that cannot describe a working carousel.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if let Some(copies) = self.buffer_copies
            && (copies < buffer::MIN_COPIES || copies % 2 == 0)
        {
            return Err(ConfigLoadError::Invalid {
                field: "buffer_copies",
                reason: format!(
                    "expected an odd number >= {}, got {copies}",
                    buffer::MIN_COPIES
                ),
            });
        }
        if let Some(gap) = self.item_gap
            && !(gap.is_finite() && gap >= 0.0)
        {
            return Err(ConfigLoadError::Invalid {
                field: "item_gap",
                reason: format!("expected a non-negative length, got {gap}"),
            });
        }
        if let Some(fraction) = self.loop_threshold_fraction
            && !(fraction > 0.0 && fraction < 1.0)
        {
            return Err(ConfigLoadError::Invalid {
                field: "loop_threshold_fraction",
                reason: format!("expected a value in (0, 1), got {fraction}"),
            });
        }
        if self.frame_interval_ms == Some(0) {
            return Err(ConfigLoadError::Invalid {
                field: "frame_interval_ms",
                reason: "frame interval must be at least 1 ms".to_string(),
            });
        }
        if let Some(thresholds) = &self.visibility_thresholds
            && let Some(bad) =
                thresholds.iter().find(|t| !(0.0..=1.0).contains(*t))
        {
            return Err(ConfigLoadError::Invalid {
                field: "visibility_thresholds",
                reason: format!("threshold {bad} is outside [0, 1]"),
            });
        }
        if let Some(ratio) = self.min_visible_ratio
            && !(0.0..=1.0).contains(&ratio)
        {
            return Err(ConfigLoadError::Invalid {
                field: "min_visible_ratio",
                reason: format!("expected a ratio in [0, 1], got {ratio}"),
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigLoadError> {
        let config: Self =
            toml::from_str(content).map_err(|source| ConfigLoadError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Default location: `<config_dir>/folio/carousel.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folio").join("carousel.toml"))
    }

    /// Load from `$FOLIO_CAROUSEL_CONFIG`, then the default location, and fall
    /// back to compiled defaults when neither yields a usable file.
    pub fn load() -> Self {
        let path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(explicit) => Some(PathBuf::from(explicit)),
            None => Self::default_path().filter(|p| p.exists()),
        };

        let Some(path) = path else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => {
                log::debug!("Loaded carousel config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{err}; falling back to default carousel tuning");
                Self::default()
            }
        }
    }
}
