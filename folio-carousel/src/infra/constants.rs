//! Constants module for centralized configuration values
//!
//! Every value here is a default; [`RuntimeConfig`](super::runtime_config::RuntimeConfig)
//! overrides any of them per carousel instance. Tuning should happen here so
//! all carousels update consistently.

/// Infinite carousel defaults.
pub mod infinite_carousel {
    /// Buffered sequence construction.
    pub mod buffer {
        /// Number of repeated copies of the logical sequence (odd, >= 3).
        pub const COPIES: usize = 5;
        /// Smallest copy count that still leaves one inner copy on each side of home.
        pub const MIN_COPIES: usize = 3;
        /// Ceiling when widening the buffer for a wide viewport (odd).
        pub const MAX_COPIES: usize = 41;
    }

    /// Scroll-position monitoring and loop-jump policy.
    pub mod monitor {
        /// Fraction of a set the user must travel into an outermost copy
        /// before a loop-jump relocates the view.
        pub const LOOP_THRESHOLD_FRACTION: f32 = 0.3;
        /// Suppression window after a loop-jump (ms).
        pub const JUMP_COOLDOWN_MS: u64 = 50;
        /// Frame cadence used to coalesce bursts of scroll events (~60 FPS).
        pub const FRAME_INTERVAL_MS: u64 = 16;
        /// Time without organic scroll events before the strip counts as settled (ms).
        pub const SCROLL_SETTLE_MS: u64 = 150;
        /// Offset deltas smaller than this are treated as noise (px).
        pub const SCROLL_NOISE_PX: f32 = 1.0;
        /// Slack when comparing an offset against the hard scroll end (px).
        pub const EDGE_EPSILON_PX: f32 = 0.5;
    }

    /// Directed navigation (click to reposition).
    pub mod navigation {
        /// Animated scroll duration; suppression is held for exactly this long.
        pub const DURATION_MS: u64 = 600;
        /// Easing kind: 0=Linear, 1=EaseIn, 2=EaseOut, 3=EaseInOut.
        pub const EASING_KIND: u8 = 3;
        /// Delay before retrying the initial placement when geometry is not ready (ms).
        pub const INITIAL_PLACEMENT_DELAY_MS: u64 = 100;
    }

    /// Visibility sampling used to pick the active item.
    pub mod visibility {
        /// Ratios at which an item's visibility counts as changed.
        pub const THRESHOLDS: [f32; 4] = [0.3, 0.5, 0.7, 1.0];
        /// Minimum visible ratio (exclusive) for an item to be considered visible.
        pub const MIN_RATIO: f32 = 0.3;
    }

    /// Layout constants for the strip.
    pub mod layout {
        /// Gap between adjacent items (px). Matches a `gap-6` flex row.
        pub const ITEM_GAP: f32 = 24.0;
    }
}
