//! Infinite carousel engine
//!
//! The logical item list is repeated into a buffered sequence of several
//! identical copies. The view starts on the middle (home) copy; whenever
//! organic scrolling drifts into an outermost copy the monitor moves the
//! offset by a whole number of copies, which is visually indistinguishable.
//! Clicking an item animates its instance to the leading edge.
//!
//! Layout
//! - `buffer`: copy construction and index arithmetic
//! - `monitor`: scroll coalescing, active index tracking and loop-jumps
//! - `navigation`: directed animated scrolling
//! - `engine`: the per-instance state record, timers and dispatch

mod animator;
mod buffer;
mod engine;
mod messages;
mod monitor;
mod navigation;
mod sampler;
mod types;

pub use animator::ScrollAnimator;
pub use buffer::{BufferSlot, BufferedSequence};
pub use engine::{ActiveIndexListener, InfiniteCarousel, RenderedItem};
pub use messages::{CarouselEvent, JumpReason};
pub use monitor::{LoopJump, ScrollMetrics};
pub use sampler::{
    ViewportSampler, VisibilityCriteria, VisibleItem, leftmost_visible,
    visibility_signature,
};
pub use types::{
    BufferKey, CarouselItem, CarouselPhase, CarouselTuning, Direction,
    ItemGeometry,
};
