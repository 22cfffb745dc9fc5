//! Folio carousel library
//!
//! Headless engine behind the portfolio's Projects strip: an infinitely
//! looping, horizontally scrolling carousel that supports free scrolling and
//! click-to-reposition navigation. Rendering surfaces plug in through the
//! [`carousel::ViewportSampler`] trait; [`sim::UniformStrip`] provides a
//! headless surface for tests and simulations.
//!
//! Notes
//! - The engine is single-threaded and cooperative. Every handler runs to
//!   completion and time only moves when [`carousel::InfiniteCarousel::poll`]
//!   is called against its [`infra::time::Clock`].
//! - Tuning lives in [`infra::runtime_config::RuntimeConfig`], falling back to
//!   [`infra::constants`].

pub mod carousel;
pub mod error;
pub mod infra;
pub mod sim;

pub use carousel::{
    CarouselEvent, CarouselItem, CarouselPhase, InfiniteCarousel,
    ViewportSampler,
};
pub use error::ConfigLoadError;
pub use infra::runtime_config::{EasingKind, RuntimeConfig};
