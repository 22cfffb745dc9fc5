//! Infrastructure shared by the carousel domain: tuning constants, runtime
//! configuration, clocks and the timer queue.

pub mod constants;
pub mod runtime_config;
pub mod time;
pub mod timers;
