//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard and on-screen touch buttons)
//! - Frame timing (animation-frame scheduling and elapsed time)
//! - Victory video playback cues

pub mod driver;
pub mod input;
pub mod time;
pub mod video;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::{Driver, FrameScheduler, ManualScheduler};
pub use input::{InputCapture, KeyDir};
pub use time::FrameClock;
pub use video::{VideoCommand, VideoCue};
