//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys, pointer, touch → jump intent)
//! - Frame scheduling (requestAnimationFrame on web, manual stepping natively)

pub mod input;
pub mod scheduler;

pub use input::{InputEvent, Intent, map_input};
pub use scheduler::{FrameHandle, FrameHost, FrameLoop, LoopState, ManualHost};
