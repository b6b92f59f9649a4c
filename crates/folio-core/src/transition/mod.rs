//! Animated page turns
//!
//! - `easing` - easing curves applied to slide progress
//! - `timing` - progress and interpolation helpers
//! - `controller` - the transition state machine

pub mod controller;
pub mod easing;
pub mod timing;

pub use controller::{infer_direction, AnimationSession, Direction, FrameStatus, TransitionController};
pub use easing::{EasingType, EasingTypeExt};
