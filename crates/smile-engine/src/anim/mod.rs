//! Sprite animation.
//!
//! `AnimationState` is the scripted four-phase path. `AnimationControl` is the
//! thread-safe handle through which start/stop requests reach the draw loop.

mod control;
mod state;

pub use control::{AnimationControl, Command};
pub use state::{AnimationState, Phase, INITIAL_OFFSET, STEP_X, STEP_Y};
