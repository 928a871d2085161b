//! The two-quad scene: lifecycle, per-frame transforms and the renderer that
//! plugs them into the runtime.

mod lifecycle;
mod renderer;
mod state;

pub use lifecycle::Lifecycle;
pub use renderer::{SceneConfig, SceneRenderer};
pub use state::{FrameLayout, FrameTransforms, SceneState};
