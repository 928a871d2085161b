//! Contract between the runtime and the renderer it drives.
//!
//! The runtime owns the window and GPU; renderers only see these callbacks and
//! the per-frame context.

mod app;
mod ctx;

pub use app::{AppControl, SurfaceRenderer};
pub use ctx::{FrameCtx, WindowCtx};
