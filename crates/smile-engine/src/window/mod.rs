//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, wires them to the GPU layer
//! and forwards surface lifecycle to a [`SurfaceRenderer`](crate::core::SurfaceRenderer).

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
