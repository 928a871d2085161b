use anyhow::Result;
use winit::event::WindowEvent;

use crate::render::RenderCtx;
use crate::window::RuntimeCtx;

use super::ctx::FrameCtx;

/// Control directive returned by renderer callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Surface callback contract driven by the runtime.
///
/// Callbacks arrive on the event-loop thread, strictly serialized:
/// `on_surface_created` once per surface, then `on_surface_changed` at least once,
/// then `on_draw_frame` repeatedly. A suspended surface is dropped and a resumed one
/// starts the sequence again on the same renderer.
pub trait SurfaceRenderer {
    /// A new drawable surface exists. Errors abort the runtime.
    fn on_surface_created(&mut self, ctx: &RenderCtx<'_>) -> Result<()>;

    /// The drawable area changed to `width × height` physical pixels.
    fn on_surface_changed(&mut self, ctx: &RenderCtx<'_>, width: u32, height: u32);

    /// Called once per frame while the surface is active.
    fn on_draw_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent, runtime: &mut RuntimeCtx) -> AppControl {
        let _ = (event, runtime);
        AppControl::Continue
    }

    /// The surface was released; no draws arrive until it is recreated.
    fn on_pause(&mut self) {}

    /// The runtime is shutting down.
    fn on_destroy(&mut self) {}
}
