use anyhow::Result;
use winit::event::WindowEvent;

use smile_engine::anim::{AnimationState, Phase};
use smile_engine::core::{AppControl, FrameCtx, SurfaceRenderer};
use smile_engine::render::RenderCtx;
use smile_engine::scene::SceneRenderer;
use smile_engine::window::RuntimeCtx;

use crate::controls::{self, Trigger};

pub const TITLE: &str = "smile";

/// Host side of the window: turns input into start/stop and forwards the
/// surface lifecycle to the scene renderer.
pub struct Shell {
    renderer: SceneRenderer,
    autostart: bool,
    /// Last title pushed to the window.
    title: String,
}

impl Shell {
    pub fn new(renderer: SceneRenderer, autostart: bool) -> Self {
        Self {
            renderer,
            autostart,
            title: TITLE.to_string(),
        }
    }

    /// Window title reflecting where the sprite is.
    fn title_for(state: &AnimationState) -> String {
        let status = if state.phase == Phase::Done {
            "done"
        } else if state.stopped {
            "stopped"
        } else {
            "running"
        };
        format!("{TITLE} [{status}]")
    }

    /// Returns the new title when it differs from the one shown.
    fn refresh_title(&mut self) -> Option<&str> {
        let next = Self::title_for(self.renderer.animation());
        if next == self.title {
            return None;
        }
        self.title = next;
        Some(&self.title)
    }
}

impl SurfaceRenderer for Shell {
    fn on_surface_created(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        self.renderer.on_surface_created(ctx)?;
        if std::mem::take(&mut self.autostart) {
            log::info!("autostart");
            self.renderer.start();
        }
        Ok(())
    }

    fn on_surface_changed(&mut self, ctx: &RenderCtx<'_>, width: u32, height: u32) {
        self.renderer.on_surface_changed(ctx, width, height);
    }

    fn on_draw_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let control = self.renderer.on_draw_frame(ctx);
        if let Some(title) = self.refresh_title() {
            ctx.runtime.set_title(title);
        }
        control
    }

    fn on_window_event(&mut self, event: &WindowEvent, _runtime: &mut RuntimeCtx) -> AppControl {
        let Some(trigger) = controls::trigger_for_event(event) else {
            return AppControl::Continue;
        };
        log::debug!("trigger {trigger:?}");

        match trigger {
            Trigger::Start => self.renderer.start(),
            Trigger::Stop => self.renderer.stop(),
            Trigger::Close => return AppControl::Exit,
        }
        AppControl::Continue
    }

    fn on_pause(&mut self) {
        self.renderer.on_pause();
    }

    fn on_destroy(&mut self) {
        self.renderer.on_destroy();
    }
}
