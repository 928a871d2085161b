use std::sync::Arc;

use anyhow::{Context, Result};

use crate::anim::{AnimationControl, AnimationState, Command};
use crate::assets::AssetSource;
use crate::core::{AppControl, FrameCtx, SurfaceRenderer};
use crate::error::RenderError;
use crate::render::{Quad, QuadPipeline, RenderCtx};

use super::lifecycle::Lifecycle;
use super::state::SceneState;

/// Renderer configuration.
#[derive(Debug, Copy, Clone)]
pub struct SceneConfig {
    pub clear_color: wgpu::Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color::BLACK,
        }
    }
}

/// Draws the background and the animated sprite.
///
/// One instance lives as long as the host. Surfaces come and go underneath it:
/// GPU objects are rebuilt on every `on_surface_created`, while animation progress
/// and the bound asset host are kept.
pub struct SceneRenderer {
    config: SceneConfig,
    host: Option<Arc<dyn AssetSource>>,
    state: SceneState,
    pipeline: Option<QuadPipeline>,
}

impl SceneRenderer {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            host: None,
            state: SceneState::new(),
            pipeline: None,
        }
    }

    /// Replaces the asset host. GPU and animation state are left alone; the new host
    /// is read on the next surface creation.
    pub fn bind(&mut self, host: Arc<dyn AssetSource>) {
        if self.host.is_some() {
            log::debug!("rebinding asset host");
        }
        self.host = Some(host);
    }

    pub fn is_bound(&self) -> bool {
        self.host.is_some()
    }

    /// Cloneable handle for issuing start/stop from any thread.
    pub fn control(&self) -> AnimationControl {
        self.state.control().clone()
    }

    /// Queues a start; applied on the next drawn frame.
    pub fn start(&self) {
        self.state.control().start();
    }

    /// Queues a stop; applied on the next drawn frame.
    pub fn stop(&self) {
        self.state.control().stop();
    }

    pub fn animation(&self) -> &AnimationState {
        self.state.animation()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle()
    }

    /// Releases the host and GPU objects. Terminal.
    pub fn destroy(&mut self) {
        if self.state.lifecycle().is_destroyed() {
            return;
        }
        self.host = None;
        self.pipeline = None;
        self.state.destroy();
        log::info!("renderer destroyed");
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl SurfaceRenderer for SceneRenderer {
    fn on_surface_created(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if self.state.lifecycle().is_destroyed() {
            return Err(RenderError::Destroyed.into());
        }
        let host = self.host.as_deref().ok_or(RenderError::HostNotBound)?;

        let pipeline = QuadPipeline::new(ctx, host).context("failed to build quad pipeline")?;
        self.pipeline = Some(pipeline);
        self.state.surface_created()?;

        log::info!("surface created ({}x{})", ctx.surface_size.0, ctx.surface_size.1);
        Ok(())
    }

    fn on_surface_changed(&mut self, ctx: &RenderCtx<'_>, width: u32, height: u32) {
        let Some(background) = self.state.surface_changed(width, height) else {
            return;
        };
        if let Some(pipeline) = &self.pipeline {
            pipeline.upload_transform(ctx.queue, Quad::Background, background);
        }
        log::info!("surface changed to {width}x{height}");
    }

    fn on_draw_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(pipeline) = self.pipeline.as_ref() else {
            log::debug!("draw skipped: no pipeline");
            return AppControl::Continue;
        };
        let Some(frame) = self.state.next_frame() else {
            log::debug!("draw skipped in {:?}", self.state.lifecycle());
            return AppControl::Continue;
        };

        match frame.command {
            Some(Command::Start) => log::info!("animation started"),
            Some(Command::Stop) => log::info!("animation stopped"),
            None => {}
        }
        if let Some(phase) = frame.transition {
            log::debug!("sprite entered {phase:?} (phase {})", phase.index());
        }

        let clear = self.config.clear_color;
        ctx.render(|rctx, target| {
            pipeline.upload_transform(rctx.queue, Quad::Background, frame.background);
            pipeline.upload_transform(rctx.queue, Quad::Sprite, frame.sprite);
            pipeline.draw(target, frame.viewport, clear);
        })
    }

    fn on_pause(&mut self) {
        // The device goes away with the surface.
        self.pipeline = None;
        log::info!("surface released");
    }

    fn on_destroy(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::EmbeddedAssets;

    #[test]
    fn starts_unbound_and_uninitialized() {
        let r = SceneRenderer::default();
        assert!(!r.is_bound());
        assert_eq!(r.lifecycle(), Lifecycle::Uninitialized);
        assert!(r.animation().stopped);
    }

    #[test]
    fn rebind_keeps_animation() {
        let mut r = SceneRenderer::default();
        r.bind(Arc::new(EmbeddedAssets));
        let before = *r.animation();
        r.bind(Arc::new(EmbeddedAssets));
        assert!(r.is_bound());
        assert_eq!(*r.animation(), before);
    }

    #[test]
    fn start_and_stop_share_one_slot() {
        let r = SceneRenderer::default();
        let control = r.control();
        r.start();
        r.stop();
        assert_eq!(control.take(), Some(Command::Stop));
        assert_eq!(control.take(), None);
    }

    #[test]
    fn destroy_releases_host() {
        let mut r = SceneRenderer::default();
        r.bind(Arc::new(EmbeddedAssets));
        r.destroy();
        assert!(!r.is_bound());
        assert!(r.lifecycle().is_destroyed());
        r.destroy();
        assert!(r.lifecycle().is_destroyed());
    }

    #[test]
    fn default_clear_color_is_opaque_black() {
        let c = SceneConfig::default().clear_color;
        assert_eq!((c.r, c.g, c.b, c.a), (0.0, 0.0, 0.0, 1.0));
    }
}
