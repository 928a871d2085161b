use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{AppControl, FrameCtx, SurfaceRenderer, WindowCtx};
use crate::device::{Gpu, GpuInit};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "smile".to_string(),
            initial_size: LogicalSize::new(480.0, 600.0),
        }
    }
}

/// Runtime context passed to renderer callbacks.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    fn exit_requested(&self) -> bool {
        self.commands.iter().any(|c| matches!(c, Command::Exit))
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    SetTitle(String),
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `renderer` until the window closes.
    ///
    /// Errors raised while bringing up the surface (GPU init, capability gate,
    /// `on_surface_created`) stop the loop and are returned here.
    pub fn run<R>(config: RuntimeConfig, gpu_init: GpuInit, renderer: R) -> Result<()>
    where
        R: SurfaceRenderer + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState::new(config, gpu_init, renderer);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<R>
where
    R: SurfaceRenderer + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    renderer: R,

    entry: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
    exit_requested: bool,
    destroyed: bool,
}

impl<R> RuntimeState<R>
where
    R: SurfaceRenderer + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, renderer: R) -> Self {
        Self {
            config,
            gpu_init,
            renderer,
            entry: None,
            fatal: None,
            exit_requested: false,
            destroyed: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal.get_or_insert(err);
        self.request_exit(event_loop);
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.renderer.on_destroy();
        }
        self.entry = None;
    }

    /// Creates the window and its GPU context, then runs the created/changed pair.
    fn create_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let renderer = &mut self.renderer;
        entry.with_gpu(|gpu| -> Result<()> {
            let ctx = gpu.render_ctx();
            renderer.on_surface_created(&ctx)?;
            let size = gpu.size();
            renderer.on_surface_changed(&ctx, size.width, size.height);
            Ok(())
        })?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        Ok(())
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let (renderer, Some(entry)) = (&mut self.renderer, self.entry.as_mut()) else {
            return;
        };

        entry.with_gpu_mut(|gpu| gpu.resize(new_size));
        entry.with_gpu(|gpu| {
            renderer.on_surface_changed(&gpu.render_ctx(), new_size.width, new_size.height);
        });
        entry.with_window(|w| w.request_redraw());
    }

    fn draw(&mut self, window_id: WindowId, runtime_ctx: &mut RuntimeCtx) -> AppControl {
        let (renderer, Some(entry)) = (&mut self.renderer, self.entry.as_mut()) else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: window_id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                runtime: runtime_ctx,
            };
            renderer.on_draw_frame(&mut ctx)
        })
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, ctx: RuntimeCtx) {
        for cmd in ctx.commands {
            match cmd {
                Command::SetTitle(title) => {
                    if let Some(entry) = &self.entry {
                        entry.with_window(|w| w.set_title(&title));
                    }
                }
                Command::Exit => self.request_exit(event_loop),
            }
        }
    }
}

impl<R> ApplicationHandler for RuntimeState<R>
where
    R: SurfaceRenderer + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(err) = self.create_entry(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if self.entry.take().is_some() {
            self.renderer.on_pause();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; presentation is paced by the surface's present mode.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let mut runtime_ctx = RuntimeCtx::default();
        if self.renderer.on_window_event(&event, &mut runtime_ctx) == AppControl::Exit {
            runtime_ctx.exit();
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.destroy();
                runtime_ctx.exit();
            }

            WindowEvent::Resized(new_size) => self.resize(*new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size())) {
                    self.resize(size);
                }
            }

            WindowEvent::RedrawRequested if !runtime_ctx.exit_requested() => {
                if self.draw(window_id, &mut runtime_ctx) == AppControl::Exit {
                    runtime_ctx.exit();
                }
            }

            _ => {}
        }

        self.apply_commands(event_loop, runtime_ctx);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_buffered_in_order() {
        let mut ctx = RuntimeCtx::default();
        ctx.set_title("running");
        ctx.exit();
        assert_eq!(
            ctx.commands,
            vec![Command::SetTitle("running".into()), Command::Exit]
        );
        assert!(ctx.exit_requested());
    }

    #[test]
    fn fresh_ctx_requests_nothing() {
        assert!(!RuntimeCtx::default().exit_requested());
    }

    #[test]
    fn default_window_is_four_by_five() {
        let size = RuntimeConfig::default().initial_size;
        assert_eq!(size.width * 5.0, size.height * 4.0);
    }
}
