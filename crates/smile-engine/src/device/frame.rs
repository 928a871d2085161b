use crate::render::RenderTarget;

/// One acquired swapchain image plus the encoder recording into it.
///
/// Hand it back to [`Gpu::submit`](super::Gpu::submit) promptly; while it is alive
/// the next image cannot be acquired.
pub struct GpuFrame {
    pub(crate) surface_texture: wgpu::SurfaceTexture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Drawing target over this frame's color view and the given depth view.
    pub fn target<'a>(&'a mut self, depth_view: Option<&'a wgpu::TextureView>) -> RenderTarget<'a> {
        RenderTarget::new(&mut self.encoder, &self.view, depth_view)
    }
}
