use super::capability::MIN_API_LEVEL;

/// How the GPU layer sets itself up for a window.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when the surface offers one.
    pub prefer_srgb: bool,

    /// `Fifo` paces the continuous redraw loop to the display.
    pub present_mode: wgpu::PresentMode,

    /// Falls back to the first supported mode when `None` or unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Depth attachment format; `None` disables depth testing.
    pub depth_format: Option<wgpu::TextureFormat>,

    /// Adapters below this level are rejected; see [`api_level`](super::api_level).
    pub min_api_level: u32,

    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Hint only; backends may ignore it.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            depth_format: Some(wgpu::TextureFormat::Depth32Float),
            min_api_level: MIN_API_LEVEL,
            required_features: wgpu::Features::empty(),
            // The quad pipeline fits inside the smallest limit set.
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_depth_and_gate() {
        let init = GpuInit::default();
        assert_eq!(init.depth_format, Some(wgpu::TextureFormat::Depth32Float));
        assert_eq!(init.min_api_level, 2);
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
    }

    #[test]
    fn default_limits_allow_two_bind_groups_and_dynamic_uniforms() {
        let limits = GpuInit::default().required_limits;
        assert!(limits.max_bind_groups >= 2);
        assert!(limits.max_dynamic_uniform_buffers_per_pipeline_layout >= 1);
        assert!(limits.min_uniform_buffer_offset_alignment <= 256);
    }
}
