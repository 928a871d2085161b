use crate::error::RenderError;

/// Lowest API level the textured-quad pipeline runs on.
pub const MIN_API_LEVEL: u32 = 2;

/// Maps an adapter's downlevel shader model to a major API level.
///
/// `Sm2` corresponds to GLES 2-class hardware, the floor for a programmable
/// vertex + fragment pipeline. It is also wgpu's lowest shader model, so the result
/// is never below [`MIN_API_LEVEL`].
pub fn api_level(caps: &wgpu::DownlevelCapabilities) -> u32 {
    match caps.shader_model {
        wgpu::ShaderModel::Sm2 => 2,
        wgpu::ShaderModel::Sm4 => 4,
        wgpu::ShaderModel::Sm5 => 5,
    }
}

/// Fails with `UnsupportedCapability` when `found < required`.
///
/// Levels come from [`api_level`], which never reports less than 2. With the
/// default [`MIN_API_LEVEL`] this always passes; it only rejects adapters when
/// `GpuInit::min_api_level` is raised.
pub fn require_api_level(found: u32, required: u32) -> Result<(), RenderError> {
    if found < required {
        return Err(RenderError::UnsupportedCapability { found, required });
    }
    Ok(())
}
