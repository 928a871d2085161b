use thiserror::Error;

/// Failures that stop the renderer from starting.
///
/// Everything else (asset I/O, GPU setup) travels as `anyhow::Error` with context;
/// callers can `downcast_ref::<RenderError>()` to tell these apart.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The adapter's API level is below what the pipeline needs.
    #[error("GPU API level {required} is not supported (adapter provides level {found})")]
    UnsupportedCapability { found: u32, required: u32 },

    /// WGSL failed to parse or validate.
    #[error("shader build failed:\n{0}")]
    ShaderBuild(String),

    /// A named attribute, uniform, or entry point is absent from the shader.
    #[error("shader does not declare `{0}`")]
    MissingBinding(&'static str),

    /// Bindings exist but are arranged in a way the pipeline cannot use.
    #[error("unsupported shader binding layout: {0}")]
    BindingLayout(String),

    /// Surface creation happened with no asset host bound.
    #[error("renderer has no host bound; call bind() before the surface is created")]
    HostNotBound,

    /// The renderer was destroyed and cannot be reused.
    #[error("renderer has been destroyed")]
    Destroyed,
}
