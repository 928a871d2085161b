//! GPU rendering subsystem.
//!
//! One pipeline draws textured quads out of a shared vertex buffer.
//!
//! Convention:
//! - Geometry is in world units; the vertex shader applies a single combined
//!   `projection × view × model` matrix.
//! - Texture coordinate `v = 0` is the top row of the image.

mod ctx;
mod pipeline;
pub mod shader;
mod texture;
mod vertex;

pub use ctx::{RenderCtx, RenderTarget};
pub use pipeline::QuadPipeline;
pub use shader::{ResourceSlot, ShaderBindings};
pub use texture::{decode_rgba, SceneTexture};
pub use vertex::{Quad, Vertex, QUAD_VERTICES};
