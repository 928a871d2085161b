//! Surface geometry shared by the renderer and its tests.
//!
//! - Viewport rects are physical pixels. The letterbox is computed bottom-up, so an
//!   odd vertical margin leaves the extra row above the content; it is flipped to a
//!   top-left origin before it reaches the GPU.
//! - Projection matrices are right-handed with clip-space depth in `[0, 1]`.

mod projection;
mod viewport;

pub use projection::{combine, view_matrix, Frustum, SurfaceGeometry, CENTER, EYE, FAR, NEAR, UP};
pub use viewport::{ViewportRect, CONTENT_ASPECT};
