use glam::{Mat4, Vec3, Vec4};

use super::viewport::ViewportRect;

/// Near clipping plane distance.
pub const NEAR: f32 = 2.0;
/// Far clipping plane distance.
pub const FAR: f32 = 12.0;
/// Frustum half-extent on the constrained axis at the near plane.
pub const HALF_EXTENT: f32 = 0.5;

/// Fixed camera: eye, look-at center, up vector.
pub const EYE: Vec3 = Vec3::new(0.0, 2.0, 7.0);
pub const CENTER: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const UP: Vec3 = Vec3::Y;

/// Symmetric frustum bounds at the near plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    /// Builds the frustum for a viewport of `width × height`.
    ///
    /// The shorter side keeps [`HALF_EXTENT`]; the longer side is widened by the
    /// longer/shorter ratio so the frustum has the viewport's aspect.
    pub fn for_viewport(width: i32, height: i32) -> Self {
        let (mut left, mut right) = (-HALF_EXTENT, HALF_EXTENT);
        let (mut bottom, mut top) = (-HALF_EXTENT, HALF_EXTENT);

        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        if width > height {
            let ratio = w / h;
            left *= ratio;
            right *= ratio;
        } else {
            let ratio = h / w;
            bottom *= ratio;
            top *= ratio;
        }

        Self { left, right, bottom, top, near: NEAR, far: FAR }
    }

    /// Right-handed perspective matrix with clip-space depth in `[0, 1]`.
    pub fn to_matrix(self) -> Mat4 {
        let Self { left, right, bottom, top, near, far } = self;
        let rw = 1.0 / (right - left);
        let rh = 1.0 / (top - bottom);
        let rd = 1.0 / (near - far);

        Mat4::from_cols(
            Vec4::new(2.0 * near * rw, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * near * rh, 0.0, 0.0),
            Vec4::new((right + left) * rw, (top + bottom) * rh, far * rd, -1.0),
            Vec4::new(0.0, 0.0, near * far * rd, 0.0),
        )
    }
}

/// Letterboxed viewport and the projection matching its aspect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceGeometry {
    pub viewport: ViewportRect,
    pub projection: Mat4,
}

impl SurfaceGeometry {
    pub fn for_surface(width: i32, height: i32) -> Self {
        let viewport = ViewportRect::letterbox(width, height);
        Self {
            viewport,
            projection: Frustum::for_viewport(viewport.width, viewport.height).to_matrix(),
        }
    }
}

/// The fixed camera view matrix.
pub fn view_matrix() -> Mat4 {
    Mat4::look_at_rh(EYE, CENTER, UP)
}

/// Combined `projection × view × model`.
#[inline]
pub fn combine(projection: Mat4, view: Mat4, model: Mat4) -> Mat4 {
    projection * view * model
}
