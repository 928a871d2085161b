use glam::{Mat4, Vec3};

/// Content aspect ratio kept by the letterbox, as `width:height`.
pub const CONTENT_ASPECT: (i32, i32) = (4, 5);

/// Viewport rectangle in physical pixels.
///
/// [`ViewportRect::letterbox`] measures `y` up from the bottom edge;
/// [`ViewportRect::flip_y`] converts to the top-left origin wgpu expects. `x`/`y`
/// may be negative when the letterboxed content is taller than the surface; see
/// [`ViewportRect::fit_within`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ViewportRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ViewportRect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Width divided by height; `1.0` for degenerate rects.
    pub fn aspect(self) -> f32 {
        if self.is_empty() {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Computes the letterboxed viewport for a surface of `width × height`.
    ///
    /// Landscape surfaces keep the full height and shrink the width to
    /// `height * 4 / 5`, centered horizontally. Otherwise the full width is kept and
    /// the height becomes `width * 5 / 4`, centered vertically. Integer division
    /// truncates toward zero, so the vertical margin may be negative.
    pub fn letterbox(width: i32, height: i32) -> Self {
        let (aw, ah) = CONTENT_ASPECT;
        if width > height {
            let w = height * aw / ah;
            Self::new((width - w) / 2, 0, w, height)
        } else {
            let h = width * ah / aw;
            Self::new(0, (height - h) / 2, width, h)
        }
    }

    /// Mirrors `y` within a surface of height `surface_h`, swapping between
    /// bottom-left and top-left origins.
    #[inline]
    pub fn flip_y(self, surface_h: i32) -> Self {
        Self::new(self.x, surface_h - self.y - self.height, self.width, self.height)
    }

    /// Clamps the top-left-origin rect to a `surface_w × surface_h` target.
    ///
    /// Returns the clamped rect together with a clip-space correction matrix. Drawing
    /// into the clamped rect with `correction * mvp` produces exactly the pixels the
    /// unclamped rect would have produced. Returns `None` when nothing overlaps.
    pub fn fit_within(self, surface_w: u32, surface_h: u32) -> Option<(ViewportRect, Mat4)> {
        if self.is_empty() {
            return None;
        }

        let sw = i32::try_from(surface_w).unwrap_or(i32::MAX);
        let sh = i32::try_from(surface_h).unwrap_or(i32::MAX);

        let x0 = self.x.clamp(0, sw);
        let y0 = self.y.clamp(0, sh);
        let x1 = (self.x + self.width).clamp(0, sw);
        let y1 = (self.y + self.height).clamp(0, sh);

        let clamped = ViewportRect::new(x0, y0, x1 - x0, y1 - y0);
        if clamped.is_empty() {
            return None;
        }

        if clamped == self {
            return Some((clamped, Mat4::IDENTITY));
        }

        let (w, h) = (self.width as f32, self.height as f32);
        let (cw, ch) = (clamped.width as f32, clamped.height as f32);
        let dx = (self.x - clamped.x) as f32;
        let dy = (self.y - clamped.y) as f32;

        // NDC +Y is up while pixel rows grow downward.
        let sx = w / cw;
        let sy = h / ch;
        let tx = (w + 2.0 * dx) / cw - 1.0;
        let ty = 1.0 - (h + 2.0 * dy) / ch;

        let correction =
            Mat4::from_translation(Vec3::new(tx, ty, 0.0)) * Mat4::from_scale(Vec3::new(sx, sy, 1.0));

        Some((clamped, correction))
    }
}
