use glam::Mat4;

use crate::anim::{AnimationControl, AnimationState, Command, Phase};
use crate::coords::{self, SurfaceGeometry, ViewportRect};
use crate::error::RenderError;

use super::lifecycle::Lifecycle;

/// Viewport and projection for the current surface size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameLayout {
    /// Letterboxed rect before flipping and clamping, bottom-left origin; may
    /// overflow the surface.
    pub letterbox: ViewportRect,
    /// Rect actually passed to the GPU, top-left origin.
    pub viewport: ViewportRect,
    /// Projection with the clamping correction folded in.
    pub projection: Mat4,
}

impl FrameLayout {
    /// `None` when the surface has no drawable area.
    pub fn for_surface(width: u32, height: u32) -> Option<Self> {
        let w = i32::try_from(width).ok()?;
        let h = i32::try_from(height).ok()?;
        let geometry = SurfaceGeometry::for_surface(w, h);
        let (viewport, correction) = geometry.viewport.flip_y(h).fit_within(width, height)?;

        Some(Self {
            letterbox: geometry.viewport,
            viewport,
            projection: correction * geometry.projection,
        })
    }
}

/// Everything one frame needs from the CPU side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTransforms {
    pub viewport: ViewportRect,
    pub background: Mat4,
    pub sprite: Mat4,
    /// Command drained from the control slot this frame.
    pub command: Option<Command>,
    /// Phase entered this frame, if any.
    pub transition: Option<Phase>,
}

/// GPU-free renderer state: lifecycle, camera, layout and animation.
#[derive(Debug)]
pub struct SceneState {
    lifecycle: Lifecycle,
    view: Mat4,
    layout: Option<FrameLayout>,
    animation: AnimationState,
    control: AnimationControl,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            view: coords::view_matrix(),
            layout: None,
            animation: AnimationState::new(),
            control: AnimationControl::new(),
        }
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn layout(&self) -> Option<&FrameLayout> {
        self.layout.as_ref()
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Handle shared with whoever issues start/stop.
    pub fn control(&self) -> &AnimationControl {
        &self.control
    }

    /// Enters `SurfaceReady` and recomputes the fixed view matrix.
    ///
    /// Animation progress is untouched so a recreated surface resumes mid-path.
    pub fn surface_created(&mut self) -> Result<(), RenderError> {
        self.lifecycle = self.lifecycle.created().ok_or(RenderError::Destroyed)?;
        self.view = coords::view_matrix();
        self.layout = None;
        Ok(())
    }

    /// Recomputes layout for `width × height`.
    ///
    /// Returns the background's combined transform so it can be uploaded right
    /// away; `None` for a zero-area surface or an invalid lifecycle state.
    pub fn surface_changed(&mut self, width: u32, height: u32) -> Option<Mat4> {
        let Some(next) = self.lifecycle.changed() else {
            log::debug!("resize ignored in {:?}", self.lifecycle);
            return None;
        };
        self.lifecycle = next;
        self.layout = FrameLayout::for_surface(width, height);

        if let Some(layout) = &self.layout {
            log::debug!(
                "surface {width}x{height}: letterbox {:?}, viewport {:?}",
                layout.letterbox,
                layout.viewport
            );
        }

        self.background_transform()
    }

    /// Combined transform of the background quad (identity model).
    pub fn background_transform(&self) -> Option<Mat4> {
        let layout = self.layout.as_ref()?;
        Some(coords::combine(layout.projection, self.view, Mat4::IDENTITY))
    }

    /// Combined transform of the sprite at its current offset.
    pub fn sprite_transform(&self) -> Option<Mat4> {
        let layout = self.layout.as_ref()?;
        let model = Mat4::from_translation(self.animation.translation());
        Some(coords::combine(layout.projection, self.view, model))
    }

    /// Advances one frame: drains the control slot, ticks the animation and
    /// returns both transforms.
    ///
    /// Returns `None` (and leaves the animation untouched) when nothing can be drawn.
    pub fn next_frame(&mut self) -> Option<FrameTransforms> {
        let next = self.lifecycle.drawn()?;
        let viewport = self.layout.as_ref()?.viewport;
        self.lifecycle = next;

        let background = self.background_transform()?;

        let command = self.control.apply(&mut self.animation);
        let transition = self.animation.tick();
        let sprite = self.sprite_transform()?;

        Some(FrameTransforms {
            viewport,
            background,
            sprite,
            command,
            transition,
        })
    }

    /// Enters the terminal state.
    pub fn destroy(&mut self) {
        self.lifecycle = Lifecycle::Destroyed;
        self.layout = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    fn sized(width: u32, height: u32) -> SceneState {
        let mut s = SceneState::new();
        s.surface_created().unwrap();
        s.surface_changed(width, height);
        s
    }

    #[test]
    fn no_frame_before_resize() {
        let mut s = SceneState::new();
        assert!(s.next_frame().is_none());
        s.surface_created().unwrap();
        assert!(s.next_frame().is_none());
        assert_eq!(s.lifecycle(), Lifecycle::SurfaceReady);
    }

    #[test]
    fn resize_returns_background_transform() {
        let mut s = SceneState::new();
        s.surface_created().unwrap();
        let m = s.surface_changed(1000, 500).expect("transform");
        assert_eq!(Some(m), s.background_transform());
        assert_eq!(s.lifecycle(), Lifecycle::SurfaceSized);
    }

    #[test]
    fn layout_uses_letterbox() {
        let s = sized(1000, 500);
        let layout = s.layout().unwrap();
        assert_eq!(layout.letterbox, ViewportRect::new(300, 0, 400, 500));
        assert_eq!(layout.viewport, layout.letterbox);
    }

    #[test]
    fn overflowing_letterbox_is_clamped() {
        let s = sized(500, 600);
        let layout = s.layout().unwrap();
        assert_eq!(layout.letterbox, ViewportRect::new(0, -12, 500, 625));
        assert_eq!(layout.viewport, ViewportRect::new(0, 0, 500, 600));
    }

    #[test]
    fn odd_portrait_margin_puts_extra_row_on_top() {
        let s = sized(500, 1000);
        let layout = s.layout().unwrap();
        assert_eq!(layout.letterbox, ViewportRect::new(0, 187, 500, 625));
        assert_eq!(layout.viewport, ViewportRect::new(0, 188, 500, 625));
        assert_eq!(1000 - layout.viewport.y - layout.viewport.height, 187);
    }

    #[test]
    fn zero_area_surface_draws_nothing() {
        let mut s = sized(0, 0);
        assert!(s.layout().is_none());
        s.control().start();
        assert!(s.next_frame().is_none());
        assert!(s.animation().stopped);
    }

    #[test]
    fn idle_frame_keeps_sprite_at_rest() {
        let mut s = sized(800, 1000);
        let f = s.next_frame().unwrap();
        assert_eq!(f.command, None);
        assert_eq!(f.transition, None);
        assert_eq!(s.lifecycle(), Lifecycle::Rendering);

        // Sprite transform = background transform shifted by the initial offset.
        let expected = f.background * Mat4::from_translation(Vec3::new(-1.0, 2.5, 0.0));
        assert!(f.sprite.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn start_is_applied_on_next_frame() {
        let mut s = sized(800, 1000);
        s.control().start();
        let f = s.next_frame().unwrap();
        assert_eq!(f.command, Some(Command::Start));
        assert!((s.animation().offset_x - (-0.99)).abs() < 1e-6);
    }

    #[test]
    fn animation_advances_one_step_per_drawn_frame() {
        let mut s = sized(800, 1000);
        s.control().start();
        for _ in 0..40 {
            s.next_frame().unwrap();
        }
        assert!((s.animation().offset_x - (-1.0 + 40.0 * 0.01)).abs() < 1e-4);
        assert_eq!(s.animation().phase, Phase::Right);
    }

    #[test]
    fn stop_freezes_sprite_transform() {
        let mut s = sized(800, 1000);
        s.control().start();
        for _ in 0..10 {
            s.next_frame();
        }
        s.control().stop();
        let first = s.next_frame().unwrap().sprite;
        for _ in 0..10 {
            assert_eq!(s.next_frame().unwrap().sprite, first);
        }
    }

    #[test]
    fn background_stays_put_while_sprite_moves() {
        let mut s = sized(1000, 500);
        s.control().start();
        let a = s.next_frame().unwrap();
        let b = s.next_frame().unwrap();
        assert_eq!(a.background, b.background);
        assert_ne!(a.sprite, b.sprite);
    }

    #[test]
    fn surface_recreation_keeps_animation() {
        let mut s = sized(800, 1000);
        s.control().start();
        for _ in 0..25 {
            s.next_frame();
        }
        let progress = *s.animation();

        s.surface_created().unwrap();
        assert!(s.next_frame().is_none());
        s.surface_changed(1000, 800);
        assert_eq!(*s.animation(), progress);
        s.next_frame().unwrap();
        assert!(s.animation().offset_x > progress.offset_x);
    }

    #[test]
    fn sprite_center_projects_inside_view_at_rest() {
        let s = sized(800, 1000);
        let m = s.sprite_transform().unwrap();
        let clip = m * Vec4::new(0.0, 0.0, 0.5, 1.0);
        let (x, y, z) = (clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
        assert!((-1.0..=1.0).contains(&x));
        assert!((-1.0..=1.0).contains(&y));
        assert!((0.0..=1.0).contains(&z));
    }

    #[test]
    fn destroyed_state_rejects_recreation() {
        let mut s = sized(800, 1000);
        s.destroy();
        assert!(matches!(s.surface_created(), Err(RenderError::Destroyed)));
        assert!(s.next_frame().is_none());
    }
}
