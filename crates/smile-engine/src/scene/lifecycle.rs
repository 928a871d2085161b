/// Renderer lifecycle.
///
/// ```text
/// Uninitialized ──created──▶ SurfaceReady ──changed──▶ SurfaceSized ──draw──▶ Rendering
///                               ▲                           │  ▲                 │
///                               └──────── created ──────────┘  └──── changed ────┘
/// any ──destroy──▶ Destroyed
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    /// Pipeline built; no size known yet.
    SurfaceReady,
    /// Viewport and projection computed.
    SurfaceSized,
    /// At least one frame drawn since the last resize.
    Rendering,
    /// Terminal.
    Destroyed,
}

impl Lifecycle {
    /// Surface (re)created. Allowed from any live state.
    pub fn created(self) -> Option<Self> {
        match self {
            Lifecycle::Destroyed => None,
            _ => Some(Lifecycle::SurfaceReady),
        }
    }

    /// Surface resized. Requires a created surface.
    pub fn changed(self) -> Option<Self> {
        match self {
            Lifecycle::SurfaceReady | Lifecycle::SurfaceSized | Lifecycle::Rendering => {
                Some(Lifecycle::SurfaceSized)
            }
            Lifecycle::Uninitialized | Lifecycle::Destroyed => None,
        }
    }

    /// Frame drawn. Requires a sized surface.
    pub fn drawn(self) -> Option<Self> {
        match self {
            Lifecycle::SurfaceSized | Lifecycle::Rendering => Some(Lifecycle::Rendering),
            _ => None,
        }
    }

    pub fn can_draw(self) -> bool {
        self.drawn().is_some()
    }

    pub fn is_destroyed(self) -> bool {
        self == Lifecycle::Destroyed
    }
}
