//! Smile engine crate.
//!
//! Platform + GPU runtime pieces and the two-quad scene they drive: a textured
//! background and a sprite walking a scripted path inside a 4:5 letterboxed view.

pub mod device;
pub mod window;
pub mod core;

pub mod logging;
pub mod error;
pub mod coords;
pub mod anim;
pub mod assets;
pub mod render;
pub mod scene;

pub use error::RenderError;
