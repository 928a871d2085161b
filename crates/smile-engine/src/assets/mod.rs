//! Asset sources for shader text and raw image bytes.
//!
//! The renderer never touches the filesystem directly; it asks the bound
//! `AssetSource` during surface creation.

mod source;

pub use source::{AssetSource, DirAssets, EmbeddedAssets, TextureSlot};
