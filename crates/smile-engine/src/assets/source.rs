use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Which of the two scene textures is requested.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Background,
    Sprite,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 2] = [TextureSlot::Background, TextureSlot::Sprite];

    /// File name used by directory-backed sources.
    pub const fn file_name(self) -> &'static str {
        match self {
            TextureSlot::Background => "bg.png",
            TextureSlot::Sprite => "smile.png",
        }
    }
}

/// Host-provided asset access.
///
/// Called from the render thread during surface creation only.
pub trait AssetSource: Send + Sync {
    /// WGSL source containing both the `vs_main` and `fs_main` entry points.
    fn shader_source(&self) -> Result<Cow<'static, str>>;

    /// Encoded image bytes (PNG) for `slot`.
    fn image_bytes(&self, slot: TextureSlot) -> Result<Cow<'static, [u8]>>;
}

const SHADER_FILE: &str = "textured_quad.wgsl";

/// Assets compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedAssets;

impl EmbeddedAssets {
    const SHADER: &'static str = include_str!("../render/shaders/textured_quad.wgsl");
    const BACKGROUND: &'static [u8] = include_bytes!("../../assets/bg.png");
    const SPRITE: &'static [u8] = include_bytes!("../../assets/smile.png");
}

impl AssetSource for EmbeddedAssets {
    fn shader_source(&self) -> Result<Cow<'static, str>> {
        Ok(Cow::Borrowed(Self::SHADER))
    }

    fn image_bytes(&self, slot: TextureSlot) -> Result<Cow<'static, [u8]>> {
        Ok(Cow::Borrowed(match slot {
            TextureSlot::Background => Self::BACKGROUND,
            TextureSlot::Sprite => Self::SPRITE,
        }))
    }
}

/// Assets read from a directory, falling back to [`EmbeddedAssets`] per file.
///
/// Expected names: `textured_quad.wgsl`, `bg.png`, `smile.png`.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn existing(&self, name: &str) -> Option<PathBuf> {
        let path = self.root.join(name);
        path.is_file().then_some(path)
    }
}

impl AssetSource for DirAssets {
    fn shader_source(&self) -> Result<Cow<'static, str>> {
        match self.existing(SHADER_FILE) {
            Some(path) => {
                log::info!("loading shader override from {}", path.display());
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read shader {}", path.display()))?;
                Ok(Cow::Owned(text))
            }
            None => EmbeddedAssets.shader_source(),
        }
    }

    fn image_bytes(&self, slot: TextureSlot) -> Result<Cow<'static, [u8]>> {
        match self.existing(slot.file_name()) {
            Some(path) => {
                log::info!("loading {slot:?} texture override from {}", path.display());
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("failed to read image {}", path.display()))?;
                Ok(Cow::Owned(bytes))
            }
            None => EmbeddedAssets.image_bytes(slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn embedded_images_are_png() {
        for slot in TextureSlot::ALL {
            let bytes = EmbeddedAssets.image_bytes(slot).unwrap();
            assert!(bytes.starts_with(PNG_MAGIC), "{slot:?}");
        }
    }

    #[test]
    fn embedded_shader_names_its_bindings() {
        let src = EmbeddedAssets.shader_source().unwrap();
        for name in ["a_Position", "a_Texture", "u_TextureUnit", "u_Matrix"] {
            assert!(src.contains(name), "{name}");
        }
    }

    #[test]
    fn dir_assets_fall_back_to_embedded() {
        let dir = DirAssets::new(std::env::temp_dir().join("smile-engine-no-such-dir"));
        assert_eq!(
            dir.shader_source().unwrap(),
            EmbeddedAssets.shader_source().unwrap()
        );
        assert_eq!(
            dir.image_bytes(TextureSlot::Sprite).unwrap(),
            EmbeddedAssets.image_bytes(TextureSlot::Sprite).unwrap()
        );
    }

    #[test]
    fn dir_assets_prefer_files_on_disk() {
        let root = std::env::temp_dir().join(format!("smile-engine-assets-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join(SHADER_FILE), "// override").unwrap();

        let dir = DirAssets::new(&root);
        assert_eq!(dir.shader_source().unwrap(), "// override");
        assert!(dir.image_bytes(TextureSlot::Background).unwrap().starts_with(PNG_MAGIC));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
