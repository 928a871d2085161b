use anyhow::{Context, Result};
use image::RgbaImage;
use wgpu::util::{DeviceExt, TextureDataOrder};

/// View and sampler of an uploaded image. The view keeps the texture alive.
pub struct SceneTexture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

/// Decodes encoded image bytes into tightly packed RGBA8.
///
/// Row 0 is the top of the image, matching texture coordinate `v = 0`.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory(bytes).context("failed to decode image")?;
    Ok(image.to_rgba8())
}

impl SceneTexture {
    pub fn from_encoded(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        bytes: &[u8],
    ) -> Result<Self> {
        let rgba = decode_rgba(bytes).with_context(|| format!("texture {label}"))?;
        Ok(Self::from_rgba(device, queue, label, &rgba))
    }

    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        rgba: &RgbaImage,
    ) -> Self {
        let (width, height) = rgba.dimensions();

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            TextureDataOrder::LayerMajor,
            rgba.as_raw(),
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        log::debug!("uploaded texture {label} ({width}x{height})");

        Self { view, sampler }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetSource, EmbeddedAssets, TextureSlot};

    #[test]
    fn bundled_images_decode() {
        let bg = decode_rgba(&EmbeddedAssets.image_bytes(TextureSlot::Background).unwrap()).unwrap();
        assert_eq!(bg.dimensions(), (256, 256));

        let sprite = decode_rgba(&EmbeddedAssets.image_bytes(TextureSlot::Sprite).unwrap()).unwrap();
        assert_eq!(sprite.dimensions(), (64, 64));
    }

    #[test]
    fn sprite_corners_are_transparent() {
        let sprite = decode_rgba(&EmbeddedAssets.image_bytes(TextureSlot::Sprite).unwrap()).unwrap();
        assert_eq!(sprite.get_pixel(0, 0)[3], 0);
        assert_eq!(sprite.get_pixel(32, 32)[3], 255);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(decode_rgba(b"definitely not an image").is_err());
    }
}
