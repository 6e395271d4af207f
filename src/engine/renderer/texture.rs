// Texture loading and management system

use super::{RenderError, TextureHandle};
use crate::engine::assets::read_file;
use image::RgbaImage;
use log::debug;
use std::collections::HashMap;
use std::path::Path;

/// A loaded texture with GPU resources
pub struct Texture {
    #[allow(dead_code)]
    pub texture: wgpu::Texture,
    #[allow(dead_code)]
    pub view: wgpu::TextureView,
    #[allow(dead_code)]
    pub sampler: wgpu::Sampler,
    /// Bind group for the sprite pipeline's texture slot
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from image bytes (PNG/JPEG)
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self, RenderError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(device, queue, layout, &img.to_rgba8(), label))
    }

    /// Create a texture from an RGBA image
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        rgba: &RgbaImage,
        label: &str,
    ) -> Self {
        let (width, height) = rgba.dimensions();

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba.as_raw(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Nearest filtering keeps sprite and glyph edges crisp when stretched
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            view,
            sampler,
            bind_group,
            width,
            height,
        }
    }
}

/// Owns every live texture; handles stay valid until removed
#[derive(Default)]
pub struct TextureManager {
    textures: Vec<Option<Texture>>,
    path_to_handle: HashMap<String, TextureHandle>,
}

impl TextureManager {
    /// Create an empty texture manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a texture from a file path, reusing it if already loaded
    pub fn load_texture<P: AsRef<Path>>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: P,
    ) -> Result<TextureHandle, RenderError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        // Check if already loaded
        if let Some(&handle) = self.path_to_handle.get(&path_str) {
            return Ok(handle);
        }

        let bytes = read_file(path.as_ref())?;
        let texture = Texture::from_bytes(device, queue, layout, &bytes, &path_str)?;
        debug!(
            "Loaded texture {} ({}x{})",
            path_str, texture.width, texture.height
        );

        let handle = self.insert(texture);
        self.path_to_handle.insert(path_str, handle);

        Ok(handle)
    }

    /// Store a texture that was built in memory
    pub fn insert(&mut self, texture: Texture) -> TextureHandle {
        let handle = TextureHandle::new(self.textures.len());
        self.textures.push(Some(texture));
        handle
    }

    /// Drop a texture's GPU resources. Returns false for unknown handles.
    pub fn remove(&mut self, handle: TextureHandle) -> bool {
        let removed = self
            .textures
            .get_mut(handle.index())
            .and_then(Option::take)
            .is_some();
        if removed {
            self.path_to_handle.retain(|_, h| *h != handle);
        }
        removed
    }

    /// Get a texture by handle
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.index()).and_then(Option::as_ref)
    }

    /// Get the number of live textures
    pub fn texture_count(&self) -> usize {
        self.textures.iter().filter(|t| t.is_some()).count()
    }
}
