// Rendering system using wgpu

mod camera;
mod canvas;
mod sprite;
pub mod texture;
mod vertex;

pub use camera::{Camera, CameraUniform};
pub use canvas::{Canvas, Flip, RenderError, TextureHandle};
pub use sprite::{Sprite, SpriteRenderer};
pub use texture::{Texture, TextureManager};
pub use vertex::Vertex;

#[cfg(test)]
pub use canvas::testing;

use crate::core::math::Rect;
use image::RgbaImage;
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;
use winit::window::Window;

/// Errors raised while bringing up the GPU
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("Failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Main renderer: owns the GPU device, the window surface and every texture
pub struct Renderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_renderer: SpriteRenderer,
    texture_manager: TextureManager,
    camera: Camera,
}

impl Renderer {
    /// Create a renderer drawing a fixed logical screen into `window`
    pub async fn new(
        window: Arc<Window>,
        logical_width: u32,
        logical_height: u32,
    ) -> Result<Self, InitError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(InitError::NoAdapter)?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let sprite_renderer = SpriteRenderer::new(&device, surface_format);
        let camera = Camera::new(logical_width as f32, logical_height as f32);

        info!(
            "Renderer initialized: {}x{} logical, {}x{} physical",
            logical_width, logical_height, size.width, size.height
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            sprite_renderer,
            texture_manager: TextureManager::new(),
            camera,
        })
    }

    /// Reconfigure the surface for the window's current physical size
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Logical screen rectangle every frame is drawn into
    pub fn screen_rect(&self) -> Rect {
        let size = self.camera.viewport_size();
        Rect::screen(size.x as u32, size.y as u32)
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        debug!(
            "Renderer dropped with {} live textures",
            self.texture_manager.texture_count()
        );
    }
}

impl Canvas for Renderer {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, RenderError> {
        self.texture_manager.load_texture(
            &self.device,
            &self.queue,
            self.sprite_renderer.texture_bind_group_layout(),
            path,
        )
    }

    fn texture_from_image(
        &mut self,
        image: &RgbaImage,
        label: &str,
    ) -> Result<TextureHandle, RenderError> {
        let texture = Texture::from_image(
            &self.device,
            &self.queue,
            self.sprite_renderer.texture_bind_group_layout(),
            image,
            label,
        );
        debug!(
            "Created texture {:?} ({}x{})",
            label, texture.width, texture.height
        );
        Ok(self.texture_manager.insert(texture))
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        if self.texture_manager.remove(texture) {
            debug!("Destroyed texture {:?}", texture);
        }
    }

    fn clear(&mut self) {
        self.sprite_renderer.clear();
    }

    fn copy(
        &mut self,
        texture: TextureHandle,
        dest: Option<Rect>,
        flip: Flip,
    ) -> Result<(), RenderError> {
        if self.texture_manager.get(texture).is_none() {
            return Err(RenderError::UnknownTexture(texture));
        }
        let dest = dest.unwrap_or_else(|| self.screen_rect());
        self.sprite_renderer
            .add_sprite(Sprite::new(texture, dest, flip));
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!("Dropping frame: {}", err);
                self.resize(self.window.inner_size());
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.sprite_renderer
            .prepare(&self.queue, &CameraUniform::new(&self.camera));

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_renderer
                .render(&mut render_pass, &self.texture_manager);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
