// Screen-space camera for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Orthographic camera mapping a fixed logical screen (origin top-left,
/// y down, in pixels) onto clip space.
///
/// The logical size stays fixed when the window's physical size changes,
/// so game coordinates never depend on DPI.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Logical viewport width
    viewport_width: f32,
    /// Logical viewport height
    viewport_height: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a new camera for a logical screen of the given size
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    /// Update the view-projection matrix
    fn update_view_proj(&mut self) {
        // Bottom and top swapped so y grows downwards
        self.view_proj = Mat4::orthographic_rh(
            0.0,
            self.viewport_width,
            self.viewport_height,
            0.0,
            -1.0,
            1.0,
        );
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Logical viewport size
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Project a screen point into normalized device coordinates
    #[cfg(test)]
    pub fn screen_to_ndc(&self, screen_pos: Vec2) -> Vec2 {
        let clip = self.view_proj * glam::Vec4::new(screen_pos.x, screen_pos.y, 0.0, 1.0);
        Vec2::new(clip.x / clip.w, clip.y / clip.w)
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
