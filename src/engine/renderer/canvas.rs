// Drawing surface abstraction used by the game entities

use crate::core::math::Rect;
use crate::engine::assets::AssetError;
use image::RgbaImage;
use std::path::Path;

/// Handle to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(usize);

impl TextureHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Mirror transform applied when blitting a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    /// Upside down
    Vertical,
}

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unknown texture: {0:?}")]
    UnknownTexture(TextureHandle),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Something textures can be loaded into and blitted onto.
///
/// Calls between `clear` and `present` build one frame; `copy` draws in
/// submission order, so later copies end up on top.
pub trait Canvas {
    /// Load an image file into a texture
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, RenderError>;

    /// Upload an in-memory RGBA image as a texture
    fn texture_from_image(
        &mut self,
        image: &RgbaImage,
        label: &str,
    ) -> Result<TextureHandle, RenderError>;

    /// Release a texture. Unknown handles are ignored.
    fn destroy_texture(&mut self, texture: TextureHandle);

    /// Start a new frame
    fn clear(&mut self);

    /// Blit a texture into `dest` (the whole screen when `None`)
    fn copy(
        &mut self,
        texture: TextureHandle,
        dest: Option<Rect>,
        flip: Flip,
    ) -> Result<(), RenderError>;

    /// Show the frame built since the last `clear`
    fn present(&mut self) -> Result<(), RenderError>;
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_flip_default_is_none() {
        assert_eq!(Flip::default(), Flip::None);
    }

    #[test]
    fn test_copy_of_destroyed_texture_fails() {
        let mut canvas = RecordingCanvas::new();
        let texture = canvas.load_texture(Path::new("a.png")).unwrap();
        canvas.destroy_texture(texture);

        let err = canvas.copy(texture, None, Flip::None).unwrap_err();
        assert!(matches!(err, RenderError::UnknownTexture(t) if t == texture));
    }

    #[test]
    fn test_last_frame_only_sees_latest_clear() {
        let mut canvas = RecordingCanvas::new();
        let a = canvas.load_texture(Path::new("a.png")).unwrap();
        let b = canvas.load_texture(Path::new("b.png")).unwrap();

        canvas.clear();
        canvas.copy(a, None, Flip::None).unwrap();
        canvas.present().unwrap();
        canvas.clear();
        canvas.copy(b, None, Flip::Vertical).unwrap();

        assert_eq!(
            canvas.last_frame(),
            vec![CanvasOp::Copy {
                texture: b,
                dest: None,
                flip: Flip::Vertical
            }]
        );
        assert_eq!(canvas.present_count(), 1);
    }
}
