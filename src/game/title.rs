// Full-screen title cards ("Flappy Ferris", "Game over")

use anyhow::{Context, Result};
use log::debug;
use std::collections::HashMap;

use crate::engine::renderer::{Canvas, Flip, TextureHandle};
use crate::engine::text::TextRasterizer;

/// Renders a line of text stretched over the whole screen.
///
/// Each distinct text is rasterized and uploaded once, then reused until
/// the card is destroyed.
pub struct TitleCard {
    rasterizer: Box<dyn TextRasterizer>,
    color: [u8; 4],
    cache: HashMap<String, TextureHandle>,
}

impl TitleCard {
    /// Create a title card drawing text in `color`
    pub fn new(rasterizer: Box<dyn TextRasterizer>, color: [u8; 4]) -> Self {
        Self {
            rasterizer,
            color,
            cache: HashMap::new(),
        }
    }

    /// Clear the screen, draw `text` over all of it and present
    pub fn draw<C: Canvas>(&mut self, canvas: &mut C, text: &str) -> Result<()> {
        canvas.clear();

        let texture = self.texture_for(canvas, text)?;
        canvas
            .copy(texture, None, Flip::None)
            .context("could not copy title texture")?;

        canvas.present().context("could not present title")?;
        Ok(())
    }

    fn texture_for<C: Canvas>(&mut self, canvas: &mut C, text: &str) -> Result<TextureHandle> {
        if let Some(&texture) = self.cache.get(text) {
            return Ok(texture);
        }

        let image = self.rasterizer.render_solid(text, self.color);
        let texture = canvas
            .texture_from_image(&image, text)
            .with_context(|| format!("could not create texture for title {:?}", text))?;
        debug!(
            "Rendered title {:?} ({}x{})",
            text,
            image.width(),
            image.height()
        );
        self.cache.insert(text.to_string(), texture);
        Ok(texture)
    }

    /// Release every cached title texture
    pub fn destroy<C: Canvas>(self, canvas: &mut C) {
        for texture in self.cache.into_values() {
            canvas.destroy_texture(texture);
        }
    }
}
