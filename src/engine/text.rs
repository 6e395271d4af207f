// Text rasterization for title screens

use crate::engine::assets::AssetError;
use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

/// Turns a line of text into an RGBA image
pub trait TextRasterizer: Send {
    /// Render `text` in a single colour without antialiasing. Pixels are
    /// either fully `color` or fully transparent.
    fn render_solid(&self, text: &str, color: [u8; 4]) -> RgbaImage;
}

/// Glyphs covering at least half a pixel are drawn, the rest dropped
fn is_solid(coverage: f32) -> bool {
    coverage >= 0.5
}

/// A TrueType/OpenType font at a fixed pixel size
pub struct TitleFont {
    font: FontVec,
    scale: PxScale,
}

impl TitleFont {
    /// Parse font data already in memory. `label` names the source in errors.
    pub fn from_bytes(bytes: Vec<u8>, px_size: f32, label: &str) -> Result<Self, AssetError> {
        let font = FontVec::try_from_vec(bytes).map_err(|e| AssetError::InvalidFont {
            path: label.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            font,
            scale: PxScale::from(px_size),
        })
    }

    /// Lay out one line of text. Returns positioned glyphs and the image
    /// size needed to hold them (never smaller than 1x1).
    fn layout(&self, text: &str) -> (Vec<Glyph>, u32, u32) {
        let scaled = self.font.as_scaled(self.scale);
        let ascent = scaled.ascent();

        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret = 0.0f32;
        let mut previous = None;
        for c in text.chars().filter(|c| !c.is_control()) {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, ascent)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        let width = caret.ceil().max(1.0) as u32;
        let height = (scaled.ascent() - scaled.descent()).ceil().max(1.0) as u32;
        (glyphs, width, height)
    }
}

impl TextRasterizer for TitleFont {
    fn render_solid(&self, text: &str, color: [u8; 4]) -> RgbaImage {
        let (glyphs, width, height) = self.layout(text);
        let mut image = RgbaImage::new(width, height);

        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                if !is_solid(coverage) {
                    return;
                }
                let px = bounds.min.x as i32 + x as i32;
                let py = bounds.min.y as i32 + y as i32;
                if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                    image.put_pixel(px as u32, py as u32, Rgba(color));
                }
            });
        }

        image
    }
}
