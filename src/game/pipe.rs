// Scrolling pipe obstacle

use anyhow::{Context, Result};
use glam::Vec2;

use super::config::PipeConfig;
use crate::core::math::Rect;
use crate::engine::assets::{AssetLoader, AssetType};
use crate::engine::physics::Aabb;
use crate::engine::renderer::{Canvas, Flip, TextureHandle};

/// A single pipe scrolling right to left, either rising from the floor or
/// hanging from the ceiling (inverted)
#[derive(Debug)]
pub struct Pipe {
    config: PipeConfig,
    /// Left edge in pixels
    x: i32,
    texture: TextureHandle,
    screen_width: u32,
    screen_height: u32,
}

impl Pipe {
    /// Load the pipe texture and place the pipe at its spawn position
    pub fn new<C: Canvas>(
        canvas: &mut C,
        assets: &AssetLoader,
        image: &str,
        config: &PipeConfig,
        screen_width: u32,
        screen_height: u32,
    ) -> Result<Self> {
        let path = assets.resolve_path(AssetType::Image, image);
        let texture = canvas
            .load_texture(&path)
            .with_context(|| format!("could not load pipe image {}", path.display()))?;

        Ok(Self {
            x: config.start_x,
            texture,
            screen_width,
            screen_height,
            config: config.clone(),
        })
    }

    /// Scroll left by one tick's worth
    pub fn update(&mut self) {
        self.x = self.x.saturating_sub(self.config.speed);
        if self.config.wrap && self.x.saturating_add(self.config.width as i32) < 0 {
            self.x = self.screen_width as i32;
        }
    }

    /// Draw the pipe, flipped upside down when it hangs from the ceiling
    pub fn paint<C: Canvas>(&self, canvas: &mut C) -> Result<()> {
        let flip = if self.config.inverted {
            Flip::Vertical
        } else {
            Flip::None
        };
        canvas
            .copy(self.texture, Some(self.screen_rect()), flip)
            .context("could not copy pipe")?;
        Ok(())
    }

    /// Back to the spawn position
    pub fn restart(&mut self) {
        self.x = self.config.start_x;
    }

    /// Release the pipe texture
    pub fn destroy<C: Canvas>(self, canvas: &mut C) {
        canvas.destroy_texture(self.texture);
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    /// World-space box (y up): floor to `height`, or `screen - height` to
    /// the ceiling when inverted
    pub fn bounds(&self) -> Aabb {
        let size = Vec2::new(self.config.width as f32, self.config.height as f32);
        let bottom = if self.config.inverted {
            self.screen_height as f32 - size.y
        } else {
            0.0
        };
        Aabb::from_origin_size(Vec2::new(self.x as f32, bottom), size)
    }

    /// Where the pipe is drawn on screen
    pub fn screen_rect(&self) -> Rect {
        let y = if self.config.inverted {
            0
        } else {
            self.screen_height as i32 - self.config.height as i32
        };
        Rect::new(self.x, y, self.config.width, self.config.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::testing::{CanvasOp, RecordingCanvas};
    use std::path::Path;

    fn pipe_with(canvas: &mut RecordingCanvas, config: PipeConfig) -> Pipe {
        Pipe::new(canvas, &AssetLoader::new("res"), "pipe.png", &config, 800, 600).unwrap()
    }

    #[test]
    fn test_new_loads_texture() {
        let mut canvas = RecordingCanvas::new();
        let pipe = pipe_with(&mut canvas, PipeConfig::default());
        assert_eq!(canvas.loaded, vec![Path::new("res/images/pipe.png")]);
        assert_eq!(pipe.x(), 400);
        assert!(pipe.config.inverted);
    }

    #[test]
    fn test_hundred_ticks_scroll_hundred_pixels() {
        let mut canvas = RecordingCanvas::new();
        let mut pipe = pipe_with(&mut canvas, PipeConfig::default());
        for _ in 0..100 {
            pipe.update();
        }
        assert_eq!(pipe.x(), 300);
    }

    #[test]
    fn test_no_wrap_by_default() {
        let mut canvas = RecordingCanvas::new();
        let mut pipe = pipe_with(&mut canvas, PipeConfig::default());
        for _ in 0..1_000 {
            pipe.update();
        }
        assert_eq!(pipe.x(), -600);
    }

    #[test]
    fn test_scrolling_stops_at_leftmost_position() {
        let mut canvas = RecordingCanvas::new();
        let mut pipe = pipe_with(&mut canvas, PipeConfig::default());
        pipe.x = i32::MIN + 1;
        pipe.update();
        pipe.update();
        assert_eq!(pipe.x(), i32::MIN);
        assert_eq!(pipe.screen_rect().x, i32::MIN);
    }

    #[test]
    fn test_wrap_reenters_from_right_edge() {
        let mut canvas = RecordingCanvas::new();
        let mut pipe = pipe_with(
            &mut canvas,
            PipeConfig {
                start_x: 0,
                wrap: true,
                ..Default::default()
            },
        );
        for _ in 0..50 {
            pipe.update();
        }
        assert_eq!(pipe.x(), -50);
        pipe.update();
        assert_eq!(pipe.x(), 800);
    }

    #[test]
    fn test_restart_returns_to_spawn() {
        let mut canvas = RecordingCanvas::new();
        let mut pipe = pipe_with(&mut canvas, PipeConfig::default());
        for _ in 0..37 {
            pipe.update();
        }
        pipe.restart();
        assert_eq!(pipe.x(), 400);
    }

    #[test]
    fn test_bounds_by_orientation() {
        let mut canvas = RecordingCanvas::new();
        let floor = pipe_with(
            &mut canvas,
            PipeConfig {
                inverted: false,
                ..Default::default()
            },
        );
        assert_eq!(floor.bounds().min, Vec2::new(400.0, 0.0));
        assert_eq!(floor.bounds().max, Vec2::new(450.0, 300.0));

        let ceiling = pipe_with(&mut canvas, PipeConfig::default());
        assert_eq!(ceiling.bounds().min, Vec2::new(400.0, 300.0));
        assert_eq!(ceiling.bounds().max, Vec2::new(450.0, 600.0));
    }

    #[test]
    fn test_paint_floor_pipe() {
        let mut canvas = RecordingCanvas::new();
        let pipe = pipe_with(
            &mut canvas,
            PipeConfig {
                inverted: false,
                height: 200,
                ..Default::default()
            },
        );
        pipe.paint(&mut canvas).unwrap();
        assert_eq!(
            canvas.ops,
            vec![CanvasOp::Copy {
                texture: pipe.texture,
                dest: Some(Rect::new(400, 400, 50, 200)),
                flip: Flip::None
            }]
        );
    }

    #[test]
    fn test_paint_inverted_pipe_is_flipped_at_top() {
        let mut canvas = RecordingCanvas::new();
        let pipe = pipe_with(&mut canvas, PipeConfig::default());
        pipe.paint(&mut canvas).unwrap();
        assert_eq!(
            canvas.ops,
            vec![CanvasOp::Copy {
                texture: pipe.texture,
                dest: Some(Rect::new(400, 0, 50, 300)),
                flip: Flip::Vertical
            }]
        );
    }

    #[test]
    fn test_paint_after_destroy_fails() {
        let mut canvas = RecordingCanvas::new();
        let pipe = pipe_with(&mut canvas, PipeConfig::default());
        let texture = pipe.texture;
        canvas.destroy_texture(texture);
        assert!(pipe.paint(&mut canvas).is_err());
    }
}
