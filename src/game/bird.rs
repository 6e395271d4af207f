// The player-controlled bird

use anyhow::{Context, Result};
use glam::Vec2;
use log::debug;

use super::animation::FrameAnimation;
use super::config::BirdConfig;
use super::pipe::Pipe;
use crate::core::math::{world_to_screen_y, Rect};
use crate::engine::assets::{AssetLoader, AssetType};
use crate::engine::physics::{Aabb, VerticalBody};
use crate::engine::renderer::{Canvas, Flip, TextureHandle};

/// The bird falls under gravity, jumps on input and dies on contact with
/// a pipe or when it drops below the bottom of the screen.
///
/// Positions are in world space: y is the height of the bird's centre
/// above the bottom edge of the screen.
#[derive(Debug)]
pub struct Bird {
    config: BirdConfig,
    body: VerticalBody,
    /// Ticks since creation; drives the wing animation
    time: u64,
    dead: bool,
    animation: FrameAnimation,
    textures: Vec<TextureHandle>,
    screen_height: u32,
}

impl Bird {
    /// Load the animation frames and place the bird at its start height
    pub fn new<C: Canvas>(
        canvas: &mut C,
        assets: &AssetLoader,
        config: &BirdConfig,
        screen_height: u32,
    ) -> Result<Self> {
        let mut textures = Vec::with_capacity(config.frame_count);
        for i in 0..config.frame_count {
            let path = assets.resolve_path(AssetType::Image, &config.frame_image(i));
            let texture = canvas
                .load_texture(&path)
                .with_context(|| format!("could not load bird frame {}", path.display()))?;
            textures.push(texture);
        }

        Ok(Self {
            body: VerticalBody::new(config.start_y),
            time: 0,
            dead: false,
            animation: FrameAnimation::new(config.frame_count, config.ticks_per_frame),
            textures,
            screen_height,
            config: config.clone(),
        })
    }

    /// Advance one tick: animate, fall, and die below the screen
    pub fn update(&mut self) {
        self.time += 1;
        self.body.step(self.config.gravity);
        if self.body.position < 0.0 {
            self.dead = true;
        }
    }

    /// Flap: replace the current velocity with the jump speed, upwards
    pub fn jump(&mut self) {
        debug!(
            "Jump at y={:.1} (velocity was {:.2})",
            self.body.position, self.body.velocity
        );
        self.body.launch(self.config.jump_speed);
    }

    /// Die on contact with `pipe`
    pub fn touch(&mut self, pipe: &Pipe) {
        if self.bounds().intersects(&pipe.bounds()) {
            self.dead = true;
        }
    }

    /// Draw the current animation frame
    pub fn paint<C: Canvas>(&self, canvas: &mut C) -> Result<()> {
        let frame = self.animation.frame_at(self.time);
        canvas
            .copy(self.textures[frame], Some(self.screen_rect()), Flip::None)
            .context("could not copy bird frame")?;
        Ok(())
    }

    /// Back to the start height, at rest and alive
    pub fn restart(&mut self) {
        self.body.reset(self.config.start_y);
        self.dead = false;
    }

    /// Release the animation textures
    pub fn destroy<C: Canvas>(self, canvas: &mut C) {
        for texture in self.textures {
            canvas.destroy_texture(texture);
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn y(&self) -> f32 {
        self.body.position
    }

    #[cfg(test)]
    pub fn velocity(&self) -> f32 {
        self.body.velocity
    }

    /// World-space bounding box, centred vertically on `y`
    pub fn bounds(&self) -> Aabb {
        let half = Vec2::new(self.config.width as f32, self.config.height as f32) / 2.0;
        let center = Vec2::new(self.config.x as f32 + half.x, self.body.position);
        Aabb::from_center(center, half)
    }

    /// Where the bird is drawn on screen
    pub fn screen_rect(&self) -> Rect {
        let y = world_to_screen_y(self.body.position, self.screen_height)
            - self.config.height as i32 / 2;
        Rect::new(self.config.x, y, self.config.width, self.config.height)
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, y: f32, velocity: f32) {
        self.body.position = y;
        self.body.velocity = velocity;
    }
}
