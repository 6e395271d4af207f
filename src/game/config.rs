// Game tuning constants
//
// Everything is fixed at compile time; there is no config file. The
// defaults describe the one game this binary plays.

use std::time::Duration;

/// Rejected configuration values
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} must be a positive finite number")]
    NotPositive(&'static str),
}

/// Bird tuning
#[derive(Debug, Clone, PartialEq)]
pub struct BirdConfig {
    /// Fixed horizontal position (left edge, pixels)
    pub x: i32,
    /// Starting height of the bird's centre above the bottom of the screen
    pub start_y: f32,
    /// Bounding box width
    pub width: u32,
    /// Bounding box height
    pub height: u32,
    /// Added to the fall speed every tick
    pub gravity: f32,
    /// Upward speed set by a jump
    pub jump_speed: f32,
    /// Number of animation frames (`frame-1.png` ... `frame-N.png`)
    pub frame_count: usize,
    /// Ticks each animation frame stays on screen
    pub ticks_per_frame: u64,
}

/// Pipe tuning
#[derive(Debug, Clone, PartialEq)]
pub struct PipeConfig {
    /// Spawn position (left edge, pixels)
    pub start_x: i32,
    pub width: u32,
    pub height: u32,
    /// Pixels moved left per tick
    pub speed: i32,
    /// Hang from the ceiling instead of rising from the floor
    pub inverted: bool,
    /// Re-enter from the right edge after scrolling off the left edge.
    /// Off by default: the pipe only comes back on restart.
    pub wrap: bool,
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window_title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    /// Time between two physics/paint steps
    pub tick_period: Duration,
    /// How long the title screen stays up before play starts
    pub title_duration: Duration,
    /// How long "Game over" stays up before the restart
    pub game_over_pause: Duration,
    pub title_text: String,
    pub game_over_text: String,
    /// RGBA colour of title text
    pub title_color: [u8; 4],
    /// Title font size in pixels
    pub title_font_size: f32,
    /// Directory holding `images/` and `fonts/`
    pub asset_root: String,
    pub title_font: String,
    pub background_image: String,
    pub pipe_image: String,
    pub bird: BirdConfig,
    pub pipe: PipeConfig,
}

impl Default for BirdConfig {
    fn default() -> Self {
        Self {
            x: 10,
            start_y: 300.0,
            width: 50,
            height: 43,
            gravity: 0.25,
            jump_speed: 5.0,
            frame_count: 4,
            ticks_per_frame: 10,
        }
    }
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            start_x: 400,
            width: 50,
            height: 300,
            speed: 1,
            inverted: true,
            wrap: false,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Flappy Ferris".to_string(),
            screen_width: 800,
            screen_height: 600,
            tick_period: Duration::from_millis(10),
            title_duration: Duration::from_secs(1),
            game_over_pause: Duration::from_secs(1),
            title_text: "Flappy Ferris".to_string(),
            game_over_text: "Game over".to_string(),
            title_color: [255, 100, 0, 255],
            title_font_size: 20.0,
            asset_root: "res".to_string(),
            title_font: "title.ttf".to_string(),
            background_image: "background.png".to_string(),
            pipe_image: "pipe.png".to_string(),
            bird: BirdConfig::default(),
            pipe: PipeConfig::default(),
        }
    }
}

impl BirdConfig {
    /// File name of animation frame `index` (0-based)
    pub fn frame_image(&self, index: usize) -> String {
        format!("frame-{}.png", index + 1)
    }
}

impl GameConfig {
    /// Check every value the game divides by, sizes textures with, or
    /// integrates
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_zero = [
            (self.screen_width as u64, "screen_width"),
            (self.screen_height as u64, "screen_height"),
            (self.tick_period.as_nanos().min(1) as u64, "tick_period"),
            (self.bird.width as u64, "bird.width"),
            (self.bird.height as u64, "bird.height"),
            (self.bird.frame_count as u64, "bird.frame_count"),
            (self.bird.ticks_per_frame, "bird.ticks_per_frame"),
            (self.pipe.width as u64, "pipe.width"),
            (self.pipe.height as u64, "pipe.height"),
        ];
        if let Some((_, name)) = non_zero.iter().find(|(value, _)| *value == 0) {
            return Err(ConfigError::Zero(*name));
        }

        let positive = [
            (self.title_font_size, "title_font_size"),
            (self.bird.gravity, "bird.gravity"),
            (self.bird.jump_speed, "bird.jump_speed"),
        ];
        if let Some((_, name)) = positive
            .iter()
            .find(|(value, _)| !(value.is_finite() && *value > 0.0))
        {
            return Err(ConfigError::NotPositive(*name));
        }

        Ok(())
    }
}
