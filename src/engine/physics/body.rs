// Vertical kinematic body for falling/jumping entities

/// A body that only moves along the world y axis (y up).
///
/// Velocity is expressed as a fall speed: positive values move the body
/// down, negative values move it up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalBody {
    /// Height above the bottom of the world
    pub position: f32,
    /// Fall speed per tick
    pub velocity: f32,
}

impl VerticalBody {
    /// Create a body at rest
    pub fn new(position: f32) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }

    /// Advance one tick: move by the current velocity, then accelerate
    pub fn step(&mut self, gravity: f32) {
        self.position -= self.velocity;
        self.velocity += gravity;
    }

    /// Replace the current velocity with an upward speed
    pub fn launch(&mut self, speed: f32) {
        self.velocity = -speed;
    }

    /// Put the body back at `position`, at rest
    pub fn reset(&mut self, position: f32) {
        *self = Self::new(position);
    }
}
