// Screen-space geometry helpers

/// Axis-aligned rectangle in screen pixels (origin top-left, y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle covering a whole screen of the given size
    pub const fn screen(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    /// Corners as `[left, top, right, bottom]` in f32, ready for vertex data
    pub fn edges(&self) -> [f32; 4] {
        [
            self.x as f32,
            self.y as f32,
            self.right() as f32,
            self.bottom() as f32,
        ]
    }
}

/// Flip a world y coordinate (y up, origin at the bottom) into screen space
pub fn world_to_screen_y(world_y: f32, screen_height: u32) -> i32 {
    screen_height as i32 - world_y.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 279, 50, 43);
        assert_eq!(rect.right(), 60);
        assert_eq!(rect.bottom(), 322);
        assert_eq!(rect.edges(), [10.0, 279.0, 60.0, 322.0]);
    }

    #[test]
    fn test_screen_rect() {
        assert_eq!(Rect::screen(800, 600), Rect::new(0, 0, 800, 600));
    }

    #[test]
    fn test_world_to_screen_y() {
        assert_eq!(world_to_screen_y(300.0, 600), 300);
        assert_eq!(world_to_screen_y(0.0, 600), 600);
        assert_eq!(world_to_screen_y(600.0, 600), 0);
        assert_eq!(world_to_screen_y(299.6, 600), 300);
    }
}
