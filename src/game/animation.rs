// Tick-driven sprite animation

/// A looping animation whose frame is derived from a tick counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAnimation {
    /// Number of frames in the loop
    frame_count: usize,
    /// Ticks each frame stays on screen
    ticks_per_frame: u64,
}

impl FrameAnimation {
    /// Create a looping animation. Zero counts are clamped to one.
    pub fn new(frame_count: usize, ticks_per_frame: u64) -> Self {
        Self {
            frame_count: frame_count.max(1),
            ticks_per_frame: ticks_per_frame.max(1),
        }
    }

    /// Frame shown at `tick`: `(tick / ticks_per_frame) % frame_count`
    pub fn frame_at(&self, tick: u64) -> usize {
        ((tick / self.ticks_per_frame) % self.frame_count as u64) as usize
    }
}
