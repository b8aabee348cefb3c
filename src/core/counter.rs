/// Drainable frame counter owned by a viewer instance
///
/// Counts frames accepted between FPS refreshes. The refresh drains the
/// value, so each one-second window reports exactly the frames recorded
/// since the previous drain - nothing dropped, nothing double-counted.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameCounter {
    count: u32,
}

impl FrameCounter {
    /// Create a counter at zero
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Record one accepted frame
    pub fn record_frame(&mut self) {
        self.count += 1;
    }

    /// Current count without resetting
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Take the current count and reset it to zero
    pub fn drain_count(&mut self) -> u32 {
        std::mem::take(&mut self.count)
    }
}
