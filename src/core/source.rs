//! Frame sources that feed the processing pipeline
//!
//! Sources are pull based: callers ask for the next frame when they are
//! ready for one, and a source that is exhausted answers `None`.

use crate::core::frame::{Nv21Frame, Resolution};

/// Anything that can hand out NV21 frames on demand
pub trait FrameSource {
    /// Dimensions every produced frame will have
    fn resolution(&self) -> Resolution;

    /// Rate the source is designed to be pumped at
    fn nominal_fps(&self) -> f32;

    /// Produce the next frame, or `None` when the source is done
    fn next_frame(&mut self) -> Option<Nv21Frame>;
}

/// Synthetic camera feed: a luma gradient with a bright block sweeping
/// across it
///
/// The block has hard borders and shifted chroma, so both the edge
/// detector and the color conversion have something to chew on, and
/// successive frames differ so motion is visible.
pub struct TestPattern {
    resolution: Resolution,
    fps: f32,
    frame_index: u64,
    remaining: Option<u64>,
}

impl TestPattern {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            fps: 30.0,
            frame_index: 0,
            remaining: None,
        }
    }

    /// Stop after `frames` frames instead of running forever
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    fn render(&self) -> Nv21Frame {
        let res = self.resolution;
        let width = res.width as usize;
        let height = res.height as usize;
        let mut data = vec![0u8; res.nv21_len()];

        let block = (width.min(height) / 4).max(2);
        let bx = (self.frame_index as usize * 2) % (width.saturating_sub(block) + 1);
        let by = (height - block) / 2;
        let in_block =
            |x: usize, y: usize| x >= bx && x < bx + block && y >= by && y < by + block;

        for y in 0..height {
            for x in 0..width {
                data[y * width + x] = if in_block(x, y) {
                    235
                } else {
                    16 + (x * 200 / width) as u8
                };
            }
        }

        // Interleaved VU plane at half resolution; the block leans warm
        let frame_size = width * height;
        for cy in 0..height / 2 {
            for cx in 0..width / 2 {
                let (v, u) = if in_block(cx * 2, cy * 2) {
                    (180, 128)
                } else {
                    (128, 128)
                };
                let base = frame_size + cy * width + cx * 2;
                data[base] = v;
                data[base + 1] = u;
            }
        }

        Nv21Frame::new(data, res)
    }
}

impl FrameSource for TestPattern {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn nominal_fps(&self) -> f32 {
        self.fps
    }

    fn next_frame(&mut self) -> Option<Nv21Frame> {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let frame = self.render();
        self.frame_index += 1;
        Some(frame)
    }
}
