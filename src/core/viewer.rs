//! Frame feed viewer: routes frames and stats to bound display targets
//!
//! The viewer owns no pixels and no rendering. It resolves its three
//! display targets once at construction, writes formatted strings to
//! whichever ones exist, counts frames, and publishes an FPS figure on a
//! one second cadence driven by [`FeedViewer::tick`].

use crate::core::counter::FrameCounter;
use crate::core::frame::{EncodedFrame, Resolution};
use crate::core::payload::{jpeg_data_uri, placeholder_data_uri};
use crate::core::refresh::RefreshTimer;
use crate::core::targets::{
    ImageTarget, TargetHost, TextTarget, FPS_TARGET_ID, FRAME_TARGET_ID, RESOLUTION_TARGET_ID,
};

/// Seconds between FPS publications
pub const REFRESH_INTERVAL: f32 = 1.0;

/// Resolution shown before any frame has arrived
pub const INITIAL_RESOLUTION: Resolution = Resolution::new(640, 480);

pub struct FeedViewer {
    image: Option<Box<dyn ImageTarget>>,
    resolution: Option<Box<dyn TextTarget>>,
    fps: Option<Box<dyn TextTarget>>,
    counter: FrameCounter,
    refresh: RefreshTimer,
}

impl FeedViewer {
    /// Build a viewer by resolving targets from a host
    ///
    /// Each of the three well-known ids is looked up exactly once.
    /// Missing targets stay missing for the life of the viewer; writes to
    /// them are silently skipped.
    pub fn bind(host: &dyn TargetHost) -> Self {
        Self::with_targets(
            host.image_target(FRAME_TARGET_ID),
            host.text_target(RESOLUTION_TARGET_ID),
            host.text_target(FPS_TARGET_ID),
        )
    }

    /// Build a viewer from already-resolved targets
    pub fn with_targets(
        image: Option<Box<dyn ImageTarget>>,
        resolution: Option<Box<dyn TextTarget>>,
        fps: Option<Box<dyn TextTarget>>,
    ) -> Self {
        let viewer = Self {
            image,
            resolution,
            fps,
            counter: FrameCounter::new(),
            refresh: RefreshTimer::new(REFRESH_INTERVAL),
        };

        if let Some(target) = &viewer.image {
            target.set_source(&placeholder_data_uri());
        }
        if let Some(target) = &viewer.resolution {
            target.set_text(&format!("Resolution: {INITIAL_RESOLUTION}"));
        }

        viewer
    }

    /// Display one frame
    ///
    /// The payload and dimensions are taken at face value: an empty
    /// payload or zero dimensions still update the targets and still
    /// count as one displayed frame.
    pub fn on_new_frame(&mut self, frame: &EncodedFrame) {
        if let Some(target) = &self.image {
            target.set_source(&jpeg_data_uri(&frame.payload));
        }
        if let Some(target) = &self.resolution {
            target.set_text(&format!("Resolution: {}x{}", frame.width, frame.height));
        }
        self.counter.record_frame();
    }

    /// Advance the refresh timer by `delta` seconds
    ///
    /// When a full interval has elapsed the counter is drained and the
    /// FPS target updated. The drain happens whether or not an FPS target
    /// exists, so a window's count is never carried into the next one.
    pub fn tick(&mut self, delta: f32) {
        if self.refresh.tick(delta) {
            let frames = self.counter.drain_count();
            if let Some(target) = &self.fps {
                target.set_text(&format!("FPS: {frames}"));
            }
        }
    }

    /// Resume periodic FPS publication with a fresh interval
    pub fn start(&mut self) {
        self.refresh.start();
    }

    /// Halt periodic FPS publication
    ///
    /// Frames keep counting while stopped; they are reported in the first
    /// window after [`FeedViewer::start`].
    pub fn stop(&mut self) {
        self.refresh.stop();
    }

    pub fn is_running(&self) -> bool {
        self.refresh.is_running()
    }

    /// Frames recorded since the last drain
    pub fn pending_frames(&self) -> u32 {
        self.counter.count()
    }
}
