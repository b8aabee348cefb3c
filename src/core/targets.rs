//! Display target seams for the feed viewer.
//!
//! The viewer writes through these handles and never learns what sits
//! behind them: an on-screen overlay, a console, or a recording double in
//! tests.

/// Stable identifier of the image surface
pub const FRAME_TARGET_ID: &str = "frame";

/// Stable identifier of the FPS label
pub const FPS_TARGET_ID: &str = "fps";

/// Stable identifier of the resolution label
pub const RESOLUTION_TARGET_ID: &str = "resolution";

/// Image surface accepting a data URI source
pub trait ImageTarget {
    /// Replace the displayed image source
    fn set_source(&self, uri: &str);
}

/// Text surface holding one label line
pub trait TextTarget {
    /// Replace the label text
    fn set_text(&self, text: &str);
}

/// Resolves display targets by stable id
///
/// Each target is looked up exactly once when a viewer is built. A `None`
/// answer permanently disables that slot; the viewer never asks again and
/// never treats the absence as an error.
pub trait TargetHost {
    fn image_target(&self, id: &str) -> Option<Box<dyn ImageTarget>>;
    fn text_target(&self, id: &str) -> Option<Box<dyn TextTarget>>;
}
