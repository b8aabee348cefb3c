pub mod cli;
pub mod core;

// Re-export the feed types most callers need
pub use crate::core::{
    encode_frame, ConsoleHost, EdgeDetector, EncodedFrame, FeedClock, FeedFrame, FeedPipeline,
    FeedStats, FeedViewer, FrameCounter, FrameSource, HudHost, ImageTarget, Nv21Frame,
    ProcessingMode, RefreshTimer, Resolution, RunReport, SurfaceRenderer, TargetHost, TestPattern,
    TextTarget,
};
