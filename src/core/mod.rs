mod clock;
mod convert;
mod counter;
mod edge;
mod frame;
mod gpu_context;
mod hud;
mod payload;
mod pipeline;
mod refresh;
mod source;
mod surface_renderer;
mod targets;
mod viewer;

pub use clock::FeedClock;
pub use convert::{gray_to_rgba, nv21_to_rgba, rgba_to_gray};
pub use counter::FrameCounter;
pub use edge::EdgeDetector;
pub use frame::{EncodedFrame, FeedFrame, Nv21Frame, Resolution};
pub use gpu_context::GpuContext;
pub use hud::{ConsoleHost, HudHost, HudModel};
pub use payload::{
    encode_frame, gif_data_uri, jpeg_data_uri, placeholder_data_uri, DEFAULT_JPEG_QUALITY,
    PLACEHOLDER_GIF_BASE64,
};
pub use pipeline::{FeedPipeline, FeedStats, ProcessingMode, RunReport};
pub use refresh::RefreshTimer;
pub use source::{FrameSource, TestPattern};
pub use surface_renderer::SurfaceRenderer;
pub use targets::{
    ImageTarget, TargetHost, TextTarget, FPS_TARGET_ID, FRAME_TARGET_ID, RESOLUTION_TARGET_ID,
};
pub use viewer::{FeedViewer, INITIAL_RESOLUTION, REFRESH_INTERVAL};
