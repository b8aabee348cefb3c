//! Per-frame processing pipeline and its bookkeeping
//!
//! Every frame takes the same first step (NV21 to RGBA); what happens
//! next depends on the active [`ProcessingMode`]. Timings are logged per
//! frame at debug level and folded into [`FeedStats`].

use std::time::Instant;

use serde::Serialize;

use crate::core::convert::{gray_to_rgba, nv21_to_rgba, rgba_to_gray};
use crate::core::edge::EdgeDetector;
use crate::core::frame::{FeedFrame, Nv21Frame, Resolution};

/// What the pipeline does to each frame after color conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// Pass the converted RGBA through untouched
    Raw,
    /// Run edge detection and show the binary mask
    Edges,
}

impl Default for ProcessingMode {
    fn default() -> Self {
        Self::Edges
    }
}

impl ProcessingMode {
    /// The other mode, for toggle controls
    pub fn toggled(self) -> Self {
        match self {
            Self::Raw => Self::Edges,
            Self::Edges => Self::Raw,
        }
    }
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Edges => write!(f, "edges"),
        }
    }
}

impl std::str::FromStr for ProcessingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "edges" | "processed" => Ok(Self::Edges),
            other => Err(format!("unknown mode '{other}', expected 'raw' or 'edges'")),
        }
    }
}

/// Rolling processing-time statistics
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct FeedStats {
    pub frames: u64,
    pub total_ms: f64,
    pub max_ms: f64,
}

impl FeedStats {
    pub fn record(&mut self, elapsed_ms: f64) {
        self.frames += 1;
        self.total_ms += elapsed_ms;
        if elapsed_ms > self.max_ms {
            self.max_ms = elapsed_ms;
        }
    }

    pub fn avg_ms(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.total_ms / self.frames as f64
        }
    }
}

/// Converts and optionally edge-filters camera frames
pub struct FeedPipeline {
    detector: EdgeDetector,
    mode: ProcessingMode,
    stats: FeedStats,
}

impl FeedPipeline {
    pub fn new(mode: ProcessingMode) -> Self {
        Self {
            detector: EdgeDetector::default(),
            mode,
            stats: FeedStats::default(),
        }
    }

    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ProcessingMode) {
        if mode != self.mode {
            log::info!("processing mode set to {mode}");
            self.mode = mode;
        }
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    /// Run one frame through conversion and the active mode
    pub fn process(&mut self, frame: &Nv21Frame) -> anyhow::Result<FeedFrame> {
        let started = Instant::now();

        let rgba = nv21_to_rgba(frame)?;
        let output = match self.mode {
            ProcessingMode::Raw => rgba,
            ProcessingMode::Edges => {
                let gray = rgba_to_gray(&rgba.pixels, rgba.resolution)?;
                let edges = self.detector.detect(&gray, rgba.resolution)?;
                FeedFrame::new(gray_to_rgba(&edges, rgba.resolution)?, rgba.resolution)
            }
        };

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        log::debug!("process ms: {elapsed_ms:.2}");
        self.stats.record(elapsed_ms);

        Ok(output)
    }
}

/// Summary of a finished headless run, printable or JSON-serializable
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub mode: ProcessingMode,
    pub resolution: String,
    pub frames: u64,
    pub elapsed_secs: f64,
    pub avg_process_ms: f64,
    pub max_process_ms: f64,
    pub fps_samples: Vec<u32>,
}

impl RunReport {
    pub fn new(
        mode: ProcessingMode,
        resolution: Resolution,
        stats: &FeedStats,
        elapsed_secs: f64,
        fps_samples: Vec<u32>,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            mode,
            resolution: resolution.to_string(),
            frames: stats.frames,
            elapsed_secs,
            avg_process_ms: stats.avg_ms(),
            max_process_ms: stats.max_ms,
            fps_samples,
        }
    }

    pub fn print_summary(&self) {
        println!("=== Feed Run Report ===");
        println!("Generated: {}", self.generated_at);
        println!("Mode: {}", self.mode);
        println!("Resolution: {}", self.resolution);
        println!("Frames: {}", self.frames);
        println!("Elapsed: {:.2}s", self.elapsed_secs);
        println!(
            "Processing: avg {:.2} ms, max {:.2} ms",
            self.avg_process_ms, self.max_process_ms
        );
        if !self.fps_samples.is_empty() {
            let rendered: Vec<String> = self.fps_samples.iter().map(|f| f.to_string()).collect();
            println!("FPS samples: {}", rendered.join(", "));
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::{FrameSource, TestPattern};

    #[test]
    fn test_mode_parses_from_str() {
        assert_eq!("raw".parse::<ProcessingMode>(), Ok(ProcessingMode::Raw));
        assert_eq!("edges".parse::<ProcessingMode>(), Ok(ProcessingMode::Edges));
        assert_eq!("EDGES".parse::<ProcessingMode>(), Ok(ProcessingMode::Edges));
        // legacy alias from the on-screen toggle label
        assert_eq!(
            "processed".parse::<ProcessingMode>(),
            Ok(ProcessingMode::Edges)
        );
        assert!("sepia".parse::<ProcessingMode>().is_err());
    }

    #[test]
    fn test_toggle_flips_between_modes() {
        assert_eq!(ProcessingMode::Raw.toggled(), ProcessingMode::Edges);
        assert_eq!(ProcessingMode::Edges.toggled(), ProcessingMode::Raw);
    }

    #[test]
    fn test_raw_mode_matches_plain_conversion() {
        let mut source = TestPattern::new(Resolution::new(32, 32));
        let frame = source.next_frame().unwrap();

        let mut pipeline = FeedPipeline::new(ProcessingMode::Raw);
        let out = pipeline.process(&frame).unwrap();
        let direct = nv21_to_rgba(&frame).unwrap();

        assert_eq!(out.pixels, direct.pixels);
        assert_eq!(out.resolution, frame.resolution);
    }

    #[test]
    fn test_edges_mode_outputs_binary_mask() {
        let mut source = TestPattern::new(Resolution::new(64, 64));
        let frame = source.next_frame().unwrap();

        let mut pipeline = FeedPipeline::new(ProcessingMode::Edges);
        let out = pipeline.process(&frame).unwrap();

        assert_eq!(out.pixels.len(), frame.resolution.rgba_len());
        for px in out.pixels.chunks_exact(4) {
            assert!(px[0] == 0 || px[0] == 255);
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_stats_accumulate_per_frame() {
        let mut source = TestPattern::new(Resolution::new(32, 32));
        let mut pipeline = FeedPipeline::new(ProcessingMode::Edges);
        for _ in 0..3 {
            let frame = source.next_frame().unwrap();
            pipeline.process(&frame).unwrap();
        }

        let stats = pipeline.stats();
        assert_eq!(stats.frames, 3);
        assert!(stats.avg_ms() >= 0.0);
        assert!(stats.max_ms >= stats.avg_ms());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut stats = FeedStats::default();
        stats.record(4.0);
        stats.record(6.0);

        let report = RunReport::new(
            ProcessingMode::Edges,
            Resolution::new(640, 480),
            &stats,
            2.0,
            vec![30, 29],
        );
        let json = report.to_json().unwrap();
        assert!(json.contains("\"mode\": \"edges\""));
        assert!(json.contains("\"resolution\": \"640x480\""));
        assert!(json.contains("\"frames\": 2"));
    }
}
