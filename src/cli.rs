// cli.rs - Command-line interface configuration
use clap::Parser;

use crate::core::{ProcessingMode, Resolution, DEFAULT_JPEG_QUALITY};

#[derive(Parser, Debug, Clone)]
#[command(name = "edgeview")]
#[command(about = "Camera-style feed viewer with edge detection", long_about = None)]
pub struct Cli {
    /// Feed width in pixels (must be even)
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Feed height in pixels (must be even)
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Frames per second to pump the source at
    #[arg(long, default_value_t = 30.0)]
    pub rate: f32,

    /// Processing mode: raw or edges
    #[arg(long, default_value = "edges")]
    pub mode: ProcessingMode,

    /// JPEG quality for encoded frames
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Run without a window, writing display targets to the console
    #[arg(long, default_value = "false")]
    pub headless: bool,

    /// Stop a headless run after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Print the headless run report as JSON
    #[arg(long = "report-json", default_value = "false")]
    pub report_json: bool,
}

impl Cli {
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err("feed dimensions must be non-zero".into());
        }
        if self.width % 2 != 0 || self.height % 2 != 0 {
            // NV21 chroma is subsampled 2x2
            return Err(format!(
                "feed dimensions must be even, got {}x{}",
                self.width, self.height
            ));
        }
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(format!("rate must be positive, got {}", self.rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> Cli {
        Cli {
            width: 640,
            height: 480,
            rate: 30.0,
            mode: ProcessingMode::Edges,
            quality: DEFAULT_JPEG_QUALITY,
            headless: false,
            frames: None,
            report_json: false,
        }
    }

    #[test]
    fn defaults_validate() {
        assert!(base_cli().validate().is_ok());
    }

    #[test]
    fn odd_dimensions_are_rejected() {
        let mut cli = base_cli();
        cli.width = 641;
        assert!(cli.validate().is_err());

        let mut cli = base_cli();
        cli.height = 0;
        assert!(cli.validate().is_err());
    }

    #[test]
    fn rate_must_be_positive_and_finite() {
        let mut cli = base_cli();
        cli.rate = 0.0;
        assert!(cli.validate().is_err());

        cli.rate = f32::INFINITY;
        assert!(cli.validate().is_err());
    }
}
