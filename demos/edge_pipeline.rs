/// Example running the processing pipeline headlessly in both modes
///
/// Useful for eyeballing per-frame cost: converts and processes sixty
/// pattern frames per mode and prints the accumulated timings. Run with
/// RUST_LOG=debug to see the per-frame numbers as well.

use edgeview::core::{FeedPipeline, FrameSource, ProcessingMode, Resolution, TestPattern};

fn main() {
    env_logger::init();

    println!(
        "Edge Pipeline Demo - started {}",
        chrono::Local::now().format("%H:%M:%S")
    );

    let res = Resolution::new(640, 480);

    for mode in [ProcessingMode::Raw, ProcessingMode::Edges] {
        let mut source = TestPattern::new(res).with_frame_limit(60);
        let mut pipeline = FeedPipeline::new(mode);

        while let Some(frame) = source.next_frame() {
            if let Err(e) = pipeline.process(&frame) {
                eprintln!("processing failed: {e:#}");
                return;
            }
        }

        let stats = pipeline.stats();
        println!(
            "{}: {} frames, avg {:.2} ms, max {:.2} ms",
            mode,
            stats.frames,
            stats.avg_ms(),
            stats.max_ms
        );
    }
}
