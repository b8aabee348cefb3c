/// Example demonstrating the frame viewer against console targets
///
/// Pumps a fixed payload through the viewer at roughly ten frames per
/// second and lets the periodic refresh publish FPS figures, the same
/// flow a windowed run drives with real camera frames.

use std::thread;
use std::time::Duration;

use edgeview::core::{ConsoleHost, EncodedFrame, FeedClock, FeedViewer, PLACEHOLDER_GIF_BASE64};

fn main() {
    println!("Frame Viewer Demo\n");

    let host = ConsoleHost::new();
    let mut viewer = FeedViewer::bind(&host);
    let mut clock = FeedClock::new();

    // Feed without a camera: one payload, declared at 1280x720,
    // pushed every 100 ms for about three seconds
    for _ in 0..30 {
        viewer.on_new_frame(&EncodedFrame::new(PLACEHOLDER_GIF_BASE64, 1280, 720));
        viewer.tick(clock.tick());
        thread::sleep(Duration::from_millis(100));
    }
    viewer.tick(clock.tick());

    println!("\nPublished FPS samples: {:?}", host.fps_samples());
}
