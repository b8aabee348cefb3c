use std::cell::RefCell;
use std::rc::Rc;

use edgeview::core::{
    EncodedFrame, FeedViewer, ImageTarget, TargetHost, TextTarget, FPS_TARGET_ID, FRAME_TARGET_ID,
    RESOLUTION_TARGET_ID,
};

/// Recording target for testing; usable as either target flavor
#[derive(Clone, Default)]
struct Recorder {
    writes: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    fn last(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }

    fn count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl TextTarget for Recorder {
    fn set_text(&self, text: &str) {
        self.writes.borrow_mut().push(text.to_string());
    }
}

impl ImageTarget for Recorder {
    fn set_source(&self, uri: &str) {
        self.writes.borrow_mut().push(uri.to_string());
    }
}

/// Host serving recording targets for the three well-known ids, with
/// individual ids optionally withheld to simulate missing targets
#[derive(Clone, Default)]
struct RecordingHost {
    frame: Recorder,
    resolution: Recorder,
    fps: Recorder,
    withheld: Vec<&'static str>,
}

impl RecordingHost {
    fn without(mut self, id: &'static str) -> Self {
        self.withheld.push(id);
        self
    }

    fn is_withheld(&self, id: &str) -> bool {
        self.withheld.iter().any(|w| *w == id)
    }
}

impl TargetHost for RecordingHost {
    fn image_target(&self, id: &str) -> Option<Box<dyn ImageTarget>> {
        if self.is_withheld(id) || id != FRAME_TARGET_ID {
            return None;
        }
        Some(Box::new(self.frame.clone()))
    }

    fn text_target(&self, id: &str) -> Option<Box<dyn TextTarget>> {
        if self.is_withheld(id) {
            return None;
        }
        match id {
            RESOLUTION_TARGET_ID => Some(Box::new(self.resolution.clone())),
            FPS_TARGET_ID => Some(Box::new(self.fps.clone())),
            _ => None,
        }
    }
}

// ============================================================================
// Initialization Tests
// ============================================================================

#[test]
fn test_bind_writes_placeholder_and_default_resolution() {
    let host = RecordingHost::default();
    let _viewer = FeedViewer::bind(&host);

    assert_eq!(
        host.frame.writes(),
        vec!["data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7"]
    );
    assert_eq!(host.resolution.writes(), vec!["Resolution: 640x480"]);
    assert!(host.fps.writes().is_empty());
}

#[test]
fn test_missing_targets_are_skipped_silently() {
    let host = RecordingHost::default()
        .without(FRAME_TARGET_ID)
        .without(FPS_TARGET_ID);
    let mut viewer = FeedViewer::bind(&host);

    viewer.on_new_frame(&EncodedFrame::new("AAAA", 1280, 720));
    viewer.tick(1.0);

    // Only the resolution target exists, and it alone saw writes
    assert!(host.frame.writes().is_empty());
    assert!(host.fps.writes().is_empty());
    assert_eq!(
        host.resolution.writes(),
        vec!["Resolution: 640x480", "Resolution: 1280x720"]
    );
}

// ============================================================================
// Frame Display Tests
// ============================================================================

#[test]
fn test_frame_updates_image_and_resolution() {
    let host = RecordingHost::default();
    let mut viewer = FeedViewer::bind(&host);

    viewer.on_new_frame(&EncodedFrame::new("AAAA", 1280, 720));

    assert_eq!(
        host.frame.last().unwrap(),
        "data:image/jpeg;base64,AAAA"
    );
    assert_eq!(host.resolution.last().unwrap(), "Resolution: 1280x720");
}

#[test]
fn test_degenerate_frame_is_passed_through_and_counted() {
    let host = RecordingHost::default();
    let mut viewer = FeedViewer::bind(&host);

    viewer.on_new_frame(&EncodedFrame::new("", 0, 0));
    viewer.tick(1.0);

    assert_eq!(host.frame.last().unwrap(), "data:image/jpeg;base64,");
    assert_eq!(host.resolution.last().unwrap(), "Resolution: 0x0");
    assert_eq!(host.fps.writes(), vec!["FPS: 1"]);
}

#[test]
fn test_every_frame_counts_exactly_once() {
    let host = RecordingHost::default();
    let mut viewer = FeedViewer::bind(&host);

    for i in 0..10 {
        viewer.on_new_frame(&EncodedFrame::new(format!("frame{}", i), 640, 480));
    }
    viewer.tick(1.0);

    assert_eq!(host.fps.writes(), vec!["FPS: 10"]);
    // One placeholder write plus one per frame
    assert_eq!(host.frame.count(), 11);
}

// ============================================================================
// FPS Window Tests
// ============================================================================

#[test]
fn test_windows_report_independent_counts() {
    let host = RecordingHost::default();
    let mut viewer = FeedViewer::bind(&host);

    for _ in 0..5 {
        viewer.on_new_frame(&EncodedFrame::new("x", 1, 1));
    }
    viewer.tick(1.0);
    for _ in 0..3 {
        viewer.on_new_frame(&EncodedFrame::new("x", 1, 1));
    }
    viewer.tick(1.0);

    assert_eq!(host.fps.writes(), vec!["FPS: 5", "FPS: 3"]);
}

#[test]
fn test_idle_window_reports_zero() {
    let host = RecordingHost::default();
    let mut viewer = FeedViewer::bind(&host);

    viewer.tick(1.0);

    assert_eq!(host.fps.writes(), vec!["FPS: 0"]);
}

#[test]
fn test_window_resets_even_without_fps_target() {
    let host = RecordingHost::default().without(FPS_TARGET_ID);
    let mut viewer = FeedViewer::bind(&host);

    for _ in 0..5 {
        viewer.on_new_frame(&EncodedFrame::new("x", 1, 1));
    }
    viewer.tick(1.0);

    // The drain still happened; nothing carries into the next window
    assert_eq!(viewer.pending_frames(), 0);
}

#[test]
fn test_sub_interval_deltas_accumulate() {
    let host = RecordingHost::default();
    let mut viewer = FeedViewer::bind(&host);

    viewer.on_new_frame(&EncodedFrame::new("x", 1, 1));
    viewer.tick(0.4);
    viewer.tick(0.4);
    assert!(host.fps.writes().is_empty());

    viewer.tick(0.4);
    assert_eq!(host.fps.writes(), vec!["FPS: 1"]);
}

#[test]
fn test_oversized_delta_fires_once_per_tick() {
    let host = RecordingHost::default();
    let mut viewer = FeedViewer::bind(&host);

    // A long stall publishes one window per subsequent tick, not a burst
    viewer.tick(3.5);
    assert_eq!(host.fps.count(), 1);

    viewer.tick(0.0);
    viewer.tick(0.0);
    assert_eq!(host.fps.count(), 3);

    viewer.tick(0.0);
    assert_eq!(host.fps.count(), 3);
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_stop_halts_publication_but_not_counting() {
    let host = RecordingHost::default();
    let mut viewer = FeedViewer::bind(&host);

    viewer.stop();
    assert!(!viewer.is_running());

    viewer.on_new_frame(&EncodedFrame::new("x", 1, 1));
    viewer.on_new_frame(&EncodedFrame::new("x", 1, 1));
    viewer.tick(10.0);
    assert!(host.fps.writes().is_empty());

    viewer.start();
    assert!(viewer.is_running());
    viewer.tick(1.0);
    assert_eq!(host.fps.writes(), vec!["FPS: 2"]);
}

#[test]
fn test_start_begins_a_fresh_interval() {
    let host = RecordingHost::default();
    let mut viewer = FeedViewer::bind(&host);

    viewer.tick(0.9);
    viewer.stop();
    viewer.start();

    // The 0.9s accumulated before the restart does not count
    viewer.tick(0.9);
    assert!(host.fps.writes().is_empty());
    viewer.tick(0.1);
    assert_eq!(host.fps.writes(), vec!["FPS: 0"]);
}

#[test]
fn test_frames_shown_while_stopped() {
    let host = RecordingHost::default();
    let mut viewer = FeedViewer::bind(&host);

    viewer.stop();
    viewer.on_new_frame(&EncodedFrame::new("BBBB", 320, 240));

    // Stopping only pauses FPS publication, not frame display
    assert_eq!(host.frame.last().unwrap(), "data:image/jpeg;base64,BBBB");
    assert_eq!(host.resolution.last().unwrap(), "Resolution: 320x240");
}
