use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use edgeview::cli::Cli;
use edgeview::core::{
    encode_frame, ConsoleHost, FeedClock, FeedFrame, FeedPipeline, FeedViewer, FrameSource,
    HudHost, RefreshTimer, RunReport, SurfaceRenderer, TestPattern,
};

// === Constants ===

const INITIAL_WINDOW_WIDTH: u32 = 960;
const INITIAL_WINDOW_HEIGHT: u32 = 540;
const DEFAULT_HEADLESS_FRAMES: u64 = 300;

// === Type Aliases ===

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

// === Application ===

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    source: TestPattern,
    pipeline: FeedPipeline,
    viewer: FeedViewer,
    hud: HudHost,
    clock: FeedClock,
    pacer: RefreshTimer,
    latest: Option<FeedFrame>,
}

impl App {
    fn new(cli: Cli) -> Self {
        let hud = HudHost::new();
        let viewer = FeedViewer::bind(&hud);
        let source = TestPattern::new(cli.resolution()).with_fps(cli.rate);
        let pipeline = FeedPipeline::new(cli.mode);
        let pacer = RefreshTimer::new(1.0 / cli.rate);

        Self {
            cli,
            window: None,
            renderer: None,
            source,
            pipeline,
            viewer,
            hud,
            clock: FeedClock::new(),
            pacer,
            latest: None,
        }
    }

    /// Pull, process, and publish one source frame
    fn produce_frame(&mut self) -> Option<FeedFrame> {
        let raw = self.source.next_frame()?;

        let frame = match self.pipeline.process(&raw) {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("frame processing failed: {e:#}");
                return None;
            }
        };
        let encoded = match encode_frame(&frame, self.cli.quality) {
            Ok(encoded) => encoded,
            Err(e) => {
                log::warn!("frame encode failed: {e:#}");
                return None;
            }
        };

        self.viewer.on_new_frame(&encoded);
        Some(frame)
    }

    fn redraw(&mut self) {
        let delta = self.clock.tick();

        // The feed runs at its own rate, independent of redraws
        let fresh = if self.pacer.tick(delta) {
            self.produce_frame()
        } else {
            None
        };
        self.viewer.tick(delta);

        let has_fresh = fresh.is_some();
        if has_fresh {
            self.latest = fresh;
        }

        let mode = self.pipeline.mode();
        let paused = !self.viewer.is_running();
        let model = self.hud.model();
        let model = model.borrow();

        if let Some(renderer) = &mut self.renderer {
            let upload = if has_fresh { self.latest.as_ref() } else { None };
            let result = renderer.present(upload, |ctx| {
                egui::Window::new("HUD")
                    .title_bar(false)
                    .resizable(false)
                    .fixed_pos(egui::pos2(10.0, 10.0))
                    .frame(egui::Frame::NONE)
                    .show(ctx, |ui| {
                        ui.label(
                            egui::RichText::new(&model.fps)
                                .size(32.0)
                                .color(egui::Color32::from_rgb(74, 158, 255)),
                        );
                        ui.label(
                            egui::RichText::new(&model.resolution)
                                .size(14.0)
                                .color(egui::Color32::GRAY),
                        );
                        ui.label(
                            egui::RichText::new(format!("Mode: {}", mode))
                                .size(14.0)
                                .color(egui::Color32::GRAY),
                        );
                        // The full data URI runs to hundreds of kilobytes
                        let source_kind = model.image_source.split(',').next().unwrap_or("");
                        ui.label(
                            egui::RichText::new(format!(
                                "Source: {} ({} chars)",
                                source_kind,
                                model.image_source.len()
                            ))
                            .size(11.0)
                            .color(egui::Color32::DARK_GRAY),
                        );
                        if paused {
                            ui.label(
                                egui::RichText::new("refresh paused")
                                    .size(14.0)
                                    .color(egui::Color32::YELLOW),
                            );
                        }
                    });
            });
            if let Err(e) = result {
                eprintln!("Render error: {}", e);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let title = format!("EdgeView - {}", self.cli.resolution());
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title(title)
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer = match SurfaceRenderer::new(window.clone(), self.cli.resolution()) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to initialize display: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.renderer = Some(renderer);
            self.clock.restart();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let Some(renderer) = &mut self.renderer {
            if renderer.handle_event(&event) {
                return; // egui consumed the event
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } => match key {
                KeyCode::KeyM => self.pipeline.toggle_mode(),
                KeyCode::KeyP => {
                    if self.viewer.is_running() {
                        self.viewer.stop();
                        log::info!("fps refresh stopped");
                    } else {
                        self.viewer.start();
                        log::info!("fps refresh started");
                    }
                }
                _ => {}
            },
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

// === Headless Mode ===

/// Drive the full pipeline without a window
///
/// Console targets stand in for the HUD. The run sleeps a frame interval
/// between iterations, so published FPS figures land close to the
/// requested rate.
fn run_headless(cli: &Cli) -> anyhow::Result<()> {
    let host = ConsoleHost::new();
    let mut viewer = FeedViewer::bind(&host);

    let frames = cli.frames.unwrap_or(DEFAULT_HEADLESS_FRAMES);
    let mut source = TestPattern::new(cli.resolution())
        .with_fps(cli.rate)
        .with_frame_limit(frames);
    let mut pipeline = FeedPipeline::new(cli.mode);

    let interval = std::time::Duration::from_secs_f32(1.0 / cli.rate);
    let mut clock = FeedClock::new();

    while let Some(raw) = source.next_frame() {
        let frame = pipeline.process(&raw)?;
        let encoded = encode_frame(&frame, cli.quality)?;
        viewer.on_new_frame(&encoded);
        viewer.tick(clock.tick());
        std::thread::sleep(interval);
    }

    let report = RunReport::new(
        cli.mode,
        cli.resolution(),
        &pipeline.stats(),
        clock.elapsed_secs(),
        host.fps_samples(),
    );
    if cli.report_json {
        println!("{}", report.to_json()?);
    } else {
        report.print_summary();
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        eprintln!("Invalid arguments: {}", e);
        std::process::exit(2);
    }

    if cli.headless {
        run_headless(&cli)?;
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    println!("EdgeView - Controls: M toggles mode, P pauses FPS refresh, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
