//! Display target hosts for the windowed HUD and the headless console
//!
//! [`HudHost`] backs the egui overlay: its targets write into a shared
//! [`HudModel`] that the redraw handler reads each frame. [`ConsoleHost`]
//! is the headless stand-in; it prints to stdout and keeps the published
//! FPS values for the run report.

use std::cell::RefCell;
use std::rc::Rc;

use super::targets::{
    ImageTarget, TargetHost, TextTarget, FPS_TARGET_ID, FRAME_TARGET_ID, RESOLUTION_TARGET_ID,
};

/// Strings the HUD overlay renders, written by viewer targets
#[derive(Debug, Default)]
pub struct HudModel {
    pub image_source: String,
    pub resolution: String,
    pub fps: String,
}

/// Target host whose targets feed the egui HUD
#[derive(Clone, Default)]
pub struct HudHost {
    model: Rc<RefCell<HudModel>>,
}

impl HudHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> Rc<RefCell<HudModel>> {
        Rc::clone(&self.model)
    }
}

impl TargetHost for HudHost {
    fn image_target(&self, id: &str) -> Option<Box<dyn ImageTarget>> {
        (id == FRAME_TARGET_ID).then(|| {
            Box::new(HudImageTarget {
                model: Rc::clone(&self.model),
            }) as Box<dyn ImageTarget>
        })
    }

    fn text_target(&self, id: &str) -> Option<Box<dyn TextTarget>> {
        let field = match id {
            RESOLUTION_TARGET_ID => HudField::Resolution,
            FPS_TARGET_ID => HudField::Fps,
            _ => return None,
        };
        Some(Box::new(HudTextTarget {
            model: Rc::clone(&self.model),
            field,
        }))
    }
}

enum HudField {
    Resolution,
    Fps,
}

struct HudTextTarget {
    model: Rc<RefCell<HudModel>>,
    field: HudField,
}

impl TextTarget for HudTextTarget {
    fn set_text(&self, text: &str) {
        let mut model = self.model.borrow_mut();
        match self.field {
            HudField::Resolution => model.resolution = text.to_string(),
            HudField::Fps => model.fps = text.to_string(),
        }
    }
}

struct HudImageTarget {
    model: Rc<RefCell<HudModel>>,
}

impl ImageTarget for HudImageTarget {
    fn set_source(&self, uri: &str) {
        self.model.borrow_mut().image_source = uri.to_string();
    }
}

/// Target host for headless runs
///
/// Resolution changes and FPS figures go to stdout; image sources only
/// hit the debug log because data URIs run to hundreds of kilobytes.
#[derive(Clone, Default)]
pub struct ConsoleHost {
    fps_samples: Rc<RefCell<Vec<u32>>>,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// FPS values published so far, in order
    pub fn fps_samples(&self) -> Vec<u32> {
        self.fps_samples.borrow().clone()
    }
}

impl TargetHost for ConsoleHost {
    fn image_target(&self, id: &str) -> Option<Box<dyn ImageTarget>> {
        (id == FRAME_TARGET_ID).then(|| Box::new(ConsoleImageTarget) as Box<dyn ImageTarget>)
    }

    fn text_target(&self, id: &str) -> Option<Box<dyn TextTarget>> {
        match id {
            RESOLUTION_TARGET_ID => Some(Box::new(ConsoleResolutionTarget {
                last: RefCell::new(None),
            })),
            FPS_TARGET_ID => Some(Box::new(ConsoleFpsTarget {
                samples: Rc::clone(&self.fps_samples),
            })),
            _ => None,
        }
    }
}

struct ConsoleImageTarget;

impl ImageTarget for ConsoleImageTarget {
    fn set_source(&self, uri: &str) {
        log::debug!("frame source set ({} chars)", uri.len());
    }
}

struct ConsoleResolutionTarget {
    last: RefCell<Option<String>>,
}

impl TextTarget for ConsoleResolutionTarget {
    fn set_text(&self, text: &str) {
        // Every frame repeats the resolution; only changes are news
        let mut last = self.last.borrow_mut();
        if last.as_deref() != Some(text) {
            println!("{text}");
            *last = Some(text.to_string());
        }
    }
}

struct ConsoleFpsTarget {
    samples: Rc<RefCell<Vec<u32>>>,
}

impl TextTarget for ConsoleFpsTarget {
    fn set_text(&self, text: &str) {
        println!("{text}");
        if let Some(value) = text.strip_prefix("FPS: ").and_then(|v| v.parse().ok()) {
            self.samples.borrow_mut().push(value);
        }
    }
}
