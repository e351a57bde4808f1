#![cfg(target_arch = "wasm32")]
use instant::Instant;
use shared::Shared;
use std::cell::RefCell;
use std::rc::Rc;
use visual_core::{OrchestratorConfig, ProfileTable, VisualOrchestrator};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod bridge;
mod clock;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod sections;
mod shared;
mod style;
mod timeline;

/// The page's orchestrator, shared by listeners, the frame loop and the handle.
pub(crate) type SharedOrchestrator = Rc<Shared<VisualOrchestrator>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("visual-web starting");
    Ok(())
}

/// Live orchestrator plus everything wired to the page. JS keeps this handle
/// and forwards timeline-engine callbacks through it.
///
/// The methods are safe to call from `visual-frame`, `visual-section` and
/// `visual-phase` listeners: calls made while a frame is being broadcast are
/// queued and applied, in order, as soon as that frame finishes.
#[wasm_bindgen]
pub struct OrchestratorHandle {
    orchestrator: SharedOrchestrator,
    listeners: dom::ListenerSet,
    observer: Option<sections::SectionObserver>,
    frame_loop: Option<frame::FrameLoop>,
}

#[wasm_bindgen]
impl OrchestratorHandle {
    /// Scroll progress (0..1) of a pinned section, from an external timeline.
    #[wasm_bindgen(js_name = timelineProgress)]
    pub fn timeline_progress(&self, section: &str, progress: f32) {
        let section = section.to_owned();
        self.orchestrator
            .dispatch(move |o| o.on_timeline_progress(&section, progress));
    }

    #[wasm_bindgen(js_name = timelineLeave)]
    pub fn timeline_leave(&self, section: &str) {
        let section = section.to_owned();
        self.orchestrator.dispatch(move |o| o.on_timeline_leave(&section));
    }

    #[wasm_bindgen(js_name = sectionChange)]
    pub fn section_change(&self, section: &str) {
        let section = section.to_owned();
        self.orchestrator.dispatch(move |o| o.on_section_change(&section));
    }

    #[wasm_bindgen(js_name = currentSection)]
    pub fn current_section(&self) -> String {
        self.orchestrator
            .read()
            .map(|o| o.current_section().to_owned())
            .unwrap_or_default()
    }

    /// Stop the frame loop, remove every listener and release consumers.
    pub fn destroy(&mut self) {
        if let Some(fl) = self.frame_loop.take() {
            fl.stop();
        }
        self.listeners.remove_all();
        if let Some(obs) = self.observer.take() {
            obs.disconnect();
        }
        self.orchestrator.dispatch(|o| o.teardown());
        log::info!("visual-web destroyed");
    }
}

/// Build the orchestrator and wire it to the current page.
///
/// `config_json` overrides the profile table; otherwise an inline
/// `<script id="visual-profiles">` is used, else the built-in table.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<OrchestratorHandle, JsValue> {
    init(config_json).map_err(|e| {
        log::error!("mount error: {:?}", e);
        JsValue::from_str(&format!("{e:#}"))
    })
}

fn load_profiles(document: &web::Document, config_json: Option<String>) -> ProfileTable {
    let json = config_json.or_else(|| dom::element_text(document, constants::CONFIG_ELEMENT_ID));
    let Some(json) = json else {
        return ProfileTable::default();
    };
    match ProfileTable::from_json(&json) {
        Ok(table) => table,
        Err(e) => {
            log::warn!("[config] {e}; using built-in profiles");
            ProfileTable::default()
        }
    }
}

fn init(config_json: Option<String>) -> anyhow::Result<OrchestratorHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let profiles = load_profiles(&document, config_json);
    let orchestrator: SharedOrchestrator = Rc::new(Shared::new(VisualOrchestrator::new(
        OrchestratorConfig {
            profiles,
            ..Default::default()
        },
        Box::new(clock::WallClock),
    )));

    // ---------------- Consumers ----------------
    orchestrator
        .with(|o| {
            if let Some(sink) = style::DomStyleSink::new(&document) {
                o.set_style_sink(Box::new(sink));
            }
            o.subscribe(Box::new(bridge::DomEventBridge::new(window.clone())));
            let initial = o.current_section().to_owned();
            o.subscribe(Box::new(sections::SectionClassToggler::new(
                document.clone(),
                &initial,
            )));
        })
        .ok_or_else(|| anyhow::anyhow!("orchestrator busy during mount"))?;

    // ---------------- Signal sources ----------------
    let mut listeners = dom::ListenerSet::default();
    events::wire_signal_sources(&orchestrator, &window, &document, &mut listeners);
    timeline::wire_scroll_timeline(&orchestrator, &window, &document, &mut listeners);
    let observer = match sections::SectionObserver::observe(&orchestrator, &document) {
        Ok(obs) => obs,
        Err(e) => {
            log::warn!("[sections] {e:#}; section tracking disabled");
            None
        }
    };
    log::info!("[mount] {} listeners wired", listeners.len());

    // Frame loop driven by requestAnimationFrame
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        orchestrator: orchestrator.clone(),
        last_instant: Instant::now(),
    }));
    let frame_loop = frame::start_loop(frame_ctx);

    Ok(OrchestratorHandle {
        orchestrator,
        listeners,
        observer,
        frame_loop: Some(frame_loop),
    })
}
