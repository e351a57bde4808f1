//! Re-broadcasts orchestrator output as DOM `CustomEvent`s on `window`, so
//! JS-side canvas/WebGL renderers can consume it without linking to Rust.

use crate::constants::{FRAME_EVENT, PHASE_EVENT, SECTION_EVENT};
use serde::Serialize;
use visual_core::{PhaseChange, SectionTransition, VisualFrame, VisualSubscriber};
use wasm_bindgen::JsValue;
use web_sys as web;

pub struct DomEventBridge {
    window: web::Window,
}

impl DomEventBridge {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }

    fn dispatch<T: Serialize>(&self, name: &str, detail: &T) {
        if let Err(e) = self.try_dispatch(name, detail) {
            log::debug!("[bridge] {name} dispatch failed: {e:?}");
        }
    }

    fn try_dispatch<T: Serialize>(&self, name: &str, detail: &T) -> Result<(), JsValue> {
        let json = serde_json::to_string(detail).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let detail = js_sys::JSON::parse(&json)?;
        let init = web::CustomEventInit::new();
        init.set_detail(&detail);
        let event = web::CustomEvent::new_with_event_init_dict(name, &init)?;
        self.window.dispatch_event(&event)?;
        Ok(())
    }
}

impl VisualSubscriber for DomEventBridge {
    fn on_frame(&mut self, frame: &VisualFrame) {
        self.dispatch(FRAME_EVENT, frame);
    }

    fn on_section_transition(&mut self, transition: &SectionTransition) {
        self.dispatch(SECTION_EVENT, transition);
    }

    fn on_phase_change(&mut self, change: &PhaseChange) {
        self.dispatch(PHASE_EVENT, change);
    }
}
