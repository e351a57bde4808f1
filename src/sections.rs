//! Section visibility tracking and per-section lifecycle classes.

use crate::constants::{ACTIVE_SECTION_CLASS, OBSERVER_THRESHOLDS, SECTION_ID_ATTR, SECTION_SELECTOR};
use crate::dom::{query_all, sections_with_id, viewport_size};
use crate::SharedOrchestrator;
use visual_core::{SectionTransition, Visibility, VisualFrame, VisualSubscriber};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// IntersectionObserver feeding section visibility ratios to the orchestrator.
pub struct SectionObserver {
    observer: web::IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>,
}

impl SectionObserver {
    pub fn observe(
        orchestrator: &SharedOrchestrator,
        document: &web::Document,
    ) -> anyhow::Result<Option<Self>> {
        let sections = query_all(document, SECTION_SELECTOR);
        if sections.is_empty() {
            log::warn!("[sections] no {SECTION_SELECTOR} elements; section tracking disabled");
            return Ok(None);
        }

        let orch = orchestrator.clone();
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                        continue;
                    };
                    let Some(id) = entry.target().get_attribute(SECTION_ID_ATTR) else {
                        continue;
                    };
                    let visibility = entry_visibility(&entry);
                    orch.dispatch(move |o| o.on_section_visibility(&id, visibility));
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let thresholds: js_sys::Array = OBSERVER_THRESHOLDS
            .iter()
            .map(|t| JsValue::from_f64(*t))
            .collect();
        let options = web::IntersectionObserverInit::new();
        options.set_threshold(&thresholds);
        let observer =
            web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|e| anyhow::anyhow!("IntersectionObserver: {:?}", e))?;
        for el in &sections {
            observer.observe(el);
        }
        log::info!("[sections] observing {} sections", sections.len());
        Ok(Some(Self {
            observer,
            _callback: callback,
        }))
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for SectionObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn entry_visibility(entry: &web::IntersectionObserverEntry) -> Visibility {
    let viewport = match entry.root_bounds() {
        Some(bounds) => bounds.height(),
        None => web::window().map(|w| viewport_size(&w).1).unwrap_or(0.0),
    };
    let mut visibility = Visibility::from_heights(
        entry.intersection_rect().height() as f32,
        entry.bounding_client_rect().height() as f32,
        viewport as f32,
    );
    // the observer's own ratio is exact for transformed or clipped targets
    visibility.ratio = entry.intersection_ratio() as f32;
    visibility
}

/// Moves the active-section class between section elements on transition.
pub struct SectionClassToggler {
    document: web::Document,
}

impl SectionClassToggler {
    pub fn new(document: web::Document, initial: &str) -> Self {
        let toggler = Self { document };
        toggler.set_active(initial, true);
        toggler
    }

    fn set_active(&self, id: &str, active: bool) {
        for el in sections_with_id(&self.document, id) {
            _ = el.class_list().toggle_with_force(ACTIVE_SECTION_CLASS, active);
        }
    }
}

impl VisualSubscriber for SectionClassToggler {
    fn on_frame(&mut self, _frame: &VisualFrame) {}

    fn on_section_transition(&mut self, transition: &SectionTransition) {
        self.set_active(&transition.from, false);
        self.set_active(&transition.to, true);
    }
}
