use crate::constants::{SECTION_ID_ATTR, SECTION_SELECTOR};
use crate::input::with_section_id;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Viewport size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

/// Current scroll offset and scrollable range of the document.
pub fn scroll_metrics(window: &web::Window, document: &web::Document) -> (f32, f32) {
    let offset = window.scroll_y().unwrap_or(0.0) as f32;
    let scroll_height = document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    let (_, viewport_h) = viewport_size(window);
    (offset, crate::input::scroll_range(scroll_height, viewport_h))
}

/// Text content of an element by id, if present and non-empty.
pub fn element_text(document: &web::Document, element_id: &str) -> Option<String> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.text_content())
        .filter(|s| !s.trim().is_empty())
}

/// All elements matching `selector`.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("[dom] bad selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

/// Section elements carrying exactly `id` in their section attribute.
pub fn sections_with_id(document: &web::Document, id: &str) -> Vec<web::Element> {
    with_section_id(query_all(document, SECTION_SELECTOR), id, |el| {
        el.get_attribute(SECTION_ID_ATTR)
    })
}

struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Event listeners that can all be removed again.
#[derive(Default)]
pub struct ListenerSet {
    entries: Vec<Listener>,
}

impl ListenerSet {
    pub fn listen(
        &mut self,
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => self.entries.push(Listener {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => log::warn!("[dom] failed to add {event} listener: {e:?}"),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn remove_all(&mut self) {
        for l in self.entries.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.event, l.closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.remove_all();
    }
}
