//! Built-in scroll timeline for pinned sections.
//!
//! Pages that run their own timeline engine (GSAP/ScrollTrigger) mark the
//! section `data-visual-timeline="external"` and report progress through the
//! exported handle instead.

use crate::constants::{EXTERNAL_TIMELINE_ATTR, EXTERNAL_TIMELINE_VALUE};
use crate::dom::{sections_with_id, viewport_size, ListenerSet};
use crate::SharedOrchestrator;
use fnv::FnvHashSet;
use std::cell::RefCell;
use std::rc::Rc;
use visual_core::section_progress;
use web_sys as web;

struct PinnedSection {
    id: String,
    element: web::Element,
}

struct ScrollTimeline {
    sections: Vec<PinnedSection>,
    active: FnvHashSet<String>,
}

impl ScrollTimeline {
    fn update(&mut self, window: &web::Window, orchestrator: &SharedOrchestrator) {
        let (_, viewport_h) = viewport_size(window);
        for s in &self.sections {
            let rect = s.element.get_bounding_client_rect();
            let progress = section_progress(rect.top() as f32, rect.height() as f32, viewport_h as f32);
            match progress {
                Some(p) => {
                    self.active.insert(s.id.clone());
                    let id = s.id.clone();
                    orchestrator.dispatch(move |o| o.on_timeline_progress(&id, p));
                }
                None => {
                    if self.active.remove(&s.id) {
                        let id = s.id.clone();
                        orchestrator.dispatch(move |o| o.on_timeline_leave(&id));
                    }
                }
            }
        }
    }
}

/// Wire scroll-driven progress for every pinned profile whose element is on
/// the page and not claimed by an external timeline.
pub fn wire_scroll_timeline(
    orchestrator: &SharedOrchestrator,
    window: &web::Window,
    document: &web::Document,
    listeners: &mut ListenerSet,
) {
    let pinned: Vec<String> = orchestrator
        .read()
        .map(|o| {
            o.profiles()
                .iter()
                .filter(|p| p.pinned)
                .map(|p| p.id.clone())
                .collect()
        })
        .unwrap_or_default();

    let mut sections = Vec::new();
    for id in pinned {
        let Some(element) = sections_with_id(document, &id).into_iter().next() else {
            log::warn!("[timeline] pinned section `{id}` has no element");
            continue;
        };
        if element.get_attribute(EXTERNAL_TIMELINE_ATTR).as_deref() == Some(EXTERNAL_TIMELINE_VALUE) {
            log::info!("[timeline] `{id}` driven externally");
            continue;
        }
        sections.push(PinnedSection { id, element });
    }
    if sections.is_empty() {
        return;
    }
    log::info!("[timeline] tracking {} pinned sections", sections.len());

    let timeline = Rc::new(RefCell::new(ScrollTimeline {
        sections,
        active: FnvHashSet::default(),
    }));
    timeline.borrow_mut().update(window, orchestrator);

    for event in ["scroll", "resize"] {
        let timeline = timeline.clone();
        let orchestrator = orchestrator.clone();
        let wnd = window.clone();
        listeners.listen(window, event, move |_ev: web::Event| {
            timeline.borrow_mut().update(&wnd, &orchestrator);
        });
    }
}
