use crate::constants::HOVER_SELECTOR;
use crate::dom::{query_all, ListenerSet};
use crate::input::hover_key;
use crate::SharedOrchestrator;
use std::rc::Rc;
use web_sys as web;

pub fn wire_hover_targets(
    orchestrator: &SharedOrchestrator,
    document: &web::Document,
    listeners: &mut ListenerSet,
) {
    let targets = query_all(document, HOVER_SELECTOR);
    if targets.is_empty() {
        log::debug!("[hover] no {HOVER_SELECTOR} elements");
        return;
    }
    for (i, el) in targets.iter().enumerate() {
        let key = Rc::new(hover_key(&el.id(), i));
        for (event, entering) in [("mouseenter", true), ("mouseleave", false)] {
            let orchestrator = orchestrator.clone();
            let key = key.clone();
            listeners.listen(el, event, move |_ev: web::Event| {
                let key = key.clone();
                orchestrator.dispatch(move |o| o.on_hover_change(&key, entering));
            });
        }
    }
    log::info!("[hover] wired {} targets", targets.len());
}
