use crate::dom::{scroll_metrics, ListenerSet};
use crate::SharedOrchestrator;
use web_sys as web;

pub fn wire_scroll(
    orchestrator: &SharedOrchestrator,
    window: &web::Window,
    document: &web::Document,
    listeners: &mut ListenerSet,
) {
    // seed the estimator so the first real event yields a sane delta
    let (offset, range) = scroll_metrics(window, document);
    orchestrator.dispatch(move |o| o.on_scroll(offset, range));

    let orchestrator = orchestrator.clone();
    let wnd = window.clone();
    let doc = document.clone();
    listeners.listen(window, "scroll", move |_ev: web::Event| {
        let (offset, range) = scroll_metrics(&wnd, &doc);
        orchestrator.dispatch(move |o| o.on_scroll(offset, range));
    });
}
