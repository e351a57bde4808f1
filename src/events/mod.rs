use web_sys as web;

use crate::dom::ListenerSet;
use crate::SharedOrchestrator;

mod hover;
mod pointer;
mod scroll;

/// Wire pointer, scroll and hover signal sources.
pub fn wire_signal_sources(
    orchestrator: &SharedOrchestrator,
    window: &web::Window,
    document: &web::Document,
    listeners: &mut ListenerSet,
) {
    pointer::wire_pointermove(orchestrator, window, listeners);
    scroll::wire_scroll(orchestrator, window, document, listeners);
    hover::wire_hover_targets(orchestrator, document, listeners);
}
