use crate::dom::{viewport_size, ListenerSet};
use crate::input;
use crate::SharedOrchestrator;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointermove(
    orchestrator: &SharedOrchestrator,
    window: &web::Window,
    listeners: &mut ListenerSet,
) {
    let orchestrator = orchestrator.clone();
    let wnd = window.clone();
    listeners.listen(window, "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let (w, h) = viewport_size(&wnd);
        let Some([x, y]) = input::normalize_pointer(ev.client_x() as f64, ev.client_y() as f64, w, h)
        else {
            return;
        };
        orchestrator.dispatch(move |o| o.on_pointer_move(x, y));
    });
}
