//! Listener wiring.
//!
//! Page listeners live as long as the page, so closures are leaked with
//! `forget` once attached.

use tracing::error;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, MouseEvent};

use crate::dom;

/// Attach an async handler: the sync part runs first (e.g. `prevent_default`),
/// the returned future is spawned on the browser executor.
macro_rules! on_async {
    ($target:expr, $event:expr, $handler:expr) => {{
        let mut handler = $handler;
        $crate::events::on($target, $event, move |event: web_sys::Event| {
            if let Some(fut) = handler(event) {
                wasm_bindgen_futures::spawn_local(fut);
            }
        });
    }};
}
pub(crate) use on_async;

pub fn on<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    attach(target, event, cb.as_ref().unchecked_ref());
    cb.forget();
}

pub fn on_mouse<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(MouseEvent) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    attach(target, event, cb.as_ref().unchecked_ref());
    cb.forget();
}

fn attach(target: &EventTarget, event: &str, callback: &js_sys::Function) {
    if let Err(err) = target.add_event_listener_with_callback(event, callback) {
        error!(event, err = %dom::js_error_text(&err), "could not attach listener");
    }
}
