//! Alert auto-dismissal and notification rendering.

use gc_storefront::Notification;
use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom;

pub const MESSAGES_CONTAINER: &str = ".messages-container";

/// Every alert already on the page gets its own timer.
pub fn schedule_existing(delay_ms: u32) {
    for alert in dom::query_all(".alert") {
        schedule_dismiss(alert, delay_ms);
    }
}

pub fn schedule_dismiss(alert: Element, delay_ms: u32) {
    Timeout::new(delay_ms, move || dismiss(&alert)).forget();
}

/// Close an alert. Already-closed alerts are left alone.
pub fn dismiss(alert: &Element) {
    if !alert.is_connected() {
        return;
    }
    if !close_with_bootstrap(alert) {
        alert.remove();
    }
}

/// `bootstrap.Alert.getOrCreateInstance(el).close()`, when Bootstrap is loaded.
fn close_with_bootstrap(alert: &Element) -> bool {
    let lookup = |target: &JsValue, key: &str| {
        Reflect::get(target, &JsValue::from_str(key))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    };
    let window: JsValue = dom::window().into();
    let Some(bootstrap) = lookup(&window, "bootstrap") else {
        return false;
    };
    let Some(class) = lookup(&bootstrap, "Alert") else {
        return false;
    };
    let Some(factory) =
        lookup(&class, "getOrCreateInstance").and_then(|f| f.dyn_into::<Function>().ok())
    else {
        return false;
    };
    let Ok(instance) = factory.call1(&class, alert) else {
        return false;
    };
    let Some(close) = lookup(&instance, "close").and_then(|f| f.dyn_into::<Function>().ok()) else {
        return false;
    };
    close.call0(&instance).is_ok()
}

/// Append a dismissible alert to the messages container.
pub fn show_notification(notification: &Notification, delay_ms: u32) {
    let Some(container) = dom::query(MESSAGES_CONTAINER) else {
        warn!(text = %notification.text, "no messages container for notification");
        return;
    };
    match render(notification).and_then(|node| container.append_child(&node).map(|_| node)) {
        Ok(node) => schedule_dismiss(node, delay_ms),
        Err(err) => error!(err = %dom::js_error_text(&err), "could not render notification"),
    }
}

fn render(notification: &Notification) -> Result<Element, JsValue> {
    let alert = dom::create_element_with_class("div", &notification.class_name())?;
    alert.set_attribute("role", "alert")?;
    // Server text goes in as a text node, never as markup.
    alert.append_child(&dom::document().create_text_node(&notification.text))?;

    let close = dom::create_element_with_class("button", "btn-close")?;
    close.set_attribute("type", "button")?;
    close.set_attribute("data-bs-dismiss", "alert")?;
    close.set_attribute("aria-label", "Close")?;
    alert.append_child(&close)?;
    Ok(alert)
}
