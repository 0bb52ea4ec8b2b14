//! Cart DOM: header badge, cart table rows and the AJAX forms/buttons.

use std::rc::Rc;

use gc_api_types::{CartItemId, CartUpdateAction, CartUpdateRequest, FormFields, ShopConfig};
use gc_storefront::{CartController, CartPage, Notification};
use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Event, FormData, HtmlFormElement, HtmlInputElement};

use crate::api::ShopApi;
use crate::events::on_async;
use crate::dom;

use super::alerts;

fn row_selector(item: CartItemId) -> String {
    format!(r#"tr[data-item-id="{item}"]"#)
}

pub struct DomCartPage {
    alert_delay_ms: u32,
}

impl CartPage for DomCartPage {
    fn show_item_count(&mut self, count: u32, create_if_missing: bool) {
        if let Some(badge) = dom::query(".cart-count") {
            dom::set_text(&badge, &count.to_string());
            return;
        }
        if !create_if_missing {
            return;
        }
        let Some(icon) = dom::query(".cart-icon") else {
            warn!("no cart icon to attach the badge to");
            return;
        };
        let badge = dom::create_element_with_class("span", "cart-count")
            .and_then(|badge| {
                dom::set_text(&badge, &count.to_string());
                icon.append_child(&badge)
            });
        if let Err(err) = badge {
            error!(err = %dom::js_error_text(&err), "could not create cart badge");
        }
    }

    fn remove_item_count(&mut self) {
        if let Some(badge) = dom::query(".cart-count") {
            badge.remove();
        }
    }

    fn remove_line(&mut self, item: CartItemId) -> usize {
        let body = match dom::query(&row_selector(item)) {
            Some(row) => {
                let body = row.parent_element();
                row.remove();
                body
            }
            None => None,
        };
        body.or_else(|| dom::query("tbody"))
            .map(|body| body.child_element_count() as usize)
            .unwrap_or(0)
    }

    fn set_line_quantity(&mut self, item: CartItemId, quantity: u32) {
        let selector = format!("{} .cart-quantity-input", row_selector(item));
        if let Some(input) = dom::query_typed::<HtmlInputElement>(&selector) {
            input.set_value(&quantity.to_string());
        }
    }

    fn set_line_total(&mut self, item: CartItemId, text: &str) {
        if let Some(cell) = dom::query(&format!("{} .item-total", row_selector(item))) {
            dom::set_text(&cell, text);
        }
    }

    fn set_cart_total(&mut self, text: &str) {
        if let Some(total) = dom::query(".cart-summary-total .value") {
            dom::set_text(&total, text);
        }
    }

    fn reload(&mut self) {
        if let Err(err) = dom::window().location().reload() {
            error!(err = %dom::js_error_text(&err), "reload failed");
        }
    }

    fn notify(&mut self, notification: Notification) {
        alerts::show_notification(&notification, self.alert_delay_ms);
    }
}

/// Form entries as name/value pairs. File entries are skipped.
fn form_fields(form: &HtmlFormElement) -> Result<FormFields, JsValue> {
    let data = FormData::new_with_form(form)?;
    let entries = js_sys::try_iter(&data)?
        .ok_or_else(|| JsValue::from_str("FormData is not iterable"))?;
    let mut fields = Vec::new();
    for entry in entries {
        let entry: js_sys::Array = entry?.dyn_into()?;
        let name = entry.get(0).as_string().unwrap_or_default();
        if let Some(value) = entry.get(1).as_string() {
            fields.push((name, value));
        }
    }
    Ok(fields)
}

fn update_request(button: &web_sys::Element) -> Option<CartUpdateRequest> {
    let item = button.get_attribute("data-item-id").unwrap_or_default();
    let action = button.get_attribute("data-action").unwrap_or_default();
    match (item.parse::<CartItemId>(), action.parse::<CartUpdateAction>()) {
        (Ok(item_id), Ok(action)) => Some(CartUpdateRequest { item_id, action }),
        (Err(err), _) => {
            warn!(%err, "update button without a usable item id");
            None
        }
        (_, Err(err)) => {
            warn!(%err, "update button without a usable action");
            None
        }
    }
}

pub fn bind(config: &ShopConfig, api: &ShopApi) {
    let cart = Rc::new(CartController::new(api.clone(), config));
    let delay = config.alert_dismiss_ms;

    for form in dom::query_all(".add-to-cart-form") {
        let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
            continue;
        };
        let cart = cart.clone();
        let submitted = form.clone();
        on_async!(&form, "submit", move |event: Event| {
            event.prevent_default();
            let action = submitted.get_attribute("action").unwrap_or_default();
            let fields = match form_fields(&submitted) {
                Ok(fields) => fields,
                Err(err) => {
                    error!(err = %dom::js_error_text(&err), "could not read add-to-cart form");
                    return None;
                }
            };
            let cart = cart.clone();
            Some(async move {
                let mut page = DomCartPage { alert_delay_ms: delay };
                cart.add_to_cart(&mut page, &action, fields).await;
            })
        });
    }

    for button in dom::query_all(".update-cart-btn") {
        let Some(request) = update_request(&button) else {
            continue;
        };
        let cart = cart.clone();
        on_async!(&button, "click", move |event: Event| {
            event.prevent_default();
            let cart = cart.clone();
            Some(async move {
                let mut page = DomCartPage { alert_delay_ms: delay };
                cart.update_line(&mut page, request).await;
            })
        });
    }

    let confirm_text = config.messages.clear_cart_confirm.clone();
    for button in dom::query_all(".clear-cart-btn") {
        let cart = cart.clone();
        let confirm_text = confirm_text.clone();
        on_async!(&button, "click", move |event: Event| {
            event.prevent_default();
            let confirmed = dom::window()
                .confirm_with_message(&confirm_text)
                .unwrap_or(false);
            if !confirmed {
                return None;
            }
            let cart = cart.clone();
            Some(async move {
                let mut page = DomCartPage { alert_delay_ms: delay };
                cart.clear(&mut page).await;
            })
        });
    }
}
