use std::rc::Rc;

use gc_admin::ImageTable;
use gc_admin::main_image::designate;
use gc_api_types::{ImageId, ShopConfig};
use tracing::{error, warn};
use web_sys::{Element, Event};

use crate::api::ShopApi;
use crate::dom;
use crate::events::on_async;

const CONTROL: &str = ".make-main-image";
const INDICATOR_CLASS: &str = "main-image-indicator";

fn row(image: ImageId) -> Option<Element> {
    dom::by_id(&format!("image_{image}"))
}

struct DomImageTable;

impl DomImageTable {
    fn indicator(label: &str) -> Result<Element, wasm_bindgen::JsValue> {
        let span = dom::create_element_with_class("span", INDICATOR_CLASS)?;
        span.set_attribute("style", "color: green; margin-left: 10px;")?;
        let icon = dom::create_element_with_class("i", "fas fa-check")?;
        span.append_child(&icon)?;
        span.append_child(&dom::document().create_text_node(&format!(" {label}")))?;
        Ok(span)
    }
}

impl ImageTable for DomImageTable {
    fn clear_indicators(&mut self) {
        for indicator in dom::query_all(&format!(".{INDICATOR_CLASS}")) {
            indicator.remove();
        }
    }

    fn show_all_controls(&mut self) {
        for control in dom::query_all(CONTROL) {
            dom::clear_style(&control, "display");
        }
    }

    fn hide_control(&mut self, image: ImageId) {
        if let Some(row) = row(image) {
            for control in dom::query_all_within(&row, CONTROL) {
                dom::set_styles(&control, &[("display", "none")]);
            }
        }
    }

    fn insert_indicator(&mut self, image: ImageId, label: &str) {
        let Some(control) = row(image).and_then(|row| dom::query_within(&row, CONTROL)) else {
            warn!(%image, "no control to place the main image indicator next to");
            return;
        };
        let placed = Self::indicator(label).and_then(|span| control.after_with_node_1(&span));
        if let Err(err) = placed {
            error!(%image, err = %dom::js_error_text(&err), "could not insert indicator");
        }
    }

    fn alert(&mut self, message: &str) {
        dom::alert(message);
    }
}

pub fn bind(config: &Rc<ShopConfig>, api: &ShopApi) {
    for control in dom::query_all(CONTROL) {
        let Some(image) = control
            .get_attribute("data-image-id")
            .and_then(|raw| raw.parse::<ImageId>().ok())
        else {
            warn!("main image control without a usable image id");
            continue;
        };
        let api = api.clone();
        let config = config.clone();
        on_async!(&control, "click", move |event: Event| {
            event.prevent_default();
            let api = api.clone();
            let config = config.clone();
            Some(async move {
                designate(&api, &mut DomImageTable, image, &config.messages).await;
            })
        });
    }
}
