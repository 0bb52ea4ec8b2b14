//! Category-driven attribute fields on the product form.

use std::cell::RefCell;
use std::rc::Rc;

use gc_admin::attributes::load_for_selection;
use gc_admin::{AttributeContainer, AttributeField, AttributeFieldSet, AttributeLoader};
use gc_api_types::ShopConfig;
use tracing::error;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlOptionElement, HtmlSelectElement};

use crate::api::ShopApi;
use crate::{dom, events};

pub const CATEGORY_SELECT_ID: &str = "id_category";
pub const CONTAINER_ID: &str = "attribute-values-container";
const ERROR_NOTE_CLASS: &str = "attribute-load-error";

struct DomAttributeContainer {
    container: Element,
}

impl DomAttributeContainer {
    fn error_note(&self) -> Option<Element> {
        self.container
            .previous_element_sibling()
            .filter(|el| dom::has_class(el, ERROR_NOTE_CLASS))
    }

    fn render_field(field: &AttributeField) -> Result<Element, JsValue> {
        let row = dom::create_element_with_class("div", "form-row attribute-row")?;
        let field_box = dom::create_element_with_class("div", "field-box")?;

        let input_id = format!("id_{}", field.input_name);
        let label = dom::create_element("label")?;
        label.set_attribute("for", &input_id)?;
        dom::set_text(&label, &field.label);

        let select: HtmlSelectElement = dom::create_element("select")?.dyn_into()?;
        select.set_name(&field.input_name);
        select.set_id(&input_id);
        select.set_class_name("form-control");
        for option in &field.options {
            let opt: HtmlOptionElement = dom::create_option(&option.value, &option.text)?;
            select.append_child(&opt)?;
        }

        field_box.append_child(&label)?;
        field_box.append_child(&select)?;
        row.append_child(&field_box)?;
        Ok(row)
    }
}

impl AttributeContainer for DomAttributeContainer {
    fn replace_fields(&mut self, fields: &AttributeFieldSet) {
        self.container.set_inner_html("");
        for field in &fields.fields {
            let added = Self::render_field(field).and_then(|row| self.container.append_child(&row));
            if let Err(err) = added {
                error!(
                    attribute = field.attribute_id,
                    err = %dom::js_error_text(&err),
                    "could not render attribute field"
                );
            }
        }
    }

    fn show_error(&mut self, message: &str) {
        let note = match self.error_note() {
            Some(note) => note,
            None => {
                let class = format!("errornote {ERROR_NOTE_CLASS}");
                let created = dom::create_element_with_class("p", &class)
                    .and_then(|note| self.container.before_with_node_1(&note).map(|_| note));
                match created {
                    Ok(note) => note,
                    Err(err) => {
                        error!(err = %dom::js_error_text(&err), "could not show attribute error");
                        return;
                    }
                }
            }
        };
        dom::set_text(&note, message);
    }

    fn clear_error(&mut self) {
        if let Some(note) = self.error_note() {
            note.remove();
        }
    }
}

pub fn bind(config: &Rc<ShopConfig>, api: &ShopApi) {
    let (Some(select), Some(container)) = (
        dom::by_id_typed::<HtmlSelectElement>(CATEGORY_SELECT_ID),
        dom::by_id(CONTAINER_ID),
    ) else {
        return;
    };
    let loader = Rc::new(RefCell::new(AttributeLoader::default()));

    let api = api.clone();
    let config = config.clone();
    let load = Rc::new(move |selection: String| {
        let api = api.clone();
        let config = config.clone();
        let loader = loader.clone();
        let mut target = DomAttributeContainer {
            container: container.clone(),
        };
        wasm_bindgen_futures::spawn_local(async move {
            load_for_selection(&api, &loader, &mut target, &selection, &config.messages).await;
        });
    });

    {
        let load = load.clone();
        let field = select.clone();
        events::on(&select, "change", move |_| load(field.value()));
    }
    // An already-selected category (edit form) loads right away.
    load(select.value());
}
