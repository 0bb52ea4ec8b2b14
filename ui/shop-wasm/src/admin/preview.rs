//! Upload preview for image file inputs.

use std::cell::RefCell;
use std::rc::Rc;

use gc_admin::preview::{PREVIEW_CLASS, image_style};
use gc_admin::{PreviewSequencer, PreviewTicket};
use tracing::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{Element, File, FileReader, HtmlInputElement};

use crate::{dom, events};

pub fn bind() {
    for input in dom::query_all(r#".field-image input[type="file"]"#) {
        let Ok(input) = input.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        let sequencer = Rc::new(RefCell::new(PreviewSequencer::default()));
        let field = input.clone();
        events::on(&input, "change", move |_| {
            let Some(file) = field.files().and_then(|files| files.get(0)) else {
                return;
            };
            let ticket = sequencer.borrow_mut().begin();
            if let Err(err) = read_preview(&field, &file, ticket, sequencer.clone()) {
                error!(err = %dom::js_error_text(&err), "could not read selected image");
            }
        });
    }
}

fn read_preview(
    input: &HtmlInputElement,
    file: &File,
    ticket: PreviewTicket,
    sequencer: Rc<RefCell<PreviewSequencer>>,
) -> Result<(), JsValue> {
    let reader = FileReader::new()?;
    let done = reader.clone();
    let input = input.clone();
    let onload = Closure::once(move || {
        if !sequencer.borrow().is_current(ticket) {
            debug!("newer file selected, dropping preview");
            return;
        }
        let Some(data_url) = done.result().ok().and_then(|v| v.as_string()) else {
            return;
        };
        if let Err(err) = render(&input, &data_url) {
            error!(err = %dom::js_error_text(&err), "could not render preview");
        }
    });
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    reader.read_as_data_url(file)
}

/// Replace the fieldset's preview, or add one after the input's form row.
fn render(input: &HtmlInputElement, data_url: &str) -> Result<(), JsValue> {
    let img = dom::create_element("img")?;
    img.set_attribute("src", data_url)?;
    img.set_attribute("style", &image_style())?;

    let selector = format!(".{PREVIEW_CLASS}");
    let existing = input
        .closest("fieldset")?
        .and_then(|fieldset| dom::query_within(&fieldset, &selector));
    match existing {
        Some(preview) => {
            preview.set_inner_html("");
            preview.append_child(&img)?;
        }
        None => {
            let preview = dom::create_element_with_class("div", PREVIEW_CLASS)?;
            preview.append_child(&img)?;
            let anchor: Element = match input.closest(".form-row")? {
                Some(row) => row,
                None => input.clone().into(),
            };
            anchor.after_with_node_1(&preview)?;
        }
    }
    Ok(())
}
