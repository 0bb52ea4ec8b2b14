use std::cell::RefCell;
use std::rc::Rc;

use gc_admin::{OrderableList, ReorderSession};
use gc_api_types::{ImageId, ShopConfig};
use tracing::{debug, error};
use web_sys::Element;

use crate::api::ShopApi;
use crate::dom;

use super::sortable;

pub const IMAGE_ROWS: &str = "#product-images-table tbody";
pub const MOVE_HANDLE: &str = ".move-handle";

fn image_id(row: &Element) -> Option<ImageId> {
    row.get_attribute("data-image-id")?.parse().ok()
}

#[derive(Clone)]
struct DomImageList {
    body: Element,
}

impl OrderableList for DomImageList {
    fn current_order(&self) -> Vec<ImageId> {
        dom::children(&self.body).iter().filter_map(image_id).collect()
    }

    fn apply_order(&mut self, order: &[ImageId]) {
        let rows = dom::children(&self.body);
        for id in order {
            if let Some(row) = rows.iter().find(|row| image_id(row) == Some(*id)) {
                // Appending an attached node moves it.
                if let Err(err) = self.body.append_child(row) {
                    error!(
                        image = %id,
                        err = %dom::js_error_text(&err),
                        "could not restore row order"
                    );
                }
            }
        }
    }

    fn alert(&mut self, message: &str) {
        dom::alert(message);
    }
}

pub fn bind(config: &Rc<ShopConfig>, api: &ShopApi) {
    let Some(body) = dom::query(IMAGE_ROWS) else {
        return;
    };
    let list = DomImageList { body: body.clone() };
    let session: Rc<RefCell<Option<ReorderSession>>> = Rc::new(RefCell::new(None));

    let on_start = {
        let session = session.clone();
        let list = list.clone();
        move || {
            *session.borrow_mut() = Some(ReorderSession::begin(&list));
        }
    };

    let api = api.clone();
    let config = config.clone();
    let on_drop = move || {
        let Some(pending) = session.borrow_mut().take() else {
            return;
        };
        debug!(before = ?pending.original_order(), "image row dropped");
        let api = api.clone();
        let config = config.clone();
        let mut list = list.clone();
        wasm_bindgen_futures::spawn_local(async move {
            pending.finish(&api, &mut list, &config.messages).await;
        });
    };

    sortable::make_sortable(body, MOVE_HANDLE, on_start, on_drop);
}
