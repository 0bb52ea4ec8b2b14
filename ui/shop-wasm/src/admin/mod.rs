//! Product admin bindings.

mod attributes;
mod main_image;
mod preview;
mod reorder;
mod sortable;

use std::rc::Rc;

use gc_api_types::ShopConfig;

use crate::api::ShopApi;

pub fn init(config: &Rc<ShopConfig>, api: &ShopApi) {
    preview::bind();
    main_image::bind(config, api);
    reorder::bind(config, api);
    attributes::bind(config, api);
}
