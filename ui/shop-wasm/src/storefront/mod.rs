//! Storefront page bindings.

mod alerts;
mod cart;
mod gallery;
mod nav;
mod quantity;

use gc_api_types::ShopConfig;

use crate::api::ShopApi;

pub use alerts::{dismiss, schedule_dismiss, show_notification};

pub fn init(config: &ShopConfig, api: &ShopApi) {
    nav::bind();
    alerts::schedule_existing(config.alert_dismiss_ms);
    gallery::bind();
    quantity::bind();
    cart::bind(config, api);
}
