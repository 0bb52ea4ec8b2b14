//! GaiaCare browser front-end.
//!
//! One module serves every page: each feature binds only when its elements
//! are present, so the storefront and the product admin share the build.

pub mod admin;
pub mod api;
pub mod config;
pub mod dom;
pub mod events;
pub mod logging;
pub mod storefront;

use std::rc::Rc;

use gc_api_types::ShopConfig;
use tracing::{error, info};
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let (config, problem) = config::load();
    logging::init(&config.log_filter);
    if let Some(err) = problem {
        error!(%err, "invalid shop config, using defaults");
    }
    let config = Rc::new(config);

    if dom::document().ready_state() == "loading" {
        let target = dom::document();
        events::on(&target, "DOMContentLoaded", move |_| run(&config));
    } else {
        run(&config);
    }
    Ok(())
}

fn run(config: &Rc<ShopConfig>) {
    let api = api::ShopApi::new(Rc::clone(config));
    storefront::init(config, &api);
    admin::init(config, &api);
    info!("page scripts ready");
}
