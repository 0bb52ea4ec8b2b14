//! Page-provided configuration.
//!
//! Templates may embed `<script type="application/json" id="shop-config">`;
//! pages without it run on the defaults.

use gc_api_types::{ConfigError, ShopConfig};

use crate::dom;

pub const CONFIG_ELEMENT_ID: &str = "shop-config";

/// Read the page config. A broken block yields the defaults plus the error,
/// so it can be reported once logging is up.
pub fn load() -> (ShopConfig, Option<ConfigError>) {
    let Some(text) = dom::by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return (ShopConfig::default(), None);
    };
    match ShopConfig::from_json(&text) {
        Ok(config) => (config, None),
        Err(err) => (ShopConfig::default(), Some(err)),
    }
}
