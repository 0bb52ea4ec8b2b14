//! Page-level configuration.
//!
//! Pages may embed a `<script type="application/json" id="shop-config">`
//! block; every field is optional and falls back to the defaults below.

use crate::{CategoryId, ImageId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid shop config: {0}")]
    Parse(String),
    #[error("`{0}` must contain the {{id}} placeholder")]
    MissingPlaceholder(&'static str),
    #[error("`alert_dismiss_ms` must be greater than zero")]
    ZeroDismissDelay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub generic_error: String,
    pub communication_error: String,
    pub main_image_set: String,
    pub main_image_failed: String,
    pub reorder_failed: String,
    pub main_image_label: String,
    pub attributes_failed: String,
    pub clear_cart_confirm: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            generic_error: "Ha ocurrido un error. Inténtalo nuevamente.".to_owned(),
            communication_error: "Error de comunicación con el servidor".to_owned(),
            main_image_set: "Imagen establecida como principal".to_owned(),
            main_image_failed: "Error al establecer la imagen como principal".to_owned(),
            reorder_failed: "Error al reordenar imágenes".to_owned(),
            main_image_label: "Imagen Principal".to_owned(),
            attributes_failed: "Error al cargar los atributos para la categoría".to_owned(),
            clear_cart_confirm: "¿Seguro que quieres vaciar el carrito?".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub cart_update_url: String,
    pub cart_clear_url: String,
    /// Template; `{id}` is replaced with the image id.
    pub make_main_url: String,
    pub reorder_url: String,
    /// Template; `{id}` is replaced with the category id.
    pub attributes_url: String,
    pub alert_dismiss_ms: u32,
    pub currency_symbol: String,
    pub currency_suffix: String,
    /// `tracing-subscriber` filter directive, e.g. `info` or `gc_storefront=debug`.
    pub log_filter: String,
    pub messages: Messages,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            cart_update_url: "/carrito/actualizar/".to_owned(),
            cart_clear_url: "/carrito/vaciar/".to_owned(),
            make_main_url: "/admin/products/productimage/{id}/make-main/".to_owned(),
            reorder_url: "/admin/products/reorder-images/".to_owned(),
            attributes_url: "/admin/products/get-attributes/{id}/".to_owned(),
            alert_dismiss_ms: 5_000,
            currency_symbol: "$".to_owned(),
            currency_suffix: "MXN".to_owned(),
            log_filter: "info".to_owned(),
            messages: Messages::default(),
        }
    }
}

impl ShopConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: ShopConfig =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.make_main_url.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder("make_main_url"));
        }
        if !self.attributes_url.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder("attributes_url"));
        }
        if self.alert_dismiss_ms == 0 {
            return Err(ConfigError::ZeroDismissDelay);
        }
        Ok(())
    }

    pub fn make_main_url_for(&self, image: ImageId) -> String {
        self.make_main_url.replace(ID_PLACEHOLDER, &image.to_string())
    }

    pub fn attributes_url_for(&self, category: CategoryId) -> String {
        self.attributes_url.replace(ID_PLACEHOLDER, &category.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_server_routes() {
        let config = ShopConfig::default();
        assert_eq!(config.cart_update_url, "/carrito/actualizar/");
        assert_eq!(
            config.make_main_url_for(ImageId(9)),
            "/admin/products/productimage/9/make-main/"
        );
        assert_eq!(
            config.attributes_url_for(CategoryId(4)),
            "/admin/products/get-attributes/4/"
        );
        assert_eq!(config.alert_dismiss_ms, 5_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = ShopConfig::from_json(
            r#"{"currency_suffix": "USD", "messages": {"main_image_label": "Main Image"}}"#,
        )
        .expect("valid config");
        assert_eq!(config.currency_suffix, "USD");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.messages.main_image_label, "Main Image");
        assert_eq!(config.messages.generic_error, Messages::default().generic_error);
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let err = ShopConfig::from_json(r#"{"attributes_url": "/attrs/"}"#).unwrap_err();
        assert_eq!(err, ConfigError::MissingPlaceholder("attributes_url"));
    }

    #[test]
    fn zero_delay_is_rejected() {
        let err = ShopConfig::from_json(r#"{"alert_dismiss_ms": 0}"#).unwrap_err();
        assert_eq!(err, ConfigError::ZeroDismissDelay);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            ShopConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
