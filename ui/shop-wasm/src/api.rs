//! HTTP client for the shop endpoints (raw `fetch`).
//!
//! Every call resolves to an [`Outcome`]; the HTTP status is only logged,
//! since the endpoints report success in the JSON body.

use std::rc::Rc;

use async_trait::async_trait;
use gc_admin::AdminApi;
use gc_api_types::{
    Ack, AttributeList, AJAX_HEADER, AJAX_HEADER_VALUE, CSRF_FIELD, CSRF_HEADER, CartAdded,
    CartCleared, CartUpdate, CartUpdateRequest, CategoryId, FormFields, ImageId, Outcome,
    ReorderRequest, ShopConfig, TransportError, decode, make_main_fields,
};
use gc_storefront::StorefrontApi;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, HtmlInputElement, Request, RequestInit, Response, UrlSearchParams};

use crate::dom;

fn network(err: JsValue) -> TransportError {
    TransportError::Network(dom::js_error_text(&err))
}

/// CSRF token rendered into the page by the server.
pub fn csrf_token() -> String {
    let selector = format!(r#"[name="{CSRF_FIELD}"]"#);
    match dom::query_typed::<HtmlInputElement>(&selector) {
        Some(input) => input.value(),
        None => {
            warn!("no csrf token on page");
            String::new()
        }
    }
}

async fn send(
    method: &str,
    url: &str,
    body: Option<&JsValue>,
    headers: &[(&str, &str)],
) -> Result<String, TransportError> {
    let opts = RequestInit::new();
    opts.set_method(method);

    let h = Headers::new().map_err(network)?;
    for (name, value) in headers {
        h.set(name, value).map_err(network)?;
    }
    opts.set_headers(&h);
    if let Some(body) = body {
        opts.set_body(body);
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(network)?;
    let resp_value = JsFuture::from(dom::window().fetch_with_request(&request))
        .await
        .map_err(network)?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| TransportError::Malformed("fetch did not return a Response".into()))?;
    if !resp.ok() {
        debug!(url, status = resp.status(), "non-success status");
    }

    let text = JsFuture::from(resp.text().map_err(network)?)
        .await
        .map_err(network)?;
    Ok(text.as_string().unwrap_or_default())
}

pub async fn post_form<T: DeserializeOwned>(
    url: &str,
    fields: &FormFields,
    headers: &[(&str, &str)],
) -> Outcome<T> {
    let params = match UrlSearchParams::new() {
        Ok(params) => params,
        Err(err) => return Outcome::Failed(network(err)),
    };
    for (name, value) in fields {
        params.append(name, value);
    }
    let body: &JsValue = params.as_ref();
    debug!(url, fields = fields.len(), "POST");
    match send("POST", url, Some(body), headers).await {
        Ok(body) => decode(&body),
        Err(err) => Outcome::Failed(err),
    }
}

pub async fn get_json<T: DeserializeOwned>(url: &str, headers: &[(&str, &str)]) -> Outcome<T> {
    debug!(url, "GET");
    match send("GET", url, None, headers).await {
        Ok(body) => decode(&body),
        Err(err) => Outcome::Failed(err),
    }
}

/// Endpoint client shared by the storefront and admin bindings.
#[derive(Clone)]
pub struct ShopApi {
    config: Rc<ShopConfig>,
}

impl ShopApi {
    pub fn new(config: Rc<ShopConfig>) -> Self {
        Self { config }
    }
}

const AJAX: (&str, &str) = (AJAX_HEADER, AJAX_HEADER_VALUE);

#[async_trait(?Send)]
impl StorefrontApi for ShopApi {
    async fn add_to_cart(&self, action_url: &str, fields: FormFields) -> Outcome<CartAdded> {
        // The form carries its own csrf field.
        post_form(action_url, &fields, &[AJAX]).await
    }

    async fn update_cart(&self, request: CartUpdateRequest) -> Outcome<CartUpdate> {
        let token = csrf_token();
        post_form(
            &self.config.cart_update_url,
            &request.form_fields(),
            &[AJAX, (CSRF_HEADER, token.as_str())],
        )
        .await
    }

    async fn clear_cart(&self) -> Outcome<CartCleared> {
        let token = csrf_token();
        post_form(
            &self.config.cart_clear_url,
            &Vec::new(),
            &[AJAX, (CSRF_HEADER, token.as_str())],
        )
        .await
    }
}

#[async_trait(?Send)]
impl AdminApi for ShopApi {
    async fn make_main(&self, image: ImageId) -> Outcome<Ack> {
        let url = self.config.make_main_url_for(image);
        post_form(&url, &make_main_fields(&csrf_token()), &[AJAX]).await
    }

    async fn reorder(&self, request: ReorderRequest) -> Outcome<Ack> {
        let fields = match request.form_fields(&csrf_token()) {
            Ok(fields) => fields,
            Err(err) => return Outcome::Failed(err),
        };
        post_form(&self.config.reorder_url, &fields, &[AJAX]).await
    }

    async fn attributes(&self, category: CategoryId) -> Outcome<AttributeList> {
        get_json(&self.config.attributes_url_for(category), &[AJAX]).await
    }
}
