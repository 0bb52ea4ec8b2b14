//! Wire types shared by the storefront and admin front-ends.
//!
//! Every endpoint answers with a JSON object carrying a `success` flag and,
//! on domain failures, an `error` string. [`decode`] folds those bodies into
//! the three-way [`Outcome`] every flow reacts to.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod config;

pub use config::{ConfigError, Messages, ShopConfig};

/// Hidden form field holding the anti-forgery token.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";
/// Header the cart endpoints read the anti-forgery token from.
pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const AJAX_HEADER: &str = "X-Requested-With";
pub const AJAX_HEADER_VALUE: &str = "XMLHttpRequest";

/// Shown when the server rejects a request without saying why.
pub const REJECTED_WITHOUT_REASON: &str = "Solicitud rechazada por el servidor";

pub type FormFields = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} id: {raw:?}")]
pub struct IdParseError {
    pub kind: &'static str,
    pub raw: String,
}

macro_rules! numeric_id {
    ($name:ident, $kind:literal) => {
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                raw.trim().parse::<u64>().map($name).map_err(|_| IdParseError {
                    kind: $kind,
                    raw: raw.to_owned(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(CartItemId, "cart item");
numeric_id!(ImageId, "image");
numeric_id!(CategoryId, "category");

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CartUpdateAction {
    Increase,
    Decrease,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cart action: {0:?}")]
pub struct UnknownAction(pub String);

impl CartUpdateAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartUpdateAction::Increase => "increase",
            CartUpdateAction::Decrease => "decrease",
            CartUpdateAction::Remove => "remove",
        }
    }
}

impl FromStr for CartUpdateAction {
    type Err = UnknownAction;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "increase" => Ok(CartUpdateAction::Increase),
            "decrease" => Ok(CartUpdateAction::Decrease),
            "remove" => Ok(CartUpdateAction::Remove),
            other => Err(UnknownAction(other.to_owned())),
        }
    }
}

// ── Outcomes ──

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a readable response.
    #[error("network error: {0}")]
    Network(String),
    /// A response arrived but its body does not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The request body could not be built.
    #[error("could not encode request: {0}")]
    Encode(String),
}

/// Result of one AJAX round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    /// `success: false` (or a bare `error`) from the server; the text is
    /// meant for the user as-is.
    Rejected(String),
    Failed(TransportError),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Rejected(reason) => Outcome::Rejected(reason),
            Outcome::Failed(err) => Outcome::Failed(err),
        }
    }
}

impl<T> From<TransportError> for Outcome<T> {
    fn from(err: TransportError) -> Self {
        Outcome::Failed(err)
    }
}

/// Decode a response body into an [`Outcome`].
///
/// The HTTP status is deliberately not an input: the server reports domain
/// errors as 4xx responses whose JSON body still carries `error`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Outcome<T> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => return Outcome::Failed(TransportError::Malformed(err.to_string())),
    };
    let Some(object) = value.as_object() else {
        return Outcome::Failed(TransportError::Malformed(
            "expected a JSON object".to_owned(),
        ));
    };

    let success = object.get("success").and_then(Value::as_bool);
    let error = object.get("error").map(|err| match err {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    });

    match (success, error) {
        (Some(false), reason) => {
            return Outcome::Rejected(reason.unwrap_or_else(|| REJECTED_WITHOUT_REASON.to_owned()));
        }
        (None, Some(reason)) => return Outcome::Rejected(reason),
        _ => {}
    }

    match serde_json::from_value(value) {
        Ok(parsed) => Outcome::Success(parsed),
        Err(err) => Outcome::Failed(TransportError::Malformed(err.to_string())),
    }
}

// ── Responses ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartAdded {
    pub item_count: u32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub cart_total: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CartUpdateBody {
    #[serde(default)]
    removed: bool,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    item_total: Option<f64>,
    item_count: u32,
    cart_total: f64,
}

/// Successful answer of the cart-update endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "CartUpdateBody")]
pub enum CartUpdate {
    Removed {
        item_count: u32,
        cart_total: f64,
    },
    Changed {
        quantity: u32,
        item_total: f64,
        item_count: u32,
        cart_total: f64,
    },
}

impl TryFrom<CartUpdateBody> for CartUpdate {
    type Error = String;

    fn try_from(body: CartUpdateBody) -> Result<Self, Self::Error> {
        if body.removed {
            return Ok(CartUpdate::Removed {
                item_count: body.item_count,
                cart_total: body.cart_total,
            });
        }
        let quantity = body.quantity.ok_or("updated line is missing `quantity`")?;
        let item_total = body.item_total.ok_or("updated line is missing `item_total`")?;
        Ok(CartUpdate::Changed {
            quantity,
            item_total,
            item_count: body.item_count,
            cart_total: body.cart_total,
        })
    }
}

impl CartUpdate {
    pub fn item_count(&self) -> u32 {
        match self {
            CartUpdate::Removed { item_count, .. } | CartUpdate::Changed { item_count, .. } => {
                *item_count
            }
        }
    }

    pub fn cart_total(&self) -> f64 {
        match self {
            CartUpdate::Removed { cart_total, .. } | CartUpdate::Changed { cart_total, .. } => {
                *cart_total
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartCleared {
    #[serde(default)]
    pub message: String,
}

/// Bare acknowledgement (`{"success": true}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Ack {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeSpec {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeList {
    pub attributes: Vec<AttributeSpec>,
}

// ── Requests ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartUpdateRequest {
    pub item_id: CartItemId,
    pub action: CartUpdateAction,
}

impl CartUpdateRequest {
    pub fn form_fields(&self) -> FormFields {
        vec![
            ("item_id".to_owned(), self.item_id.to_string()),
            ("action".to_owned(), self.action.as_str().to_owned()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderRequest {
    pub image_ids: Vec<ImageId>,
}

impl ReorderRequest {
    /// `image_ids` travels as a JSON array inside the form body.
    pub fn form_fields(&self, csrf_token: &str) -> Result<FormFields, TransportError> {
        let ids = serde_json::to_string(&self.image_ids)
            .map_err(|err| TransportError::Encode(err.to_string()))?;
        Ok(vec![
            (CSRF_FIELD.to_owned(), csrf_token.to_owned()),
            ("image_ids".to_owned(), ids),
        ])
    }
}

pub fn make_main_fields(csrf_token: &str) -> FormFields {
    vec![(CSRF_FIELD.to_owned(), csrf_token.to_owned())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_add_to_cart_success() {
        let body = r#"{"success": true, "item_count": 4, "cart_total": 120.5, "message": "Jabón añadido al carrito."}"#;
        let outcome: Outcome<CartAdded> = decode(body);
        assert_eq!(
            outcome,
            Outcome::Success(CartAdded {
                item_count: 4,
                message: "Jabón añadido al carrito.".to_owned(),
                cart_total: Some(120.5),
            })
        );
    }

    #[test]
    fn bare_error_body_is_a_rejection() {
        // 400 responses from the add endpoint carry no `success` flag.
        let outcome: Outcome<CartAdded> = decode(r#"{"error": "Stock insuficiente"}"#);
        assert_eq!(outcome, Outcome::Rejected("Stock insuficiente".to_owned()));
    }

    #[test]
    fn success_false_without_reason_gets_fallback_text() {
        let outcome: Outcome<Ack> = decode(r#"{"success": false}"#);
        assert_eq!(outcome, Outcome::Rejected(REJECTED_WITHOUT_REASON.to_owned()));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let outcome: Outcome<Ack> = decode("<html>502 Bad Gateway</html>");
        assert!(matches!(outcome, Outcome::Failed(TransportError::Malformed(_))));
    }

    #[test]
    fn success_with_missing_fields_is_malformed() {
        let outcome: Outcome<CartAdded> = decode(r#"{"success": true, "message": "ok"}"#);
        assert!(matches!(outcome, Outcome::Failed(TransportError::Malformed(_))));
    }

    #[test]
    fn cart_update_without_removed_flag_is_a_change() {
        let body = r#"{"success": true, "quantity": 3, "item_total": 45.0, "item_count": 5, "cart_total": 99.9}"#;
        let outcome: Outcome<CartUpdate> = decode(body);
        assert_eq!(
            outcome,
            Outcome::Success(CartUpdate::Changed {
                quantity: 3,
                item_total: 45.0,
                item_count: 5,
                cart_total: 99.9,
            })
        );
    }

    #[test]
    fn cart_update_removed_ignores_line_fields() {
        let body = r#"{"success": true, "removed": true, "item_count": 0, "cart_total": 0}"#;
        let outcome: Outcome<CartUpdate> = decode(body);
        assert_eq!(
            outcome,
            Outcome::Success(CartUpdate::Removed {
                item_count: 0,
                cart_total: 0.0,
            })
        );
    }

    #[test]
    fn changed_line_without_quantity_is_malformed() {
        let body = r#"{"success": true, "removed": false, "item_total": 10, "item_count": 1, "cart_total": 10}"#;
        let outcome: Outcome<CartUpdate> = decode(body);
        assert!(matches!(outcome, Outcome::Failed(TransportError::Malformed(_))));
    }

    #[test]
    fn attribute_list_decodes_without_success_flag() {
        let body = r#"{"attributes": [{"id": 2, "name": "Aroma", "values": ["Floral", "Cítrico"]}]}"#;
        let Outcome::Success(list) = decode::<AttributeList>(body) else {
            panic!("expected attribute list");
        };
        assert_eq!(list.attributes.len(), 1);
        assert_eq!(list.attributes[0].values, vec!["Floral", "Cítrico"]);
    }

    #[test]
    fn ids_and_actions_parse_from_attributes() {
        assert_eq!(" 17 ".parse::<CartItemId>(), Ok(CartItemId(17)));
        assert!("abc".parse::<ImageId>().is_err());
        assert_eq!("remove".parse::<CartUpdateAction>(), Ok(CartUpdateAction::Remove));
        assert!("explode".parse::<CartUpdateAction>().is_err());
    }

    #[test]
    fn reorder_fields_serialize_ids_as_json_numbers() {
        let req = ReorderRequest {
            image_ids: vec![ImageId(3), ImageId(1), ImageId(2)],
        };
        let fields = req.form_fields("tok").expect("ids encode");
        assert_eq!(fields[0], (CSRF_FIELD.to_owned(), "tok".to_owned()));
        assert_eq!(fields[1], ("image_ids".to_owned(), "[3,1,2]".to_owned()));
    }

    #[test]
    fn reorder_ids_decode_back_as_the_sent_order() {
        let req = ReorderRequest {
            image_ids: vec![ImageId(12), ImageId(7)],
        };
        let fields = req.form_fields("tok").expect("ids encode");
        let sent: Vec<u64> = serde_json::from_str(&fields[1].1).expect("json array");
        assert_eq!(sent, vec![12, 7]);

        let empty = ReorderRequest { image_ids: Vec::new() };
        assert_eq!(empty.form_fields("tok").expect("ids encode")[1].1, "[]");
    }
}
