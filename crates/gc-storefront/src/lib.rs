//! Storefront behaviour without a DOM.
//!
//! The browser crate owns elements, listeners and `fetch`; everything that
//! decides *what* the page should show lives here so it can be tested natively.

pub mod cart;
pub mod gallery;
pub mod money;
pub mod nav;
pub mod notify;
pub mod quantity;

pub use cart::{
    AddToCartState, CartController, CartPage, ClearCartState, LineUpdateState, StorefrontApi,
};
pub use gallery::Gallery;
pub use money::MoneyFormat;
pub use nav::{NavMenu, NavVisibility};
pub use notify::{Notification, Severity};
pub use quantity::QuantityStepper;
