//! Add-to-cart, update-cart and clear-cart flows.
//!
//! The page never computes counts or totals itself: every value it shows is
//! copied from the last server response for that mutation. Overlapping
//! requests are not serialized; whichever response lands last wins.

use async_trait::async_trait;
use gc_api_types::{
    CartAdded, CartCleared, CartItemId, CartUpdate, CartUpdateRequest, FormFields, Outcome,
    ShopConfig,
};
use tracing::{debug, error, info, warn};

use crate::money::MoneyFormat;
use crate::notify::Notification;

#[async_trait(?Send)]
pub trait StorefrontApi {
    /// POST the add-to-cart form to its own `action` URL.
    async fn add_to_cart(&self, action_url: &str, fields: FormFields) -> Outcome<CartAdded>;
    async fn update_cart(&self, request: CartUpdateRequest) -> Outcome<CartUpdate>;
    async fn clear_cart(&self) -> Outcome<CartCleared>;
}

/// The parts of the page the cart flows write to.
///
/// Implementations silently skip regions the current page does not render.
pub trait CartPage {
    /// Show `count` on the header badge. The badge is created only when
    /// `create_if_missing` is set.
    fn show_item_count(&mut self, count: u32, create_if_missing: bool);
    fn remove_item_count(&mut self);
    /// Remove the line's row and return how many rows remain.
    fn remove_line(&mut self, item: CartItemId) -> usize;
    fn set_line_quantity(&mut self, item: CartItemId, quantity: u32);
    fn set_line_total(&mut self, item: CartItemId, text: &str);
    fn set_cart_total(&mut self, text: &str);
    fn reload(&mut self);
    fn notify(&mut self, notification: Notification);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddToCartState {
    Added { item_count: u32 },
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineUpdateState {
    /// The line is gone; `reloaded` is set when it was the last one.
    Removed { reloaded: bool },
    Updated { quantity: u32 },
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearCartState {
    Cleared,
    Failed,
}

pub struct CartController<A> {
    api: A,
    money: MoneyFormat,
    generic_error: String,
}

impl<A: StorefrontApi> CartController<A> {
    pub fn new(api: A, config: &ShopConfig) -> Self {
        Self {
            api,
            money: MoneyFormat::from_config(config),
            generic_error: config.messages.generic_error.clone(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn add_to_cart<P: CartPage>(
        &self,
        page: &mut P,
        action_url: &str,
        fields: FormFields,
    ) -> AddToCartState {
        debug!(action_url, "submitting add-to-cart form");
        let outcome = self.api.add_to_cart(action_url, fields).await;
        self.apply_add_to_cart(page, outcome)
    }

    pub fn apply_add_to_cart<P: CartPage>(
        &self,
        page: &mut P,
        outcome: Outcome<CartAdded>,
    ) -> AddToCartState {
        match outcome {
            Outcome::Success(added) => {
                info!(item_count = added.item_count, "item added to cart");
                page.show_item_count(added.item_count, true);
                if let Some(total) = added.cart_total {
                    page.set_cart_total(&self.money.format(total));
                }
                page.notify(Notification::success(added.message));
                AddToCartState::Added {
                    item_count: added.item_count,
                }
            }
            Outcome::Rejected(reason) => {
                warn!(%reason, "add-to-cart rejected");
                page.notify(Notification::danger(reason));
                AddToCartState::Failed
            }
            Outcome::Failed(err) => {
                error!(%err, "add-to-cart request failed");
                page.notify(Notification::danger(self.generic_error.clone()));
                AddToCartState::Failed
            }
        }
    }

    pub async fn update_line<P: CartPage>(
        &self,
        page: &mut P,
        request: CartUpdateRequest,
    ) -> LineUpdateState {
        debug!(item = %request.item_id, action = request.action.as_str(), "updating cart line");
        let outcome = self.api.update_cart(request).await;
        self.apply_line_update(page, request.item_id, outcome)
    }

    pub fn apply_line_update<P: CartPage>(
        &self,
        page: &mut P,
        item: CartItemId,
        outcome: Outcome<CartUpdate>,
    ) -> LineUpdateState {
        let update = match outcome {
            Outcome::Success(update) => update,
            Outcome::Rejected(reason) => {
                warn!(%item, %reason, "cart update rejected");
                page.notify(Notification::danger(reason));
                return LineUpdateState::Failed;
            }
            Outcome::Failed(err) => {
                error!(%item, %err, "cart update request failed");
                page.notify(Notification::danger(self.generic_error.clone()));
                return LineUpdateState::Failed;
            }
        };

        let state = match update {
            CartUpdate::Removed { .. } => {
                let remaining = page.remove_line(item);
                if remaining == 0 {
                    // The empty-cart view is server-rendered.
                    info!(%item, "last cart line removed, reloading");
                    page.reload();
                    return LineUpdateState::Removed { reloaded: true };
                }
                LineUpdateState::Removed { reloaded: false }
            }
            CartUpdate::Changed {
                quantity,
                item_total,
                ..
            } => {
                page.set_line_quantity(item, quantity);
                page.set_line_total(item, &self.money.format(item_total));
                LineUpdateState::Updated { quantity }
            }
        };

        let item_count = update.item_count();
        if item_count == 0 {
            page.remove_item_count();
        } else {
            page.show_item_count(item_count, false);
        }
        page.set_cart_total(&self.money.format(update.cart_total()));
        info!(%item, item_count, "cart line updated");
        state
    }

    pub async fn clear<P: CartPage>(&self, page: &mut P) -> ClearCartState {
        debug!("clearing cart");
        match self.api.clear_cart().await {
            Outcome::Success(cleared) => {
                info!(message = %cleared.message, "cart cleared, reloading");
                page.remove_item_count();
                page.reload();
                ClearCartState::Cleared
            }
            Outcome::Rejected(reason) => {
                warn!(%reason, "clear cart rejected");
                page.notify(Notification::danger(reason));
                ClearCartState::Failed
            }
            Outcome::Failed(err) => {
                error!(%err, "clear cart request failed");
                page.notify(Notification::danger(self.generic_error.clone()));
                ClearCartState::Failed
            }
        }
    }
}
