//! Reorder persistence for the product image table.
//!
//! The drag behaviour itself lives in the browser crate; it only has to
//! expose the list through [`OrderableList`]. When the server does not accept
//! the new order, the order captured at drag start is put back.

use gc_api_types::{ImageId, Messages, Outcome, ReorderRequest};
use tracing::{debug, error, info, warn};

use crate::api::AdminApi;

pub trait OrderableList {
    fn current_order(&self) -> Vec<ImageId>;
    fn apply_order(&mut self, order: &[ImageId]);
    /// Blocking alert.
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderState {
    /// The drop did not change the order; nothing was sent.
    Unchanged,
    Saved(Vec<ImageId>),
    Reverted,
    /// The request failed but the user already moved rows again, so the
    /// newer order is left in place.
    Superseded,
}

/// Order snapshot taken when a drag starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderSession {
    before: Vec<ImageId>,
}

impl ReorderSession {
    pub fn begin<L: OrderableList + ?Sized>(list: &L) -> Self {
        Self {
            before: list.current_order(),
        }
    }

    pub fn original_order(&self) -> &[ImageId] {
        &self.before
    }

    /// Persist the list's current order, reverting on failure.
    pub async fn finish<A, L>(self, api: &A, list: &mut L, messages: &Messages) -> ReorderState
    where
        A: AdminApi,
        L: OrderableList + ?Sized,
    {
        let order = list.current_order();
        if order == self.before {
            debug!("drop left image order unchanged");
            return ReorderState::Unchanged;
        }

        debug!(count = order.len(), "persisting image order");
        let request = ReorderRequest {
            image_ids: order.clone(),
        };
        let alert = match api.reorder(request).await {
            Outcome::Success(_) => {
                info!(count = order.len(), "image order saved");
                return ReorderState::Saved(order);
            }
            Outcome::Rejected(reason) => {
                warn!(%reason, "image reorder rejected");
                format!("{}: {}", messages.reorder_failed, reason)
            }
            Outcome::Failed(err) => {
                error!(%err, "image reorder request failed");
                messages.communication_error.clone()
            }
        };

        let state = if list.current_order() == order {
            list.apply_order(&self.before);
            ReorderState::Reverted
        } else {
            ReorderState::Superseded
        };
        list.alert(&alert);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gc_api_types::{Ack, AttributeList, CategoryId, TransportError};
    use std::cell::RefCell;

    struct ReorderApi {
        reply: RefCell<Option<Outcome<Ack>>>,
        sent: RefCell<Vec<ReorderRequest>>,
    }

    impl ReorderApi {
        fn replying(outcome: Outcome<Ack>) -> Self {
            Self {
                reply: RefCell::new(Some(outcome)),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl AdminApi for ReorderApi {
        async fn make_main(&self, _image: ImageId) -> Outcome<Ack> {
            unreachable!()
        }

        async fn reorder(&self, request: ReorderRequest) -> Outcome<Ack> {
            self.sent.borrow_mut().push(request);
            self.reply.borrow_mut().take().expect("single reorder call")
        }

        async fn attributes(&self, _category: CategoryId) -> Outcome<AttributeList> {
            unreachable!()
        }
    }

    #[derive(Debug, Default)]
    struct Rows {
        order: Vec<ImageId>,
        alerts: Vec<String>,
    }

    impl Rows {
        fn of(ids: &[u64]) -> Self {
            Self {
                order: ids.iter().copied().map(ImageId).collect(),
                alerts: Vec::new(),
            }
        }

        fn drag(&mut self, from: usize, to: usize) {
            let id = self.order.remove(from);
            self.order.insert(to, id);
        }
    }

    impl OrderableList for Rows {
        fn current_order(&self) -> Vec<ImageId> {
            self.order.clone()
        }

        fn apply_order(&mut self, order: &[ImageId]) {
            self.order = order.to_vec();
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_owned());
        }
    }

    fn ids(raw: &[u64]) -> Vec<ImageId> {
        raw.iter().copied().map(ImageId).collect()
    }

    #[tokio::test]
    async fn saved_order_is_sent_in_full() {
        let api = ReorderApi::replying(Outcome::Success(Ack {}));
        let mut rows = Rows::of(&[10, 20, 30]);
        let session = ReorderSession::begin(&rows);
        rows.drag(2, 0);

        let state = session.finish(&api, &mut rows, &Messages::default()).await;

        assert_eq!(state, ReorderState::Saved(ids(&[30, 10, 20])));
        assert_eq!(api.sent.borrow()[0].image_ids, ids(&[30, 10, 20]));
        assert!(rows.alerts.is_empty());
    }

    #[tokio::test]
    async fn rejection_restores_previous_order() {
        let api = ReorderApi::replying(Outcome::Rejected("boom".into()));
        let mut rows = Rows::of(&[10, 20, 30]);
        let session = ReorderSession::begin(&rows);
        rows.drag(0, 2);
        let messages = Messages::default();

        let state = session.finish(&api, &mut rows, &messages).await;

        assert_eq!(state, ReorderState::Reverted);
        assert_eq!(rows.order, ids(&[10, 20, 30]));
        assert_eq!(rows.alerts, vec![format!("{}: boom", messages.reorder_failed)]);
    }

    #[tokio::test]
    async fn transport_failure_restores_previous_order() {
        let api = ReorderApi::replying(Outcome::Failed(TransportError::Network("down".into())));
        let mut rows = Rows::of(&[1, 2]);
        let session = ReorderSession::begin(&rows);
        rows.drag(1, 0);
        let messages = Messages::default();

        let state = session.finish(&api, &mut rows, &messages).await;

        assert_eq!(state, ReorderState::Reverted);
        assert_eq!(rows.order, ids(&[1, 2]));
        assert_eq!(rows.alerts, vec![messages.communication_error.clone()]);
    }

    #[tokio::test]
    async fn unchanged_drop_sends_nothing() {
        let api = ReorderApi::replying(Outcome::Success(Ack {}));
        let mut rows = Rows::of(&[1, 2, 3]);
        let session = ReorderSession::begin(&rows);
        rows.drag(1, 1);

        let state = session.finish(&api, &mut rows, &Messages::default()).await;

        assert_eq!(state, ReorderState::Unchanged);
        assert!(api.sent.borrow().is_empty());
    }

    /// Reports a different order on every read, as if the user kept dragging.
    struct RestlessRows {
        reads: RefCell<Vec<Vec<ImageId>>>,
        applied: Vec<Vec<ImageId>>,
        alerts: usize,
    }

    impl OrderableList for RestlessRows {
        fn current_order(&self) -> Vec<ImageId> {
            self.reads.borrow_mut().remove(0)
        }

        fn apply_order(&mut self, order: &[ImageId]) {
            self.applied.push(order.to_vec());
        }

        fn alert(&mut self, _message: &str) {
            self.alerts += 1;
        }
    }

    #[tokio::test]
    async fn failure_after_a_newer_drag_keeps_the_newer_order() {
        let api = ReorderApi::replying(Outcome::Rejected("stale".into()));
        let mut rows = RestlessRows {
            reads: RefCell::new(vec![ids(&[1, 2, 3]), ids(&[2, 1, 3]), ids(&[3, 2, 1])]),
            applied: Vec::new(),
            alerts: 0,
        };
        let session = ReorderSession::begin(&rows);

        let state = session.finish(&api, &mut rows, &Messages::default()).await;

        assert_eq!(state, ReorderState::Superseded);
        assert!(rows.applied.is_empty());
        assert_eq!(rows.alerts, 1);
    }
}
