//! "Make main image" action.
//!
//! At most one main-image indicator is visible; it sits next to the control
//! of the image the server last confirmed.

use gc_api_types::{Ack, ImageId, Messages, Outcome};
use tracing::{debug, error, info, warn};

use crate::api::AdminApi;

pub trait ImageTable {
    fn clear_indicators(&mut self);
    fn show_all_controls(&mut self);
    fn hide_control(&mut self, image: ImageId);
    /// Insert the indicator right after `image`'s control.
    fn insert_indicator(&mut self, image: ImageId, label: &str);
    /// Blocking alert.
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainImageState {
    Designated(ImageId),
    Failed,
}

pub async fn designate<A, T>(
    api: &A,
    table: &mut T,
    image: ImageId,
    messages: &Messages,
) -> MainImageState
where
    A: AdminApi,
    T: ImageTable,
{
    debug!(%image, "requesting main image change");
    let outcome = api.make_main(image).await;
    apply(table, image, outcome, messages)
}

pub fn apply<T: ImageTable>(
    table: &mut T,
    image: ImageId,
    outcome: Outcome<Ack>,
    messages: &Messages,
) -> MainImageState {
    match outcome {
        Outcome::Success(_) => {
            table.clear_indicators();
            table.show_all_controls();
            table.hide_control(image);
            table.insert_indicator(image, &messages.main_image_label);
            info!(%image, "main image set");
            table.alert(&messages.main_image_set);
            MainImageState::Designated(image)
        }
        Outcome::Rejected(reason) => {
            warn!(%image, %reason, "main image change rejected");
            table.alert(&format!("{}: {}", messages.main_image_failed, reason));
            MainImageState::Failed
        }
        Outcome::Failed(err) => {
            error!(%image, %err, "main image request failed");
            table.alert(&messages.communication_error);
            MainImageState::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gc_api_types::{AttributeList, CategoryId, ReorderRequest, TransportError};
    use std::cell::RefCell;

    struct OneShotApi(RefCell<Option<Outcome<Ack>>>);

    #[async_trait(?Send)]
    impl AdminApi for OneShotApi {
        async fn make_main(&self, _image: ImageId) -> Outcome<Ack> {
            self.0.borrow_mut().take().expect("single call")
        }

        async fn reorder(&self, _request: ReorderRequest) -> Outcome<Ack> {
            unreachable!()
        }

        async fn attributes(&self, _category: CategoryId) -> Outcome<AttributeList> {
            unreachable!()
        }
    }

    /// Rows of (image, control visible, indicator label).
    #[derive(Debug, Clone, PartialEq)]
    struct FakeTable {
        rows: Vec<(ImageId, bool, Option<String>)>,
        alerts: Vec<String>,
    }

    impl FakeTable {
        fn new(ids: &[u64], main: Option<u64>) -> Self {
            let rows = ids
                .iter()
                .map(|id| {
                    let is_main = main == Some(*id);
                    (ImageId(*id), !is_main, is_main.then(|| "Imagen Principal".to_owned()))
                })
                .collect();
            Self {
                rows,
                alerts: Vec::new(),
            }
        }

        fn indicators(&self) -> Vec<ImageId> {
            self.rows
                .iter()
                .filter(|(_, _, label)| label.is_some())
                .map(|(id, _, _)| *id)
                .collect()
        }
    }

    impl ImageTable for FakeTable {
        fn clear_indicators(&mut self) {
            for row in &mut self.rows {
                row.2 = None;
            }
        }

        fn show_all_controls(&mut self) {
            for row in &mut self.rows {
                row.1 = true;
            }
        }

        fn hide_control(&mut self, image: ImageId) {
            if let Some(row) = self.rows.iter_mut().find(|row| row.0 == image) {
                row.1 = false;
            }
        }

        fn insert_indicator(&mut self, image: ImageId, label: &str) {
            if let Some(row) = self.rows.iter_mut().find(|row| row.0 == image) {
                row.2 = Some(label.to_owned());
            }
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_owned());
        }
    }

    #[tokio::test]
    async fn success_moves_the_single_indicator() {
        let api = OneShotApi(RefCell::new(Some(Outcome::Success(Ack {}))));
        let mut table = FakeTable::new(&[1, 2, 3], Some(1));
        let messages = Messages::default();

        let state = designate(&api, &mut table, ImageId(3), &messages).await;

        assert_eq!(state, MainImageState::Designated(ImageId(3)));
        assert_eq!(table.indicators(), vec![ImageId(3)]);
        for (id, visible, _) in &table.rows {
            assert_eq!(*visible, *id != ImageId(3), "control for {id}");
        }
        assert_eq!(table.alerts, vec![messages.main_image_set.clone()]);
    }

    #[test]
    fn rejection_alerts_with_reason_and_keeps_table() {
        let mut table = FakeTable::new(&[1, 2], Some(1));
        let before = table.rows.clone();
        let messages = Messages::default();

        let state = apply(
            &mut table,
            ImageId(2),
            Outcome::Rejected("No ProductImage matches the given query.".into()),
            &messages,
        );

        assert_eq!(state, MainImageState::Failed);
        assert_eq!(table.rows, before);
        assert_eq!(
            table.alerts,
            vec![format!(
                "{}: No ProductImage matches the given query.",
                messages.main_image_failed
            )]
        );
    }

    #[test]
    fn transport_failure_alerts_generic_message() {
        let mut table = FakeTable::new(&[1, 2], None);
        let messages = Messages::default();

        apply(
            &mut table,
            ImageId(1),
            Outcome::Failed(TransportError::Network("reset".into())),
            &messages,
        );

        assert!(table.indicators().is_empty());
        assert_eq!(table.alerts, vec![messages.communication_error.clone()]);
    }
}
