use async_trait::async_trait;
use gc_api_types::{Ack, AttributeList, CategoryId, ImageId, Outcome, ReorderRequest};

/// Admin endpoints. Implementations attach the anti-forgery token to every
/// mutating request.
#[async_trait(?Send)]
pub trait AdminApi {
    async fn make_main(&self, image: ImageId) -> Outcome<Ack>;
    async fn reorder(&self, request: ReorderRequest) -> Outcome<Ack>;
    async fn attributes(&self, category: CategoryId) -> Outcome<AttributeList>;
}
