//! Product admin behaviour without a DOM.
//!
//! Image preview sequencing, main-image designation, reorder persistence and
//! category attribute fields. The browser crate implements the page traits.

pub mod api;
pub mod attributes;
pub mod main_image;
pub mod preview;
pub mod reorder;

pub use api::AdminApi;
pub use attributes::{
    AttributeContainer, AttributeField, AttributeFieldSet, AttributeLoader, LoadResult,
    SelectOption,
};
pub use main_image::{ImageTable, MainImageState};
pub use preview::{PreviewSequencer, PreviewTicket};
pub use reorder::{OrderableList, ReorderSession, ReorderState};
