//! Category → attribute fields on the product form.
//!
//! Every category change fetches the attribute list again and replaces the
//! whole field set; nothing is cached between selections. A response that
//! arrives after a newer selection was made is dropped.

use gc_api_types::{AttributeList, AttributeSpec, CategoryId, Messages, Outcome};
use std::cell::RefCell;
use tracing::{debug, error, info, warn};

use crate::api::AdminApi;

pub const BLANK_OPTION_TEXT: &str = "---------";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeField {
    pub attribute_id: u64,
    pub label: String,
    /// Form field name the server reads back (`attribute_<id>`).
    pub input_name: String,
    /// Blank option first, then one per allowed value.
    pub options: Vec<SelectOption>,
}

impl AttributeField {
    pub fn from_spec(spec: &AttributeSpec) -> Self {
        let mut options = Vec::with_capacity(spec.values.len() + 1);
        options.push(SelectOption {
            value: String::new(),
            text: BLANK_OPTION_TEXT.to_owned(),
        });
        options.extend(spec.values.iter().map(|value| SelectOption {
            value: value.clone(),
            text: value.clone(),
        }));
        Self {
            attribute_id: spec.id,
            label: format!("{}:", spec.name),
            input_name: format!("attribute_{}", spec.id),
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFieldSet {
    pub category: CategoryId,
    pub fields: Vec<AttributeField>,
}

impl AttributeFieldSet {
    pub fn from_list(category: CategoryId, list: &AttributeList) -> Self {
        Self {
            category,
            fields: list.attributes.iter().map(AttributeField::from_spec).collect(),
        }
    }
}

pub trait AttributeContainer {
    /// Clear the container and render one select per field.
    fn replace_fields(&mut self, fields: &AttributeFieldSet);
    /// Show a failure note without touching the current fields.
    fn show_error(&mut self, message: &str);
    fn clear_error(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub category: CategoryId,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoaderState {
    #[default]
    Idle,
    Loading(CategoryId),
    Loaded(CategoryId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadResult {
    Loaded { category: CategoryId, fields: usize },
    /// A newer selection was made while this one was in flight.
    Stale,
    Failed,
}

#[derive(Debug, Default)]
pub struct AttributeLoader {
    generation: u64,
    state: LoaderState,
}

impl AttributeLoader {
    pub fn state(&self) -> LoaderState {
        self.state
    }

    /// Start loading for a raw `<select>` value. Empty or unparsable values
    /// start nothing but still supersede any load in flight.
    pub fn begin(&mut self, selection: &str) -> Option<LoadTicket> {
        self.generation += 1;
        let selection = selection.trim();
        if selection.is_empty() {
            self.state = LoaderState::Idle;
            return None;
        }
        let category = match selection.parse::<CategoryId>() {
            Ok(category) => category,
            Err(err) => {
                warn!(%err, "ignoring category selection");
                self.state = LoaderState::Idle;
                return None;
            }
        };
        self.state = LoaderState::Loading(category);
        Some(LoadTicket {
            category,
            generation: self.generation,
        })
    }

    pub fn complete<C: AttributeContainer + ?Sized>(
        &mut self,
        ticket: LoadTicket,
        outcome: Outcome<AttributeList>,
        container: &mut C,
        messages: &Messages,
    ) -> LoadResult {
        if ticket.generation != self.generation {
            debug!(category = %ticket.category, "dropping stale attribute response");
            return LoadResult::Stale;
        }
        match outcome {
            Outcome::Success(list) => {
                let set = AttributeFieldSet::from_list(ticket.category, &list);
                container.clear_error();
                container.replace_fields(&set);
                self.state = LoaderState::Loaded(ticket.category);
                info!(category = %ticket.category, fields = set.fields.len(), "attribute fields loaded");
                LoadResult::Loaded {
                    category: ticket.category,
                    fields: set.fields.len(),
                }
            }
            Outcome::Rejected(reason) => {
                warn!(category = %ticket.category, %reason, "attribute load rejected");
                container.show_error(&format!("{}: {}", messages.attributes_failed, reason));
                self.state = LoaderState::Idle;
                LoadResult::Failed
            }
            Outcome::Failed(err) => {
                error!(category = %ticket.category, %err, "attribute load failed");
                container.show_error(&messages.attributes_failed);
                self.state = LoaderState::Idle;
                LoadResult::Failed
            }
        }
    }
}

/// Run one selection change end to end. The loader is never borrowed across
/// the request, so overlapping selections can start while one is in flight.
pub async fn load_for_selection<A, C>(
    api: &A,
    loader: &RefCell<AttributeLoader>,
    container: &mut C,
    selection: &str,
    messages: &Messages,
) -> Option<LoadResult>
where
    A: AdminApi,
    C: AttributeContainer + ?Sized,
{
    let ticket = loader.borrow_mut().begin(selection)?;
    debug!(category = %ticket.category, "loading attribute fields");
    let outcome = api.attributes(ticket.category).await;
    Some(loader.borrow_mut().complete(ticket, outcome, container, messages))
}
