//! Entity stores
//!
//! Each store owns the client-side collection for one backend resource and
//! the operations that keep it in sync with the server. All mutations are
//! confirmed: the collection only changes after the server has accepted
//! the request, and a failed call leaves it exactly as it was.

pub mod catalog;
pub mod category;
pub mod gst;
pub mod product;
pub mod sales;
pub mod settings;

pub use sales::SalesStore;
pub use settings::SettingsStore;

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};
use parking_lot::RwLock;
use serde_json::Value;
use shared::models::Identified;
use shared::normalize::{Normalize, NormalizeContext};
use shared::request::{Filters, FormPayload};
use shared::response::{Pagination, read_pagination};
use shared::util::percent_encode;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Collection
// =============================================================================

/// Ordered records keyed by stringified id
///
/// No two records ever share an id: every mutation that would introduce a
/// duplicate overwrites the existing record instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified + Clone> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id().matches(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id().matches(id))
    }

    /// Replace everything; later duplicates of an id are dropped
    pub fn replace_all(&mut self, items: Vec<T>) {
        let mut seen = HashSet::new();
        self.items = items
            .into_iter()
            .filter(|item| seen.insert(item.id().as_str().to_string()))
            .collect();
    }

    /// Add a created record at the front, or overwrite it in place when the
    /// id is already held
    pub fn upsert_front(&mut self, item: T) {
        match self.position(item.id().as_str()) {
            Some(index) => self.items[index] = item,
            None => self.items.insert(0, item),
        }
    }

    /// Put an updated record where `id` was
    ///
    /// A record whose id changed also evicts any other entry with the new
    /// id. An id not held locally is added at the front.
    pub fn replace(&mut self, id: &str, item: T) {
        let new_id = item.id().as_str().to_string();
        match self.position(id) {
            Some(index) => {
                self.items[index] = item;
                let mut position = 0;
                self.items.retain(|existing| {
                    let keep = position == index || !existing.id().matches(&new_id);
                    position += 1;
                    keep
                });
            }
            None => self.upsert_front(item),
        }
    }

    /// Remove the record with `id`; returns whether one was held
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !item.id().matches(id));
        self.items.len() != before
    }

    /// Merge without duplicates
    ///
    /// Incoming records whose id is already held are skipped; the rest are
    /// prepended in their incoming order. Returns how many were added.
    pub fn merge_front(&mut self, incoming: Vec<T>) -> usize {
        let mut known: HashSet<String> = self
            .items
            .iter()
            .map(|item| item.id().as_str().to_string())
            .collect();
        let fresh: Vec<T> = incoming
            .into_iter()
            .filter(|item| known.insert(item.id().as_str().to_string()))
            .collect();
        let added = fresh.len();
        self.items.splice(0..0, fresh);
        added
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }
}

// =============================================================================
// Resource description
// =============================================================================

/// Endpoints and identity of a CRUD resource
///
/// Path templates use `{id}` as the id placeholder.
pub trait Resource: Normalize + Identified + Clone + Send + Sync + 'static {
    /// Entity name used in logs
    const ENTITY: &'static str;
    const LIST_PATH: &'static str;
    const SHOW_PATH: &'static str;
    const CREATE_PATH: &'static str;
    const UPDATE_PATH: &'static str;
    const DELETE_PATH: &'static str;
    /// Some endpoints take deletes as `POST`
    const DELETE_VIA_POST: bool = false;
}

/// Fill the `{id}` placeholder of a path template
pub fn path_for(template: &str, id: &str) -> String {
    template.replace("{id}", &percent_encode(id.trim()))
}

/// The record a mutation response carries, if it carries one
///
/// Envelopes such as `{success: true, message: "Saved"}` normalize to a
/// record with a synthetic id; those yield `None`.
pub(crate) fn confirmed_record<T: Normalize + Identified>(
    payload: &Value,
    ctx: &NormalizeContext,
) -> Option<T> {
    let record = T::normalize_one(payload, ctx);
    (!record.id().is_synthetic()).then_some(record)
}

/// The one record a refresh added to a view
///
/// Only a pure addition qualifies: every previously held id is still
/// present and exactly one new id appeared. A shifted page or a search
/// that excludes the new record yields `None`.
pub(crate) fn single_addition<T: Identified + Clone>(before: &[String], after: &[T]) -> Option<T> {
    let all_kept = before
        .iter()
        .all(|id| after.iter().any(|item| item.id().matches(id)));
    let mut added = after
        .iter()
        .filter(|item| !before.iter().any(|id| item.id().matches(id)));
    match (all_kept, added.next(), added.next()) {
        (true, Some(record), None) => Some(record.clone()),
        _ => None,
    }
}

/// Run a delete request, treating 404 as already deleted
pub(crate) async fn delete_confirmed(
    http: &dyn HttpClient,
    path: &str,
    via_post: bool,
) -> ClientResult<()> {
    let result = if via_post {
        http.post_json(path, &Value::Object(Default::default())).await
    } else {
        http.delete(path).await
    };
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.is_not_found() => {
            tracing::debug!(path, "delete target already gone");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

// =============================================================================
// EntityStore
// =============================================================================

#[derive(Debug)]
struct StoreState<T> {
    items: Collection<T>,
    pagination: Option<Pagination>,
    last_filters: Filters,
    loading: bool,
    last_error: Option<String>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            items: Collection::default(),
            pagination: None,
            last_filters: Filters::new(),
            loading: false,
            last_error: None,
        }
    }
}

/// Store for one CRUD resource
///
/// Cloning shares the underlying collection.
#[derive(Clone)]
pub struct EntityStore<T: Resource> {
    http: Arc<dyn HttpClient>,
    ctx: NormalizeContext,
    state: Arc<RwLock<StoreState<T>>>,
}

impl<T: Resource> fmt::Debug for EntityStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("EntityStore")
            .field("entity", &T::ENTITY)
            .field("count", &state.items.len())
            .field("loading", &state.loading)
            .finish()
    }
}

impl<T: Resource> EntityStore<T> {
    pub fn new(http: Arc<dyn HttpClient>, ctx: NormalizeContext) -> Self {
        Self {
            http,
            ctx,
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }

    // ========== Read access ==========

    /// Copy of the current collection
    pub fn items(&self) -> Vec<T> {
        self.state.read().items.items().to_vec()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.state.read().items.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    /// Page metadata of the last successful fetch
    pub fn pagination(&self) -> Option<Pagination> {
        self.state.read().pagination
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Message of the last failed operation, cleared by the next success
    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    // ========== Operations ==========

    /// Fetch a listing and replace the whole collection
    pub async fn fetch(&self, filters: &Filters) -> ClientResult<Vec<T>> {
        self.state.write().loading = true;
        let result = self.http.get(T::LIST_PATH, filters).await;

        let payload = match result {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail("fetch", e)),
        };
        let items = T::normalize_list(&payload, &self.ctx);
        let pagination = read_pagination(&payload);

        let mut state = self.state.write();
        state.items.replace_all(items);
        state.pagination = pagination;
        state.last_filters = filters.clone();
        state.loading = false;
        state.last_error = None;
        tracing::info!(entity = T::ENTITY, count = state.items.len(), "collection fetched");
        Ok(state.items.items().to_vec())
    }

    /// Re-run the last fetch with the same filters
    pub async fn refresh(&self) -> ClientResult<Vec<T>> {
        let filters = self.state.read().last_filters.clone();
        self.fetch(&filters).await
    }

    /// Fetch one record; the collection is not touched
    pub async fn fetch_one(&self, id: &str) -> ClientResult<T> {
        let payload = self.http.get(&path_for(T::SHOW_PATH, id), &Filters::new()).await?;
        confirmed_record(&payload, &self.ctx).ok_or_else(|| {
            ClientError::InvalidResponse(format!("{} {id} missing from response", T::ENTITY))
        })
    }

    /// Create a record and add it at the front of the collection
    ///
    /// When the server confirms without echoing the record, the current view
    /// is re-fetched instead. The created record is returned when the echo or
    /// the refreshed view identifies it; `Ok(None)` means the server accepted
    /// the create but the record is outside the current view.
    pub async fn create(&self, form: impl Into<FormPayload>) -> ClientResult<Option<T>> {
        let form = form.into();
        let payload = match self.http.post_form(T::CREATE_PATH, &form).await {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail("create", e)),
        };

        match confirmed_record::<T>(&payload, &self.ctx) {
            Some(record) => {
                let mut state = self.state.write();
                state.items.upsert_front(record.clone());
                state.last_error = None;
                tracing::info!(entity = T::ENTITY, id = %record.id(), "record created");
                Ok(Some(record))
            }
            None => {
                tracing::debug!(entity = T::ENTITY, "create response without record, refreshing");
                let before = self.ids();
                let items = self.refresh().await?;
                let created = single_addition(&before, &items);
                if created.is_none() {
                    tracing::info!(entity = T::ENTITY, "record created outside the current view");
                }
                Ok(created)
            }
        }
    }

    /// Update a record and replace the matching collection entry
    pub async fn update(&self, id: &str, form: impl Into<FormPayload>) -> ClientResult<T> {
        let form = form.into();
        let payload = match self.http.post_form(&path_for(T::UPDATE_PATH, id), &form).await {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail("update", e)),
        };

        let record = match confirmed_record::<T>(&payload, &self.ctx) {
            Some(record) => record,
            None => self.fetch_one(id).await?,
        };
        let mut state = self.state.write();
        state.items.replace(id, record.clone());
        state.last_error = None;
        tracing::info!(entity = T::ENTITY, id, "record updated");
        Ok(record)
    }

    /// Delete a record; the entry is removed only after the server confirms
    ///
    /// Deleting an id that is already gone (locally or on the server) is
    /// not an error.
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let path = path_for(T::DELETE_PATH, id);
        if let Err(e) = delete_confirmed(self.http.as_ref(), &path, T::DELETE_VIA_POST).await {
            return Err(self.fail("delete", e));
        }
        let mut state = self.state.write();
        let removed = state.items.remove(id);
        state.last_error = None;
        tracing::info!(entity = T::ENTITY, id, removed, "record deleted");
        Ok(())
    }

    fn ids(&self) -> Vec<String> {
        self.state
            .read()
            .items
            .items()
            .iter()
            .map(|item| item.id().as_str().to_string())
            .collect()
    }

    fn fail(&self, operation: &str, error: ClientError) -> ClientError {
        let mut state = self.state.write();
        state.loading = false;
        state.last_error = Some(error.user_message());
        tracing::warn!(entity = T::ENTITY, operation, error = %error, "store operation failed");
        error
    }
}
