//! Online orders and point-of-sale records in one collection

use super::{Collection, confirmed_record, delete_confirmed, path_for, single_addition};
use crate::http::HttpClient;
use crate::{ClientError, ClientResult};
use parking_lot::RwLock;
use shared::models::{Channel, ChannelTotals, PosSaleDraft, Sale};
use shared::normalize::{Normalize, NormalizeContext};
use shared::request::{Filters, FormPayload};
use shared::response::{Pagination, read_pagination};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

const ONLINE_LIST: &str = "/admin/online-orders";
const ONLINE_SHOW: &str = "/admin/online-orders/{id}";
const ONLINE_UPDATE: &str = "/admin/online-orders/update/{id}";
const POS_LIST: &str = "/admin/pos-orders";
const POS_SHOW: &str = "/admin/pos-orders/{id}";
const POS_CREATE: &str = "/admin/pos-orders/store";
const POS_DELETE: &str = "/admin/pos-orders/delete/{id}";

fn list_path(channel: Channel) -> &'static str {
    match channel {
        Channel::Online => ONLINE_LIST,
        Channel::Offline => POS_LIST,
    }
}

fn show_path(channel: Channel) -> &'static str {
    match channel {
        Channel::Online => ONLINE_SHOW,
        Channel::Offline => POS_SHOW,
    }
}

#[derive(Debug, Default)]
struct SalesState {
    items: Collection<Sale>,
    /// Fetched records skipped because the other channel held their id
    shadowed: HashMap<Channel, Vec<Sale>>,
    pagination: HashMap<Channel, Pagination>,
    loading: bool,
    last_error: Option<String>,
}

/// Sales store
///
/// Online orders and offline (POS) sales come from two endpoints but live
/// in one collection. A fetch for one channel drops that channel's previous
/// records and merges the fresh batch to the front without duplicates, so
/// the other channel's records are never disturbed.
///
/// A record skipped because the other channel already held its id is kept
/// aside and merged in once that id is free again.
#[derive(Clone)]
pub struct SalesStore {
    http: Arc<dyn HttpClient>,
    ctx: NormalizeContext,
    state: Arc<RwLock<SalesState>>,
}

impl fmt::Debug for SalesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("SalesStore")
            .field("count", &state.items.len())
            .field("loading", &state.loading)
            .finish()
    }
}

impl SalesStore {
    pub fn new(http: Arc<dyn HttpClient>, ctx: NormalizeContext) -> Self {
        Self {
            http,
            ctx,
            state: Arc::new(RwLock::new(SalesState::default())),
        }
    }

    // ========== Read access ==========

    pub fn items(&self) -> Vec<Sale> {
        self.state.read().items.items().to_vec()
    }

    pub fn by_channel(&self, channel: Channel) -> Vec<Sale> {
        self.state
            .read()
            .items
            .items()
            .iter()
            .filter(|s| s.channel == channel)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Sale> {
        self.state.read().items.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    pub fn pagination(&self, channel: Channel) -> Option<Pagination> {
        self.state.read().pagination.get(&channel).copied()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    /// Order count and summed amount for one channel
    pub fn totals(&self, channel: Channel) -> ChannelTotals {
        self.state
            .read()
            .items
            .items()
            .iter()
            .filter(|s| s.channel == channel)
            .fold(ChannelTotals::default(), |acc, s| ChannelTotals {
                orders: acc.orders + 1,
                amount: acc.amount + s.amount,
            })
    }

    /// Totals for both channels, online first
    pub fn totals_by_channel(&self) -> [(Channel, ChannelTotals); 2] {
        [
            (Channel::Online, self.totals(Channel::Online)),
            (Channel::Offline, self.totals(Channel::Offline)),
        ]
    }

    // ========== Fetch ==========

    pub async fn fetch_online(&self, filters: &Filters) -> ClientResult<Vec<Sale>> {
        self.fetch_channel(Channel::Online, filters).await
    }

    pub async fn fetch_offline(&self, filters: &Filters) -> ClientResult<Vec<Sale>> {
        self.fetch_channel(Channel::Offline, filters).await
    }

    async fn fetch_channel(&self, channel: Channel, filters: &Filters) -> ClientResult<Vec<Sale>> {
        self.state.write().loading = true;
        let payload = match self.http.get(list_path(channel), filters).await {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail("fetch", e)),
        };
        let fresh = Sale::normalize_list(&payload, &self.ctx.for_channel(channel));

        let mut state = self.state.write();
        state.items.retain(|s| s.channel != channel);
        let shadowed: Vec<Sale> = fresh
            .iter()
            .filter(|s| state.items.contains(s.id.as_str()))
            .cloned()
            .collect();
        let added = state.items.merge_front(fresh.clone());
        state.shadowed.insert(channel, shadowed);
        restore_shadowed(&mut state);
        if let Some(page) = read_pagination(&payload) {
            state.pagination.insert(channel, page);
        }
        state.loading = false;
        state.last_error = None;
        tracing::info!(channel = %channel, count = fresh.len(), added, "sales fetched");
        Ok(fresh)
    }

    /// One sale from its channel's endpoint; the collection is not touched
    pub async fn fetch_one(&self, channel: Channel, id: &str) -> ClientResult<Sale> {
        let payload = self
            .http
            .get(&path_for(show_path(channel), id), &Filters::new())
            .await?;
        confirmed_record(&payload, &self.ctx.for_channel(channel))
            .ok_or_else(|| ClientError::InvalidResponse(format!("sale {id} missing from response")))
    }

    // ========== Mutations ==========

    /// Change an online order's status
    ///
    /// Uses the server's echoed order when there is one; otherwise the
    /// confirmed status is applied to the local record.
    pub async fn update_status(&self, id: &str, status: &str) -> ClientResult<Option<Sale>> {
        let form = FormPayload::new().text("status", status);
        let payload = match self.http.post_form(&path_for(ONLINE_UPDATE, id), &form).await {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail("update_status", e)),
        };

        let echoed = confirmed_record::<Sale>(&payload, &self.ctx.for_channel(Channel::Online));
        let mut state = self.state.write();
        let updated = match echoed {
            Some(sale) => {
                state.items.replace(id, sale.clone());
                Some(sale)
            }
            None => state.items.get(id).cloned().map(|mut sale| {
                sale.status = status.to_string();
                state.items.replace(id, sale.clone());
                sale
            }),
        };
        state.last_error = None;
        tracing::info!(id, status, "order status updated");
        Ok(updated)
    }

    /// Record a point-of-sale transaction
    ///
    /// Without an echoed sale the POS listing is re-fetched; `Ok(None)`
    /// means the sale was recorded but the refresh could not single it out.
    pub async fn create_pos_sale(&self, draft: PosSaleDraft) -> ClientResult<Option<Sale>> {
        let form = FormPayload::from(draft);
        let payload = match self.http.post_form(POS_CREATE, &form).await {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail("create_pos_sale", e)),
        };

        match confirmed_record::<Sale>(&payload, &self.ctx.for_channel(Channel::Offline)) {
            Some(sale) => {
                let mut state = self.state.write();
                state.items.upsert_front(sale.clone());
                state.last_error = None;
                tracing::info!(id = %sale.id, amount = sale.amount, "pos sale recorded");
                Ok(Some(sale))
            }
            None => {
                let known: Vec<String> = self
                    .by_channel(Channel::Offline)
                    .iter()
                    .map(|s| s.id.as_str().to_string())
                    .collect();
                let fresh = self.fetch_offline(&Filters::new()).await?;
                Ok(single_addition(&known, &fresh))
            }
        }
    }

    /// Delete a POS record once the server confirms; already-gone ids are
    /// not an error
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        if let Err(e) = delete_confirmed(self.http.as_ref(), &path_for(POS_DELETE, id), false).await {
            return Err(self.fail("delete", e));
        }
        let mut state = self.state.write();
        let removed = state.items.remove(id);
        if let Some(pos) = state.shadowed.get_mut(&Channel::Offline) {
            pos.retain(|s| !s.id.matches(id));
        }
        restore_shadowed(&mut state);
        state.last_error = None;
        tracing::info!(id, removed, "sale deleted");
        Ok(())
    }

    fn fail(&self, operation: &str, error: ClientError) -> ClientError {
        let mut state = self.state.write();
        state.loading = false;
        state.last_error = Some(error.user_message());
        tracing::warn!(entity = "sale", operation, error = %error, "store operation failed");
        error
    }
}

/// Merge back shadowed records whose id is no longer held
fn restore_shadowed(state: &mut SalesState) {
    for channel in [Channel::Online, Channel::Offline] {
        let Some(pending) = state.shadowed.remove(&channel) else {
            continue;
        };
        let (free, held): (Vec<Sale>, Vec<Sale>) = pending
            .into_iter()
            .partition(|s| !state.items.contains(s.id.as_str()));
        let restored = state.items.merge_front(free);
        if restored > 0 {
            tracing::debug!(channel = %channel, restored, "shadowed sales restored");
        }
        state.shadowed.insert(channel, held);
    }
}
