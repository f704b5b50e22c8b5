//! API response envelopes
//!
//! The admin API wraps payloads in loosely shaped envelopes. This module
//! reads the two things every caller needs from them regardless of entity:
//! whether the call logically succeeded, and the listing's page metadata.

use crate::error::{AppError, AppResult};
use crate::normalize::value::{as_flag, first_present, first_string, to_number};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size when the server does not state a usable one
pub const DEFAULT_PER_PAGE: u32 = 10;

const TOTAL: &[&str] = &["total", "count", "records", "totalRecords", "total_count", "totalItems"];
const PER_PAGE: &[&str] = &["per_page", "perPage", "pageSize", "page_size", "limit"];
const CURRENT_PAGE: &[&str] = &["current_page", "currentPage", "page", "pageNumber"];
const LAST_PAGE: &[&str] = &["last_page", "lastPage", "totalPages", "total_pages", "pages"];

/// Places page metadata is found, in priority order; the root comes last
const META_CONTAINERS: &[&str] = &["meta", "pagination", "data"];

const MESSAGE: &[&str] = &["message", "error", "msg", "detail"];

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of items
    pub total: u64,
    /// Items per page
    pub per_page: u32,
    /// Current page number (1-based)
    pub current_page: u32,
    /// Last page number, at least 1
    pub last_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_PER_PAGE, 1)
    }
}

impl Pagination {
    /// Build from known values; `last_page` is derived
    pub fn new(total: u64, per_page: u32, current_page: u32) -> Self {
        let per_page = per_page.max(1);
        Self {
            total,
            per_page,
            current_page: current_page.max(1),
            last_page: pages_for(total, per_page),
        }
    }

    /// Read page metadata out of an arbitrary object
    ///
    /// Every value is probed through its alias list; missing or unusable
    /// values fall back to `per_page = 10`, `current_page = 1` and a
    /// `last_page` computed from the total.
    pub fn from_meta(meta: &Value) -> Self {
        let total = count_of(meta, TOTAL).unwrap_or(0.0) as u64;
        let per_page = count_of(meta, PER_PAGE)
            .filter(|n| *n >= 1.0)
            .map(|n| n as u32)
            .unwrap_or(DEFAULT_PER_PAGE);
        let current_page = count_of(meta, CURRENT_PAGE)
            .filter(|n| *n >= 1.0)
            .map(|n| n as u32)
            .unwrap_or(1);
        let last_page = count_of(meta, LAST_PAGE)
            .filter(|n| *n >= 1.0)
            .map(|n| n as u32)
            .unwrap_or_else(|| pages_for(total, per_page));
        Self {
            total,
            per_page,
            current_page,
            last_page,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }
}

fn count_of(meta: &Value, aliases: &[&str]) -> Option<f64> {
    first_present(meta, aliases)
        .map(to_number)
        .filter(|n| *n >= 0.0)
        .map(f64::trunc)
}

fn pages_for(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    (total.div_ceil(per_page)).max(1) as u32
}

fn has_page_fields(value: &Value) -> bool {
    value.is_object()
        && [TOTAL, PER_PAGE, CURRENT_PAGE, LAST_PAGE]
            .iter()
            .any(|aliases| first_present(value, aliases).is_some_and(|v| !v.is_array() && !v.is_object()))
}

/// Locate page metadata in a listing response
///
/// Tries `meta`, `pagination` and a paginator-shaped `data`, then the root.
/// Returns `None` when the response carries no page fields at all.
pub fn read_pagination(response: &Value) -> Option<Pagination> {
    META_CONTAINERS
        .iter()
        .filter_map(|key| response.get(*key))
        .chain(std::iter::once(response))
        .find(|candidate| has_page_fields(candidate))
        .map(Pagination::from_meta)
}

/// Human-readable message a server put in a payload, if any
///
/// Probes `message`, `error`, `msg`, `detail`, then the first string found
/// in an `errors` list or validation map.
pub fn server_message(payload: &Value) -> Option<String> {
    first_string(payload, MESSAGE).or_else(|| match payload.get("errors") {
        Some(Value::Array(list)) => list.iter().find_map(first_text),
        Some(Value::Object(map)) => map.values().find_map(first_text),
        Some(other) => first_text(other),
        None => None,
    })
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(list) => list.iter().find_map(first_text),
        Value::Object(_) => first_string(value, MESSAGE),
        _ => None,
    }
}

/// Reject a 2xx payload that signals a logical failure
///
/// A falsy `success` (`false`, `0`, `"false"`) or a boolean `status: false`
/// is a failure carrying the server's message when present. Any other
/// `status` is record data, as in an order echo with `status: 0`.
pub fn ensure_success(payload: &Value) -> AppResult<()> {
    let success_false = payload.get("success").and_then(as_flag) == Some(false);
    let status_false = matches!(payload.get("status"), Some(Value::Bool(false)));
    if success_false || status_false {
        return Err(AppError::operation_failed(server_message(payload)));
    }
    Ok(())
}
