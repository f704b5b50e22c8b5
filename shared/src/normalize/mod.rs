//! Response normalizers
//!
//! Turn whatever JSON the admin API sends into canonical records. The
//! backend's envelope shape varies per endpoint and has changed over time,
//! so each entity declares an ordered list of container names to search for
//! its list, and an ordered list of aliases for every field. Normalization
//! never fails: absent or malformed fields get documented defaults.
//!
//! Money and quantity fields all go through [`value::to_number`].

pub mod catalog;
pub mod category;
pub mod gst;
pub mod media;
pub mod product;
pub mod sale;
pub mod session;
pub mod settings;
pub mod value;

use crate::models::Channel;
use serde_json::Value;

pub use media::{PLACEHOLDER_SERVICE, STATIC_PLACEHOLDER, resolve_image, resolve_media_url};
pub use session::{extract_token, extract_user};
pub use settings::normalize_settings;
pub use value::{parse_number, pick_array, pick_record, to_number};

/// Facts about the request a payload answered, needed by some normalizers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeContext {
    /// `scheme://host[:port]` of the API, for relative media paths
    api_origin: Option<String>,
    /// Channel of the endpoint a sale list was fetched from
    channel: Option<Channel>,
}

impl NormalizeContext {
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            api_origin: Some(origin.into()),
            channel: None,
        }
    }

    /// Same context, tagged with the sales channel of the endpoint
    pub fn for_channel(&self, channel: Channel) -> Self {
        Self {
            api_origin: self.api_origin.clone(),
            channel: Some(channel),
        }
    }

    pub fn api_origin(&self) -> Option<&str> {
        self.api_origin.as_deref()
    }

    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }
}

/// An entity that can be normalized out of an arbitrary payload
pub trait Normalize: Sized {
    /// Container names searched, in order, for a list of this entity
    const CONTAINERS: &'static [&'static str];

    /// Wrapper keys searched, in order, for a single record
    const WRAPPERS: &'static [&'static str];

    /// Normalize one record object
    fn normalize(raw: &Value, ctx: &NormalizeContext) -> Self;

    /// Normalize a list out of any envelope; no recognizable array yields
    /// an empty list
    fn normalize_list(raw: &Value, ctx: &NormalizeContext) -> Vec<Self> {
        match value::pick_array(raw, Self::CONTAINERS) {
            Some(items) => items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| Self::normalize(item, ctx))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Normalize a single record out of any envelope
    fn normalize_one(raw: &Value, ctx: &NormalizeContext) -> Self {
        Self::normalize(value::pick_record(raw, Self::WRAPPERS), ctx)
    }
}
