//! Data models
//!
//! Canonical in-memory records produced by [`crate::normalize`], plus the
//! draft payloads submitted to the admin API. All ids are [`RecordId`].

pub mod catalog;
pub mod category;
pub mod gst;
pub mod product;
pub mod record_id;
pub mod sale;
pub mod site_settings;

// Re-exports
pub use catalog::*;
pub use category::*;
pub use gst::*;
pub use product::*;
pub use record_id::*;
pub use sale::*;
pub use site_settings::*;

/// Records that live in a keyed collection
pub trait Identified {
    fn id(&self) -> &RecordId;
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &RecordId {
                &self.id
            }
        })*
    };
}

impl_identified!(Product, Category, GstRate, Sale, Variation, Attribute, Variant);
