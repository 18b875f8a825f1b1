//! Catalog, filtering and inquiry engine for the wholesale storefront.
//!
//! Everything here is synchronous and operates on data already in memory.
//! The presentation layer owns a [`ProductRepository`], builds
//! [`FilterState`] values from user input, keeps one [`InquiryList`] and one
//! [`AccessGate`] per browsing session, and hands the encoded text produced
//! by [`MessageTemplate`] to a [`WhatsAppLink`].

pub mod access;
pub mod app_config;
pub mod config;
pub mod error;
pub mod filter;
pub mod message;
pub mod products;
pub mod selection;
pub mod showcase;

pub use access::AccessGate;
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{CatalogError, ConfigError};
pub use filter::{filter_and_sort, FacetKind, FilterState, SortKey, DEFAULT_MAX_PRICE};
pub use message::{encode_message, MessageTemplate, WhatsAppLink};
pub use products::{
    LoadReport, MalformedRecord, Product, ProductRepository, RawProductRecord, RawVariant,
    RejectionReason, Variant,
};
pub use selection::{
    parse_quantity, InquiryEvent, InquiryList, QuantityDraft, SelectionEntry, SizeQuantities,
};
pub use showcase::{load_showcase, ResolvedCard, ShowcaseCard, ShowcaseFile, ShowcaseGroup};
