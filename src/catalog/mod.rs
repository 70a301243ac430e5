//! Catalog lookups backing the distance-resolution fallback chain.
//!
//! Two tiers: a small in-process static table ([`local::LocalCatalog`]) for
//! low-latency fallback, and a remote free-text catalog service
//! ([`remote::RemoteCatalog`]) queried through a rate-limited sequential
//! queue ([`queue::LookupQueue`]).

pub mod local;
pub mod queue;
pub mod remote;

pub use local::{LocalCatalog, LocalCatalogEntry};
pub use queue::{CancelHandle, LookupOutcome, LookupQueue};
pub use remote::{parse_catalog_response, HttpRemoteCatalog, RemoteCatalog, RemoteRecord};
