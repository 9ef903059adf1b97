//! Creature catalog: the deck's data source.
//!
//! - `CreatureSource`: fetch one creature by id
//! - `fetch_many`: distinct random ids, fetched concurrently
//! - `RetryingSource`: validation, fixed-delay retries and an id cache over
//!   a raw `CatalogTransport`
//! - `StaticCatalog`: in-memory transport

pub mod memory;
pub mod retry;
pub mod source;

pub use memory::StaticCatalog;
pub use retry::{CatalogTransport, RawCreature, RetryingSource, TransportError, MAX_RETRIES, RETRY_DELAY};
pub use source::{fetch_many, validate_count, validate_id, CreatureSource, CATALOG_IDS};
