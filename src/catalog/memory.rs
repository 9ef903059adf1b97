//! In-memory catalog transport for offline play and tests.

use std::future::Future;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::retry::{CatalogTransport, RawCreature, TransportError};
use super::source::CATALOG_IDS;
use crate::cards::CreatureRecord;

/// Fixed set of raw records, with optional injected failures.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    records: FxHashMap<u32, RawCreature>,
    failures: Mutex<FxHashMap<u32, u32>>,
    requests: Mutex<u32>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every valid id with generated names and sprite URLs.
    #[must_use]
    pub fn numbered() -> Self {
        CATALOG_IDS.fold(Self::new(), |catalog, id| {
            catalog.with_record(CreatureRecord::new(
                id,
                format!("creature-{id}"),
                format!("https://sprites.example/gen1/{id}.png"),
            ))
        })
    }

    /// Add a complete record.
    #[must_use]
    pub fn with_record(self, record: CreatureRecord) -> Self {
        self.with_raw(RawCreature {
            id: record.id,
            name: record.name,
            image_url: Some(record.image_url),
        })
    }

    /// Add a raw record (possibly without a sprite).
    #[must_use]
    pub fn with_raw(mut self, raw: RawCreature) -> Self {
        self.records.insert(raw.id, raw);
        self
    }

    /// Make the next `times` requests for `id` fail.
    pub fn fail_next(&self, id: u32, times: u32) {
        self.failures.lock().insert(id, times);
    }

    /// Requests served so far, failed ones included.
    pub fn requests(&self) -> u32 {
        *self.requests.lock()
    }

    fn serve(&self, id: u32) -> Result<RawCreature, TransportError> {
        *self.requests.lock() += 1;

        if let Some(remaining) = self.failures.lock().get_mut(&id) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(TransportError(format!("injected failure for {id}")));
            }
        }

        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| TransportError(format!("HTTP 404 for creature {id}")))
    }
}

impl CatalogTransport for StaticCatalog {
    fn fetch_raw(&self, id: u32) -> impl Future<Output = Result<RawCreature, TransportError>> + Send {
        std::future::ready(self.serve(id))
    }
}
