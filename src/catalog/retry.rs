//! Retrying, caching creature source over a raw transport.
//!
//! Transport failures are retried a fixed number of times with a fixed
//! delay. A record that arrives without a sprite is a `NoImage` failure and
//! is not retried. Successful records are cached by id.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::warn;

use super::source::{validate_id, CreatureSource};
use crate::cards::CreatureRecord;
use crate::core::CatalogError;

/// Retries after the first attempt.
pub const MAX_RETRIES: u32 = 3;

/// Pause between attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Creature as the transport returns it; the sprite may be missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCreature {
    /// Catalog id.
    pub id: u32,
    /// Name.
    pub name: String,
    /// Sprite URL, if the catalog has one.
    pub image_url: Option<String>,
}

/// A single failed transport attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// One raw request against the catalog (HTTP client, fixture, ...).
pub trait CatalogTransport {
    /// Fetch the raw record for `id`.
    fn fetch_raw(&self, id: u32) -> impl Future<Output = Result<RawCreature, TransportError>> + Send;
}

/// [`CreatureSource`] adding validation, retries and an id cache.
#[derive(Debug)]
pub struct RetryingSource<T> {
    transport: T,
    cache: Mutex<FxHashMap<u32, CreatureRecord>>,
    max_retries: u32,
    retry_delay: Duration,
}

impl<T: CatalogTransport> RetryingSource<T> {
    /// Wrap a transport with the default retry policy.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: Mutex::new(FxHashMap::default()),
            max_retries: MAX_RETRIES,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Set the number of retries after the first attempt.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the pause between attempts.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of cached records.
    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Forget every cached record.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    async fn fetch_with_retry(&self, id: u32) -> Result<RawCreature, CatalogError> {
        let attempts = self.max_retries + 1;
        let mut attempt = 1;
        loop {
            match self.transport.fetch_raw(id).await {
                Ok(raw) => return Ok(raw),
                Err(err) if attempt < attempts => {
                    warn!(id, attempt, %err, "creature fetch failed, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(CatalogError::Network {
                        id,
                        attempts,
                        reason: err.to_string(),
                    })
                }
            }
        }
    }
}

impl<T: CatalogTransport + Sync> CreatureSource for RetryingSource<T> {
    async fn fetch_one(&self, id: u32) -> Result<CreatureRecord, CatalogError> {
        let cached = self.cache.lock().get(&id).cloned();
        if let Some(record) = cached {
            return Ok(record);
        }

        validate_id(id)?;
        let raw = self.fetch_with_retry(id).await?;
        let Some(image_url) = raw.image_url else {
            return Err(CatalogError::NoImage { id, name: raw.name });
        };

        let record = CreatureRecord::new(raw.id, raw.name, image_url);
        self.cache.lock().insert(id, record.clone());
        Ok(record)
    }
}
