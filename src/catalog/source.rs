//! Creature data source contract.

use std::future::Future;
use std::ops::RangeInclusive;

use futures::future::try_join_all;
use tracing::debug;

use crate::cards::CreatureRecord;
use crate::core::{CatalogError, GameRng, ValidationError};

/// Valid creature ids (first generation).
pub const CATALOG_IDS: RangeInclusive<u32> = 1..=151;

/// Anything that can deliver one creature by id.
pub trait CreatureSource {
    /// Fetch one creature.
    ///
    /// Fails with `Invalid(CreatureIdOutOfRange)` for ids outside
    /// [`CATALOG_IDS`], `NoImage` for records without a sprite and
    /// `Network` once retries are exhausted.
    fn fetch_one(&self, id: u32) -> impl Future<Output = Result<CreatureRecord, CatalogError>> + Send;
}

/// Reject ids outside the catalog.
pub fn validate_id(id: u32) -> Result<u32, ValidationError> {
    if CATALOG_IDS.contains(&id) {
        Ok(id)
    } else {
        Err(ValidationError::CreatureIdOutOfRange(id))
    }
}

/// Reject counts that cannot be drawn without repeats.
pub fn validate_count(count: usize) -> Result<usize, ValidationError> {
    let max = (*CATALOG_IDS.end() - *CATALOG_IDS.start() + 1) as usize;
    if (1..=max).contains(&count) {
        Ok(count)
    } else {
        Err(ValidationError::InvalidCount(count))
    }
}

/// Fetch `count` creatures with distinct random ids.
///
/// All fetches run concurrently; the first failure fails the whole call.
pub async fn fetch_many<S>(source: &S, count: usize, rng: &mut GameRng) -> Result<Vec<CreatureRecord>, CatalogError>
where
    S: CreatureSource + ?Sized,
{
    validate_count(count)?;
    let ids = rng
        .sample_distinct(CATALOG_IDS, count)
        .ok_or(ValidationError::InvalidCount(count))?;
    debug!(?ids, "fetching creatures");

    try_join_all(ids.into_iter().map(|id| source.fetch_one(id))).await
}
