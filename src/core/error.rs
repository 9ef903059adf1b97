//! Error types.
//!
//! - `ValidationError`: bad ids, counts, pair counts or names, rejected
//!   before any fetch or mutation
//! - `CatalogError`: creature data could not be delivered
//! - `PersistenceError`: storage read/write/parse failure, logged by the
//!   session gateway and never returned to callers
//! - `MatchError`: everything a table operation can fail with

use thiserror::Error;

use crate::engine::GameStatus;

/// Input rejected before it reaches the engine or the data source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Pair count is odd or outside the allowed range.
    #[error("pair count {0} must be even and between {min} and {max}", min = crate::core::PairCount::MIN, max = crate::core::PairCount::MAX)]
    PairCount(usize),

    /// Creature id outside the catalog range.
    #[error("creature id {0} is outside the catalog range")]
    CreatureIdOutOfRange(u32),

    /// Requested number of creatures outside the catalog range.
    #[error("cannot fetch {0} creatures from the catalog")]
    InvalidCount(usize),

    /// The same creature was delivered twice for one deck.
    #[error("creature {0} appears more than once in the deck")]
    DuplicateCreature(u32),

    /// Player name is empty after trimming.
    #[error("player name cannot be empty")]
    EmptyPlayerName,

    /// Player name exceeds the configured limit.
    #[error("player name has {len} characters, at most {max} allowed")]
    PlayerNameTooLong {
        /// Length after trimming.
        len: usize,
        /// Configured limit.
        max: usize,
    },
}

/// Creature data could not be delivered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request itself was invalid.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The record has no image to put on a card.
    #[error("creature {id} ({name}) has no image")]
    NoImage {
        /// Creature id.
        id: u32,
        /// Creature name.
        name: String,
    },

    /// Transport kept failing after every retry.
    #[error("failed to fetch creature {id} after {attempts} attempts: {reason}")]
    Network {
        /// Creature id.
        id: u32,
        /// Attempts made, including the first.
        attempts: u32,
        /// Last transport failure.
        reason: String,
    },
}

/// Storage failure inside the session gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Reading, writing or removing the blob failed.
    #[error("session storage I/O failed: {0}")]
    Io(String),

    /// The blob could not be encoded or decoded.
    #[error("session blob is malformed: {0}")]
    Format(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}

/// Errors returned by table and engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Rejected input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Deck could not be fetched; the board is back in `Configuring`.
    #[error("could not load creatures: {0}")]
    DataSource(#[from] CatalogError),

    /// The board is not in a status that allows the request.
    #[error("cannot {action} while {from:?}")]
    InvalidTransition {
        /// Status at the time of the request.
        from: GameStatus,
        /// What was requested.
        action: &'static str,
    },
}

/// Result type for match operations.
pub type MatchResult<T> = Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::PairCount(7).to_string(),
            "pair count 7 must be even and between 4 and 14"
        );
        assert_eq!(
            MatchError::InvalidTransition {
                from: GameStatus::Configuring,
                action: "deal a deck",
            }
            .to_string(),
            "cannot deal a deck while Configuring"
        );
    }

    #[test]
    fn test_validation_lifts_into_catalog_and_match() {
        let catalog: CatalogError = ValidationError::InvalidCount(0).into();
        assert_eq!(catalog, CatalogError::Invalid(ValidationError::InvalidCount(0)));

        let err: MatchError = catalog.into();
        assert!(matches!(err, MatchError::DataSource(CatalogError::Invalid(_))));
    }

    #[test]
    fn test_persistence_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        assert!(matches!(PersistenceError::from(json_err), PersistenceError::Format(_)));
    }
}
