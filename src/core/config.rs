//! Match configuration.
//!
//! - `PairCount`: how many distinct pairs a board holds (validated)
//! - `Tuning`: scoring constants, resolution delays and name rules
//! - `MatchConfig`: combines both
//!
//! Every `Tuning` field has a default, so a TOML document only needs the
//! keys it overrides:
//!
//! ```
//! use memory_match::core::MatchConfig;
//!
//! let config = MatchConfig::from_toml_str(
//!     r#"
//!     pair_count = 10
//!
//!     [tuning]
//!     mismatch_delay_ms = 1200
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.pair_count.get(), 10);
//! assert_eq!(config.tuning.mismatch_delay_ms, 1200);
//! assert_eq!(config.tuning.base_points, 100);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::player::PlayerSlot;

/// Number of distinct pairs on a board. Always even and within range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PairCount(usize);

impl PairCount {
    /// Smallest allowed board.
    pub const MIN: usize = 4;

    /// Largest allowed board.
    pub const MAX: usize = 14;

    /// Sizes offered by the configuration dialog.
    pub const PRESETS: [usize; 4] = [6, 8, 10, 12];

    /// Validate a pair count.
    pub fn new(count: usize) -> Result<Self, ValidationError> {
        if count % 2 == 0 && (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(ValidationError::PairCount(count))
        }
    }

    /// The raw count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Cards on the board (two per pair).
    #[must_use]
    pub const fn card_count(self) -> usize {
        self.0 * 2
    }
}

impl Default for PairCount {
    fn default() -> Self {
        Self(8)
    }
}

impl TryFrom<usize> for PairCount {
    type Error = ValidationError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<PairCount> for usize {
    fn from(count: PairCount) -> Self {
        count.0
    }
}

impl std::fmt::Display for PairCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pairs", self.0)
    }
}

/// Scoring constants, delays and name rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Points for any match before streak bonus.
    pub base_points: u32,

    /// Bonus step per consecutive match.
    pub streak_bonus_increment: u32,

    /// How long a matched pair stays selected before play continues.
    pub match_delay_ms: u64,

    /// How long a mismatched pair stays face up before flipping back.
    pub mismatch_delay_ms: u64,

    /// Longest accepted player name, in characters.
    pub max_name_len: usize,

    /// Names used on first launch and after a full reset.
    pub default_names: [String; 2],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_points: 100,
            streak_bonus_increment: 10,
            match_delay_ms: 600,
            mismatch_delay_ms: 1500,
            max_name_len: 20,
            default_names: ["Jugador 1".to_string(), "Jugador 2".to_string()],
        }
    }
}

impl Tuning {
    /// Delay after a match.
    #[must_use]
    pub fn match_delay(&self) -> Duration {
        Duration::from_millis(self.match_delay_ms)
    }

    /// Delay after a mismatch.
    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    /// Default name for a seat.
    #[must_use]
    pub fn default_name(&self, slot: PlayerSlot) -> &str {
        &self.default_names[slot.index()]
    }

    /// Trim and check a player name against the configured rules.
    pub fn validate_name(&self, name: &str) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        let len = trimmed.chars().count();
        if len == 0 {
            return Err(ValidationError::EmptyPlayerName);
        }
        if len > self.max_name_len {
            return Err(ValidationError::PlayerNameTooLong {
                len,
                max: self.max_name_len,
            });
        }
        Ok(trimmed.to_string())
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Pairs per board.
    pub pair_count: PairCount,

    /// Scoring and timing constants.
    pub tuning: Tuning,
}

impl MatchConfig {
    /// Create a configuration with default tuning.
    #[must_use]
    pub fn new(pair_count: PairCount) -> Self {
        Self {
            pair_count,
            tuning: Tuning::default(),
        }
    }

    /// Set the pair count.
    #[must_use]
    pub fn with_pair_count(mut self, pair_count: PairCount) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Set the tuning constants.
    #[must_use]
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_count_bounds() {
        assert!(PairCount::new(4).is_ok());
        assert!(PairCount::new(14).is_ok());
        assert_eq!(PairCount::new(2), Err(ValidationError::PairCount(2)));
        assert_eq!(PairCount::new(15), Err(ValidationError::PairCount(15)));
        assert_eq!(PairCount::new(16), Err(ValidationError::PairCount(16)));
        assert_eq!(PairCount::new(50), Err(ValidationError::PairCount(50)));
        assert_eq!(PairCount::new(7), Err(ValidationError::PairCount(7)));
    }

    #[test]
    fn test_pair_count_presets_are_valid() {
        for preset in PairCount::PRESETS {
            assert!(PairCount::new(preset).is_ok(), "preset {preset}");
        }
    }

    #[test]
    fn test_pair_count_default() {
        let count = PairCount::default();
        assert_eq!(count.get(), 8);
        assert_eq!(count.card_count(), 16);
        assert_eq!(format!("{}", count), "8 pairs");
    }

    #[test]
    fn test_tuning_defaults() {
        let tuning = Tuning::default();
        assert_eq!(tuning.base_points, 100);
        assert_eq!(tuning.match_delay(), Duration::from_millis(600));
        assert_eq!(tuning.mismatch_delay(), Duration::from_millis(1500));
        assert_eq!(tuning.default_name(PlayerSlot::One), "Jugador 1");
        assert_eq!(tuning.default_name(PlayerSlot::Two), "Jugador 2");
    }

    #[test]
    fn test_validate_name() {
        let tuning = Tuning::default();
        assert_eq!(tuning.validate_name("  Brock "), Ok("Brock".to_string()));
        assert_eq!(tuning.validate_name("   "), Err(ValidationError::EmptyPlayerName));
        assert_eq!(
            tuning.validate_name(&"x".repeat(21)),
            Err(ValidationError::PlayerNameTooLong { len: 21, max: 20 })
        );
        assert!(tuning.validate_name(&"é".repeat(20)).is_ok());
    }

    #[test]
    fn test_config_builder() {
        let tuning = Tuning {
            match_delay_ms: 10,
            ..Tuning::default()
        };
        let config = MatchConfig::default()
            .with_pair_count(PairCount::new(12).unwrap())
            .with_tuning(tuning.clone());

        assert_eq!(config.pair_count.get(), 12);
        assert_eq!(config.tuning, tuning);
    }

    #[test]
    fn test_from_toml_rejects_odd_pair_count() {
        assert!(MatchConfig::from_toml_str("pair_count = 9").is_err());
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(MatchConfig::from_toml_str("").unwrap(), MatchConfig::default());
    }
}
