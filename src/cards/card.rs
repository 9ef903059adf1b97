//! Card instances on the board.
//!
//! A `Card` is one face-down tile. Two cards share a pair key (the creature
//! id) but never a `CardId`.

use serde::{Deserialize, Serialize};

use super::creature::CreatureRecord;

/// Unique identifier of a card instance, e.g. `"25-a"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Create a card ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id of one half of a creature's pair.
    #[must_use]
    pub fn for_pair(pair_key: u32, half: PairHalf) -> Self {
        Self(format!("{}-{}", pair_key, half.suffix()))
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Which card of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PairHalf {
    /// First card (`-a`).
    A,
    /// Second card (`-b`).
    B,
}

impl PairHalf {
    const fn suffix(self) -> char {
        match self {
            PairHalf::A => 'a',
            PairHalf::B => 'b',
        }
    }
}

/// Per-card visibility, separate from the transient selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Face down.
    #[default]
    Hidden,
    /// Face up, selected this turn.
    Revealed,
    /// Claimed by a player; stays face up.
    Matched,
}

/// One card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique instance id.
    pub id: CardId,

    /// Shared by exactly two cards (the creature id).
    pub pair_key: u32,

    /// Creature name.
    pub display_name: String,

    /// Creature sprite.
    pub image_url: String,

    /// Current visibility. Only the match engine changes it.
    pub visibility: Visibility,
}

impl Card {
    /// Create a face-down card for one half of a creature's pair.
    #[must_use]
    pub fn from_creature(creature: &CreatureRecord, half: PairHalf) -> Self {
        Self {
            id: CardId::for_pair(creature.id, half),
            pair_key: creature.id,
            display_name: creature.name.clone(),
            image_url: creature.image_url.clone(),
            visibility: Visibility::Hidden,
        }
    }

    /// Check whether two cards form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.pair_key == other.pair_key && self.id != other.id
    }

    /// Check whether the card has been claimed.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.visibility == Visibility::Matched
    }

    /// The creature this card shows.
    #[must_use]
    pub fn creature(&self) -> CreatureRecord {
        CreatureRecord::new(self.pair_key, self.display_name.clone(), self.image_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pikachu() -> CreatureRecord {
        CreatureRecord::new(25, "pikachu", "https://img.example/25.png")
    }

    #[test]
    fn test_card_id_for_pair() {
        assert_eq!(CardId::for_pair(25, PairHalf::A).as_str(), "25-a");
        assert_eq!(CardId::for_pair(25, PairHalf::B).as_str(), "25-b");
        assert_eq!(format!("{}", CardId::from("7-b")), "7-b");
    }

    #[test]
    fn test_from_creature() {
        let card = Card::from_creature(&pikachu(), PairHalf::A);

        assert_eq!(card.id, CardId::new("25-a"));
        assert_eq!(card.pair_key, 25);
        assert_eq!(card.display_name, "pikachu");
        assert_eq!(card.visibility, Visibility::Hidden);
        assert_eq!(card.creature(), pikachu());
    }

    #[test]
    fn test_pairs_with() {
        let a = Card::from_creature(&pikachu(), PairHalf::A);
        let b = Card::from_creature(&pikachu(), PairHalf::B);
        let other = Card::from_creature(&CreatureRecord::new(1, "bulbasaur", "x"), PairHalf::A);

        assert!(a.pairs_with(&b));
        assert!(!a.pairs_with(&a));
        assert!(!a.pairs_with(&other));
    }

    #[test]
    fn test_visibility_serde() {
        assert_eq!(serde_json::to_string(&Visibility::Matched).unwrap(), "\"matched\"");
        assert_eq!(Visibility::default(), Visibility::Hidden);
    }
}
