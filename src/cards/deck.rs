//! Deck building: two cards per creature, then a uniform shuffle.

use tracing::debug;

use super::card::{Card, PairHalf};
use super::creature::CreatureRecord;
use crate::core::GameRng;

/// Build a shuffled deck of `2 * creatures.len()` cards.
///
/// Each creature yields an `-a` and a `-b` card sharing its id as pair key,
/// both `Hidden`. The input is not modified; an empty or short slice is
/// accepted as-is.
///
/// ```
/// use memory_match::cards::{build_deck, CreatureRecord};
/// use memory_match::core::GameRng;
///
/// let creatures = vec![
///     CreatureRecord::new(1, "bulbasaur", "https://img.example/1.png"),
///     CreatureRecord::new(4, "charmander", "https://img.example/4.png"),
/// ];
/// let deck = build_deck(&creatures, &mut GameRng::new(42));
///
/// assert_eq!(deck.len(), 4);
/// assert_eq!(deck.iter().filter(|c| c.pair_key == 4).count(), 2);
/// ```
pub fn build_deck(creatures: &[CreatureRecord], rng: &mut GameRng) -> Vec<Card> {
    let mut deck: Vec<Card> = creatures
        .iter()
        .flat_map(|creature| {
            [
                Card::from_creature(creature, PairHalf::A),
                Card::from_creature(creature, PairHalf::B),
            ]
        })
        .collect();

    rng.shuffle(&mut deck);
    debug!(cards = deck.len(), "built deck");
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Visibility;

    fn creatures(count: u32) -> Vec<CreatureRecord> {
        (1..=count)
            .map(|id| CreatureRecord::new(id, format!("creature-{id}"), format!("https://img.example/{id}.png")))
            .collect()
    }

    #[test]
    fn test_two_cards_per_creature() {
        let input = creatures(8);
        let deck = build_deck(&input, &mut GameRng::new(1));

        assert_eq!(deck.len(), 16);
        for creature in &input {
            let pair: Vec<_> = deck.iter().filter(|c| c.pair_key == creature.id).collect();
            assert_eq!(pair.len(), 2);
            assert!(pair[0].pairs_with(pair[1]));
        }
        assert!(deck.iter().all(|c| c.visibility == Visibility::Hidden));
    }

    #[test]
    fn test_input_untouched() {
        let input = creatures(6);
        let before = input.clone();
        let _ = build_deck(&input, &mut GameRng::new(1));
        assert_eq!(input, before);
    }

    #[test]
    fn test_same_seed_same_deck() {
        let input = creatures(10);
        let deck1 = build_deck(&input, &mut GameRng::new(77));
        let deck2 = build_deck(&input, &mut GameRng::new(77));
        assert_eq!(deck1, deck2);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_deck(&[], &mut GameRng::new(1)).is_empty());
    }
}
