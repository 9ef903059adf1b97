//! Deck builder tests.
//!
//! These tests verify the board a deck builder hands to the engine:
//! - Two cards per creature, one per half
//! - Unique card ids
//! - Order depends only on the seed

use std::collections::HashMap;

use memory_match::cards::{build_deck, Card, CardId, CreatureRecord, Visibility};
use memory_match::core::{GameRng, PairCount};
use proptest::prelude::*;

fn creatures(count: u32) -> Vec<CreatureRecord> {
    (1..=count)
        .map(|id| CreatureRecord::new(id, format!("creature-{id}"), format!("https://img/{id}.png")))
        .collect()
}

fn ids(deck: &[Card]) -> Vec<CardId> {
    deck.iter().map(|c| c.id.clone()).collect()
}

// =============================================================================
// Structure
// =============================================================================

#[test]
fn test_deck_pairs_every_creature() {
    let deck = build_deck(&creatures(8), &mut GameRng::new(1));
    assert_eq!(deck.len(), 16);

    let mut per_key: HashMap<u32, Vec<&Card>> = HashMap::new();
    for card in &deck {
        per_key.entry(card.pair_key).or_default().push(card);
    }
    assert_eq!(per_key.len(), 8);

    for (key, cards) in per_key {
        assert_eq!(cards.len(), 2, "creature {key}");
        assert!(cards[0].pairs_with(cards[1]));
        assert_eq!(cards[0].display_name, cards[1].display_name);
        assert_eq!(cards[0].image_url, cards[1].image_url);
    }
}

#[test]
fn test_deck_card_ids_use_halves() {
    let deck = build_deck(&creatures(6), &mut GameRng::new(1));
    let ids = ids(&deck);

    for key in 1..=6 {
        assert!(ids.contains(&CardId::new(format!("{key}-a"))));
        assert!(ids.contains(&CardId::new(format!("{key}-b"))));
    }
}

#[test]
fn test_deck_starts_hidden() {
    let deck = build_deck(&creatures(6), &mut GameRng::new(1));
    assert!(deck.iter().all(|c| c.visibility == Visibility::Hidden));
}

#[test]
fn test_empty_input_gives_empty_deck() {
    assert!(build_deck(&[], &mut GameRng::new(1)).is_empty());
}

// =============================================================================
// Shuffle
// =============================================================================

#[test]
fn test_same_seed_same_order() {
    let a = build_deck(&creatures(12), &mut GameRng::new(99));
    let b = build_deck(&creatures(12), &mut GameRng::new(99));
    assert_eq!(ids(&a), ids(&b));
}

#[test]
fn test_different_seeds_differ() {
    let a = build_deck(&creatures(12), &mut GameRng::new(1));
    let b = build_deck(&creatures(12), &mut GameRng::new(2));
    assert_ne!(ids(&a), ids(&b));
}

#[test]
fn test_deck_is_shuffled() {
    let deck = build_deck(&creatures(12), &mut GameRng::new(5));
    let unshuffled: Vec<CardId> = (1..=12)
        .flat_map(|k| [CardId::new(format!("{k}-a")), CardId::new(format!("{k}-b"))])
        .collect();
    assert_ne!(ids(&deck), unshuffled);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_deck_shape_holds_for_every_size(half in (PairCount::MIN / 2)..=(PairCount::MAX / 2), seed in any::<u64>()) {
        let pairs = PairCount::new(half * 2).unwrap();
        let input = creatures(pairs.get() as u32);
        let deck = build_deck(&input, &mut GameRng::new(seed));

        prop_assert_eq!(deck.len(), pairs.card_count());

        let mut seen_ids = std::collections::HashSet::new();
        let mut per_key: HashMap<u32, usize> = HashMap::new();
        for card in &deck {
            prop_assert!(seen_ids.insert(card.id.clone()));
            *per_key.entry(card.pair_key).or_default() += 1;
        }
        prop_assert_eq!(per_key.len(), pairs.get());
        prop_assert!(per_key.values().all(|&n| n == 2));
    }
}
