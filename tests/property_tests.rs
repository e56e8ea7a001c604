//! Property tests for ranks, burn detection and decks.

use burnpile::core::InstanceAllocator;
use burnpile::{effective_rank, Card, CardInstance, CommonPile, Deck, DeckColor, Rank, Suit};
use proptest::prelude::*;

fn any_rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ORDERED.to_vec())
}

fn anchor_rank() -> impl Strategy<Value = Rank> {
    any_rank().prop_filter("Twos and Threes never anchor", |r| !r.is_transparent())
}

fn token() -> impl Strategy<Value = Card> {
    prop::sample::select(vec![Card::Joker, Card::Pfj, Card::FreeEmergency])
}

fn pile_of(cards: &[Card]) -> CommonPile {
    let mut ids = InstanceAllocator::new();
    let mut pile = CommonPile::new();
    pile.add(cards.iter().map(|&card| CardInstance::dealt(&mut ids, card)));
    pile
}

proptest! {
    #[test]
    fn prop_only_eight_and_nine_collapse(a in any_rank(), b in any_rank()) {
        let collapsed = effective_rank(a) == effective_rank(b);
        let expected = a == b
            || matches!((a, b), (Rank::Eight, Rank::Nine) | (Rank::Nine, Rank::Eight));
        prop_assert_eq!(collapsed, expected);
    }

    #[test]
    fn prop_tokens_are_transparent(
        rank in anchor_rank(),
        tokens in prop::collection::vec((0usize..5, token()), 0..8),
    ) {
        let mut cards: Vec<Card> = Suit::ALL.iter().map(|&s| Card::normal(rank, s)).collect();
        for (pos, token) in tokens {
            let at = pos.min(cards.len());
            cards.insert(at, token);
        }

        let report = pile_of(&cards).detect_burns();

        prop_assert_eq!(report.count(effective_rank(rank)), 1);
        prop_assert_eq!(report.total(), 1);
    }

    #[test]
    fn prop_run_length_sets_burn_count(rank in anchor_rank(), run in 1usize..17) {
        let cards: Vec<Card> = (0..run)
            .map(|i| Card::normal(rank, Suit::ALL[i % Suit::ALL.len()]))
            .collect();

        let report = pile_of(&cards).detect_burns();

        prop_assert_eq!(report.count(effective_rank(rank)) as usize, run / 4);
    }

    #[test]
    fn prop_clear_then_detect_is_empty(ranks in prop::collection::vec(any_rank(), 0..30)) {
        let cards: Vec<Card> = ranks.iter().map(|&r| Card::normal(r, Suit::Spades)).collect();
        let mut pile = pile_of(&cards);

        let removed = pile.clear();

        prop_assert_eq!(removed.len(), cards.len());
        prop_assert!(pile.is_empty());
        prop_assert!(pile.detect_burns().is_empty());
    }

    #[test]
    fn prop_draw_conserves_cards(n in 0usize..40, red in any::<bool>()) {
        let mut ids = InstanceAllocator::new();
        let color = if red { DeckColor::Red } else { DeckColor::Blue };
        let mut deck = Deck::for_color(&mut ids, color);
        let original = deck.len();

        let drawn = deck.draw(n);

        prop_assert_eq!(drawn.len() + deck.len(), original);
        prop_assert_eq!(drawn.len(), n.min(original));
    }
}
