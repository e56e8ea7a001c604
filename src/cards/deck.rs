//! Deck construction and drawing.
//!
//! Three decks exist per game:
//!
//! - **Playing deck**: two standard 52-card decks, each with 2 Jokers and
//!   1 PFJ (110 cards). Split in half into the players' personal piles.
//! - **Red deck**: 22 Emergency-Red cards plus 2 PFJ and 2 FRE (26 cards).
//! - **Blue deck**: 17 Emergency-Blue cards plus 2 PFJ and 2 FRE (21 cards).
//!
//! Builders return decks in a fixed order; call `shuffle` with a seeded
//! `GameRng` for a deal. The front of the deck is the top: `draw` takes
//! from the front and returned cards go to the back.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::card::{Card, DeckColor, Rank, Suit};
use super::instance::CardInstance;
use crate::core::entity::InstanceAllocator;
use crate::core::rng::GameRng;

const RED_COUNTS: [(Rank, usize); 10] = [
    (Rank::Five, 2),
    (Rank::Six, 2),
    (Rank::Seven, 2),
    (Rank::Eight, 4),
    (Rank::Jack, 4),
    (Rank::Queen, 3),
    (Rank::King, 2),
    (Rank::Ace, 1),
    (Rank::Ten, 1),
    (Rank::Four, 1),
];

const BLUE_COUNTS: [(Rank, usize); 6] = [
    (Rank::Two, 4),
    (Rank::Three, 4),
    (Rank::Four, 4),
    (Rank::Ten, 3),
    (Rank::Jack, 1),
    (Rank::Six, 1),
];

/// Tokens added to each supplementary deck: (PFJ, FRE).
const SUPPLEMENTARY_TOKENS: (usize, usize) = (2, 2);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<CardInstance>,
    color: Option<DeckColor>,
}

impl Deck {
    /// Wrap already-dealt instances. The first element is the top.
    #[must_use]
    pub fn from_instances(cards: impl IntoIterator<Item = CardInstance>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            color: None,
        }
    }

    /// Allocate instances for `cards` in order.
    pub fn from_cards(ids: &mut InstanceAllocator, cards: impl IntoIterator<Item = Card>) -> Self {
        Self::from_instances(cards.into_iter().map(|card| CardInstance::dealt(ids, card)))
    }

    /// Two standard decks, each with 2 Jokers and 1 PFJ.
    pub fn playing(ids: &mut InstanceAllocator) -> Self {
        let mut cards = Vec::with_capacity(110);
        for _ in 0..2 {
            for suit in Suit::ALL {
                for rank in Rank::ORDERED {
                    cards.push(Card::normal(rank, suit));
                }
            }
            cards.extend([Card::Joker, Card::Joker, Card::Pfj]);
        }
        Self::from_cards(ids, cards)
    }

    /// The red supplementary deck.
    pub fn red(ids: &mut InstanceAllocator) -> Self {
        Self::supplementary(ids, DeckColor::Red, &RED_COUNTS)
    }

    /// The blue supplementary deck.
    pub fn blue(ids: &mut InstanceAllocator) -> Self {
        Self::supplementary(ids, DeckColor::Blue, &BLUE_COUNTS)
    }

    /// Supplementary deck for `color`.
    pub fn for_color(ids: &mut InstanceAllocator, color: DeckColor) -> Self {
        match color {
            DeckColor::Red => Self::red(ids),
            DeckColor::Blue => Self::blue(ids),
        }
    }

    fn supplementary(ids: &mut InstanceAllocator, color: DeckColor, counts: &[(Rank, usize)]) -> Self {
        let mut cards = Vec::new();
        for &(rank, n) in counts {
            // Suits are assigned round-robin within each rank.
            for i in 0..n {
                cards.push(Card::emergency(color, rank, Suit::ALL[i % Suit::ALL.len()]));
            }
        }
        let (pfj, fre) = SUPPLEMENTARY_TOKENS;
        cards.extend(std::iter::repeat(Card::Pfj).take(pfj));
        cards.extend(std::iter::repeat(Card::FreeEmergency).take(fre));

        let mut deck = Self::from_cards(ids, cards);
        deck.color = Some(color);
        deck
    }

    /// Provenance colour of a supplementary deck.
    #[must_use]
    pub fn color(&self) -> Option<DeckColor> {
        self.color
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(self.cards.make_contiguous());
    }

    /// Draw up to `n` cards from the top.
    pub fn draw(&mut self, n: usize) -> Vec<CardInstance> {
        let take = n.min(self.cards.len());
        self.cards.drain(..take).collect()
    }

    /// Draw the top card.
    pub fn draw_one(&mut self) -> Option<CardInstance> {
        self.cards.pop_front()
    }

    /// Return a card to the bottom.
    pub fn put_bottom(&mut self, card: CardInstance) {
        self.cards.push_back(card);
    }

    /// Split into two halves. The first half (rounded down) goes to the
    /// first seat.
    #[must_use]
    pub fn split_in_half(mut self) -> (Vec<CardInstance>, Vec<CardInstance>) {
        let half = self.cards.len() / 2;
        let first = self.draw(half);
        let second = self.cards.into_iter().collect();
        (first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(deck: &Deck, pred: impl Fn(&Card) -> bool) -> usize {
        deck.iter().filter(|c| pred(&c.card)).count()
    }

    #[test]
    fn test_playing_deck_composition() {
        let mut ids = InstanceAllocator::new();
        let deck = Deck::playing(&mut ids);

        assert_eq!(deck.len(), 110);
        assert_eq!(count(&deck, Card::is_normal), 104);
        assert_eq!(count(&deck, |c| *c == Card::Joker), 4);
        assert_eq!(count(&deck, |c| *c == Card::Pfj), 2);
        assert_eq!(deck.color(), None);
        assert_eq!(ids.allocated(), 110);
    }

    #[test]
    fn test_supplementary_deck_counts() {
        let mut ids = InstanceAllocator::new();
        let red = Deck::red(&mut ids);
        let blue = Deck::blue(&mut ids);

        assert_eq!(red.len(), 26);
        assert_eq!(blue.len(), 21);
        assert_eq!(red.color(), Some(DeckColor::Red));
        assert_eq!(blue.color(), Some(DeckColor::Blue));

        assert_eq!(count(&red, |c| c.color() == Some(DeckColor::Red)), 22);
        assert_eq!(count(&blue, |c| c.color() == Some(DeckColor::Blue)), 17);
        assert_eq!(count(&red, |c| *c == Card::FreeEmergency), 2);
        assert_eq!(count(&blue, |c| *c == Card::Pfj), 2);
    }

    #[test]
    fn test_red_suits_round_robin() {
        let mut ids = InstanceAllocator::new();
        let red = Deck::red(&mut ids);

        let eights: Vec<_> = red
            .iter()
            .filter(|c| c.card.has_rank(Rank::Eight))
            .filter_map(|c| c.card.suit())
            .collect();
        assert_eq!(eights, Suit::ALL.to_vec());
    }

    #[test]
    fn test_draw_conserves_cards() {
        let mut ids = InstanceAllocator::new();
        let mut deck = Deck::blue(&mut ids);
        let original = deck.len();

        let mut drawn = 0;
        for n in [0, 1, 5, 7, 100] {
            drawn += deck.draw(n).len();
            assert_eq!(drawn + deck.len(), original);
        }
        assert!(deck.is_empty());
        assert!(deck.draw_one().is_none());
    }

    #[test]
    fn test_draw_takes_from_top_and_returns_to_bottom() {
        let mut ids = InstanceAllocator::new();
        let mut deck = Deck::red(&mut ids);
        let top = deck.iter().next().copied();

        let drawn = deck.draw_one();
        assert_eq!(drawn, top);

        let card = drawn.unwrap();
        deck.put_bottom(card);
        assert_eq!(deck.iter().last(), Some(&card));
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let mut ids_a = InstanceAllocator::new();
        let mut ids_b = InstanceAllocator::new();
        let mut a = Deck::playing(&mut ids_a);
        let mut b = Deck::playing(&mut ids_b);

        a.shuffle(&mut GameRng::new(9));
        b.shuffle(&mut GameRng::new(9));

        assert_eq!(a, b);
    }

    #[test]
    fn test_split_in_half() {
        let mut ids = InstanceAllocator::new();
        let deck = Deck::red(&mut ids);
        let top = deck.iter().next().copied();

        let (first, second) = deck.split_in_half();

        assert_eq!(first.len(), 13);
        assert_eq!(second.len(), 13);
        assert_eq!(first.first().copied(), top);
    }
}
