//! The common pile and burn detection.
//!
//! Cards are appended in play order, so the last card of a play becomes the
//! top and the top is the end of the vec.
//!
//! ## Burn detection
//!
//! `detect_burns` walks from the top down:
//!
//! - Tokens (Joker, PFJ, FRE) are skipped without breaking the run.
//! - Twos and Threes are skipped too, but counted on their own.
//! - The first other ranked card sets the anchor at its effective rank.
//! - The walk stops at the first ranked card of a different effective rank.
//!
//! Each of anchor, Twos and Threes burns `count / 4` times.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardInstance, Rank};

/// Burns found on the pile, as `(rank, times)` in detection order:
/// anchor, then Twos, then Threes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BurnReport {
    burns: SmallVec<[(Rank, u32); 3]>,
}

impl BurnReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.burns.is_empty()
    }

    /// Number of burns at `rank` (0 if none).
    #[must_use]
    pub fn count(&self, rank: Rank) -> u32 {
        self.burns
            .iter()
            .find(|(r, _)| *r == rank)
            .map_or(0, |(_, n)| *n)
    }

    /// Total burns across all ranks.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.burns.iter().map(|(_, n)| n).sum()
    }

    /// Ranks in detection order.
    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.burns.iter().map(|(r, _)| *r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rank, u32)> + '_ {
        self.burns.iter().copied()
    }

    fn record(&mut self, rank: Rank, run: u32) {
        if run >= 4 {
            self.burns.push((rank, run / 4));
        }
    }
}

/// The shared discard pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonPile {
    cards: Vec<CardInstance>,
}

impl CommonPile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a play. The last card becomes the top.
    pub fn add(&mut self, cards: impl IntoIterator<Item = CardInstance>) {
        self.cards.extend(cards);
    }

    /// The most recently played card.
    #[must_use]
    pub fn top(&self) -> Option<&CardInstance> {
        self.cards.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards from bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CardInstance> {
        self.cards.iter()
    }

    /// Empty the pile, returning its cards bottom to top.
    pub fn clear(&mut self) -> Vec<CardInstance> {
        std::mem::take(&mut self.cards)
    }

    pub fn detect_burns(&self) -> BurnReport {
        let mut anchor: Option<Rank> = None;
        let mut run = 0u32;
        let mut twos = 0u32;
        let mut threes = 0u32;

        for instance in self.cards.iter().rev() {
            let Some(rank) = instance.card.effective_rank() else {
                continue;
            };
            match rank {
                Rank::Two => twos += 1,
                Rank::Three => threes += 1,
                rank => match anchor {
                    None => {
                        anchor = Some(rank);
                        run = 1;
                    }
                    Some(a) if a == rank => run += 1,
                    Some(_) => break,
                },
            }
        }

        let mut report = BurnReport::default();
        if let Some(rank) = anchor {
            report.record(rank, run);
        }
        report.record(Rank::Two, twos);
        report.record(Rank::Three, threes);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Suit};
    use crate::core::InstanceAllocator;

    fn pile_of(cards: &[Card]) -> CommonPile {
        let mut ids = InstanceAllocator::new();
        let mut pile = CommonPile::new();
        pile.add(cards.iter().map(|&c| CardInstance::dealt(&mut ids, c)));
        pile
    }

    fn n(rank: Rank) -> Card {
        Card::normal(rank, Suit::Spades)
    }

    #[test]
    fn test_last_card_is_top() {
        let pile = pile_of(&[n(Rank::Four), n(Rank::King)]);
        assert_eq!(pile.top().map(|c| c.card), Some(n(Rank::King)));
        assert!(CommonPile::new().top().is_none());
    }

    #[test]
    fn test_four_of_a_kind_burns() {
        let pile = pile_of(&[n(Rank::Jack); 4]);
        let report = pile.detect_burns();

        assert_eq!(report.count(Rank::Jack), 1);
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_three_is_not_enough() {
        let pile = pile_of(&[n(Rank::Jack); 3]);
        assert!(pile.detect_burns().is_empty());
    }

    #[test]
    fn test_eights_and_nines_burn_together() {
        let pile = pile_of(&[n(Rank::Eight), n(Rank::Nine), n(Rank::Nine), n(Rank::Eight)]);
        assert_eq!(pile.detect_burns().count(Rank::Eight), 1);
    }

    #[test]
    fn test_tokens_are_transparent() {
        let pile = pile_of(&[
            n(Rank::Six),
            Card::Joker,
            n(Rank::Six),
            Card::Pfj,
            Card::FreeEmergency,
            n(Rank::Six),
            n(Rank::Six),
            Card::Joker,
        ]);
        assert_eq!(pile.detect_burns().count(Rank::Six), 1);
    }

    #[test]
    fn test_different_rank_stops_the_run() {
        let pile = pile_of(&[n(Rank::King), n(Rank::Queen), n(Rank::King), n(Rank::King), n(Rank::King)]);
        assert!(pile.detect_burns().is_empty());
    }

    #[test]
    fn test_fifth_card_differs_only_top_burns() {
        let pile = pile_of(&[n(Rank::Ace), n(Rank::Ten), n(Rank::Ten), n(Rank::Ten), n(Rank::Ten)]);
        let report = pile.detect_burns();

        assert_eq!(report.count(Rank::Ten), 1);
        assert_eq!(report.count(Rank::Ace), 0);
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_twos_and_threes_counted_separately() {
        let pile = pile_of(&[
            n(Rank::Two),
            n(Rank::Seven),
            n(Rank::Three),
            n(Rank::Two),
            n(Rank::Seven),
            n(Rank::Two),
            n(Rank::Seven),
            n(Rank::Two),
            n(Rank::Seven),
        ]);
        let report = pile.detect_burns();

        assert_eq!(report.count(Rank::Seven), 1);
        assert_eq!(report.count(Rank::Two), 1);
        assert_eq!(report.count(Rank::Three), 0);
        assert_eq!(report.ranks().collect::<Vec<_>>(), vec![Rank::Seven, Rank::Two]);
    }

    #[test]
    fn test_twos_alone_burn() {
        let pile = pile_of(&[n(Rank::Two); 4]);
        let report = pile.detect_burns();
        assert_eq!(report.count(Rank::Two), 1);
        assert_eq!(report.ranks().collect::<Vec<_>>(), vec![Rank::Two]);
    }

    #[test]
    fn test_eight_cards_burn_twice() {
        let pile = pile_of(&[n(Rank::Five); 8]);
        assert_eq!(pile.detect_burns().count(Rank::Five), 2);
    }

    #[test]
    fn test_clear_then_detect() {
        let mut pile = pile_of(&[n(Rank::Queen); 4]);
        let removed = pile.clear();

        assert_eq!(removed.len(), 4);
        assert!(pile.is_empty());
        assert!(pile.detect_burns().is_empty());
    }
}
