//! The means constraint.
//!
//! Playing a Five or a Seven activates means: the next play must use cards
//! of strictly lower effective rank than the card that set it. Threes and
//! tokens are exempt, and a same-suit combo bypasses the check entirely.
//! Any play that does not itself set means clears it, as do burns and
//! pickups.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeansState {
    limit: Option<Rank>,
}

impl MeansState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.limit.is_some()
    }

    #[must_use]
    pub fn limit(&self) -> Option<Rank> {
        self.limit
    }

    pub fn activate(&mut self, limit: Rank) {
        self.limit = Some(limit);
    }

    pub fn clear(&mut self) {
        self.limit = None;
    }

    /// Check a play against the active limit.
    ///
    /// Returns the first offending card and the limit it broke.
    pub fn check(&self, cards: &[Card], via_pair: bool) -> Result<(), (Card, Rank)> {
        let Some(limit) = self.limit else {
            return Ok(());
        };
        if via_pair {
            return Ok(());
        }
        for card in cards {
            let Some(rank) = card.effective_rank() else {
                continue;
            };
            if rank != Rank::Three && rank >= limit {
                return Err((*card, limit));
            }
        }
        Ok(())
    }
}

/// The limit a play sets, if it is means-qualifying.
///
/// The last literal Five or Seven in play order sets the limit. A pair play
/// with no literal means card falls back to Five over Seven.
#[must_use]
pub fn means_trigger(cards: &[Card], via_pair: bool) -> Option<Rank> {
    let is_means = |c: &&Card| c.has_rank(Rank::Five) || c.has_rank(Rank::Seven);

    let literal = cards.iter().filter(|c| c.is_normal()).filter(is_means).last();
    if let Some(card) = literal {
        return card.rank();
    }
    if !via_pair {
        return None;
    }
    [Rank::Five, Rank::Seven]
        .into_iter()
        .find(|&rank| cards.iter().any(|c| c.has_rank(rank)))
}
