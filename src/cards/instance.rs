//! Card instances: one physical card in a game.
//!
//! `CardInstance` pairs a `Card` value with the `InstanceId` it was dealt
//! under. Zones store instances, so a card moves between zones rather than
//! being copied, and two identical values stay distinguishable.
//!
//! The `just_acquired` flag only matters while the card sits in an
//! emergency slot: it marks cards granted during the current burn cycle.

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::core::entity::{InstanceAllocator, InstanceId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this physical card.
    pub id: InstanceId,

    pub card: Card,

    /// Granted during the current burn cycle.
    pub just_acquired: bool,
}

impl CardInstance {
    #[must_use]
    pub fn new(id: InstanceId, card: Card) -> Self {
        Self {
            id,
            card,
            just_acquired: false,
        }
    }

    /// Allocate an id and wrap `card`.
    pub fn dealt(ids: &mut InstanceAllocator, card: Card) -> Self {
        Self::new(ids.alloc(), card)
    }

    /// Mark as acquired in the current burn cycle.
    #[must_use]
    pub fn acquired(mut self) -> Self {
        self.just_acquired = true;
        self
    }
}

impl std::fmt::Display for CardInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.card)
    }
}
