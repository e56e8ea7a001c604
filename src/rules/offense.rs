//! Pending offenses.
//!
//! A Joker (or, with extended rules, a PFJ) that ends a play queues an
//! offense against the other player. Offenses are resolved in a separate
//! step after the play, in queue order, each one on its own.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Unique identifier for a queued offense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffenseId(pub u32);

impl std::fmt::Display for OffenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Offense({})", self.0)
    }
}

/// What happens to the defender if the block fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffenseKind {
    /// Defender picks up the common pile.
    JokerForcePickup,
    /// Attacker takes the defender's personal pile.
    PileSteal,
}

impl std::fmt::Display for OffenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffenseKind::JokerForcePickup => f.write_str("Joker"),
            OffenseKind::PileSteal => f.write_str("PFJ"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offense {
    pub id: OffenseId,
    pub attacker: PlayerId,
    pub kind: OffenseKind,
    /// Block points the defender must present.
    pub strength: u32,
    pub resolved: bool,
}

impl Offense {
    #[must_use]
    pub fn defender(&self) -> PlayerId {
        self.attacker.opponent()
    }
}

/// FIFO queue of offenses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffenseQueue {
    entries: Vec<Offense>,
    next_id: u32,
}

impl OffenseQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an offense and return its id.
    pub fn push(&mut self, attacker: PlayerId, kind: OffenseKind, strength: u32) -> OffenseId {
        let id = OffenseId(self.next_id);
        self.next_id += 1;
        self.entries.push(Offense {
            id,
            attacker,
            kind,
            strength,
            resolved: false,
        });
        id
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|o| !o.resolved).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending_count() == 0
    }

    pub fn pending(&self) -> impl Iterator<Item = &Offense> {
        self.entries.iter().filter(|o| !o.resolved)
    }

    /// Mark an offense resolved. Returns `false` if it was unknown or
    /// already resolved.
    pub fn mark_resolved(&mut self, id: OffenseId) -> bool {
        match self.entries.iter_mut().find(|o| o.id == id && !o.resolved) {
            Some(offense) => {
                offense.resolved = true;
                true
            }
            None => false,
        }
    }

    /// Drop resolved offenses.
    pub fn prune_resolved(&mut self) {
        self.entries.retain(|o| !o.resolved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_ids() {
        let mut queue = OffenseQueue::new();

        let a = queue.push(PlayerId::FIRST, OffenseKind::JokerForcePickup, 1);
        let b = queue.push(PlayerId::SECOND, OffenseKind::PileSteal, 2);

        assert_eq!(a, OffenseId(0));
        assert_eq!(b, OffenseId(1));
        assert_eq!(queue.pending_count(), 2);
    }

    #[test]
    fn test_defender_is_opponent() {
        let mut queue = OffenseQueue::new();
        queue.push(PlayerId::SECOND, OffenseKind::JokerForcePickup, 1);

        let offense = queue.pending().next().unwrap();
        assert_eq!(offense.defender(), PlayerId::FIRST);
    }

    #[test]
    fn test_mark_resolved() {
        let mut queue = OffenseQueue::new();
        let first = queue.push(PlayerId::FIRST, OffenseKind::JokerForcePickup, 1);
        queue.push(PlayerId::FIRST, OffenseKind::PileSteal, 1);

        assert!(queue.mark_resolved(first));
        assert!(!queue.mark_resolved(first));
        assert_eq!(queue.pending_count(), 1);
        assert_eq!(queue.pending().next().unwrap().kind, OffenseKind::PileSteal);

        queue.prune_resolved();
        assert_eq!(queue.pending_count(), 1);

        // ids keep counting after a prune
        assert_eq!(queue.push(PlayerId::FIRST, OffenseKind::PileSteal, 1), OffenseId(2));
    }
}
