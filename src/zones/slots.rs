//! Emergency slots and the per-burn action ledger.
//!
//! ## Slots
//!
//! Each player owns a fixed row of slots. Slot 0 starts unlocked, the rest
//! locked; `open_next_slot` unlocks the lowest locked one. A slot records
//! the colour of the deck its card came from, and that provenance outlives
//! the card's hidden/known state.
//!
//! ## Ledger
//!
//! The ledger maps each held card's `InstanceId` to the actions it may take
//! in the current burn cycle. A card placed with `just_acquired` is inert
//! until the next cycle. `start_new_burn_cycle` makes every held card
//! eligible again, and using either action forfeits the other.
//!
//! ```
//! use burnpile::cards::{Card, CardInstance, DeckColor, Rank, Suit};
//! use burnpile::core::InstanceId;
//! use burnpile::zones::{EmergencyAction, EmergencySlots};
//!
//! let mut slots = EmergencySlots::new(4);
//! let card = CardInstance::new(InstanceId(7), Card::emergency(DeckColor::Red, Rank::Jack, Suit::Clubs));
//! slots.fill_slot(0, card, false, true, None).unwrap();
//! assert!(!slots.allowance(InstanceId(7)).any());
//!
//! slots.start_new_burn_cycle();
//! assert!(slots.allowance(InstanceId(7)).peek);
//! assert_eq!(slots.consume_action(InstanceId(7), EmergencyAction::Peek), Some(0));
//! assert!(!slots.allowance(InstanceId(7)).any());
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, DeckColor};
use crate::core::{GameError, InstanceId};

/// An action available on a held emergency card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmergencyAction {
    /// Reveal the card to its owner.
    Peek,
    /// Return the card to its deck and draw a replacement.
    Swap,
}

impl std::fmt::Display for EmergencyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmergencyAction::Peek => f.write_str("peek"),
            EmergencyAction::Swap => f.write_str("swap"),
        }
    }
}

/// Actions still open for one card this cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionAllowance {
    pub peek: bool,
    pub swap: bool,
}

impl ActionAllowance {
    pub const OPEN: Self = Self { peek: true, swap: true };
    pub const SPENT: Self = Self { peek: false, swap: false };

    #[must_use]
    pub fn allows(&self, action: EmergencyAction) -> bool {
        match action {
            EmergencyAction::Peek => self.peek,
            EmergencyAction::Swap => self.swap,
        }
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.peek || self.swap
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencySlot {
    pub index: usize,
    pub locked: bool,
    pub card: Option<CardInstance>,
    /// Whether the owner currently sees the card's value.
    pub known_to_owner: bool,
    /// Colour of the deck the slot was last filled from.
    pub source_color: Option<DeckColor>,
}

impl EmergencySlot {
    fn new(index: usize) -> Self {
        Self {
            index,
            locked: index != 0,
            card: None,
            known_to_owner: false,
            source_color: None,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.locked && self.card.is_none()
    }
}

/// A player's row of emergency slots plus the action ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencySlots {
    slots: Vec<EmergencySlot>,
    ledger: FxHashMap<InstanceId, ActionAllowance>,
}

impl EmergencySlots {
    /// `capacity` slots, slot 0 unlocked.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(EmergencySlot::new).collect(),
            ledger: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EmergencySlot> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmergencySlot> {
        self.slots.iter()
    }

    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.locked).count()
    }

    /// Cards currently held, with their slot index.
    pub fn held(&self) -> impl Iterator<Item = (usize, &CardInstance)> {
        self.slots
            .iter()
            .filter_map(|s| s.card.as_ref().map(|c| (s.index, c)))
    }

    /// Slot holding the given instance.
    #[must_use]
    pub fn slot_of(&self, id: InstanceId) -> Option<usize> {
        self.held().find(|(_, c)| c.id == id).map(|(i, _)| i)
    }

    /// Unlock the lowest-indexed locked slot.
    pub fn open_next_slot(&mut self) -> Option<usize> {
        let slot = self.slots.iter_mut().find(|s| s.locked)?;
        slot.locked = false;
        Some(slot.index)
    }

    /// Lowest unlocked slot without a card.
    #[must_use]
    pub fn first_open(&self) -> Option<usize> {
        self.slots.iter().find(|s| s.is_open()).map(|s| s.index)
    }

    /// Slot for a burn reward: an open slot if there is one, else the next
    /// locked slot.
    pub fn reserve_for_reward(&mut self) -> Option<usize> {
        self.first_open().or_else(|| self.open_next_slot())
    }

    /// Slot for a free grant: a newly unlocked slot if possible, else an
    /// open one.
    pub fn reserve_for_free_grant(&mut self) -> Option<usize> {
        self.open_next_slot().or_else(|| self.first_open())
    }

    /// Whether a reward or grant could currently be placed.
    #[must_use]
    pub fn has_room(&self) -> bool {
        self.slots.iter().any(|s| s.locked || s.card.is_none())
    }

    /// Install a card into an open slot.
    ///
    /// Provenance is `source_color` if given, otherwise the card's own
    /// colour; tokens without an explicit colour keep the slot's previous
    /// provenance.
    pub fn fill_slot(
        &mut self,
        index: usize,
        mut card: CardInstance,
        known_to_owner: bool,
        just_acquired: bool,
        source_color: Option<DeckColor>,
    ) -> Result<(), GameError> {
        let slot = self
            .slots
            .get_mut(index)
            .filter(|s| s.is_open())
            .ok_or(GameError::SlotUnavailable { index })?;

        card.just_acquired = just_acquired;
        if let Some(color) = source_color.or_else(|| card.card.color()) {
            slot.source_color = Some(color);
        }
        slot.known_to_owner = known_to_owner;
        slot.card = Some(card);

        let allowance = if just_acquired {
            ActionAllowance::SPENT
        } else {
            ActionAllowance::OPEN
        };
        self.ledger.insert(card.id, allowance);
        Ok(())
    }

    /// Remove the card from a slot, leaving it unlocked and empty.
    pub fn take_card(&mut self, index: usize) -> Option<CardInstance> {
        let slot = self.slots.get_mut(index)?;
        let card = slot.card.take()?;
        slot.known_to_owner = false;
        self.ledger.remove(&card.id);
        Some(card)
    }

    /// Clear every `just_acquired` flag and reopen one action per held card.
    pub fn start_new_burn_cycle(&mut self) {
        self.ledger.clear();
        for slot in &mut self.slots {
            if let Some(card) = slot.card.as_mut() {
                card.just_acquired = false;
                self.ledger.insert(card.id, ActionAllowance::OPEN);
            }
        }
    }

    /// Actions still open for `id` (none if it is not held).
    #[must_use]
    pub fn allowance(&self, id: InstanceId) -> ActionAllowance {
        self.ledger.get(&id).copied().unwrap_or_default()
    }

    /// Spend `action` on `id` if it is available, closing both actions.
    ///
    /// A peek reveals the card to its owner here; a swap is completed by
    /// the caller using the returned slot index. Returns `None` without
    /// changes if the action is not available.
    pub fn consume_action(&mut self, id: InstanceId, action: EmergencyAction) -> Option<usize> {
        if !self.allowance(id).allows(action) {
            return None;
        }
        let index = self.slot_of(id)?;
        self.ledger.insert(id, ActionAllowance::SPENT);
        if action == EmergencyAction::Peek {
            self.slots[index].known_to_owner = true;
        }
        Some(index)
    }
}
