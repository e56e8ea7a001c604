//! A player's seat: hand, table cards, personal pile and emergency slots.
//!
//! ## Zones
//!
//! - `hand`: private, refilled up to the hand limit
//! - `face_up`: public table cards, playable like the hand
//! - `face_down`: hidden table cards; the middle one is known to its owner
//! - `personal_pile`: private draw queue, oldest card drawn first
//!
//! Plays take cards from the hand first, then from the face-up cards.
//! Face-down cards are never taken by a play.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::slots::{EmergencyAction, EmergencySlots};
use crate::cards::{Card, CardInstance, Deck, DeckColor, Rank};
use crate::core::{CardNotOwnedError, InstanceId, PlayerId, RulesConfig};

/// A card zone owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Hand,
    FaceUp,
    FaceDown,
    PersonalPile,
}

/// An emergency card placed into a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotGrant {
    pub slot: usize,
    pub card: CardInstance,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<CardInstance>,
    pub face_up: Vec<CardInstance>,
    pub face_down: Vec<CardInstance>,
    pub personal_pile: VecDeque<CardInstance>,
    pub slots: EmergencySlots,
    /// The status rank, while this player holds the status ability.
    pub status_token: Option<Rank>,
    pub has_status_ability: bool,
    base_hand_limit: usize,
    status_hand_limit: usize,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, rules: &RulesConfig) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            face_up: Vec::new(),
            face_down: Vec::new(),
            personal_pile: VecDeque::new(),
            slots: EmergencySlots::new(rules.emergency_slot_capacity),
            status_token: None,
            has_status_ability: false,
            base_hand_limit: rules.base_hand_limit,
            status_hand_limit: rules.status_hand_limit,
        }
    }

    #[must_use]
    pub fn hand_limit(&self) -> usize {
        if self.has_status_ability {
            self.status_hand_limit
        } else {
            self.base_hand_limit
        }
    }

    /// Draw from the personal pile until the hand is full or the pile is
    /// empty. Returns the number of cards drawn.
    pub fn replenish(&mut self) -> usize {
        let mut drawn = 0;
        while self.hand.len() < self.hand_limit() {
            let Some(card) = self.personal_pile.pop_front() else {
                break;
            };
            self.hand.push(card);
            drawn += 1;
        }
        drawn
    }

    /// No cards left in hand, on the table or in the personal pile.
    #[must_use]
    pub fn is_out_of_cards(&self) -> bool {
        self.hand.is_empty()
            && self.face_up.is_empty()
            && self.face_down.is_empty()
            && self.personal_pile.is_empty()
    }

    /// Put cards into a zone. Personal pile cards go to the back.
    pub fn place(&mut self, zone: Zone, cards: impl IntoIterator<Item = CardInstance>) {
        match zone {
            Zone::Hand => self.hand.extend(cards),
            Zone::FaceUp => self.face_up.extend(cards),
            Zone::FaceDown => self.face_down.extend(cards),
            Zone::PersonalPile => self.personal_pile.extend(cards),
        }
    }

    /// The face-down card its owner may look at.
    #[must_use]
    pub fn face_down_middle(&self) -> Option<&CardInstance> {
        self.face_down.get(self.face_down.len() / 2)
    }

    /// Whether `card` is playable from hand or face-up.
    #[must_use]
    pub fn holds(&self, card: &Card) -> bool {
        self.hand.iter().chain(&self.face_up).any(|c| c.card == *card)
    }

    /// Locate every card of a play, honouring multiplicity, without
    /// touching any zone. Fails on the first card that cannot be matched.
    pub fn plan_removal(&self, cards: &[Card]) -> Result<Vec<(Zone, usize)>, CardNotOwnedError> {
        let mut plan: Vec<(Zone, usize)> = Vec::with_capacity(cards.len());

        for card in cards {
            let unused = |zone: Zone, cards: &[CardInstance]| {
                cards
                    .iter()
                    .enumerate()
                    .position(|(i, c)| c.card == *card && !plan.contains(&(zone, i)))
            };

            let spot = unused(Zone::Hand, &self.hand)
                .map(|i| (Zone::Hand, i))
                .or_else(|| unused(Zone::FaceUp, &self.face_up).map(|i| (Zone::FaceUp, i)));

            match spot {
                Some(spot) => plan.push(spot),
                None => {
                    return Err(CardNotOwnedError {
                        player: self.id,
                        card: *card,
                    })
                }
            }
        }
        Ok(plan)
    }

    /// Remove the cards of a play, all or nothing. Returned instances are
    /// in play order.
    pub fn take_cards(&mut self, cards: &[Card]) -> Result<Vec<CardInstance>, CardNotOwnedError> {
        let plan = self.plan_removal(cards)?;
        let taken: Vec<CardInstance> = plan
            .iter()
            .map(|&(zone, i)| match zone {
                Zone::FaceUp => self.face_up[i],
                _ => self.hand[i],
            })
            .collect();

        let mut indices = plan;
        indices.sort_unstable_by(|a, b| b.1.cmp(&a.1));
        for (zone, i) in indices {
            match zone {
                Zone::FaceUp => {
                    self.face_up.remove(i);
                }
                _ => {
                    self.hand.remove(i);
                }
            }
        }
        Ok(taken)
    }

    /// Remove a single card from hand, else face-up.
    pub fn remove_from_zones(&mut self, card: &Card) -> Result<CardInstance, CardNotOwnedError> {
        let mut taken = self.take_cards(std::slice::from_ref(card))?;
        taken.pop().ok_or(CardNotOwnedError {
            player: self.id,
            card: *card,
        })
    }

    /// Block points available in hand.
    #[must_use]
    pub fn block_points(&self) -> u32 {
        self.hand.iter().filter(|c| c.card.is_block_material()).count() as u32
    }

    /// Remove exactly `strength` block cards from hand, front first.
    /// Leaves the hand untouched and returns `None` if there are too few.
    pub fn take_block(&mut self, strength: u32) -> Option<Vec<CardInstance>> {
        if self.block_points() < strength {
            return None;
        }
        let mut needed = strength as usize;
        let mut used = Vec::with_capacity(needed);
        self.hand.retain(|c| {
            if needed > 0 && c.card.is_block_material() {
                needed -= 1;
                used.push(*c);
                false
            } else {
                true
            }
        });
        Some(used)
    }

    /// Give or take the status ability.
    pub fn set_status(&mut self, rank: Option<Rank>) {
        self.has_status_ability = rank.is_some();
        self.status_token = rank;
    }

    /// Place a burn reward from `deck` into a slot.
    ///
    /// Uses an open slot, else unlocks the next one. Returns `None` if no
    /// slot is available or the deck is empty.
    pub fn grant_emergency(&mut self, deck: &mut Deck, known_to_owner: bool) -> Option<SlotGrant> {
        if deck.is_empty() || !self.slots.has_room() {
            return None;
        }
        let slot = self.slots.reserve_for_reward()?;
        self.install_from(deck, slot, known_to_owner)
    }

    /// Grant one known card from `deck`, preferring a newly unlocked slot.
    pub fn grant_free_emergency(&mut self, deck: &mut Deck) -> Option<SlotGrant> {
        if deck.is_empty() || !self.slots.has_room() {
            return None;
        }
        let slot = self.slots.reserve_for_free_grant()?;
        self.install_from(deck, slot, true)
    }

    fn install_from(&mut self, deck: &mut Deck, slot: usize, known_to_owner: bool) -> Option<SlotGrant> {
        let card = deck.draw_one()?;
        match self.slots.fill_slot(slot, card, known_to_owner, true, deck.color()) {
            Ok(()) => Some(SlotGrant { slot, card }),
            Err(_) => {
                deck.put_bottom(card);
                None
            }
        }
    }

    /// Swap a slot card for a fresh one from its provenance deck.
    ///
    /// The old card goes to the bottom of `deck`; the replacement is gated
    /// as just acquired and known only for red decks. Returns the old and
    /// new card, or `None` if the swap is not available.
    pub fn swap_emergency(
        &mut self,
        id: InstanceId,
        deck: &mut Deck,
    ) -> Option<(CardInstance, SlotGrant)> {
        if deck.is_empty() || !self.slots.allowance(id).allows(EmergencyAction::Swap) {
            return None;
        }
        let slot = self.slots.consume_action(id, EmergencyAction::Swap)?;
        let old = self.slots.take_card(slot)?;
        let known = deck.color() == Some(DeckColor::Red);
        let grant = self.install_from(deck, slot, known);
        deck.put_bottom(old);
        grant.map(|g| (old, g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use crate::core::InstanceAllocator;

    fn player_with(hand: &[Card], face_up: &[Card]) -> (Player, InstanceAllocator) {
        let mut ids = InstanceAllocator::new();
        let mut p = Player::new(PlayerId::FIRST, "Ann", &RulesConfig::default());
        p.place(Zone::Hand, hand.iter().map(|&c| CardInstance::dealt(&mut ids, c)));
        p.place(Zone::FaceUp, face_up.iter().map(|&c| CardInstance::dealt(&mut ids, c)));
        (p, ids)
    }

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::normal(rank, suit)
    }

    #[test]
    fn test_hand_limit_follows_status() {
        let (mut p, _) = player_with(&[], &[]);
        assert_eq!(p.hand_limit(), 4);

        p.set_status(Some(Rank::Eight));
        assert_eq!(p.hand_limit(), 5);
        assert_eq!(p.status_token, Some(Rank::Eight));

        p.set_status(None);
        assert_eq!(p.hand_limit(), 4);
    }

    #[test]
    fn test_replenish_draws_oldest_first() {
        let (mut p, mut ids) = player_with(&[], &[]);
        let cards: Vec<_> = Rank::ORDERED[..6]
            .iter()
            .map(|&r| CardInstance::dealt(&mut ids, c(r, Suit::Clubs)))
            .collect();
        p.place(Zone::PersonalPile, cards.clone());

        assert_eq!(p.replenish(), 4);
        assert_eq!(p.hand, cards[..4].to_vec());
        assert_eq!(p.personal_pile.len(), 2);

        assert_eq!(p.replenish(), 0);
    }

    #[test]
    fn test_replenish_with_empty_pile_is_noop() {
        let (mut p, _) = player_with(&[c(Rank::Ace, Suit::Spades)], &[]);
        assert_eq!(p.replenish(), 0);
        assert_eq!(p.hand.len(), 1);
    }

    #[test]
    fn test_remove_prefers_hand() {
        let card = c(Rank::King, Suit::Hearts);
        let (mut p, _) = player_with(&[card], &[card]);

        p.remove_from_zones(&card).unwrap();
        assert!(p.hand.is_empty());
        assert_eq!(p.face_up.len(), 1);

        p.remove_from_zones(&card).unwrap();
        assert!(p.face_up.is_empty());

        let err = p.remove_from_zones(&card).unwrap_err();
        assert_eq!(err.card, card);
    }

    #[test]
    fn test_face_down_is_never_taken() {
        let (mut p, mut ids) = player_with(&[], &[]);
        let card = c(Rank::Six, Suit::Diamonds);
        p.place(Zone::FaceDown, [CardInstance::dealt(&mut ids, card)]);

        assert!(!p.holds(&card));
        assert!(p.remove_from_zones(&card).is_err());
        assert_eq!(p.face_down.len(), 1);
    }

    #[test]
    fn test_take_cards_respects_multiplicity() {
        let seven = c(Rank::Seven, Suit::Spades);
        let (mut p, _) = player_with(&[seven, c(Rank::Two, Suit::Spades)], &[]);

        let before = p.clone();
        assert!(p.take_cards(&[seven, seven]).is_err());
        assert_eq!(p, before);
    }

    #[test]
    fn test_take_cards_keeps_play_order() {
        let a = c(Rank::Four, Suit::Hearts);
        let b = c(Rank::Jack, Suit::Clubs);
        let (mut p, _) = player_with(&[a, c(Rank::Ace, Suit::Clubs)], &[b]);

        let taken = p.take_cards(&[b, a]).unwrap();

        assert_eq!(taken.iter().map(|i| i.card).collect::<Vec<_>>(), vec![b, a]);
        assert_eq!(p.hand.len(), 1);
        assert!(p.face_up.is_empty());
    }

    #[test]
    fn test_take_block() {
        let (mut p, _) = player_with(
            &[
                c(Rank::Four, Suit::Clubs),
                c(Rank::Nine, Suit::Clubs),
                Card::Joker,
                Card::Pfj,
            ],
            &[],
        );

        assert_eq!(p.block_points(), 3);
        assert!(p.take_block(4).is_none());
        assert_eq!(p.hand.len(), 4);

        let used = p.take_block(2).unwrap();
        assert_eq!(
            used.iter().map(|i| i.card).collect::<Vec<_>>(),
            vec![c(Rank::Four, Suit::Clubs), Card::Joker]
        );
        assert_eq!(p.hand.len(), 2);
    }

    #[test]
    fn test_grant_free_emergency_opens_new_slot() {
        let (mut p, mut ids) = player_with(&[], &[]);
        let mut red = Deck::red(&mut ids);
        let before = red.len();

        let grant = p.grant_free_emergency(&mut red).unwrap();

        assert_eq!(grant.slot, 1);
        assert_eq!(red.len(), before - 1);
        let slot = p.slots.get(1).unwrap();
        assert!(slot.known_to_owner);
        assert_eq!(slot.source_color, Some(DeckColor::Red));
        assert!(slot.card.unwrap().just_acquired);
        assert!(!p.slots.allowance(grant.card.id).any());
    }

    #[test]
    fn test_grant_free_emergency_falls_back_to_open_slot() {
        let (mut p, mut ids) = player_with(&[], &[]);
        let rules = RulesConfig::default().with_slot_capacity(1);
        p.slots = EmergencySlots::new(rules.emergency_slot_capacity);
        let mut red = Deck::red(&mut ids);

        assert_eq!(p.grant_free_emergency(&mut red).map(|g| g.slot), Some(0));
        assert!(p.grant_free_emergency(&mut red).is_none());
    }

    #[test]
    fn test_grant_from_empty_deck() {
        let (mut p, _) = player_with(&[], &[]);
        let mut empty = Deck::default();

        assert!(p.grant_emergency(&mut empty, true).is_none());
        assert_eq!(p.slots.unlocked_count(), 1);
    }

    #[test]
    fn test_swap_emergency() {
        let (mut p, mut ids) = player_with(&[], &[]);
        let mut blue = Deck::blue(&mut ids);
        let first = p.grant_emergency(&mut blue, false).unwrap();

        // inert during the cycle it was granted in
        assert!(p.swap_emergency(first.card.id, &mut blue).is_none());

        p.slots.start_new_burn_cycle();
        let (old, new) = p.swap_emergency(first.card.id, &mut blue).unwrap();

        assert_eq!(old.id, first.card.id);
        assert_eq!(new.slot, first.slot);
        assert_eq!(blue.iter().last().map(|c| c.id), Some(old.id));
        assert!(!p.slots.get(0).unwrap().known_to_owner);
        assert!(!p.slots.allowance(new.card.id).any());
    }
}
