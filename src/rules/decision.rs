//! Player decisions requested during rule resolution.
//!
//! The engine never blocks on input. When a rule needs a choice it asks the
//! `DecisionMaker` it was built with and carries on with the answer, so a
//! whole game can run headless with pre-supplied answers.
//!
//! ## Decision points
//!
//! - `order_burns`: order of several burns found by one play
//!   (only asked under `BurnOrderPolicy::PlayerChosen`)
//! - `choose_block`: whether the defender spends block cards on an offense
//! - `choose_burn_reward`: which supplementary deck a burn reward comes from
//! - `choose_emergency_action`: peek, swap or skip for an eligible slot card

use std::collections::VecDeque;

use super::offense::Offense;
use crate::cards::{Card, DeckColor, Rank};
use crate::core::{GameState, InstanceId, PlayerId};
use crate::zones::EmergencyAction;

/// An emergency card offered for an action during a burn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmergencyOffer {
    pub slot: usize,
    pub instance: InstanceId,
    /// The card, if its owner can see it.
    pub known: Option<Card>,
    pub color: Option<DeckColor>,
}

/// Source of player decisions.
///
/// Every method has a default, so an implementer only overrides the
/// decisions it cares about.
pub trait DecisionMaker {
    /// Order of simultaneous burns. Ranks left out are resolved afterwards
    /// in detected order; unknown ranks are ignored.
    fn order_burns(&mut self, _game: &GameState, _player: PlayerId, detected: &[Rank]) -> Vec<Rank> {
        detected.to_vec()
    }

    /// Whether to block. Only asked when `available` covers the strength.
    fn choose_block(
        &mut self,
        _game: &GameState,
        _defender: PlayerId,
        _offense: &Offense,
        _available: u32,
    ) -> bool {
        true
    }

    fn choose_burn_reward(&mut self, _game: &GameState, _player: PlayerId) -> DeckColor {
        DeckColor::Blue
    }

    fn choose_emergency_action(
        &mut self,
        _game: &GameState,
        _player: PlayerId,
        _offer: &EmergencyOffer,
    ) -> Option<EmergencyAction> {
        None
    }
}

/// Defaults only: detected order, always block, blue rewards, no actions.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoDecisions;

impl DecisionMaker for AutoDecisions {}

/// Pre-supplied answers, consumed in order. When a queue runs dry the
/// `AutoDecisions` answer is used.
///
/// ```
/// use burnpile::cards::DeckColor;
/// use burnpile::rules::ScriptedDecisions;
/// use burnpile::zones::EmergencyAction;
///
/// let script = ScriptedDecisions::new()
///     .reward(DeckColor::Red)
///     .block(false)
///     .emergency(Some(EmergencyAction::Peek));
/// assert_eq!(script.remaining(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedDecisions {
    burn_orders: VecDeque<Vec<Rank>>,
    blocks: VecDeque<bool>,
    rewards: VecDeque<DeckColor>,
    emergency: VecDeque<Option<EmergencyAction>>,
    fallback: AutoDecisions,
}

impl ScriptedDecisions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn burn_order(mut self, order: &[Rank]) -> Self {
        self.burn_orders.push_back(order.to_vec());
        self
    }

    #[must_use]
    pub fn block(mut self, block: bool) -> Self {
        self.blocks.push_back(block);
        self
    }

    #[must_use]
    pub fn reward(mut self, color: DeckColor) -> Self {
        self.rewards.push_back(color);
        self
    }

    #[must_use]
    pub fn emergency(mut self, action: Option<EmergencyAction>) -> Self {
        self.emergency.push_back(action);
        self
    }

    /// Answers not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.burn_orders.len() + self.blocks.len() + self.rewards.len() + self.emergency.len()
    }
}

impl DecisionMaker for ScriptedDecisions {
    fn order_burns(&mut self, game: &GameState, player: PlayerId, detected: &[Rank]) -> Vec<Rank> {
        match self.burn_orders.pop_front() {
            Some(order) => order,
            None => self.fallback.order_burns(game, player, detected),
        }
    }

    fn choose_block(&mut self, game: &GameState, defender: PlayerId, offense: &Offense, available: u32) -> bool {
        match self.blocks.pop_front() {
            Some(answer) => answer,
            None => self.fallback.choose_block(game, defender, offense, available),
        }
    }

    fn choose_burn_reward(&mut self, game: &GameState, player: PlayerId) -> DeckColor {
        match self.rewards.pop_front() {
            Some(color) => color,
            None => self.fallback.choose_burn_reward(game, player),
        }
    }

    fn choose_emergency_action(
        &mut self,
        game: &GameState,
        player: PlayerId,
        offer: &EmergencyOffer,
    ) -> Option<EmergencyAction> {
        match self.emergency.pop_front() {
            Some(action) => action,
            None => self.fallback.choose_emergency_action(game, player, offer),
        }
    }
}

/// Put `chosen` first, then the detected ranks it left out. Ranks that were
/// not detected, and repeats, are dropped.
pub(crate) fn settle_burn_order(detected: &[Rank], chosen: &[Rank]) -> Vec<Rank> {
    let mut order: Vec<Rank> = Vec::with_capacity(detected.len());
    for rank in chosen.iter().chain(detected) {
        if detected.contains(rank) && !order.contains(rank) {
            order.push(*rank);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesConfig;

    #[test]
    fn test_settle_burn_order() {
        let detected = [Rank::Jack, Rank::Two, Rank::Three];

        assert_eq!(settle_burn_order(&detected, &[]), detected.to_vec());
        assert_eq!(
            settle_burn_order(&detected, &[Rank::Three]),
            vec![Rank::Three, Rank::Jack, Rank::Two]
        );
        assert_eq!(
            settle_burn_order(&detected, &[Rank::Ace, Rank::Two, Rank::Two]),
            vec![Rank::Two, Rank::Jack, Rank::Three]
        );
    }

    #[test]
    fn test_scripted_falls_back_to_auto() {
        let game = GameState::new(RulesConfig::default(), ["A", "B"]);
        let mut script = ScriptedDecisions::new().reward(DeckColor::Red);

        assert_eq!(script.choose_burn_reward(&game, PlayerId::FIRST), DeckColor::Red);
        assert_eq!(script.choose_burn_reward(&game, PlayerId::FIRST), DeckColor::Blue);
        assert_eq!(script.remaining(), 0);
    }

    #[test]
    fn test_auto_defaults() {
        let game = GameState::new(RulesConfig::default(), ["A", "B"]);
        let mut auto = AutoDecisions;
        let offer = EmergencyOffer {
            slot: 0,
            instance: InstanceId(1),
            known: None,
            color: Some(DeckColor::Blue),
        };

        assert_eq!(auto.order_burns(&game, PlayerId::FIRST, &[Rank::Two]), vec![Rank::Two]);
        assert_eq!(auto.choose_emergency_action(&game, PlayerId::FIRST, &offer), None);
    }
}
