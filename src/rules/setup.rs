//! Game setup.

use tracing::info;

use super::decision::{AutoDecisions, DecisionMaker};
use super::engine::BurnRules;
use crate::cards::{CardInstance, Deck};
use crate::core::{GameError, GameRng, GameState, PlayerId, RulesConfig};
use crate::zones::{Player, Zone};

/// Builder for a ready-to-play game.
///
/// Shuffles the playing deck and both supplementary decks from one seed,
/// splits the playing deck into the two personal piles, deals the table
/// cards from each pile (face-down first) and fills both hands.
///
/// ```
/// use burnpile::rules::GameBuilder;
/// use burnpile::core::PlayerId;
///
/// let game = GameBuilder::new().names("Ann", "Bob").build(7).unwrap();
/// let ann = game.state().player(PlayerId::FIRST);
/// assert_eq!(ann.hand.len(), 4);
/// assert_eq!(ann.face_up.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    names: [String; 2],
    rules: RulesConfig,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            names: ["Player A".to_string(), "Player B".to_string()],
            rules: RulesConfig::default(),
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.names = [first.into(), second.into()];
        self
    }

    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Build with `AutoDecisions`.
    pub fn build(self, seed: u64) -> Result<BurnRules<AutoDecisions>, GameError> {
        self.build_with(seed, AutoDecisions)
    }

    pub fn build_with<D: DecisionMaker>(self, seed: u64, decisions: D) -> Result<BurnRules<D>, GameError> {
        self.rules.validate()?;
        let face_down = self.rules.face_down_count;
        let face_up = self.rules.face_up_count;

        let mut state = GameState::new(self.rules, self.names);
        let rng = GameRng::new(seed);

        let mut playing = Deck::playing(state.ids_mut());
        playing.shuffle(&mut rng.for_context("playing"));
        state.red_deck.shuffle(&mut rng.for_context("red"));
        state.blue_deck.shuffle(&mut rng.for_context("blue"));

        let (first, second) = playing.split_in_half();
        for (player, pile) in [(PlayerId::FIRST, first), (PlayerId::SECOND, second)] {
            let seat = state.player_mut(player);
            seat.place(Zone::PersonalPile, pile);
            let down = deal_from_pile(seat, face_down);
            seat.place(Zone::FaceDown, down);
            let up = deal_from_pile(seat, face_up);
            seat.place(Zone::FaceUp, up);
            seat.replenish();
        }

        info!(target: "burnpile::engine", seed, "game set up");
        Ok(BurnRules::new(state, decisions))
    }
}

fn deal_from_pile(seat: &mut Player, n: usize) -> Vec<CardInstance> {
    let n = n.min(seat.personal_pile.len());
    seat.personal_pile.drain(..n).collect()
}
