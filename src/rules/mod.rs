//! Game rules: the turn engine and the pieces it resolves plays with.
//!
//! - `engine`: `BurnRules`, play validation and resolution
//! - `decision`: player choices requested mid-resolution
//! - `event`: what each command caused
//! - `means`: the lower-than constraint set by Fives and Sevens
//! - `offense`: Joker and PFJ offenses awaiting a block
//! - `setup`: dealing a new game

pub mod decision;
pub mod engine;
pub mod event;
pub mod means;
pub mod offense;
pub mod setup;

pub use decision::{AutoDecisions, DecisionMaker, EmergencyOffer, ScriptedDecisions};
pub use engine::{BurnRules, GameResult, PlayOutcome};
pub use event::{GameEvent, GrantFailure};
pub use means::{means_trigger, MeansState};
pub use offense::{Offense, OffenseId, OffenseKind, OffenseQueue};
pub use setup::GameBuilder;
