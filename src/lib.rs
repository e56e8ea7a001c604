//! # burnpile
//!
//! Rules engine for a two-player burn-pile card game.
//!
//! Players empty their hands onto a shared pile. Four cards of the same
//! effective rank on top of the pile burn it. Burns unlock emergency slots
//! with gated peek/swap actions, Fives and Sevens set a "means" limit on
//! the next play, and Jokers launch offenses that force a pickup unless
//! blocked.
//!
//! ## Design Principles
//!
//! 1. **Validate, then commit**: a play is checked in full before any card
//!    moves. A rejected play leaves the state byte-for-byte unchanged.
//!
//! 2. **Headless decisions**: every choice a player makes mid-resolution
//!    goes through the `DecisionMaker` trait, so games run without a
//!    front end and are fully scriptable in tests.
//!
//! 3. **Physical identity**: every dealt card carries an `InstanceId`.
//!    Cards move between zones but are never duplicated, and the emergency
//!    action ledger keys off the instance, not the card value.
//!
//! ## Modules
//!
//! - `core`: Instance ids, seats, commands, errors, RNG, configuration, state
//! - `cards`: Card values, instances, decks and card codes
//! - `zones`: Common pile with burn detection, player seats, emergency slots
//! - `rules`: Turn engine, decisions, events, means, offenses, setup
//!
//! ## Example
//!
//! ```
//! use burnpile::{Command, GameBuilder};
//!
//! let mut game = GameBuilder::new().names("Ann", "Bob").build(2024).unwrap();
//! let player = game.current_player();
//! let card = game.state().player(player).hand[0].card;
//!
//! let outcome = game.apply(player, Command::play(&[card])).unwrap();
//! assert!(!outcome.messages(game.state()).is_empty());
//! assert_ne!(game.current_player(), player);
//! ```

pub mod cards;
pub mod core;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    BoardSnapshot, BurnOrderPolicy, CardNotOwnedError, Command, GameError, GamePhase,
    GameRng, GameState, IllegalPlayError, IllegalPlayReason, InstanceId, MalformedCardError,
    ParseError, PlayerId, PlayerMap, RulesConfig, ViewTarget,
};

pub use crate::cards::{effective_rank, parse_play, Card, CardInstance, CardKind, Deck, DeckColor, Rank, Suit};

pub use crate::zones::{BurnReport, CommonPile, EmergencyAction, EmergencySlots, Player, Zone};

pub use crate::rules::{
    AutoDecisions, BurnRules, DecisionMaker, GameBuilder, GameEvent, GameResult, PlayOutcome,
    ScriptedDecisions,
};
