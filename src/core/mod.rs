//! Core types: instance ids, seats, commands, errors, RNG, configuration
//! and the game state that ties them together.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionRecord, Command, ViewTarget};
pub use config::{BurnOrderPolicy, RulesConfig};
pub use entity::{InstanceAllocator, InstanceId};
pub use error::{
    CardNotOwnedError, GameError, IllegalPlayError, IllegalPlayReason, MalformedCardError,
    ParseError,
};
pub use player::{PlayerId, PlayerMap, SEATS};
pub use rng::GameRng;
pub use state::{BoardSnapshot, GamePhase, GameState, HandView, SeatView, SlotView};
