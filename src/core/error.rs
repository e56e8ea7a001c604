//! Error taxonomy.
//!
//! Each recoverable failure is its own type so callers can match on exactly
//! what went wrong; `GameError` wraps them all for code that only needs `?`.
//!
//! Conditions that are semantically empty (picking up an empty pile, asking
//! for a peek that has already been used) are reported as events, never as
//! errors.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::{Card, CardKind, Rank};

/// A card was constructed with the wrong rank/suit shape for its kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {kind:?} card: {reason}")]
pub struct MalformedCardError {
    pub kind: CardKind,
    pub reason: &'static str,
}

/// Why a play was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalPlayReason {
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("the game is already over")]
    GameOver,
    #[error("no cards were played")]
    EmptyPlay,
    #[error("a Joker must be played alone")]
    JokerNotAlone,
    #[error("{0} is not in hand or face-up")]
    NotOwned(Card),
    #[error("means active: {card} must be lower than {limit}")]
    MeansViolation { card: Card, limit: Rank },
    #[error("a combo play needs every ranked card in the same suit")]
    ComboNeedsMatchingSuits,
}

/// A play that failed validation. No state was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal play by {player}: {reason}")]
pub struct IllegalPlayError {
    pub player: PlayerId,
    #[source]
    pub reason: IllegalPlayReason,
}

impl IllegalPlayError {
    pub fn new(player: PlayerId, reason: IllegalPlayReason) -> Self {
        Self { player, reason }
    }
}

/// A card was requested from a player who does not hold it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{player} does not hold {card} in hand or face-up")]
pub struct CardNotOwnedError {
    pub player: PlayerId,
    pub card: Card,
}

/// A card code could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse card code {token:?}: {reason}")]
pub struct ParseError {
    pub token: String,
    pub reason: &'static str,
}

/// Umbrella error for the engine.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    MalformedCard(#[from] MalformedCardError),
    #[error(transparent)]
    IllegalPlay(#[from] IllegalPlayError),
    #[error(transparent)]
    CardNotOwned(#[from] CardNotOwnedError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("invalid rules config `{field}`: {message}")]
    InvalidConfig { field: &'static str, message: String },
    #[error("emergency slot {index} is locked, occupied or missing")]
    SlotUnavailable { index: usize },
    #[error("failed to encode state snapshot")]
    Snapshot(#[source] bincode::Error),
}

impl GameError {
    pub(crate) fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        GameError::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
