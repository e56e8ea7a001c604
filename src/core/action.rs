//! Commands and the action history.
//!
//! A `Command` is what the outside world asks of the engine once raw text
//! has been parsed:
//! - `Play` carries the cards in play order and the combo flag
//! - `Pickup`, `Status`, `Quit` carry nothing
//! - `View` names what to render
//!
//! Mutating commands are recorded as `ActionRecord`s in the state's
//! history.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::{Card, PlayCards};

/// What a `View` command renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewTarget {
    Hand,
    Board,
    Common,
}

/// A parsed command.
///
/// ## Example
///
/// ```
/// use burnpile::cards::{Card, Rank, Suit};
/// use burnpile::core::Command;
///
/// let play = Command::play(&[Card::normal(Rank::Eight, Suit::Spades)]);
/// assert!(play.is_mutating());
/// assert!(!Command::Status.is_mutating());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Play { cards: PlayCards, via_pair: bool },
    Pickup,
    Status,
    View(ViewTarget),
    Quit,
}

impl Command {
    /// A plain play.
    #[must_use]
    pub fn play(cards: &[Card]) -> Self {
        Command::Play {
            cards: SmallVec::from_slice(cards),
            via_pair: false,
        }
    }

    /// A same-suit combo play.
    #[must_use]
    pub fn combo(cards: &[Card]) -> Self {
        Command::Play {
            cards: SmallVec::from_slice(cards),
            via_pair: true,
        }
    }

    /// Whether the command changes game state.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(self, Command::Play { .. } | Command::Pickup | Command::Quit)
    }
}

/// A recorded command with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who issued the command.
    pub player: PlayerId,

    pub command: Command,

    /// Turn number when the command was applied.
    pub turn: u32,

    /// Sequence number across the game (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, command: Command, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            command,
            turn,
            sequence,
        }
    }
}
