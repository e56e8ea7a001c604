//! Card system: values, physical instances, decks and card codes.
//!
//! ## Key Types
//!
//! - `Card`: Closed sum type over normal cards, tokens and emergency cards
//! - `Rank`, `Suit`, `DeckColor`: Card attributes
//! - `CardInstance`: A dealt card with its stable `InstanceId`
//! - `Deck`: Ordered draw pile with the game's deck builders

pub mod card;
pub mod deck;
pub mod instance;
pub mod notation;

pub use card::{effective_rank, Card, CardKind, DeckColor, Rank, Suit};
pub use deck::Deck;
pub use instance::CardInstance;
pub use notation::{parse_play, ParsedPlay, PlayCards};
