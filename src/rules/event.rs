//! Game events.
//!
//! Every command returns the events it caused, in order. Events are
//! structured for callers that want to react to them, and `Display` renders
//! the human-readable message for each one.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::offense::OffenseKind;
use crate::cards::{Card, DeckColor, PlayCards, Rank};
use crate::core::PlayerId;
use crate::zones::EmergencyAction;

/// Why no emergency card was granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantFailure {
    NoSlot,
    DeckEmpty,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Played { player: PlayerId, cards: PlayCards, via_pair: bool },
    /// One burn of `rank`; `nth` counts from 1 within a play.
    Burned { player: PlayerId, rank: Rank, nth: u32 },
    StatusGranted { player: PlayerId, rank: Rank },
    StatusTransferred { from: PlayerId, to: PlayerId },
    MeansActivated { player: PlayerId, limit: Rank },
    MeansCleared,
    PileWiped { player: PlayerId, count: usize },
    EmergencyGranted { player: PlayerId, slot: usize, color: Option<DeckColor>, known: bool },
    EmergencyNotGranted { player: PlayerId, reason: GrantFailure },
    EmergencyPeeked { player: PlayerId, slot: usize, card: Card },
    EmergencySwapped { player: PlayerId, slot: usize, color: Option<DeckColor> },
    EmergencyActionUnavailable { player: PlayerId, slot: usize, action: EmergencyAction },
    PileStolen { from: PlayerId, to: PlayerId, count: usize },
    NothingToSteal { player: PlayerId },
    OffenseQueued { attacker: PlayerId, kind: OffenseKind, strength: u32 },
    Blocked { defender: PlayerId, kind: OffenseKind, cards: Vec<Card> },
    BlockFailed { defender: PlayerId, kind: OffenseKind },
    ForcedPickup { player: PlayerId, count: usize },
    PickedUp { player: PlayerId, count: usize },
    NothingToPickUp { player: PlayerId },
    TurnPassed { to: PlayerId },
    Won { player: PlayerId },
    Quit { player: PlayerId },
    Status { player: PlayerId, line: String },
    View { text: String },
}

fn card_list(cards: &[Card]) -> String {
    cards.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

impl GameEvent {
    /// The message for this event, with each seat written by `name`.
    pub fn describe(&self, name: &dyn Fn(PlayerId) -> String) -> String {
        Message { event: self, name }.to_string()
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_message(f, self, &|p: PlayerId| p.to_string())
    }
}

struct Message<'a> {
    event: &'a GameEvent,
    name: &'a dyn Fn(PlayerId) -> String,
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_message(f, self.event, self.name)
    }
}

fn write_message(f: &mut fmt::Formatter<'_>, event: &GameEvent, name: &dyn Fn(PlayerId) -> String) -> fmt::Result {
    match event {
        GameEvent::Played { player, cards, via_pair } => {
            let combo = if *via_pair { " as a combo" } else { "" };
            write!(f, "{} played {}{combo}", name(*player), card_list(cards))
        }
        GameEvent::Burned { player, rank, nth } => {
            write!(f, "{} burned {rank}s (burn {nth})", name(*player))
        }
        GameEvent::StatusGranted { player, rank } => {
            write!(f, "{} gains the status ability at rank {rank}", name(*player))
        }
        GameEvent::StatusTransferred { from, to } => {
            write!(f, "status ability moves from {} to {}", name(*from), name(*to))
        }
        GameEvent::MeansActivated { player, limit } => {
            write!(f, "{} set means: next play must be lower than {limit}", name(*player))
        }
        GameEvent::MeansCleared => f.write_str("means cleared"),
        GameEvent::PileWiped { player, count } => {
            write!(f, "{} wiped the pile ({count} cards)", name(*player))
        }
        GameEvent::EmergencyGranted { player, slot, color, known } => {
            let color = color.map_or_else(|| "an".to_string(), |c| format!("a {c}"));
            let seen = if *known { "known" } else { "hidden" };
            write!(f, "{} received {color} emergency card in slot {slot} ({seen})", name(*player))
        }
        GameEvent::EmergencyNotGranted { player, reason } => match reason {
            GrantFailure::NoSlot => write!(f, "{} has no free emergency slot", name(*player)),
            GrantFailure::DeckEmpty => write!(f, "no emergency card left for {}", name(*player)),
        },
        GameEvent::EmergencyPeeked { player, slot, card } => {
            write!(f, "{} peeked at slot {slot}: {card}", name(*player))
        }
        GameEvent::EmergencySwapped { player, slot, color } => match color {
            Some(c) => write!(f, "{} swapped slot {slot} for a new {c} card", name(*player)),
            None => write!(f, "{} swapped slot {slot}", name(*player)),
        },
        GameEvent::EmergencyActionUnavailable { player, slot, action } => {
            write!(f, "{} cannot {action} slot {slot} this burn", name(*player))
        }
        GameEvent::PileStolen { from, to, count } => {
            write!(f, "{} stole {}'s personal pile ({count} cards)", name(*to), name(*from))
        }
        GameEvent::NothingToSteal { player } => {
            write!(f, "{}'s PFJ found no personal pile to steal", name(*player))
        }
        GameEvent::OffenseQueued { attacker, kind, strength } => {
            write!(f, "{} launched a {kind} offense (strength {strength})", name(*attacker))
        }
        GameEvent::Blocked { defender, kind, cards } => {
            write!(f, "{} blocked the {kind} offense with {}", name(*defender), card_list(cards))
        }
        GameEvent::BlockFailed { defender, kind } => {
            write!(f, "{} failed to block the {kind} offense", name(*defender))
        }
        GameEvent::ForcedPickup { player, count } => {
            write!(f, "{} is forced to pick up the pile ({count} cards)", name(*player))
        }
        GameEvent::PickedUp { player, count } => {
            write!(f, "{} picked up the pile ({count} cards)", name(*player))
        }
        GameEvent::NothingToPickUp { player } => {
            write!(f, "{} tried to pick up, but the pile is empty", name(*player))
        }
        GameEvent::TurnPassed { to } => write!(f, "{} to play", name(*to)),
        GameEvent::Won { player } => write!(f, "{} wins", name(*player)),
        GameEvent::Quit { player } => write!(f, "{} quit", name(*player)),
        GameEvent::Status { line, .. } => f.write_str(line),
        GameEvent::View { text } => f.write_str(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use smallvec::smallvec;

    #[test]
    fn test_messages() {
        let played = GameEvent::Played {
            player: PlayerId::FIRST,
            cards: smallvec![Card::normal(Rank::Eight, Suit::Spades), Card::Joker],
            via_pair: false,
        };
        assert_eq!(played.to_string(), "Player 0 played 8S, JK");

        let burned = GameEvent::Burned {
            player: PlayerId::SECOND,
            rank: Rank::Eight,
            nth: 1,
        };
        assert_eq!(burned.to_string(), "Player 1 burned 8s (burn 1)");

        let granted = GameEvent::EmergencyGranted {
            player: PlayerId::FIRST,
            slot: 0,
            color: Some(DeckColor::Blue),
            known: false,
        };
        assert_eq!(
            granted.to_string(),
            "Player 0 received a Blue emergency card in slot 0 (hidden)"
        );
    }

    #[test]
    fn test_describe_uses_given_names() {
        let stolen = GameEvent::PileStolen {
            from: PlayerId::SECOND,
            to: PlayerId::FIRST,
            count: 3,
        };
        let names = |p: PlayerId| if p == PlayerId::FIRST { "Ann".to_string() } else { "Bob".to_string() };

        assert_eq!(stolen.describe(&names), "Ann stole Bob's personal pile (3 cards)");
        assert_eq!(stolen.to_string(), "Player 0 stole Player 1's personal pile (3 cards)");
    }

    #[test]
    fn test_serialization() {
        let event = GameEvent::Blocked {
            defender: PlayerId::SECOND,
            kind: OffenseKind::JokerForcePickup,
            cards: vec![Card::Joker],
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
