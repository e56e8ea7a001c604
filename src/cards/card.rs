//! Card values: ranks, suits, and the closed set of card kinds.
//!
//! `Card` is a sum type, so a Normal or emergency card always carries a rank
//! and suit and a token (Joker, PFJ, free-emergency grant) never does.
//! `Card::try_new` is the loose constructor for callers that hold the parts
//! separately; it is the only place a `MalformedCardError` can come from.
//!
//! ## Effective rank
//!
//! Eights and Nines compare as the same rank for burns and means. The
//! collapse happens at comparison time only:
//!
//! ```
//! use burnpile::cards::{effective_rank, Rank};
//!
//! assert_eq!(effective_rank(Rank::Nine), Rank::Eight);
//! assert_eq!(effective_rank(Rank::Ten), Rank::Ten);
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::core::MalformedCardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ORDERED: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Twos and Threes never anchor a burn run.
    pub const fn is_transparent(self) -> bool {
        matches!(self, Rank::Two | Rank::Three)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        f.write_str(text)
    }
}

/// Comparison rank for burns and means: Nine collapses onto Eight.
pub const fn effective_rank(rank: Rank) -> Rank {
    match rank {
        Rank::Nine => Rank::Eight,
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn letter(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Supplementary deck colour, also recorded as slot provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckColor {
    Red,
    Blue,
}

impl fmt::Display for DeckColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckColor::Red => f.write_str("Red"),
            DeckColor::Blue => f.write_str("Blue"),
        }
    }
}

/// Discriminant of `Card`, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Normal,
    Joker,
    Pfj,
    FreeEmergency,
    EmergencyRed,
    EmergencyBlue,
}

impl CardKind {
    pub const fn is_token(self) -> bool {
        matches!(self, CardKind::Joker | CardKind::Pfj | CardKind::FreeEmergency)
    }
}

/// A playing card or special token.
///
/// Equality is structural: two `7H` are equal, as are any two Jokers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Normal { rank: Rank, suit: Suit },
    Joker,
    /// Pile-fuckery token.
    Pfj,
    /// Grants a free emergency card when played.
    FreeEmergency,
    EmergencyRed { rank: Rank, suit: Suit },
    EmergencyBlue { rank: Rank, suit: Suit },
}

impl Card {
    #[must_use]
    pub const fn normal(rank: Rank, suit: Suit) -> Self {
        Card::Normal { rank, suit }
    }

    #[must_use]
    pub const fn emergency(color: DeckColor, rank: Rank, suit: Suit) -> Self {
        match color {
            DeckColor::Red => Card::EmergencyRed { rank, suit },
            DeckColor::Blue => Card::EmergencyBlue { rank, suit },
        }
    }

    /// Build a card from loose parts, checking the rank/suit shape.
    ///
    /// ```
    /// use burnpile::cards::{Card, CardKind, Rank, Suit};
    ///
    /// assert!(Card::try_new(CardKind::Normal, Some(Rank::Ace), Some(Suit::Clubs)).is_ok());
    /// assert!(Card::try_new(CardKind::Normal, Some(Rank::Ace), None).is_err());
    /// assert!(Card::try_new(CardKind::Joker, Some(Rank::Ace), None).is_err());
    /// ```
    pub fn try_new(
        kind: CardKind,
        rank: Option<Rank>,
        suit: Option<Suit>,
    ) -> Result<Self, MalformedCardError> {
        if kind.is_token() {
            if rank.is_some() || suit.is_some() {
                return Err(MalformedCardError {
                    kind,
                    reason: "tokens carry no rank or suit",
                });
            }
            return Ok(match kind {
                CardKind::Joker => Card::Joker,
                CardKind::Pfj => Card::Pfj,
                _ => Card::FreeEmergency,
            });
        }

        let (Some(rank), Some(suit)) = (rank, suit) else {
            return Err(MalformedCardError {
                kind,
                reason: "ranked cards need both rank and suit",
            });
        };

        Ok(match kind {
            CardKind::EmergencyRed => Card::EmergencyRed { rank, suit },
            CardKind::EmergencyBlue => Card::EmergencyBlue { rank, suit },
            _ => Card::Normal { rank, suit },
        })
    }

    #[must_use]
    pub const fn kind(&self) -> CardKind {
        match self {
            Card::Normal { .. } => CardKind::Normal,
            Card::Joker => CardKind::Joker,
            Card::Pfj => CardKind::Pfj,
            Card::FreeEmergency => CardKind::FreeEmergency,
            Card::EmergencyRed { .. } => CardKind::EmergencyRed,
            Card::EmergencyBlue { .. } => CardKind::EmergencyBlue,
        }
    }

    #[must_use]
    pub const fn rank(&self) -> Option<Rank> {
        match self {
            Card::Normal { rank, .. }
            | Card::EmergencyRed { rank, .. }
            | Card::EmergencyBlue { rank, .. } => Some(*rank),
            _ => None,
        }
    }

    #[must_use]
    pub const fn suit(&self) -> Option<Suit> {
        match self {
            Card::Normal { suit, .. }
            | Card::EmergencyRed { suit, .. }
            | Card::EmergencyBlue { suit, .. } => Some(*suit),
            _ => None,
        }
    }

    /// Effective rank, or `None` for tokens.
    #[must_use]
    pub const fn effective_rank(&self) -> Option<Rank> {
        match self.rank() {
            Some(rank) => Some(effective_rank(rank)),
            None => None,
        }
    }

    #[must_use]
    pub const fn is_token(&self) -> bool {
        self.kind().is_token()
    }

    #[must_use]
    pub const fn is_normal(&self) -> bool {
        matches!(self, Card::Normal { .. })
    }

    #[must_use]
    pub fn has_rank(&self, rank: Rank) -> bool {
        self.rank() == Some(rank)
    }

    /// Colour tag of an emergency card.
    #[must_use]
    pub const fn color(&self) -> Option<DeckColor> {
        match self {
            Card::EmergencyRed { .. } => Some(DeckColor::Red),
            Card::EmergencyBlue { .. } => Some(DeckColor::Blue),
            _ => None,
        }
    }

    /// Jokers, Fours and PFJs can block an offense, one point each.
    #[must_use]
    pub fn is_block_material(&self) -> bool {
        matches!(self, Card::Joker | Card::Pfj) || self.has_rank(Rank::Four)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Normal { rank, suit } => write!(f, "{rank}{suit}"),
            Card::Joker => f.write_str("JK"),
            Card::Pfj => f.write_str("PFJ"),
            Card::FreeEmergency => f.write_str("FRE"),
            Card::EmergencyRed { rank, suit } => write!(f, "R{rank}{suit}"),
            Card::EmergencyBlue { rank, suit } => write!(f, "B{rank}{suit}"),
        }
    }
}
