//! Card codes.
//!
//! A code is `{rank}{suit}` (`8S`, `10H`, `QD`), one of the token codes
//! `JK`, `PFJ`, `FRE`, or an emergency code prefixed with `R`/`B`
//! (`R8S`). Parsing is case-insensitive and matches `Card`'s `Display`.
//!
//! A play list separates cards with `,` or `+`; any `+` marks the play as a
//! same-suit combo.
//!
//! ```
//! use burnpile::cards::{parse_play, Card, Rank, Suit};
//!
//! let play = parse_play("5h+2h").unwrap();
//! assert!(play.via_pair);
//! assert_eq!(play.cards[0], Card::normal(Rank::Five, Suit::Hearts));
//! ```

use std::str::FromStr;

use smallvec::SmallVec;

use super::card::{Card, DeckColor, Rank, Suit};
use crate::core::ParseError;

/// Cards of one play, in play order.
pub type PlayCards = SmallVec<[Card; 4]>;

/// A parsed play list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedPlay {
    pub cards: PlayCards,
    pub via_pair: bool,
}

fn parse_rank(text: &str) -> Option<Rank> {
    match text {
        "J" => Some(Rank::Jack),
        "Q" => Some(Rank::Queen),
        "K" => Some(Rank::King),
        "A" => Some(Rank::Ace),
        digits => digits
            .parse::<u8>()
            .ok()
            .filter(|v| (2..=10).contains(v))
            .and_then(Rank::from_value),
    }
}

fn parse_suit(letter: char) -> Option<Suit> {
    Suit::ALL.into_iter().find(|s| s.letter() == letter)
}

fn parse_ranked(token: &str, body: &str) -> Result<(Rank, Suit), ParseError> {
    let err = |reason| ParseError {
        token: token.to_string(),
        reason,
    };

    let mut chars = body.chars();
    let suit_letter = chars.next_back().ok_or_else(|| err("empty card code"))?;
    let suit = parse_suit(suit_letter).ok_or_else(|| err("unknown suit"))?;
    let rank = parse_rank(chars.as_str()).ok_or_else(|| err("unknown rank"))?;
    Ok((rank, suit))
}

impl FromStr for Card {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let upper = token.to_ascii_uppercase();

        match upper.as_str() {
            "JK" => return Ok(Card::Joker),
            "PFJ" => return Ok(Card::Pfj),
            "FRE" => return Ok(Card::FreeEmergency),
            _ => {}
        }

        let (color, body) = if let Some(rest) = upper.strip_prefix('R') {
            (Some(DeckColor::Red), rest)
        } else if let Some(rest) = upper.strip_prefix('B') {
            (Some(DeckColor::Blue), rest)
        } else {
            (None, upper.as_str())
        };

        let (rank, suit) = parse_ranked(token, body)?;
        Ok(match color {
            Some(color) => Card::emergency(color, rank, suit),
            None => Card::normal(rank, suit),
        })
    }
}

/// Parse a comma/plus separated play list.
pub fn parse_play(input: &str) -> Result<ParsedPlay, ParseError> {
    let via_pair = input.contains('+');
    let cards = input
        .split([',', '+'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::parse::<Card>)
        .collect::<Result<PlayCards, _>>()?;

    if cards.is_empty() {
        return Err(ParseError {
            token: input.to_string(),
            reason: "no cards given",
        });
    }

    Ok(ParsedPlay { cards, via_pair })
}
