//! Game state.
//!
//! ## GameState
//!
//! Everything one game owns, by value:
//! - Rules, phase, turn counters
//! - Common pile, both seats, the red and blue supplementary decks
//! - Status bookkeeping: the one-shot first-burn gate and the status rank
//! - The means constraint and the offense queue
//! - Action history
//!
//! `GameState` is serializable. `encode_snapshot` gives a byte image that
//! tests compare to prove a rejected play changed nothing.
//!
//! ## BoardSnapshot
//!
//! `render(viewer)` produces what one player may see: their own hand, the
//! opponent's hand size, face-up cards, face-down counts (plus the middle
//! card for its owner) and slot contents as the viewer knows them.

use std::fmt;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionRecord, Command, ViewTarget};
use super::config::RulesConfig;
use super::entity::InstanceAllocator;
use super::error::GameError;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Card, CardInstance, Deck, DeckColor, Rank};
use crate::rules::event::GameEvent;
use crate::rules::means::MeansState;
use crate::rules::offense::OffenseQueue;
use crate::zones::{CommonPile, Player, Zone};

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    AwaitingPlay(PlayerId),
    GameOver { winner: PlayerId },
    Abandoned { by: PlayerId },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub rules: RulesConfig,

    // === Progression ===
    pub phase: GamePhase,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Commands recorded so far.
    pub action_sequence: u32,

    // === Cards ===
    pub pile: CommonPile,
    pub players: PlayerMap<Player>,
    pub red_deck: Deck,
    pub blue_deck: Deck,

    // === Status and constraints ===
    /// Set by the first burn of the game, never reset.
    pub first_burn_occurred: bool,

    /// Rank of the first burn. Fixed for the rest of the game.
    pub status_rank: Option<Rank>,

    pub means: MeansState,
    pub offenses: OffenseQueue,

    pub history: Vector<ActionRecord>,

    ids: InstanceAllocator,
}

impl GameState {
    /// Empty table with unshuffled supplementary decks. Player 0 starts.
    pub fn new<N: Into<String>>(rules: RulesConfig, names: [N; 2]) -> Self {
        let mut ids = InstanceAllocator::new();
        let red_deck = Deck::red(&mut ids);
        let blue_deck = Deck::blue(&mut ids);
        let [first, second] = names;

        Self {
            players: PlayerMap::from_pair(
                Player::new(PlayerId::FIRST, first, &rules),
                Player::new(PlayerId::SECOND, second, &rules),
            ),
            rules,
            phase: GamePhase::AwaitingPlay(PlayerId::FIRST),
            turn_number: 1,
            action_sequence: 0,
            pile: CommonPile::new(),
            red_deck,
            blue_deck,
            first_burn_occurred: false,
            status_rank: None,
            means: MeansState::default(),
            offenses: OffenseQueue::new(),
            history: Vector::new(),
            ids,
        }
    }

    // === Turn ===

    /// The player to act, or the last one to act once the game has ended.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        match self.phase {
            GamePhase::AwaitingPlay(p) => p,
            GamePhase::GameOver { winner } => winner,
            GamePhase::Abandoned { by } => by,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        !matches!(self.phase, GamePhase::AwaitingPlay(_))
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            GamePhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Hand the turn to the other player.
    pub fn pass_turn(&mut self) -> PlayerId {
        let next = self.current_player().opponent();
        self.phase = GamePhase::AwaitingPlay(next);
        self.turn_number += 1;
        next
    }

    /// Append a command to the history.
    pub fn record(&mut self, player: PlayerId, command: Command) {
        self.history.push_back(ActionRecord::new(
            player,
            command,
            self.turn_number,
            self.action_sequence,
        ));
        self.action_sequence += 1;
    }

    // === Seats and cards ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// Message text for `event`, naming the players.
    #[must_use]
    pub fn describe(&self, event: &GameEvent) -> String {
        event.describe(&|p| self.players[p].name.clone())
    }

    /// A seat together with one supplementary deck, borrowed at once.
    pub fn seat_and_deck(&mut self, id: PlayerId, color: DeckColor) -> (&mut Player, &mut Deck) {
        let deck = match color {
            DeckColor::Red => &mut self.red_deck,
            DeckColor::Blue => &mut self.blue_deck,
        };
        (&mut self.players[id], deck)
    }

    /// Give a new instance id to a card entering the game.
    pub fn alloc_instance(&mut self, card: Card) -> CardInstance {
        CardInstance::dealt(&mut self.ids, card)
    }

    /// Put new cards straight into a player's zone.
    ///
    /// Used to set up positions; a normal game deals through `GameBuilder`.
    pub fn deal(&mut self, player: PlayerId, zone: Zone, cards: &[Card]) {
        let instances: Vec<CardInstance> = cards.iter().map(|&c| self.alloc_instance(c)).collect();
        self.players[player].place(zone, instances);
    }

    pub(crate) fn ids_mut(&mut self) -> &mut InstanceAllocator {
        &mut self.ids
    }

    // === Reporting ===

    /// `S` before the first burn; afterwards the status rank for its holder
    /// and `0` for the other player.
    #[must_use]
    pub fn status_marker(&self, player: PlayerId) -> String {
        let seat = &self.players[player];
        match (self.first_burn_occurred, seat.status_token) {
            (false, _) => "S".to_string(),
            (true, Some(rank)) => rank.to_string(),
            (true, None) => "0".to_string(),
        }
    }

    /// One line per player describing status and hand limit.
    #[must_use]
    pub fn status_report(&self) -> Vec<String> {
        PlayerId::all()
            .map(|id| {
                let seat = &self.players[id];
                let holder = if seat.has_status_ability { "holds" } else { "does not hold" };
                format!(
                    "{} ({id}): {holder} the status ability [{}], hand limit {}",
                    seat.name,
                    self.status_marker(id),
                    seat.hand_limit()
                )
            })
            .collect()
    }

    /// What `viewer` can see.
    #[must_use]
    pub fn render(&self, viewer: PlayerId) -> BoardSnapshot {
        let seats = PlayerId::all()
            .map(|id| {
                let seat = &self.players[id];
                let own = id == viewer;
                SeatView {
                    player: id,
                    name: seat.name.clone(),
                    hand: if own {
                        HandView::Visible(seat.hand.iter().map(|c| c.card).collect())
                    } else {
                        HandView::Hidden(seat.hand.len())
                    },
                    face_up: seat.face_up.iter().map(|c| c.card).collect(),
                    face_down_count: seat.face_down.len(),
                    face_down_middle: if own {
                        seat.face_down_middle().map(|c| c.card)
                    } else {
                        None
                    },
                    slots: seat
                        .slots
                        .iter()
                        .map(|slot| match (slot.locked, slot.card) {
                            (true, _) => SlotView::Locked,
                            (false, None) => SlotView::Empty,
                            (false, Some(card)) if own && slot.known_to_owner => {
                                SlotView::Known(card.card)
                            }
                            (false, Some(_)) => SlotView::Hidden(slot.source_color),
                        })
                        .collect(),
                    status_marker: self.status_marker(id),
                    personal_pile: seat.personal_pile.len(),
                }
            })
            .collect();

        BoardSnapshot {
            viewer,
            current: self.current_player(),
            pile: self.pile.iter().map(|c| c.card).collect(),
            means_limit: self.means.limit(),
            winner: self.winner(),
            seats,
        }
    }

    /// Bincode image of the whole state.
    pub fn encode_snapshot(&self) -> Result<Vec<u8>, GameError> {
        bincode::serialize(self).map_err(GameError::Snapshot)
    }

    /// Restore a state from `encode_snapshot` output.
    pub fn decode_snapshot(bytes: &[u8]) -> Result<Self, GameError> {
        bincode::deserialize(bytes).map_err(GameError::Snapshot)
    }
}

/// The viewer's knowledge of a hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandView {
    Visible(Vec<Card>),
    Hidden(usize),
}

/// The viewer's knowledge of an emergency slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotView {
    Locked,
    Empty,
    Known(Card),
    /// Occupied, only the provenance colour is visible.
    Hidden(Option<DeckColor>),
}

impl fmt::Display for SlotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotView::Locked => f.write_str("[locked]"),
            SlotView::Empty => f.write_str("[empty]"),
            SlotView::Known(card) => write!(f, "[{card}]"),
            SlotView::Hidden(Some(color)) => write!(f, "[{color} ??]"),
            SlotView::Hidden(None) => f.write_str("[??]"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub player: PlayerId,
    pub name: String,
    pub hand: HandView,
    pub face_up: Vec<Card>,
    pub face_down_count: usize,
    /// Only filled in for the seat's owner.
    pub face_down_middle: Option<Card>,
    pub slots: Vec<SlotView>,
    pub status_marker: String,
    pub personal_pile: usize,
}

/// A player's view of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub viewer: PlayerId,
    pub current: PlayerId,
    /// Bottom to top.
    pub pile: Vec<Card>,
    pub means_limit: Option<Rank>,
    pub winner: Option<PlayerId>,
    pub seats: Vec<SeatView>,
}

fn join_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

impl BoardSnapshot {
    #[must_use]
    pub fn top(&self) -> Option<Card> {
        self.pile.last().copied()
    }

    #[must_use]
    pub fn seat(&self, player: PlayerId) -> Option<&SeatView> {
        self.seats.iter().find(|s| s.player == player)
    }

    /// The pile line.
    #[must_use]
    pub fn common_line(&self) -> String {
        let top = self.top().map_or_else(|| "-".to_string(), |c| c.to_string());
        format!("pile ({}): {} | top {top}", self.pile.len(), join_cards(&self.pile))
    }

    /// The viewer's hand line.
    #[must_use]
    pub fn hand_line(&self) -> String {
        match self.seat(self.viewer).map(|s| &s.hand) {
            Some(HandView::Visible(cards)) => format!("hand: {}", join_cards(cards)),
            Some(HandView::Hidden(n)) => format!("hand: {n} cards"),
            None => "hand: -".to_string(),
        }
    }

    /// Text for a view request.
    #[must_use]
    pub fn view(&self, target: ViewTarget) -> String {
        match target {
            ViewTarget::Hand => self.hand_line(),
            ViewTarget::Common => self.common_line(),
            ViewTarget::Board => self.to_string(),
        }
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.common_line())?;
        if let Some(limit) = self.means_limit {
            writeln!(f, "means: play lower than {limit}")?;
        }
        for seat in &self.seats {
            let marker = if seat.player == self.current { ">" } else { " " };
            writeln!(f, "{marker} {} ({}) status {}", seat.name, seat.player, seat.status_marker)?;
            match &seat.hand {
                HandView::Visible(cards) => writeln!(f, "    hand: {}", join_cards(cards))?,
                HandView::Hidden(n) => writeln!(f, "    hand: {n} cards")?,
            }
            writeln!(f, "    face-up: {}", join_cards(&seat.face_up))?;
            match seat.face_down_middle {
                Some(card) => writeln!(f, "    face-down: {} (middle {card})", seat.face_down_count)?,
                None => writeln!(f, "    face-down: {}", seat.face_down_count)?,
            }
            let slots: Vec<String> = seat.slots.iter().map(ToString::to_string).collect();
            writeln!(f, "    slots: {}", slots.join(" "))?;
            writeln!(f, "    personal pile: {}", seat.personal_pile)?;
        }
        if let Some(winner) = self.winner {
            writeln!(f, "{winner} has won")?;
        }
        Ok(())
    }
}
