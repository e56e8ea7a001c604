//! Turn engine.
//!
//! `BurnRules` owns a `GameState` and the `DecisionMaker` that answers its
//! questions. A play is validated in full before anything moves; once it
//! passes, it is resolved to quiescence (burns, grants, gating, offenses)
//! before the turn advances.
//!
//! ## Play resolution order
//!
//! 1. Cards leave hand / face-up and land on the pile
//! 2. Means is activated (with status transfer) or cleared
//! 3. Extended ten wipe
//! 4. Free emergency grants, PFJ steals or PFJ offenses
//! 5. Burns, in policy order, each with its reward and emergency window
//! 6. Terminal Joker offense
//! 7. Win check

use tracing::{debug, info, warn};

use super::decision::{settle_burn_order, AutoDecisions, DecisionMaker, EmergencyOffer};
use super::event::{GameEvent, GrantFailure};
use super::means::means_trigger;
use super::offense::OffenseKind;
use crate::cards::{parse_play, Card, Deck, DeckColor, Rank};
use crate::core::{
    BurnOrderPolicy, Command, GameError, GamePhase, GameState, IllegalPlayError,
    IllegalPlayReason, PlayerId,
};
use crate::zones::{EmergencyAction, Player};

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Winner(PlayerId),
    /// A player quit before anyone went out.
    Abandoned { by: PlayerId },
}

/// Events caused by one command, plus whether the actor won.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayOutcome {
    pub events: Vec<GameEvent>,
    pub won: bool,
}

impl PlayOutcome {
    fn from_events(events: Vec<GameEvent>) -> Self {
        Self { events, won: false }
    }

    /// Human-readable messages, one per event, naming the players.
    #[must_use]
    pub fn messages(&self, state: &GameState) -> Vec<String> {
        self.events.iter().map(|e| state.describe(e)).collect()
    }

    /// Whether any event matches `pred`.
    pub fn contains(&self, pred: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}

pub struct BurnRules<D: DecisionMaker = AutoDecisions> {
    state: GameState,
    decisions: D,
}

impl<D: DecisionMaker> BurnRules<D> {
    pub fn new(state: GameState, decisions: D) -> Self {
        Self { state, decisions }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn decisions(&self) -> &D {
        &self.decisions
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    /// `None` while the game is running.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.state.phase {
            GamePhase::AwaitingPlay(_) => None,
            GamePhase::GameOver { winner } => Some(GameResult::Winner(winner)),
            GamePhase::Abandoned { by } => Some(GameResult::Abandoned { by }),
        }
    }

    // === Validation ===

    fn check_turn(&self, player: PlayerId) -> Result<(), IllegalPlayReason> {
        match self.state.phase {
            GamePhase::AwaitingPlay(current) if current == player => Ok(()),
            GamePhase::AwaitingPlay(_) => Err(IllegalPlayReason::NotYourTurn),
            _ => Err(IllegalPlayReason::GameOver),
        }
    }

    fn validate(&self, player: PlayerId, cards: &[Card], via_pair: bool) -> Result<(), IllegalPlayReason> {
        self.check_turn(player)?;
        if cards.is_empty() {
            return Err(IllegalPlayReason::EmptyPlay);
        }
        self.state
            .player(player)
            .plan_removal(cards)
            .map_err(|e| IllegalPlayReason::NotOwned(e.card))?;
        if cards.contains(&Card::Joker) && cards.len() > 1 {
            return Err(IllegalPlayReason::JokerNotAlone);
        }
        if via_pair {
            let mut suits = cards.iter().filter_map(Card::suit);
            if let Some(first) = suits.next() {
                if suits.any(|s| s != first) {
                    return Err(IllegalPlayReason::ComboNeedsMatchingSuits);
                }
            }
        }
        self.state
            .means
            .check(cards, via_pair)
            .map_err(|(card, limit)| IllegalPlayReason::MeansViolation { card, limit })
    }

    fn reject(player: PlayerId, reason: IllegalPlayReason) -> IllegalPlayError {
        warn!(target: "burnpile::engine", %player, %reason, "play rejected");
        IllegalPlayError::new(player, reason)
    }

    // === Play ===

    /// Play `cards` for `player`.
    ///
    /// Fails without touching the state if the play is illegal. Offenses
    /// queued by the play are left for `resolve_offenses`.
    pub fn play(&mut self, player: PlayerId, cards: &[Card], via_pair: bool) -> Result<PlayOutcome, IllegalPlayError> {
        self.validate(player, cards, via_pair)
            .map_err(|reason| Self::reject(player, reason))?;

        let played = self
            .state
            .player_mut(player)
            .take_cards(cards)
            .map_err(|e| Self::reject(player, IllegalPlayReason::NotOwned(e.card)))?;
        self.state.pile.add(played);

        debug!(target: "burnpile::engine", %player, ?cards, via_pair, "play");
        let mut events = vec![GameEvent::Played {
            player,
            cards: cards.iter().copied().collect(),
            via_pair,
        }];

        self.apply_means(player, cards, via_pair, &mut events);

        if self.state.rules.ten_wipes_pile && matches!(cards, [c] if c.is_normal() && c.has_rank(Rank::Ten)) {
            let count = self.state.pile.clear().len();
            info!(target: "burnpile::engine", %player, count, "pile wiped");
            events.push(GameEvent::PileWiped { player, count });
        }

        for _ in cards.iter().filter(|c| **c == Card::FreeEmergency) {
            events.push(self.free_grant(player));
        }

        if cards.contains(&Card::Pfj) {
            if self.state.rules.pfj_offense && cards.last() == Some(&Card::Pfj) {
                let strength = self.state.rules.pfj_block_strength;
                events.push(self.queue_offense(player, OffenseKind::PileSteal, strength));
            } else {
                events.push(self.steal_personal_pile(player));
            }
        }

        self.resolve_burns(player, &mut events);

        if cards.last() == Some(&Card::Joker) {
            let strength = self.state.rules.joker_block_strength;
            events.push(self.queue_offense(player, OffenseKind::JokerForcePickup, strength));
        }

        let won = self.state.player(player).is_out_of_cards();
        if won {
            self.state.phase = GamePhase::GameOver { winner: player };
            info!(target: "burnpile::engine", %player, "player went out");
            events.push(GameEvent::Won { player });
        }

        Ok(PlayOutcome { events, won })
    }

    fn apply_means(&mut self, player: PlayerId, cards: &[Card], via_pair: bool, events: &mut Vec<GameEvent>) {
        let Some(limit) = means_trigger(cards, via_pair) else {
            if self.state.means.is_active() {
                self.state.means.clear();
                events.push(GameEvent::MeansCleared);
            }
            return;
        };

        let defender = player.opponent();
        if self.state.player(defender).has_status_ability {
            let rank = self.state.status_rank;
            let (attacker, holder) = self.state.players.pair_mut(player);
            holder.set_status(None);
            attacker.set_status(rank);
            info!(target: "burnpile::burn", from = %defender, to = %player, "status transferred");
            events.push(GameEvent::StatusTransferred { from: defender, to: player });
        }
        self.state.means.activate(limit);
        debug!(target: "burnpile::engine", %player, %limit, "means active");
        events.push(GameEvent::MeansActivated { player, limit });
    }

    fn queue_offense(&mut self, attacker: PlayerId, kind: OffenseKind, strength: u32) -> GameEvent {
        let id = self.state.offenses.push(attacker, kind, strength);
        info!(target: "burnpile::offense", %attacker, %kind, strength, %id, "offense queued");
        GameEvent::OffenseQueued { attacker, kind, strength }
    }

    // === Burns ===

    fn resolve_burns(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        let report = self.state.pile.detect_burns();
        if report.is_empty() {
            return;
        }

        let detected: Vec<Rank> = report.ranks().collect();
        let order = match self.state.rules.burn_order {
            BurnOrderPolicy::AsDetected => detected,
            BurnOrderPolicy::PlayerChosen => {
                let chosen = self.decisions.order_burns(&self.state, player, &detected);
                settle_burn_order(&detected, &chosen)
            }
        };

        let mut nth = 0;
        for rank in order {
            for _ in 0..report.count(rank) {
                nth += 1;
                self.resolve_burn(player, rank, nth, events);
            }
        }
    }

    fn resolve_burn(&mut self, player: PlayerId, rank: Rank, nth: u32, events: &mut Vec<GameEvent>) {
        info!(target: "burnpile::burn", %player, %rank, nth, "burn");
        events.push(GameEvent::Burned { player, rank, nth });

        if !self.state.first_burn_occurred {
            self.state.first_burn_occurred = true;
            self.state.status_rank = Some(rank);
            self.state.player_mut(player).set_status(Some(rank));
            info!(target: "burnpile::burn", %player, %rank, "status granted");
            events.push(GameEvent::StatusGranted { player, rank });
        }

        self.state.pile.clear();
        if self.state.means.is_active() {
            self.state.means.clear();
            events.push(GameEvent::MeansCleared);
        }

        self.state.player_mut(player).slots.start_new_burn_cycle();
        events.push(self.burn_reward(player));
        self.emergency_window(player, events);
    }

    fn burn_reward(&mut self, player: PlayerId) -> GameEvent {
        let color = self.decisions.choose_burn_reward(&self.state, player);
        let known = color == DeckColor::Red;
        let (seat, deck) = self.state.seat_and_deck(player, color);

        match seat.grant_emergency(deck, known) {
            Some(grant) => {
                debug!(target: "burnpile::emergency", %player, slot = grant.slot, %color, "reward granted");
                GameEvent::EmergencyGranted {
                    player,
                    slot: grant.slot,
                    color: Some(color),
                    known,
                }
            }
            None => GameEvent::EmergencyNotGranted {
                player,
                reason: grant_failure(seat, deck),
            },
        }
    }

    fn free_grant(&mut self, player: PlayerId) -> GameEvent {
        let state = &mut self.state;
        let seat = &mut state.players[player];
        match seat.grant_free_emergency(&mut state.red_deck) {
            Some(grant) => {
                debug!(target: "burnpile::emergency", %player, slot = grant.slot, "free grant");
                GameEvent::EmergencyGranted {
                    player,
                    slot: grant.slot,
                    color: Some(DeckColor::Red),
                    known: true,
                }
            }
            None => GameEvent::EmergencyNotGranted {
                player,
                reason: grant_failure(seat, &state.red_deck),
            },
        }
    }

    /// Offer every card that still has an open action for this burn.
    fn emergency_window(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        let offers: Vec<EmergencyOffer> = {
            let slots = &self.state.player(player).slots;
            slots
                .iter()
                .filter_map(|slot| {
                    let card = slot.card?;
                    slots.allowance(card.id).any().then_some(EmergencyOffer {
                        slot: slot.index,
                        instance: card.id,
                        known: slot.known_to_owner.then_some(card.card),
                        color: slot.source_color,
                    })
                })
                .collect()
        };

        for offer in offers {
            let Some(action) = self.decisions.choose_emergency_action(&self.state, player, &offer) else {
                continue;
            };
            let event = match action {
                EmergencyAction::Peek => self.peek(player, &offer),
                EmergencyAction::Swap => self.swap(player, &offer),
            };
            events.push(event.unwrap_or_else(|| {
                warn!(target: "burnpile::emergency", %player, slot = offer.slot, %action, "action unavailable");
                GameEvent::EmergencyActionUnavailable {
                    player,
                    slot: offer.slot,
                    action,
                }
            }));
        }
    }

    fn peek(&mut self, player: PlayerId, offer: &EmergencyOffer) -> Option<GameEvent> {
        let slots = &mut self.state.player_mut(player).slots;
        let slot = slots.consume_action(offer.instance, EmergencyAction::Peek)?;
        let card = slots.get(slot)?.card?.card;
        debug!(target: "burnpile::emergency", %player, slot, "peek");
        Some(GameEvent::EmergencyPeeked { player, slot, card })
    }

    fn swap(&mut self, player: PlayerId, offer: &EmergencyOffer) -> Option<GameEvent> {
        let color = offer.color?;
        let (seat, deck) = self.state.seat_and_deck(player, color);
        let (_, grant) = seat.swap_emergency(offer.instance, deck)?;
        debug!(target: "burnpile::emergency", %player, slot = grant.slot, %color, "swap");
        Some(GameEvent::EmergencySwapped {
            player,
            slot: grant.slot,
            color: Some(color),
        })
    }

    // === Offenses ===

    /// Resolve every pending offense in queue order.
    pub fn resolve_offenses(&mut self) -> Vec<GameEvent> {
        let pending: Vec<_> = self.state.offenses.pending().cloned().collect();
        let mut events = Vec::new();

        for offense in pending {
            let defender = offense.defender();
            let available = self.state.player(defender).block_points();
            let wants_block = available >= offense.strength
                && self.decisions.choose_block(&self.state, defender, &offense, available);
            let blocked = if wants_block {
                self.state.player_mut(defender).take_block(offense.strength)
            } else {
                None
            };

            match blocked {
                Some(cards) => {
                    info!(target: "burnpile::offense", %defender, kind = %offense.kind, "blocked");
                    events.push(GameEvent::Blocked {
                        defender,
                        kind: offense.kind,
                        cards: cards.iter().map(|c| c.card).collect(),
                    });
                }
                None => {
                    info!(target: "burnpile::offense", %defender, kind = %offense.kind, "block failed");
                    events.push(GameEvent::BlockFailed { defender, kind: offense.kind });
                    let penalty = match offense.kind {
                        OffenseKind::JokerForcePickup => self.force_pickup(defender),
                        OffenseKind::PileSteal if self.state.player(defender).personal_pile.is_empty() => {
                            self.force_pickup(defender)
                        }
                        OffenseKind::PileSteal => self.steal_personal_pile(offense.attacker),
                    };
                    events.push(penalty);
                }
            }
            self.state.offenses.mark_resolved(offense.id);
        }

        self.state.offenses.prune_resolved();
        events
    }

    fn force_pickup(&mut self, player: PlayerId) -> GameEvent {
        let count = self.take_pile_into_hand(player);
        info!(target: "burnpile::offense", %player, count, "forced pickup");
        GameEvent::ForcedPickup { player, count }
    }

    fn take_pile_into_hand(&mut self, player: PlayerId) -> usize {
        let cards = self.state.pile.clear();
        let count = cards.len();
        self.state.player_mut(player).hand.extend(cards);
        self.state.means.clear();
        count
    }

    /// Move the opponent's personal pile behind the thief's own.
    fn steal_personal_pile(&mut self, thief: PlayerId) -> GameEvent {
        let victim = thief.opponent();
        let (robber, robbed) = self.state.players.pair_mut(thief);
        if robbed.personal_pile.is_empty() {
            debug!(target: "burnpile::offense", %thief, "nothing to steal");
            return GameEvent::NothingToSteal { player: thief };
        }
        let count = robbed.personal_pile.len();
        robber.personal_pile.extend(robbed.personal_pile.drain(..));
        info!(target: "burnpile::offense", %thief, %victim, count, "personal pile stolen");
        GameEvent::PileStolen {
            from: victim,
            to: thief,
            count,
        }
    }

    // === Turn flow ===

    /// Take the whole common pile into hand.
    pub fn pickup(&mut self, player: PlayerId) -> Vec<GameEvent> {
        if self.state.pile.is_empty() {
            debug!(target: "burnpile::engine", %player, "nothing to pick up");
            return vec![GameEvent::NothingToPickUp { player }];
        }
        let count = self.take_pile_into_hand(player);
        debug!(target: "burnpile::engine", %player, count, "pickup");
        vec![GameEvent::PickedUp { player, count }]
    }

    /// Refill the actor's hand and pass the turn.
    pub fn end_turn(&mut self) -> Vec<GameEvent> {
        let actor = self.state.current_player();
        let drawn = self.state.player_mut(actor).replenish();
        let to = self.state.pass_turn();
        debug!(target: "burnpile::engine", %actor, drawn, %to, turn = self.state.turn_number, "turn passed");
        vec![GameEvent::TurnPassed { to }]
    }

    /// Run one command to completion.
    pub fn apply(&mut self, player: PlayerId, command: Command) -> Result<PlayOutcome, IllegalPlayError> {
        let outcome = match &command {
            Command::Play { cards, via_pair } => {
                let mut outcome = self.play(player, cards, *via_pair)?;
                outcome.events.extend(self.resolve_offenses());
                if !outcome.won {
                    outcome.events.extend(self.end_turn());
                }
                outcome
            }
            Command::Pickup => {
                self.check_turn(player).map_err(|reason| Self::reject(player, reason))?;
                let mut events = self.pickup(player);
                if matches!(events.as_slice(), [GameEvent::PickedUp { .. }]) {
                    events.extend(self.end_turn());
                }
                PlayOutcome::from_events(events)
            }
            Command::Status => PlayOutcome::from_events(
                self.state
                    .status_report()
                    .into_iter()
                    .zip(PlayerId::all())
                    .map(|(line, player)| GameEvent::Status { player, line })
                    .collect(),
            ),
            Command::View(target) => PlayOutcome::from_events(vec![GameEvent::View {
                text: self.state.render(player).view(*target),
            }]),
            Command::Quit => {
                if self.state.is_over() {
                    return Err(Self::reject(player, IllegalPlayReason::GameOver));
                }
                self.state.phase = GamePhase::Abandoned { by: player };
                info!(target: "burnpile::engine", %player, "quit");
                PlayOutcome::from_events(vec![GameEvent::Quit { player }])
            }
        };

        if command.is_mutating() {
            self.state.record(player, command);
        }
        Ok(outcome)
    }

    /// Parse a card list (`"8S,9C"`, `"5H+2H"`) and play it for the
    /// current player.
    pub fn take_turn(&mut self, input: &str) -> Result<PlayOutcome, GameError> {
        let parsed = parse_play(input)?;
        let player = self.current_player();
        let command = Command::Play {
            cards: parsed.cards,
            via_pair: parsed.via_pair,
        };
        Ok(self.apply(player, command)?)
    }
}

fn grant_failure(seat: &Player, deck: &Deck) -> GrantFailure {
    if seat.slots.has_room() && deck.is_empty() {
        GrantFailure::DeckEmpty
    } else {
        GrantFailure::NoSlot
    }
}
