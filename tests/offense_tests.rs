//! Joker and PFJ offense tests.

use burnpile::rules::OffenseKind;
use burnpile::{
    AutoDecisions, BurnRules, Card, Command, DecisionMaker, GameEvent, GameState,
    IllegalPlayReason, PlayerId, Rank, RulesConfig, ScriptedDecisions, Suit, Zone,
};

const ANN: PlayerId = PlayerId::FIRST;
const BOB: PlayerId = PlayerId::SECOND;

fn c(rank: Rank, suit: Suit) -> Card {
    Card::normal(rank, suit)
}

/// Pile holds two Sixes, Ann holds a Joker, Bob holds `bob_hand`.
fn joker_ready<D: DecisionMaker>(rules: RulesConfig, bob_hand: &[Card], decisions: D) -> BurnRules<D> {
    let mut state = GameState::new(rules, ["Ann", "Bob"]);
    for p in PlayerId::all() {
        state.deal(p, Zone::FaceDown, &[c(Rank::King, Suit::Clubs)]);
    }
    let pile: Vec<_> = [Suit::Spades, Suit::Hearts]
        .into_iter()
        .map(|s| state.alloc_instance(c(Rank::Six, s)))
        .collect();
    state.pile.add(pile);
    state.deal(ANN, Zone::Hand, &[Card::Joker]);
    state.deal(BOB, Zone::Hand, bob_hand);
    BurnRules::new(state, decisions)
}

// =============================================================================
// Joker offense
// =============================================================================

#[test]
fn test_unblocked_joker_forces_pickup() {
    let mut rules = joker_ready(RulesConfig::default(), &[c(Rank::King, Suit::Spades)], AutoDecisions);

    let outcome = rules.apply(ANN, Command::play(&[Card::Joker])).unwrap();

    assert!(outcome.contains(|e| *e == GameEvent::BlockFailed { defender: BOB, kind: OffenseKind::JokerForcePickup }));
    assert!(outcome.contains(|e| *e == GameEvent::ForcedPickup { player: BOB, count: 3 }));
    assert!(rules.state().pile.is_empty());
    assert_eq!(rules.state().player(BOB).hand.len(), 4);
    assert!(rules.state().offenses.is_empty());
}

#[test]
fn test_four_blocks_joker() {
    let four = c(Rank::Four, Suit::Spades);
    let king = c(Rank::King, Suit::Spades);
    let mut rules = joker_ready(RulesConfig::default(), &[king, four], AutoDecisions);

    let outcome = rules.apply(ANN, Command::play(&[Card::Joker])).unwrap();

    assert!(outcome.contains(|e| *e
        == GameEvent::Blocked {
            defender: BOB,
            kind: OffenseKind::JokerForcePickup,
            cards: vec![four],
        }));
    let bob = rules.state().player(BOB);
    assert_eq!(bob.hand.iter().map(|c| c.card).collect::<Vec<_>>(), vec![king]);
    assert_eq!(rules.state().pile.len(), 3);
}

#[test]
fn test_joker_and_pfj_are_block_material() {
    let mut rules = joker_ready(RulesConfig::default(), &[Card::Pfj], AutoDecisions);

    let outcome = rules.apply(ANN, Command::play(&[Card::Joker])).unwrap();

    assert!(outcome.contains(|e| matches!(e, GameEvent::Blocked { cards, .. } if cards == &vec![Card::Pfj])));
    assert!(rules.state().player(BOB).hand.is_empty());
}

#[test]
fn test_defender_may_decline_block() {
    let script = ScriptedDecisions::new().block(false);
    let mut rules = joker_ready(RulesConfig::default(), &[c(Rank::Four, Suit::Hearts)], script);

    let outcome = rules.apply(ANN, Command::play(&[Card::Joker])).unwrap();

    assert!(outcome.contains(|e| matches!(e, GameEvent::ForcedPickup { player, .. } if *player == BOB)));
    assert_eq!(rules.state().player(BOB).hand.len(), 4);
}

#[test]
fn test_insufficient_material_skips_decision() {
    let rules_config = RulesConfig::default().with_block_strengths(2, 1);
    let script = ScriptedDecisions::new().block(true);
    let mut rules = joker_ready(rules_config, &[c(Rank::Four, Suit::Hearts)], script);

    let outcome = rules.apply(ANN, Command::play(&[Card::Joker])).unwrap();

    assert!(outcome.contains(|e| matches!(e, GameEvent::OffenseQueued { strength: 2, .. })));
    assert!(outcome.contains(|e| matches!(e, GameEvent::ForcedPickup { .. })));
    // the scripted answer was never asked for
    assert_eq!(rules.decisions().remaining(), 1);
}

#[test]
fn test_offense_waits_for_resolution_step() {
    let mut rules = joker_ready(RulesConfig::default(), &[], AutoDecisions);

    rules.play(ANN, &[Card::Joker], false).unwrap();
    assert_eq!(rules.state().offenses.pending_count(), 1);
    assert_eq!(rules.state().pile.len(), 3);

    let events = rules.resolve_offenses();
    assert!(events.contains(&GameEvent::ForcedPickup { player: BOB, count: 3 }));
    assert!(rules.state().offenses.is_empty());
}

#[test]
fn test_forced_pickup_clears_means() {
    let mut rules = joker_ready(RulesConfig::default(), &[], AutoDecisions);
    rules.play(ANN, &[Card::Joker], false).unwrap();
    rules.state_mut().means.activate(Rank::Seven);

    rules.resolve_offenses();

    assert!(!rules.state().means.is_active());
}

// =============================================================================
// Rejected Joker plays
// =============================================================================

#[test]
fn test_joker_must_be_alone() {
    let mut state = GameState::new(RulesConfig::default(), ["Ann", "Bob"]);
    state.deal(ANN, Zone::Hand, &[Card::Joker, Card::Joker, c(Rank::Ace, Suit::Spades)]);
    let mut rules = BurnRules::new(state, AutoDecisions);
    let before = rules.state().encode_snapshot().unwrap();

    let two_jokers = rules.play(ANN, &[Card::Joker, Card::Joker], false).unwrap_err();
    let with_ace = rules
        .play(ANN, &[c(Rank::Ace, Suit::Spades), Card::Joker], false)
        .unwrap_err();

    assert_eq!(two_jokers.reason, IllegalPlayReason::JokerNotAlone);
    assert_eq!(with_ace.reason, IllegalPlayReason::JokerNotAlone);
    assert_eq!(rules.state().encode_snapshot().unwrap(), before);
}

// =============================================================================
// PFJ
// =============================================================================

#[test]
fn test_pfj_with_nothing_to_steal() {
    let mut state = GameState::new(RulesConfig::default(), ["Ann", "Bob"]);
    state.deal(ANN, Zone::Hand, &[Card::Pfj, c(Rank::Ace, Suit::Spades)]);
    let mut rules = BurnRules::new(state, AutoDecisions);

    let outcome = rules.play(ANN, &[Card::Pfj], false).unwrap();

    assert!(outcome.contains(|e| *e == GameEvent::NothingToSteal { player: ANN }));
    assert!(rules.state().offenses.is_empty());
}

#[test]
fn test_blocked_pfj_offense_keeps_pile() {
    let mut state = GameState::new(RulesConfig::extended(), ["Ann", "Bob"]);
    state.deal(ANN, Zone::Hand, &[Card::Pfj, c(Rank::Ace, Suit::Spades)]);
    state.deal(BOB, Zone::Hand, &[Card::Joker]);
    state.deal(BOB, Zone::PersonalPile, &[c(Rank::Two, Suit::Spades)]);
    let mut rules = BurnRules::new(state, AutoDecisions);

    let outcome = rules.apply(ANN, Command::play(&[Card::Pfj])).unwrap();

    assert!(outcome.contains(|e| matches!(e, GameEvent::Blocked { kind: OffenseKind::PileSteal, .. })));
    assert_eq!(rules.state().player(BOB).personal_pile.len(), 1);
    assert!(rules.state().player(ANN).personal_pile.is_empty());
}

#[test]
fn test_failed_pfj_offense_with_empty_pile_forces_pickup() {
    let mut state = GameState::new(RulesConfig::extended(), ["Ann", "Bob"]);
    state.deal(ANN, Zone::Hand, &[Card::Pfj, c(Rank::Ace, Suit::Spades)]);
    state.deal(BOB, Zone::FaceDown, &[c(Rank::King, Suit::Clubs)]);
    let mut rules = BurnRules::new(state, AutoDecisions);

    let outcome = rules.apply(ANN, Command::play(&[Card::Pfj])).unwrap();

    assert!(outcome.contains(|e| *e == GameEvent::ForcedPickup { player: BOB, count: 1 }));
    assert_eq!(rules.state().player(BOB).hand.iter().map(|c| c.card).collect::<Vec<_>>(), vec![Card::Pfj]);
}
