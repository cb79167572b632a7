// ═══════════════════════════════════════════════════════════════════════
// Turn-phase state machine — the engine's mutating entry points
//
// Architecture:
//   The engine is a pure state machine. It never does I/O, never sleeps
//   and never calls back into a UI. Player requests arrive through the
//   phase-gated entry points below; `advance()` processes the automatic
//   part of the round (the enemy turn). Every call returns the events
//   it produced, in order, for the presentation layer to replay.
//
// Flow per round:
//   PlayerThinking --play/cast x2 or skip--> EnemyTurn
//   EnemyTurn --advance()--> PlayerRestock
//   PlayerRestock --restock()--> PlayerThinking
//   GameWon / GameOver can interrupt after any pipeline commit.
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::card_def;
use crate::deck::draw_to_hand_size;
use crate::effects::ActionCard;
use crate::enemy::perform_enemy_action;
use crate::events::BattleEvent;
use crate::pipeline::execute_card;
use crate::status::tick_statuses;
use crate::types::*;

/// Play a card from hand. Legal only in `PlayerThinking`; a rejected
/// request leaves the state untouched. The card is consumed even when
/// target resolution comes up empty.
pub fn play_card(
    state: &mut BattleState,
    actor_id: u32,
    card_uid: u32,
) -> Result<Vec<BattleEvent>, ActionError> {
    if state.phase != Phase::PlayerThinking {
        return Err(ActionError::WrongPhase);
    }
    let slot = state.player_slot(actor_id).ok_or(ActionError::UnknownUnit)?;
    if state.players[slot].dead {
        return Err(ActionError::DeadActor);
    }
    let hand_idx = state.hand_index(card_uid).ok_or(ActionError::UnknownCard)?;
    let def = card_def(state.hand[hand_idx].card);
    if let Some(owner) = def.exclusive_to {
        if state.players[slot].character != Some(owner) {
            return Err(ActionError::NotUsableBy);
        }
    }

    state.phase = Phase::PlayerExecuting;
    let mut events = Vec::new();

    let instance = state.hand.remove(hand_idx);
    state.discard_pile.push(instance);

    events.push(BattleEvent::CardPlayed {
        side: Side::Player,
        slot,
        card: def.id,
        name: def.name.to_string(),
    });
    state.log = format!("{} played {}", state.players[slot].name, def.name);
    events.push(BattleEvent::LogMessage { text: state.log.clone() });

    let card = ActionCard::from_def(&def);
    let outcome = execute_card(&state.players, &state.enemies, Side::Player, slot, &card, None);
    state.players = outcome.players;
    state.enemies = outcome.enemies;
    events.extend(outcome.events);

    state.actions_taken += 1;
    finish_player_action(state, &mut events);
    Ok(events)
}

/// Cast a unit's ultimate. Requires a full gauge; each effect of the
/// skill runs through the pipeline in listed order, every effect seeing
/// the roster the previous one left behind. Counts as one action.
pub fn cast_ultimate(
    state: &mut BattleState,
    actor_id: u32,
) -> Result<Vec<BattleEvent>, ActionError> {
    if state.phase != Phase::PlayerThinking {
        return Err(ActionError::WrongPhase);
    }
    let slot = state.player_slot(actor_id).ok_or(ActionError::UnknownUnit)?;
    if state.players[slot].dead {
        return Err(ActionError::DeadActor);
    }
    let character = state.players[slot]
        .character
        .ok_or(ActionError::UltimateNotReady)?;
    if !state.players[slot].ult_ready() {
        return Err(ActionError::UltimateNotReady);
    }

    state.phase = Phase::PlayerExecuting;
    let mut events = Vec::new();

    let spec = crate::cards::character_template(character).ultimate;
    events.push(BattleEvent::UltimateCast {
        side: Side::Player,
        slot,
        name: spec.name.to_string(),
    });
    state.log = format!("{} unleashed {}", state.players[slot].name, spec.name);
    events.push(BattleEvent::LogMessage { text: state.log.clone() });

    for fx in spec.effects {
        let card = ActionCard::from_ultimate_effect(spec.name, fx);
        let outcome =
            execute_card(&state.players, &state.enemies, Side::Player, slot, &card, None);
        state.players = outcome.players;
        state.enemies = outcome.enemies;
        events.extend(outcome.events);

        if state.all_dead(Side::Enemy) || state.all_dead(Side::Player) {
            break;
        }
    }

    state.players[slot].ult = 0;
    state.actions_taken += 1;
    finish_player_action(state, &mut events);
    Ok(events)
}

/// Skip the rest of the player turn, moving straight to the enemy turn.
pub fn skip_turn(state: &mut BattleState) -> Result<Vec<BattleEvent>, ActionError> {
    if state.phase != Phase::PlayerThinking {
        return Err(ActionError::WrongPhase);
    }
    let mut events = Vec::new();
    state.log = "Turn passed".to_string();
    events.push(BattleEvent::LogMessage { text: state.log.clone() });
    set_phase(state, Phase::EnemyTurn, &mut events);
    Ok(events)
}

/// Restock: keep at most one hand card, discard the rest, draw back up
/// to the hand size. Resets the action counter and runs the player-turn
/// status tick before play resumes.
pub fn restock(
    state: &mut BattleState,
    keep: Option<u32>,
) -> Result<Vec<BattleEvent>, ActionError> {
    if state.phase != Phase::PlayerRestock {
        return Err(ActionError::WrongPhase);
    }
    if let Some(uid) = keep {
        if state.hand_index(uid).is_none() {
            return Err(ActionError::UnknownCard);
        }
    }

    let mut events = Vec::new();

    let hand = std::mem::take(&mut state.hand);
    for card in hand {
        if Some(card.uid) == keep {
            state.hand.push(card);
        } else {
            state.discard_pile.push(card);
        }
    }
    draw_to_hand_size(state, HAND_SIZE);
    state.actions_taken = 0;

    state.log = "Hand restocked".to_string();
    events.push(BattleEvent::LogMessage { text: state.log.clone() });

    // Player-turn tick boundary.
    tick_statuses(&mut state.players, &mut state.enemies, &mut events);
    if check_end(state, &mut events) {
        return Ok(events);
    }

    set_phase(state, Phase::PlayerThinking, &mut events);
    Ok(events)
}

/// Process automatic transitions. Currently that is the enemy turn:
/// one status tick pass, then the fixed number of enemy actions, then
/// hand-off to restock. Pacing between enemy actions is the caller's
/// concern; the `EnemyAction` events mark the boundaries.
pub fn advance(state: &mut BattleState) -> Vec<BattleEvent> {
    let mut events = Vec::new();
    if state.phase != Phase::EnemyTurn {
        return events;
    }

    tick_statuses(&mut state.players, &mut state.enemies, &mut events);
    if check_end(state, &mut events) {
        return events;
    }

    for _ in 0..ENEMY_ACTIONS_PER_TURN {
        perform_enemy_action(state, &mut events);
        if check_end(state, &mut events) {
            return events;
        }
    }

    set_phase(state, Phase::PlayerRestock, &mut events);
    events
}

// ── Internals ──────────────────────────────────────────────────────────

fn finish_player_action(state: &mut BattleState, events: &mut Vec<BattleEvent>) {
    if check_end(state, events) {
        return;
    }
    if state.actions_taken >= ACTION_THRESHOLD {
        set_phase(state, Phase::EnemyTurn, events);
    } else {
        set_phase(state, Phase::PlayerThinking, events);
    }
}

/// Win and loss derive independently from "every unit dead" on the two
/// rosters; both are checked after every pipeline commit.
pub(crate) fn check_end(state: &mut BattleState, events: &mut Vec<BattleEvent>) -> bool {
    if state.phase.is_terminal() {
        return true;
    }
    if state.all_dead(Side::Enemy) {
        state.log = "Victory!".to_string();
        set_phase(state, Phase::GameWon, events);
        events.push(BattleEvent::BattleEnded { victory: true });
        return true;
    }
    if state.all_dead(Side::Player) {
        state.log = "The party has fallen".to_string();
        set_phase(state, Phase::GameOver, events);
        events.push(BattleEvent::BattleEnded { victory: false });
        return true;
    }
    false
}

fn set_phase(state: &mut BattleState, phase: Phase, events: &mut Vec<BattleEvent>) {
    state.phase = phase;
    events.push(BattleEvent::PhaseChanged { phase });
}
