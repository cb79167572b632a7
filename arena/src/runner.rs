// ═══════════════════════════════════════════════════════════════════════
// Battle runner — plays a complete headless battle with an agent
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use skirmish_agents::{Agent, PlayerMove};
use skirmish_engine::engine::{advance, cast_ultimate, play_card, restock, skip_turn};
use skirmish_engine::setup::create_battle;
use skirmish_engine::{BattleEvent, BattleState, CharacterId, EnemyId, Phase};

/// Result of a completed battle, including the full event stream for
/// the presentation layer to replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleReport {
    pub seed: u64,
    pub agent_name: String,
    pub party: Vec<CharacterId>,
    pub enemies: Vec<EnemyId>,
    pub victory: bool,
    /// Enemy turns survived.
    pub rounds: u32,
    pub decisions: u32,
    /// Total party HP at battle end.
    pub surviving_hp: i32,
    pub events: Vec<BattleEvent>,
    pub final_state: BattleState,
}

/// Run one battle to completion. The loop mirrors the engine's phase
/// machine: ask the agent in the two waiting phases, let `advance`
/// handle the enemy turn, stop on a terminal phase. `max_decisions`
/// guards against a stuck agent/engine combination.
pub fn run_battle(
    agent: &mut dyn Agent,
    party: &[CharacterId],
    enemy_lineup: &[EnemyId],
    deck_keys: &[&str],
    seed: u64,
    max_decisions: u32,
) -> Result<BattleReport, String> {
    let mut state = create_battle(party, enemy_lineup, deck_keys, seed);
    let mut events: Vec<BattleEvent> = Vec::new();
    let mut decisions = 0u32;
    let mut rounds = 0u32;

    loop {
        match state.phase {
            Phase::PlayerThinking => {
                decisions += 1;
                if decisions > max_decisions {
                    return Err(format!(
                        "battle exceeded {} decisions without finishing (round {})",
                        max_decisions, rounds
                    ));
                }

                let chosen = agent.choose_move(&state);
                let result = match chosen {
                    PlayerMove::Play { actor_id, card_uid } => {
                        play_card(&mut state, actor_id, card_uid)
                    }
                    PlayerMove::Ultimate { actor_id } => cast_ultimate(&mut state, actor_id),
                    PlayerMove::Skip => skip_turn(&mut state),
                };
                match result {
                    Ok(batch) => events.extend(batch),
                    // An illegal move wastes the turn instead of
                    // wedging the battle.
                    Err(_) => events.extend(skip_turn(&mut state).map_err(|e| e.to_string())?),
                }
            }

            Phase::EnemyTurn => {
                rounds += 1;
                events.extend(advance(&mut state));
            }

            Phase::PlayerRestock => {
                decisions += 1;
                if decisions > max_decisions {
                    return Err(format!(
                        "battle exceeded {} decisions without finishing (round {})",
                        max_decisions, rounds
                    ));
                }
                let keep = agent.choose_keep(&state);
                let batch = match restock(&mut state, keep) {
                    Ok(batch) => batch,
                    Err(_) => restock(&mut state, None).map_err(|e| e.to_string())?,
                };
                events.extend(batch);
            }

            Phase::GameWon | Phase::GameOver => break,

            // Never observable between entry-point calls.
            Phase::PlayerExecuting => {
                return Err("engine left in the executing phase".to_string())
            }
        }
    }

    let surviving_hp = state.players.iter().map(|u| u.hp).sum();
    Ok(BattleReport {
        seed,
        agent_name: agent.name().to_string(),
        party: party.to_vec(),
        enemies: enemy_lineup.to_vec(),
        victory: state.phase == Phase::GameWon,
        rounds,
        decisions,
        surviving_hp,
        events,
        final_state: state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_agents::RandomAgent;

    #[test]
    fn random_agent_finishes_a_battle() {
        let mut agent = RandomAgent::new(99);
        let report = run_battle(
            &mut agent,
            &[CharacterId::Kael, CharacterId::Liora],
            &[EnemyId::Husk, EnemyId::Ravager],
            &[],
            99,
            10_000,
        )
        .expect("battle should finish");
        assert!(report.decisions > 0);
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::BattleEnded { .. })));
        if report.victory {
            assert!(report.surviving_hp > 0);
        } else {
            assert_eq!(report.surviving_hp, 0);
        }
    }

    #[test]
    fn same_seed_replays_the_same_battle() {
        let run = |seed: u64| {
            let mut agent = RandomAgent::new(seed);
            run_battle(
                &mut agent,
                &[CharacterId::Draven],
                &[EnemyId::Husk],
                &[],
                seed,
                10_000,
            )
            .expect("battle should finish")
        };
        let a = run(1234);
        let b = run(1234);
        assert_eq!(a.victory, b.victory);
        assert_eq!(a.events, b.events);
        assert_eq!(a.final_state, b.final_state);
    }
}
