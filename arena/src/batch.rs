// ═══════════════════════════════════════════════════════════════════════
// Batch simulation — many independent battles in parallel
// ═══════════════════════════════════════════════════════════════════════

use crate::runner::{run_battle, BattleReport};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use skirmish_agents::RandomAgent;
use skirmish_engine::{CharacterId, EnemyId};

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub games: u32,
    pub base_seed: u64,
    pub party: Vec<CharacterId>,
    pub enemies: Vec<EnemyId>,
    pub deck_keys: Vec<String>,
    pub max_decisions: u32,
}

/// Run `games` battles with per-battle seeds derived from the base
/// seed. Battles are independent, so they fan out across threads;
/// result order matches seed order regardless of scheduling.
pub fn run_batch(config: &BatchConfig) -> Vec<Result<BattleReport, String>> {
    let mut seed_rng = ChaCha8Rng::seed_from_u64(config.base_seed);
    let seeds: Vec<u64> = (0..config.games).map(|_| seed_rng.gen()).collect();

    seeds
        .par_iter()
        .map(|&seed| {
            let deck: Vec<&str> = config.deck_keys.iter().map(String::as_str).collect();
            let mut agent = RandomAgent::new(seed ^ 0xA5A5_5A5A);
            run_battle(
                &mut agent,
                &config.party,
                &config.enemies,
                &deck,
                seed,
                config.max_decisions,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(games: u32) -> BatchConfig {
        BatchConfig {
            games,
            base_seed: 42,
            party: vec![CharacterId::Kael, CharacterId::Seris],
            enemies: vec![EnemyId::Husk, EnemyId::Husk],
            deck_keys: Vec::new(),
            max_decisions: 10_000,
        }
    }

    #[test]
    fn batch_runs_every_game() {
        let results = run_batch(&config(8));
        assert_eq!(results.len(), 8);
        assert!(results.iter().all(Result::is_ok));
    }

    #[test]
    fn batches_are_reproducible() {
        let outcomes = |results: Vec<Result<BattleReport, String>>| {
            results
                .into_iter()
                .map(|r| r.map(|rep| (rep.seed, rep.victory, rep.rounds)))
                .collect::<Vec<_>>()
        };
        let a = outcomes(run_batch(&config(4)));
        let b = outcomes(run_batch(&config(4)));
        assert_eq!(a, b);
    }
}
