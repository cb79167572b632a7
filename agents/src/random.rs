// ═══════════════════════════════════════════════════════════════════════
// Random Agent — plays random legal cards.
// Serves as baseline and for testing engine stability.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::{Agent, PlayerMove};
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish_engine::cards::card_def;
use skirmish_engine::BattleState;

pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        RandomAgent {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, state: &BattleState) -> PlayerMove {
        // A ready ultimate is usually worth firing.
        let ready: Vec<u32> = state
            .players
            .iter()
            .filter(|u| u.is_alive() && u.ult_ready())
            .map(|u| u.id)
            .collect();
        if !ready.is_empty() && self.rng.gen_bool(0.75) {
            return PlayerMove::Ultimate {
                actor_id: *ready.choose(&mut self.rng).unwrap(),
            };
        }

        // Any (living actor, hand card) pair that passes exclusivity.
        let mut pairs: Vec<(u32, u32)> = Vec::new();
        for unit in state.players.iter().filter(|u| u.is_alive()) {
            for card in &state.hand {
                let def = card_def(card.card);
                let usable = def
                    .exclusive_to
                    .map_or(true, |owner| unit.character == Some(owner));
                if usable {
                    pairs.push((unit.id, card.uid));
                }
            }
        }

        match pairs.choose(&mut self.rng) {
            Some(&(actor_id, card_uid)) => PlayerMove::Play { actor_id, card_uid },
            None => PlayerMove::Skip,
        }
    }

    fn choose_keep(&mut self, state: &BattleState) -> Option<u32> {
        if state.hand.is_empty() || self.rng.gen_bool(0.5) {
            None
        } else {
            state.hand.choose(&mut self.rng).map(|c| c.uid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_engine::setup::create_battle;
    use skirmish_engine::{CharacterId, EnemyId};

    #[test]
    fn always_finds_a_move_with_cards_in_hand() {
        let state = create_battle(&[CharacterId::Kael], &[EnemyId::Husk], &[], 4);
        let mut agent = RandomAgent::new(4);
        for _ in 0..20 {
            match agent.choose_move(&state) {
                PlayerMove::Play { actor_id, card_uid } => {
                    assert_eq!(actor_id, state.players[0].id);
                    assert!(state.hand.iter().any(|c| c.uid == card_uid));
                }
                PlayerMove::Ultimate { .. } => panic!("gauge is empty"),
                PlayerMove::Skip => panic!("hand is not empty"),
            }
        }
    }

    #[test]
    fn skips_with_an_empty_hand() {
        let mut state = create_battle(&[CharacterId::Kael], &[EnemyId::Husk], &[], 4);
        state.hand.clear();
        let mut agent = RandomAgent::new(4);
        assert_eq!(agent.choose_move(&state), PlayerMove::Skip);
        assert_eq!(agent.choose_keep(&state), None);
    }
}
