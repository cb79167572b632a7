// ═══════════════════════════════════════════════════════════════════════
// Battle setup — creates the initial BattleState from content ids
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::{character_template, enemy_template};
use crate::deck::{draw_to_hand_size, instantiate_deck};
use crate::types::*;
use rand::seq::SliceRandom;

/// Create a battle from a party, an enemy lineup and a deck list of
/// content keys (empty = default deck). Slot order is roster order;
/// slot 0 is the front. Seed controls shuffling and enemy decisions
/// for reproducibility.
pub fn create_battle(
    party: &[CharacterId],
    enemy_lineup: &[EnemyId],
    deck_keys: &[&str],
    seed: u64,
) -> BattleState {
    assert!(!party.is_empty(), "party must have at least one character");
    assert!(!enemy_lineup.is_empty(), "battle needs at least one enemy");

    let mut next_uid = 0u32;

    let players: Vec<Unit> = party
        .iter()
        .map(|&id| {
            let tpl = character_template(id);
            next_uid += 1;
            Unit {
                id: next_uid,
                side: Side::Player,
                name: tpl.name.to_string(),
                character: Some(id),
                stats: tpl.stats,
                hp: tpl.stats.max_hp,
                shield: 0,
                ult: 0,
                max_ult: ULT_MAX,
                dead: false,
                statuses: Vec::new(),
            }
        })
        .collect();

    let enemies: Vec<Unit> = enemy_lineup
        .iter()
        .map(|&id| {
            let tpl = enemy_template(id);
            next_uid += 1;
            Unit {
                id: next_uid,
                side: Side::Enemy,
                name: tpl.name.to_string(),
                character: None,
                stats: tpl.stats,
                hp: tpl.stats.max_hp,
                shield: 0,
                ult: 0,
                max_ult: ULT_MAX,
                dead: false,
                statuses: Vec::new(),
            }
        })
        .collect();

    let draw_pile = instantiate_deck(deck_keys, &mut next_uid);

    let mut state = BattleState {
        players,
        enemies,
        hand: Vec::new(),
        draw_pile,
        discard_pile: Vec::new(),
        phase: Phase::PlayerThinking,
        actions_taken: 0,
        log: "Battle started".to_string(),
        seed,
        rng_counter: 0,
        next_uid,
    };

    let mut rng = state.derive_rng();
    state.draw_pile.shuffle(&mut rng);
    draw_to_hand_size(&mut state, HAND_SIZE);

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_full_rosters_and_opening_hand() {
        let state = create_battle(
            &[CharacterId::Kael, CharacterId::Liora],
            &[EnemyId::Husk, EnemyId::Ravager],
            &[],
            42,
        );
        assert_eq!(state.players.len(), 2);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.hand.len(), HAND_SIZE);
        assert_eq!(state.phase, Phase::PlayerThinking);
        assert_eq!(state.players[0].name, "Kael");
        assert!(state.players.iter().all(|u| u.hp == u.stats.max_hp && !u.dead));
        assert_eq!(state.enemies[1].stats.attack, 14);
    }

    #[test]
    fn same_seed_means_same_shuffle() {
        let a = create_battle(&[CharacterId::Draven], &[EnemyId::Husk], &[], 123);
        let b = create_battle(&[CharacterId::Draven], &[EnemyId::Husk], &[], 123);
        assert_eq!(a.hand, b.hand);
        assert_eq!(a.draw_pile, b.draw_pile);
    }

    #[test]
    fn unit_ids_are_unique_across_sides() {
        let state = create_battle(
            &[CharacterId::Kael, CharacterId::Seris],
            &[EnemyId::Husk, EnemyId::Husk],
            &[],
            1,
        );
        let mut ids: Vec<u32> = state
            .players
            .iter()
            .chain(state.enemies.iter())
            .map(|u| u.id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
