// ═══════════════════════════════════════════════════════════════════════
// Enemy decision & execution — weighted archetype table
//
// Archetypes are data: a weight plus a hit plan. Adding an enemy move
// is a new table row, not a new branch in the execution code.
// ═══════════════════════════════════════════════════════════════════════

use crate::effects::ActionCard;
use crate::events::BattleEvent;
use crate::pipeline::execute_card;
use crate::targeting::TargetRef;
use crate::types::{BattleState, Side, StatusKind, Unit};
use rand::Rng;

/// Where one hit of an archetype lands on the player roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// First living unit by ascending slot.
    FrontLiving,
    /// Second living unit; the hit is dropped unless two are alive.
    SecondLiving,
    /// Slot 1, falling back to the front when slot 1 is dead or absent.
    SecondSlotOrFront,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub target: HitTarget,
    /// Damage as a percentage of the actor's attack stat.
    pub percent: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub name: &'static str,
    pub weight: u32,
    pub hits: &'static [Hit],
}

pub const ARCHETYPES: [Archetype; 3] = [
    Archetype {
        name: "Strike",
        weight: 40,
        hits: &[Hit { target: HitTarget::FrontLiving, percent: 100 }],
    },
    Archetype {
        name: "Pierce",
        weight: 30,
        hits: &[
            Hit { target: HitTarget::FrontLiving, percent: 100 },
            Hit { target: HitTarget::SecondLiving, percent: 50 },
        ],
    },
    Archetype {
        name: "Snipe",
        weight: 30,
        hits: &[Hit { target: HitTarget::SecondSlotOrFront, percent: 100 }],
    },
];

fn pick_archetype(rng: &mut impl Rng) -> &'static Archetype {
    let total: u32 = ARCHETYPES.iter().map(|a| a.weight).sum();
    let mut roll = rng.gen_range(0..total);
    for archetype in ARCHETYPES.iter() {
        if roll < archetype.weight {
            return archetype;
        }
        roll -= archetype.weight;
    }
    &ARCHETYPES[0]
}

/// Resolve one hit of the plan against the current player roster.
pub fn resolve_hit_target(players: &[Unit], hit: HitTarget) -> Option<usize> {
    let mut living = players
        .iter()
        .enumerate()
        .filter(|(_, u)| u.is_alive())
        .map(|(slot, _)| slot);

    match hit {
        HitTarget::FrontLiving => living.next(),
        HitTarget::SecondLiving => {
            living.next()?;
            living.next()
        }
        HitTarget::SecondSlotOrFront => match players.get(1) {
            Some(second) if second.is_alive() => Some(1),
            _ => players.iter().position(|u| u.is_alive()),
        },
    }
}

/// One enemy action: pick a living enemy, roll an archetype, run its
/// hit plan through the action pipeline. A dazed enemy skips instead.
pub fn perform_enemy_action(state: &mut BattleState, events: &mut Vec<BattleEvent>) {
    let living: Vec<usize> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, u)| u.is_alive())
        .map(|(slot, _)| slot)
        .collect();
    if living.is_empty() {
        return;
    }

    let mut rng = state.derive_rng();
    let actor_slot = living[rng.gen_range(0..living.len())];

    if state.enemies[actor_slot].has_status(StatusKind::Stun) {
        state.log = format!("{} is dazed and skips its action", state.enemies[actor_slot].name);
        events.push(BattleEvent::LogMessage { text: state.log.clone() });
        return;
    }

    let archetype = pick_archetype(&mut rng);
    let actor_name = state.enemies[actor_slot].name.clone();
    state.log = format!("{} uses {}", actor_name, archetype.name);
    events.push(BattleEvent::EnemyAction {
        slot: actor_slot,
        name: actor_name,
        archetype: archetype.name.to_string(),
    });

    // Plan targets from the pre-action roster: a pierce that kills the
    // front unit still carries through to the planned second target.
    let plan: Vec<(usize, i32)> = archetype
        .hits
        .iter()
        .filter_map(|hit| resolve_hit_target(&state.players, hit.target).map(|slot| (slot, hit.percent)))
        .collect();

    for (target_slot, percent) in plan {
        let value = state.enemies[actor_slot].stats.attack * percent / 100;
        let card = ActionCard::enemy_attack(archetype.name, value);
        let pinned = [TargetRef { side: Side::Player, slot: target_slot }];
        let outcome = execute_card(
            &state.players,
            &state.enemies,
            Side::Enemy,
            actor_slot,
            &card,
            Some(&pinned),
        );
        state.players = outcome.players;
        state.enemies = outcome.enemies;
        events.extend(outcome.events);

        if state.all_dead(Side::Player) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StatBlock, ULT_MAX};

    fn unit(hp: i32) -> Unit {
        Unit {
            id: 0,
            side: Side::Player,
            name: "p".to_string(),
            character: None,
            stats: StatBlock { max_hp: 100, attack: 10 },
            hp,
            shield: 0,
            ult: 0,
            max_ult: ULT_MAX,
            dead: hp == 0,
            statuses: Vec::new(),
        }
    }

    #[test]
    fn archetype_weights_cover_the_roll_space() {
        let total: u32 = ARCHETYPES.iter().map(|a| a.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn second_living_requires_two_alive() {
        let both = vec![unit(50), unit(50)];
        assert_eq!(resolve_hit_target(&both, HitTarget::SecondLiving), Some(1));

        let front_only = vec![unit(50), unit(0)];
        assert_eq!(resolve_hit_target(&front_only, HitTarget::SecondLiving), None);
    }

    #[test]
    fn second_living_skips_a_dead_front_slot() {
        let roster = vec![unit(0), unit(50), unit(50)];
        // Living units are slots 1 and 2; the "second living" is slot 2.
        assert_eq!(resolve_hit_target(&roster, HitTarget::SecondLiving), Some(2));
    }

    #[test]
    fn snipe_falls_back_to_the_front() {
        let second_dead = vec![unit(50), unit(0)];
        assert_eq!(resolve_hit_target(&second_dead, HitTarget::SecondSlotOrFront), Some(0));

        let second_alive = vec![unit(50), unit(50)];
        assert_eq!(resolve_hit_target(&second_alive, HitTarget::SecondSlotOrFront), Some(1));

        let solo = vec![unit(50)];
        assert_eq!(resolve_hit_target(&solo, HitTarget::SecondSlotOrFront), Some(0));
    }
}
