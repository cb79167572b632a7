// ═══════════════════════════════════════════════════════════════════════
// Action pipeline — one card play or one ultimate effect
//
// Architecture:
//   The pipeline mutates working copies of both rosters and hands them
//   back to the caller, which commits them to the battle state. Nothing
//   outside the returned value changes, so a half-applied action is
//   never observable.
// ═══════════════════════════════════════════════════════════════════════

use crate::damage::absorb;
use crate::effects::{resolve_effect, ActionCard};
use crate::events::BattleEvent;
use crate::targeting::{resolve_targets, TargetRef};
use crate::types::{Side, Unit};

/// Updated rosters plus everything that happened, in order.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub players: Vec<Unit>,
    pub enemies: Vec<Unit>,
    pub events: Vec<BattleEvent>,
}

/// Run one card (or ultimate effect, or enemy move) through resolution.
///
/// Targets come from the card's policy unless `target_override` pins
/// them (enemy pierce/snipe plans); dead units are filtered out of
/// overrides too. Zero targets is a successful no-op: the action is
/// still consumed and gauge is still granted.
pub fn execute_card(
    players: &[Unit],
    enemies: &[Unit],
    actor_side: Side,
    actor_slot: usize,
    card: &ActionCard,
    target_override: Option<&[TargetRef]>,
) -> ActionOutcome {
    let mut players = players.to_vec();
    let mut enemies = enemies.to_vec();
    let mut events = Vec::new();

    let targets: Vec<TargetRef> = match target_override {
        Some(list) => list
            .iter()
            .copied()
            .filter(|t| unit_ref(&players, &enemies, *t).is_alive())
            .collect(),
        None => resolve_targets(card.target, &players, &enemies, actor_side, actor_slot),
    };

    for target in targets {
        apply_to_target(
            &mut players,
            &mut enemies,
            actor_side,
            actor_slot,
            card,
            target,
            &mut events,
        );
    }

    // Gauge gain is per use, not per hit.
    let actor = unit_mut(
        &mut players,
        &mut enemies,
        TargetRef { side: actor_side, slot: actor_slot },
    );
    if actor.is_alive() {
        actor.ult = (actor.ult + card.ult_gain).clamp(0, actor.max_ult);
    }

    ActionOutcome { players, enemies, events }
}

fn apply_to_target(
    players: &mut Vec<Unit>,
    enemies: &mut Vec<Unit>,
    actor_side: Side,
    actor_slot: usize,
    card: &ActionCard,
    target: TargetRef,
    events: &mut Vec<BattleEvent>,
) {
    let actor_ref = TargetRef { side: actor_side, slot: actor_slot };

    // Snapshot inputs so the resolver stays pure and borrow-free.
    let actor_snapshot = unit_ref(players, enemies, actor_ref).clone();
    let target_snapshot = unit_ref(players, enemies, target).clone();
    let allies: Vec<Unit> = match actor_side {
        Side::Player => players.clone(),
        Side::Enemy => enemies.clone(),
    };

    let out = resolve_effect(card, &actor_snapshot, &target_snapshot, &allies);

    // Effect cost comes off the actor before anything lands.
    if out.consumes_actor_shield {
        let actor = unit_mut(players, enemies, actor_ref);
        if actor.shield > 0 {
            let spent = actor.shield;
            actor.shield = 0;
            events.push(BattleEvent::ShieldSpent {
                side: actor_ref.side,
                slot: actor_ref.slot,
                amount: spent,
            });
        }
    }

    if out.damage > 0 {
        let unit = unit_mut(players, enemies, target);
        let result = absorb(unit.hp, unit.shield, out.damage);
        unit.hp = result.hp;
        unit.shield = result.shield;
        if result.blocked > 0 {
            events.push(BattleEvent::ShieldBlocked {
                side: target.side,
                slot: target.slot,
                amount: result.blocked,
            });
        }
        if result.taken > 0 {
            events.push(BattleEvent::DamageTaken {
                side: target.side,
                slot: target.slot,
                amount: result.taken,
                hp_after: result.hp,
            });
        }
    }

    if out.heal > 0 {
        heal_unit(players, enemies, target, out.heal, events);
    }

    for (slot, amount) in &out.team_heal {
        if *amount > 0 {
            let ally = TargetRef { side: actor_side, slot: *slot };
            heal_unit(players, enemies, ally, *amount, events);
        }
    }

    if out.actor_heal > 0 {
        heal_unit(players, enemies, actor_ref, out.actor_heal, events);
    }

    if out.shield_gain > 0 {
        let unit = unit_mut(players, enemies, target);
        if unit.is_alive() {
            unit.shield += out.shield_gain;
            events.push(BattleEvent::ShieldGained {
                side: target.side,
                slot: target.slot,
                amount: out.shield_gain,
            });
        }
    }

    if out.cleanse {
        let unit = unit_mut(players, enemies, target);
        let before = unit.statuses.len();
        unit.statuses.retain(|s| !s.kind.is_bad());
        let removed = (before - unit.statuses.len()) as u8;
        if removed > 0 {
            events.push(BattleEvent::StatusCleansed {
                side: target.side,
                slot: target.slot,
                count: removed,
            });
        }
    }

    for status in &out.statuses {
        let unit = unit_mut(players, enemies, target);
        if unit.is_alive() {
            unit.statuses.push(*status);
            events.push(BattleEvent::StatusApplied {
                side: target.side,
                slot: target.slot,
                status: status.kind,
                value: status.value,
                turns: status.turns_left,
            });
        }
    }

    if let Some(delta) = out.stat_delta {
        let unit = unit_mut(players, enemies, target);
        if unit.is_alive() {
            unit.stats.attack += delta.attack;
            unit.stats.max_hp += delta.max_hp;
            events.push(BattleEvent::StatGained {
                side: target.side,
                slot: target.slot,
                attack: delta.attack,
                max_hp: delta.max_hp,
            });
        }
    }

    check_death(players, enemies, target, events);
}

fn heal_unit(
    players: &mut Vec<Unit>,
    enemies: &mut Vec<Unit>,
    target: TargetRef,
    amount: i32,
    events: &mut Vec<BattleEvent>,
) {
    let unit = unit_mut(players, enemies, target);
    if !unit.is_alive() {
        return;
    }
    let healed = amount.min(unit.missing_hp());
    if healed > 0 {
        unit.hp += healed;
        events.push(BattleEvent::Healed {
            side: target.side,
            slot: target.slot,
            amount: healed,
        });
    }
}

fn check_death(
    players: &mut Vec<Unit>,
    enemies: &mut Vec<Unit>,
    target: TargetRef,
    events: &mut Vec<BattleEvent>,
) {
    let unit = unit_mut(players, enemies, target);
    if unit.hp <= 0 && !unit.dead {
        mark_dead(unit);
        events.push(BattleEvent::UnitDied {
            side: target.side,
            slot: target.slot,
        });
    }
}

/// Death bookkeeping: dead units carry no shield and no statuses.
pub(crate) fn mark_dead(unit: &mut Unit) {
    unit.hp = 0;
    unit.dead = true;
    unit.shield = 0;
    unit.statuses.clear();
}

fn unit_ref<'a>(players: &'a [Unit], enemies: &'a [Unit], at: TargetRef) -> &'a Unit {
    match at.side {
        Side::Player => &players[at.slot],
        Side::Enemy => &enemies[at.slot],
    }
}

fn unit_mut<'a>(
    players: &'a mut Vec<Unit>,
    enemies: &'a mut Vec<Unit>,
    at: TargetRef,
) -> &'a mut Unit {
    match at.side {
        Side::Player => &mut players[at.slot],
        Side::Enemy => &mut enemies[at.slot],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CardKind, SpecialEffect, StatBlock, TargetPolicy, ULT_MAX};

    fn unit(side: Side, id: u32, hp: i32, shield: i32) -> Unit {
        Unit {
            id,
            side,
            name: format!("u{id}"),
            character: None,
            stats: StatBlock { max_hp: 100, attack: 10 },
            hp,
            shield,
            ult: 0,
            max_ult: ULT_MAX,
            dead: hp == 0,
            statuses: Vec::new(),
        }
    }

    fn attack(value: i32, target: TargetPolicy) -> ActionCard {
        ActionCard {
            name: "test",
            kind: CardKind::Attack,
            value,
            special: None,
            duration: None,
            target,
            ult_gain: 15,
        }
    }

    #[test]
    fn caller_state_is_untouched_until_commit() {
        let players = vec![unit(Side::Player, 1, 100, 0)];
        let enemies = vec![unit(Side::Enemy, 10, 80, 0)];
        let out = execute_card(
            &players,
            &enemies,
            Side::Player,
            0,
            &attack(30, TargetPolicy::SingleEnemy),
            None,
        );
        assert_eq!(enemies[0].hp, 80);
        assert_eq!(out.enemies[0].hp, 50);
    }

    #[test]
    fn gauge_gain_is_per_use_not_per_hit() {
        let players = vec![unit(Side::Player, 1, 100, 0)];
        let enemies = vec![
            unit(Side::Enemy, 10, 80, 0),
            unit(Side::Enemy, 11, 80, 0),
            unit(Side::Enemy, 12, 80, 0),
        ];
        let out = execute_card(
            &players,
            &enemies,
            Side::Player,
            0,
            &attack(10, TargetPolicy::AllEnemies),
            None,
        );
        assert_eq!(out.players[0].ult, 15);
        assert!(out.enemies.iter().all(|e| e.hp == 70));
    }

    #[test]
    fn zero_targets_is_a_consumed_no_op() {
        let players = vec![unit(Side::Player, 1, 100, 0)];
        let enemies = vec![unit(Side::Enemy, 10, 0, 0)];
        let out = execute_card(
            &players,
            &enemies,
            Side::Player,
            0,
            &attack(30, TargetPolicy::SingleEnemy),
            None,
        );
        // No damage events, but the gauge still fills.
        assert!(out.events.is_empty());
        assert_eq!(out.players[0].ult, 15);
    }

    #[test]
    fn death_clears_shield_and_statuses() {
        let players = vec![unit(Side::Player, 1, 100, 0)];
        let mut target = unit(Side::Enemy, 10, 20, 5);
        target.statuses.push(crate::types::ActiveStatus {
            kind: crate::types::StatusKind::Dot,
            value: 3,
            turns_left: 2,
        });
        let enemies = vec![target];
        let out = execute_card(
            &players,
            &enemies,
            Side::Player,
            0,
            &attack(50, TargetPolicy::SingleEnemy),
            None,
        );
        let dead = &out.enemies[0];
        assert!(dead.dead);
        assert_eq!(dead.hp, 0);
        assert_eq!(dead.shield, 0);
        assert!(dead.statuses.is_empty());
        assert!(out
            .events
            .contains(&BattleEvent::UnitDied { side: Side::Enemy, slot: 0 }));
    }

    #[test]
    fn shield_burst_spends_the_actor_shield() {
        let mut actor = unit(Side::Player, 1, 100, 0);
        actor.shield = 20;
        let players = vec![actor];
        let enemies = vec![unit(Side::Enemy, 10, 100, 0)];
        let card = ActionCard {
            name: "burst",
            kind: CardKind::Attack,
            value: 0,
            special: Some(SpecialEffect::ShieldBurst),
            duration: None,
            target: TargetPolicy::SingleEnemy,
            ult_gain: 0,
        };
        let out = execute_card(&players, &enemies, Side::Player, 0, &card, None);
        assert_eq!(out.players[0].shield, 0);
        assert_eq!(out.enemies[0].hp, 40);
        assert!(out
            .events
            .contains(&BattleEvent::ShieldSpent { side: Side::Player, slot: 0, amount: 20 }));
    }

    #[test]
    fn override_targets_skip_dead_slots() {
        let players = vec![
            unit(Side::Player, 1, 0, 0),
            unit(Side::Player, 2, 60, 0),
        ];
        let enemies = vec![unit(Side::Enemy, 10, 80, 0)];
        let pinned = [TargetRef { side: Side::Player, slot: 0 }];
        let out = execute_card(
            &players,
            &enemies,
            Side::Enemy,
            0,
            &ActionCard::enemy_attack("Strike", 12),
            Some(&pinned),
        );
        assert!(out.events.is_empty());
        assert_eq!(out.players[1].hp, 60);
    }
}
