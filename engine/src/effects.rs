// ═══════════════════════════════════════════════════════════════════════
// Card effect resolver — pure per-target effect computation
//
// Called once per resolved target. Reads the actor, the target and the
// actor's roster snapshot; never mutates anything. The pipeline applies
// the returned payload.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{
    ActiveStatus, CardDef, CardKind, SpecialEffect, StatBlock, StatusKind, TargetPolicy,
    UltimateEffect, Unit,
};

/// Unit of work for the action pipeline: a hand card, one ultimate
/// effect, or a synthesized enemy move, lowered to a common shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionCard {
    pub name: &'static str,
    pub kind: CardKind,
    pub value: i32,
    pub special: Option<SpecialEffect>,
    pub duration: Option<u8>,
    pub target: TargetPolicy,
    pub ult_gain: i32,
}

impl ActionCard {
    pub fn from_def(def: &CardDef) -> ActionCard {
        ActionCard {
            name: def.name,
            kind: def.kind,
            value: def.value,
            special: def.special,
            duration: def.duration,
            target: def.target,
            ult_gain: def.ult_gain,
        }
    }

    /// Ultimate effects run through the pipeline as cards; they grant no
    /// gauge so an ultimate can never refill itself.
    pub fn from_ultimate_effect(name: &'static str, fx: &UltimateEffect) -> ActionCard {
        ActionCard {
            name,
            kind: fx.kind,
            value: fx.value,
            special: fx.special,
            duration: fx.duration,
            target: fx.target,
            ult_gain: 0,
        }
    }

    /// Synthetic enemy move: a plain attack at the given value.
    pub fn enemy_attack(name: &'static str, value: i32) -> ActionCard {
        ActionCard {
            name,
            kind: CardKind::Attack,
            value,
            special: None,
            duration: None,
            target: TargetPolicy::SingleEnemy,
            ult_gain: 0,
        }
    }
}

/// Per-target effect payload. Everything here is a plan; the pipeline
/// owns application order and death bookkeeping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EffectOutput {
    pub damage: i32,
    pub heal: i32,
    pub shield_gain: i32,
    pub cleanse: bool,
    pub statuses: Vec<ActiveStatus>,
    /// Permanent additive stat change for the rest of the battle.
    pub stat_delta: Option<StatBlock>,
    /// Self-heal for the actor (drain effects).
    pub actor_heal: i32,
    /// Per-ally heals (actor-side slots) computed by party-wide effects.
    pub team_heal: Vec<(usize, i32)>,
    /// The actor's shield is zeroed as a cost of the effect.
    pub consumes_actor_shield: bool,
}

/// Compute the effect of `card` played by `actor` against one resolved
/// `target`. `allies` is the actor's roster snapshot, needed by
/// party-coupled specials.
pub fn resolve_effect(
    card: &ActionCard,
    actor: &Unit,
    target: &Unit,
    allies: &[Unit],
) -> EffectOutput {
    let mut out = EffectOutput::default();
    let bonus = actor.value_bonus();
    let duration = card.duration.unwrap_or(1);

    let Some(special) = card.special else {
        match card.kind {
            CardKind::Attack => out.damage = (card.value + bonus).max(0),
            CardKind::Heal => out.heal = (card.value + bonus).max(0),
            CardKind::Barrier => out.shield_gain = (card.value + bonus).max(0),
            // A Special card without a tag does nothing by definition.
            CardKind::Special => {}
        }
        return out;
    };

    match special {
        // Rewards tanking up before striking.
        SpecialEffect::ShieldBash => {
            out.damage = (actor.stats.attack + actor.shield).max(0);
        }

        SpecialEffect::ShieldBurst => {
            out.damage = actor.shield * 3;
            out.consumes_actor_shield = true;
        }

        // Cash in every remaining damage-over-time tick at once.
        SpecialEffect::Detonate => {
            out.damage = target
                .statuses
                .iter()
                .filter(|s| s.kind == StatusKind::Dot)
                .map(|s| s.value * s.turns_left as i32)
                .sum();
        }

        SpecialEffect::Drain => {
            out.damage = (card.value + bonus).max(0);
            out.actor_heal = out.damage / 2;
        }

        // Heal is coupled to the number of bad statuses removed from
        // this specific target, not an aggregate count.
        SpecialEffect::PurgeHeal => {
            out.cleanse = true;
            out.heal = (actor.stats.max_hp / 10) * target.bad_status_count() as i32;
        }

        // Party heal whose actual delivered total becomes the damage on
        // the resolved enemy target.
        SpecialEffect::Sanctuary => {
            let per_ally = actor.stats.max_hp / 5;
            for (slot, ally) in allies.iter().enumerate() {
                if !ally.is_alive() {
                    continue;
                }
                let amount = per_ally.min(ally.missing_hp());
                out.team_heal.push((slot, amount));
                out.damage += amount;
            }
        }

        SpecialEffect::Ignite => out.statuses.push(ActiveStatus {
            kind: StatusKind::Dot,
            value: card.value,
            turns_left: duration,
        }),

        SpecialEffect::Regrowth => out.statuses.push(ActiveStatus {
            kind: StatusKind::Regen,
            value: card.value,
            turns_left: duration,
        }),

        SpecialEffect::Daze => out.statuses.push(ActiveStatus {
            kind: StatusKind::Stun,
            value: 0,
            turns_left: duration,
        }),

        SpecialEffect::Empower => {
            out.stat_delta = Some(StatBlock {
                max_hp: 0,
                attack: card.value,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Side, ULT_MAX};

    fn unit(side: Side, hp: i32, max_hp: i32, attack: i32, shield: i32) -> Unit {
        Unit {
            id: 0,
            side,
            name: "test".to_string(),
            character: None,
            stats: StatBlock { max_hp, attack },
            hp,
            shield,
            ult: 0,
            max_ult: ULT_MAX,
            dead: hp == 0,
            statuses: Vec::new(),
        }
    }

    fn attack_card(value: i32, special: Option<SpecialEffect>) -> ActionCard {
        ActionCard {
            name: "test",
            kind: CardKind::Attack,
            value,
            special,
            duration: None,
            target: TargetPolicy::SingleEnemy,
            ult_gain: 0,
        }
    }

    #[test]
    fn shield_bash_scales_with_actor_shield() {
        let actor = unit(Side::Player, 100, 100, 20, 30);
        let target = unit(Side::Enemy, 80, 80, 0, 0);
        // Nominal card value must not matter.
        let out = resolve_effect(&attack_card(999, Some(SpecialEffect::ShieldBash)), &actor, &target, &[]);
        assert_eq!(out.damage, 50);
    }

    #[test]
    fn shield_burst_triples_and_spends_the_shield() {
        let actor = unit(Side::Player, 100, 100, 10, 25);
        let target = unit(Side::Enemy, 80, 80, 0, 0);
        let out = resolve_effect(&attack_card(0, Some(SpecialEffect::ShieldBurst)), &actor, &target, &[]);
        assert_eq!(out.damage, 75);
        assert!(out.consumes_actor_shield);
    }

    #[test]
    fn detonate_cashes_in_remaining_dot_ticks() {
        let actor = unit(Side::Player, 100, 100, 10, 0);
        let mut target = unit(Side::Enemy, 80, 80, 0, 0);
        target.statuses.push(ActiveStatus { kind: StatusKind::Dot, value: 10, turns_left: 4 });
        target.statuses.push(ActiveStatus { kind: StatusKind::Regen, value: 50, turns_left: 9 });
        let out = resolve_effect(&attack_card(0, Some(SpecialEffect::Detonate)), &actor, &target, &[]);
        assert_eq!(out.damage, 40);
    }

    #[test]
    fn drain_heals_the_actor_for_half() {
        let actor = unit(Side::Player, 100, 100, 10, 0);
        let target = unit(Side::Enemy, 80, 80, 0, 0);
        let out = resolve_effect(&attack_card(16, Some(SpecialEffect::Drain)), &actor, &target, &[]);
        assert_eq!(out.damage, 16);
        assert_eq!(out.actor_heal, 8);
    }

    #[test]
    fn purge_heal_scales_with_bad_statuses_on_the_target() {
        let actor = unit(Side::Player, 100, 100, 10, 0);
        let mut ally = unit(Side::Player, 50, 100, 10, 0);
        ally.statuses.push(ActiveStatus { kind: StatusKind::Dot, value: 5, turns_left: 2 });
        ally.statuses.push(ActiveStatus { kind: StatusKind::Stun, value: 0, turns_left: 1 });
        ally.statuses.push(ActiveStatus { kind: StatusKind::Regen, value: 5, turns_left: 2 });
        let card = ActionCard {
            name: "purge",
            kind: CardKind::Heal,
            value: 0,
            special: Some(SpecialEffect::PurgeHeal),
            duration: None,
            target: TargetPolicy::TeamAll,
            ult_gain: 0,
        };
        let out = resolve_effect(&card, &actor, &ally, &[]);
        assert!(out.cleanse);
        // 10% of caster max HP x two bad statuses; Regen is not bad.
        assert_eq!(out.heal, 20);
    }

    #[test]
    fn sanctuary_converts_actual_healing_into_damage() {
        let actor = unit(Side::Player, 100, 100, 10, 0); // 20% of 100 = 20 per ally
        let allies = vec![
            unit(Side::Player, 100, 100, 10, 0), // full HP: heals 0
            unit(Side::Player, 95, 100, 10, 0),  // missing 5: heals 5
            unit(Side::Player, 40, 100, 10, 0),  // missing 60: heals 20
        ];
        let target = unit(Side::Enemy, 80, 80, 0, 0);
        let card = ActionCard {
            name: "sanctuary",
            kind: CardKind::Special,
            value: 0,
            special: Some(SpecialEffect::Sanctuary),
            duration: None,
            target: TargetPolicy::SingleEnemy,
            ult_gain: 0,
        };
        let out = resolve_effect(&card, &actor, &target, &allies);
        assert_eq!(out.team_heal, vec![(0, 0), (1, 5), (2, 20)]);
        assert_eq!(out.damage, 25);
    }

    #[test]
    fn buffs_and_debuffs_shift_default_values() {
        let mut actor = unit(Side::Player, 100, 100, 10, 0);
        actor.statuses.push(ActiveStatus { kind: StatusKind::StatUp, value: 6, turns_left: 2 });
        actor.statuses.push(ActiveStatus { kind: StatusKind::StatDown, value: 2, turns_left: 2 });
        let target = unit(Side::Enemy, 80, 80, 0, 0);
        let out = resolve_effect(&attack_card(18, None), &actor, &target, &[]);
        assert_eq!(out.damage, 22);
    }
}
