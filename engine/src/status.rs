// ═══════════════════════════════════════════════════════════════════════
// Status tick processor — one pass per side-turn boundary
// ═══════════════════════════════════════════════════════════════════════

use crate::events::BattleEvent;
use crate::pipeline::mark_dead;
use crate::types::{Side, StatusKind, Unit};

/// Advance every active status on both rosters by one turn boundary:
/// damage/heal-over-time lands, durations decrement, expired statuses
/// drop. Runs over all units at once, not per actor.
pub fn tick_statuses(
    players: &mut Vec<Unit>,
    enemies: &mut Vec<Unit>,
    events: &mut Vec<BattleEvent>,
) {
    tick_roster(players, Side::Player, events);
    tick_roster(enemies, Side::Enemy, events);
}

fn tick_roster(roster: &mut [Unit], side: Side, events: &mut Vec<BattleEvent>) {
    for (slot, unit) in roster.iter_mut().enumerate() {
        if !unit.is_alive() || unit.statuses.is_empty() {
            continue;
        }

        // Collect tick amounts first; durations decrement in the same
        // pass so a fresh status ticks exactly `turns_left` times.
        let mut ticks: Vec<(StatusKind, i32)> = Vec::new();
        for status in unit.statuses.iter_mut() {
            match status.kind {
                StatusKind::Dot | StatusKind::Regen => {
                    ticks.push((status.kind, status.value));
                }
                _ => {}
            }
            status.turns_left = status.turns_left.saturating_sub(1);
        }

        for (kind, value) in ticks {
            match kind {
                StatusKind::Dot => {
                    let dealt = value.min(unit.hp);
                    if dealt > 0 {
                        unit.hp -= dealt;
                        events.push(BattleEvent::StatusTicked {
                            side,
                            slot,
                            status: kind,
                            amount: dealt,
                            hp_after: unit.hp,
                        });
                    }
                    if unit.hp == 0 {
                        break;
                    }
                }
                StatusKind::Regen => {
                    let healed = value.min(unit.missing_hp());
                    if healed > 0 {
                        unit.hp += healed;
                        events.push(BattleEvent::StatusTicked {
                            side,
                            slot,
                            status: kind,
                            amount: healed,
                            hp_after: unit.hp,
                        });
                    }
                }
                _ => unreachable!(),
            }
        }

        if unit.hp == 0 {
            mark_dead(unit);
            events.push(BattleEvent::UnitDied { side, slot });
            continue;
        }

        let mut kept = Vec::with_capacity(unit.statuses.len());
        for status in unit.statuses.drain(..) {
            if status.turns_left == 0 {
                events.push(BattleEvent::StatusExpired {
                    side,
                    slot,
                    status: status.kind,
                });
            } else {
                kept.push(status);
            }
        }
        unit.statuses = kept;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActiveStatus, StatBlock, ULT_MAX};

    fn unit(hp: i32, max_hp: i32) -> Unit {
        Unit {
            id: 0,
            side: Side::Player,
            name: "test".to_string(),
            character: None,
            stats: StatBlock { max_hp, attack: 10 },
            hp,
            shield: 0,
            ult: 0,
            max_ult: ULT_MAX,
            dead: hp == 0,
            statuses: Vec::new(),
        }
    }

    #[test]
    fn dot_deals_duration_times_value_then_expires() {
        let mut players = vec![unit(100, 100)];
        players[0].statuses.push(ActiveStatus {
            kind: StatusKind::Dot,
            value: 10,
            turns_left: 4,
        });
        let mut enemies = Vec::new();

        for _ in 0..4 {
            let mut events = Vec::new();
            tick_statuses(&mut players, &mut enemies, &mut events);
        }
        assert_eq!(players[0].hp, 60);
        assert!(players[0].statuses.is_empty());

        // A fifth pass is a no-op.
        let mut events = Vec::new();
        tick_statuses(&mut players, &mut enemies, &mut events);
        assert_eq!(players[0].hp, 60);
        assert!(events.is_empty());
    }

    #[test]
    fn regen_caps_at_max_hp() {
        let mut players = vec![unit(96, 100)];
        players[0].statuses.push(ActiveStatus {
            kind: StatusKind::Regen,
            value: 10,
            turns_left: 2,
        });
        let mut enemies = Vec::new();
        let mut events = Vec::new();
        tick_statuses(&mut players, &mut enemies, &mut events);
        assert_eq!(players[0].hp, 100);
        assert_eq!(
            events[0],
            BattleEvent::StatusTicked {
                side: Side::Player,
                slot: 0,
                status: StatusKind::Regen,
                amount: 4,
                hp_after: 100,
            }
        );
    }

    #[test]
    fn lethal_dot_applies_death_bookkeeping() {
        let mut players = vec![unit(8, 100)];
        players[0].shield = 15; // dot bypasses shield
        players[0].statuses.push(ActiveStatus {
            kind: StatusKind::Dot,
            value: 10,
            turns_left: 3,
        });
        let mut enemies = Vec::new();
        let mut events = Vec::new();
        tick_statuses(&mut players, &mut enemies, &mut events);
        assert!(players[0].dead);
        assert_eq!(players[0].shield, 0);
        assert!(players[0].statuses.is_empty());
        assert!(events.contains(&BattleEvent::UnitDied { side: Side::Player, slot: 0 }));
    }

    #[test]
    fn stun_expires_without_ticking() {
        let mut players = vec![unit(50, 100)];
        players[0].statuses.push(ActiveStatus {
            kind: StatusKind::Stun,
            value: 0,
            turns_left: 1,
        });
        let mut enemies = Vec::new();
        let mut events = Vec::new();
        tick_statuses(&mut players, &mut enemies, &mut events);
        assert_eq!(players[0].hp, 50);
        assert!(players[0].statuses.is_empty());
        assert_eq!(
            events,
            vec![BattleEvent::StatusExpired {
                side: Side::Player,
                slot: 0,
                status: StatusKind::Stun,
            }]
        );
    }
}
