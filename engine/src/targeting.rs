// ═══════════════════════════════════════════════════════════════════════
// Target resolver — target policy → concrete (side, slot) list
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{Side, TargetPolicy, Unit};
use serde::{Deserialize, Serialize};

/// A resolved target. Slots index into the side's roster; slot 0 is the
/// front for damage-routing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRef {
    pub side: Side,
    pub slot: usize,
}

/// Resolve a target policy for the acting unit. Only living units are
/// ever auto-targeted; an exhausted opposing roster resolves to an empty
/// list, which the pipeline treats as a no-op rather than an error.
pub fn resolve_targets(
    policy: TargetPolicy,
    players: &[Unit],
    enemies: &[Unit],
    actor_side: Side,
    actor_slot: usize,
) -> Vec<TargetRef> {
    let own = match actor_side {
        Side::Player => players,
        Side::Enemy => enemies,
    };
    let opposing_side = actor_side.opposing();
    let opposing = match opposing_side {
        Side::Player => players,
        Side::Enemy => enemies,
    };

    match policy {
        TargetPolicy::SelfOnly => vec![TargetRef {
            side: actor_side,
            slot: actor_slot,
        }],

        // Front-first convention: lowest living slot on the other side.
        TargetPolicy::SingleEnemy => first_living(opposing)
            .map(|slot| TargetRef { side: opposing_side, slot })
            .into_iter()
            .collect(),

        TargetPolicy::AllEnemies => living_slots(opposing)
            .map(|slot| TargetRef { side: opposing_side, slot })
            .collect(),

        // A teammate, never the actor's own slot.
        TargetPolicy::SingleAlly => own
            .iter()
            .enumerate()
            .find(|(slot, u)| u.is_alive() && *slot != actor_slot)
            .map(|(slot, _)| TargetRef { side: actor_side, slot })
            .into_iter()
            .collect(),

        TargetPolicy::TeamAll => living_slots(own)
            .map(|slot| TargetRef { side: actor_side, slot })
            .collect(),
    }
}

fn first_living(roster: &[Unit]) -> Option<usize> {
    roster.iter().position(|u| u.is_alive())
}

fn living_slots<'a>(roster: &'a [Unit]) -> impl Iterator<Item = usize> + 'a {
    roster
        .iter()
        .enumerate()
        .filter(|(_, u)| u.is_alive())
        .map(|(slot, _)| slot)
}
