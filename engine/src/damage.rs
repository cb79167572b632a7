// ═══════════════════════════════════════════════════════════════════════
// Damage/shield math — the single point of truth for damage application
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

/// Result of routing one packet of damage through shield into HP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub hp: i32,
    pub shield: i32,
    /// Amount the shield absorbed.
    pub blocked: i32,
    /// Amount that actually reached HP (never exceeds prior HP).
    pub taken: i32,
}

/// Shield absorbs first, up to its full value; the remainder spills into
/// HP, which is floored at zero. Pure; callers never subtract HP or
/// shield themselves.
pub fn absorb(hp: i32, shield: i32, damage: i32) -> DamageOutcome {
    let damage = damage.max(0);
    let hp = hp.max(0);
    let shield = shield.max(0);

    let blocked = damage.min(shield);
    let spill = damage - blocked;
    let taken = spill.min(hp);

    DamageOutcome {
        hp: hp - taken,
        shield: shield - blocked,
        blocked,
        taken,
    }
}
