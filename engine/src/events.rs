// ═══════════════════════════════════════════════════════════════════════
// Battle events — the engine's only output channel besides state
//
// The pipeline returns events instead of calling back into a UI layer;
// the presentation adapter turns them into floating text, shakes and
// log lines after the fact. Emission never influences resolution.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{CardId, Phase, Side, StatusKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BattleEvent {
    PhaseChanged { phase: Phase },

    CardPlayed { side: Side, slot: usize, card: CardId, name: String },
    UltimateCast { side: Side, slot: usize, name: String },
    /// Header for one enemy action; the presentation layer paces its
    /// animation delays on these boundaries.
    EnemyAction { slot: usize, name: String, archetype: String },

    ShieldBlocked { side: Side, slot: usize, amount: i32 },
    DamageTaken { side: Side, slot: usize, amount: i32, hp_after: i32 },
    Healed { side: Side, slot: usize, amount: i32 },
    ShieldGained { side: Side, slot: usize, amount: i32 },
    ShieldSpent { side: Side, slot: usize, amount: i32 },

    StatusApplied { side: Side, slot: usize, status: StatusKind, value: i32, turns: u8 },
    StatusCleansed { side: Side, slot: usize, count: u8 },
    StatusTicked { side: Side, slot: usize, status: StatusKind, amount: i32, hp_after: i32 },
    StatusExpired { side: Side, slot: usize, status: StatusKind },

    StatGained { side: Side, slot: usize, attack: i32, max_hp: i32 },
    UnitDied { side: Side, slot: usize },

    LogMessage { text: String },
    BattleEnded { victory: bool },
}
