// ═══════════════════════════════════════════════════════════════════════
// Agent trait — interface for driving the player side of a battle
//
// The engine itself decides nothing for the player; the arena asks an
// agent whenever the battle waits in PlayerThinking or PlayerRestock.
// A battle is open information (the enemy side has no hidden hand), so
// agents read the full battle state directly.
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use skirmish_engine::BattleState;

/// One player decision during `PlayerThinking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMove {
    Play { actor_id: u32, card_uid: u32 },
    Ultimate { actor_id: u32 },
    Skip,
}

pub trait Agent: Send + Sync {
    /// Human-readable name for this agent.
    fn name(&self) -> &str;

    /// Choose the next move. Called only while the battle is in
    /// `PlayerThinking`; returning an illegal move is tolerated (the
    /// arena falls back to skipping) but wastes the turn.
    fn choose_move(&mut self, state: &BattleState) -> PlayerMove;

    /// Choose which hand card to keep through the restock, if any.
    fn choose_keep(&mut self, state: &BattleState) -> Option<u32>;
}
