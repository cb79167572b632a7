// ═══════════════════════════════════════════════════════════════════════
// Core types — units, cards, statuses, battle state
// ═══════════════════════════════════════════════════════════════════════

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// ── Battle constants ───────────────────────────────────────────────────

/// Player card/ultimate uses per turn before the enemy turn begins.
pub const ACTION_THRESHOLD: u8 = 2;

/// Target hand size after dealing and after every restock.
pub const HAND_SIZE: usize = 5;

/// Enemy actions executed per enemy turn.
pub const ENEMY_ACTIONS_PER_TURN: u32 = 2;

/// Ultimate gauge ceiling shared by every unit.
pub const ULT_MAX: i32 = 100;

// ── Enums ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opposing(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    PlayerThinking,
    PlayerExecuting,
    EnemyTurn,
    PlayerRestock,
    GameWon,
    GameOver,
}

impl Phase {
    /// Terminal phases accept no further actions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameWon | Phase::GameOver)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Attack,
    Barrier,
    Heal,
    Special,
}

/// How a card or ultimate effect picks its concrete targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetPolicy {
    SelfOnly,
    SingleEnemy,
    AllEnemies,
    SingleAlly,
    TeamAll,
}

/// Named special-effect policies. Each overrides the default
/// "value → damage/heal/shield by kind" mapping in the effect resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialEffect {
    /// Damage = actor attack + actor's current shield.
    ShieldBash,
    /// Damage = 3x actor's current shield; the shield is spent.
    ShieldBurst,
    /// Damage = sum of remaining damage-over-time on the target.
    Detonate,
    /// Default attack damage, and the actor heals for half of it.
    Drain,
    /// Strip bad statuses from every living ally; heal scales per ally
    /// with the number removed from that ally.
    PurgeHeal,
    /// Heal the whole party, then deal the total actual healing as
    /// damage to one enemy.
    Sanctuary,
    /// Attach a damage-over-time status instead of instant damage.
    Ignite,
    /// Attach a heal-over-time status instead of an instant heal.
    Regrowth,
    /// Attach a one-turn stun tag.
    Daze,
    /// Permanently raise the target's attack for the rest of the battle.
    Empower,
}

// ── Statuses ───────────────────────────────────────────────────────────

/// Canonical closed set of status kinds. `is_bad` is the single source
/// of truth for what cleanse removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Damage-over-time: subtracts `value` HP per tick.
    Dot,
    /// Heal-over-time: restores `value` HP per tick.
    Regen,
    /// Additive bonus to the owner's card values while active.
    StatUp,
    /// Additive penalty to the owner's card values while active.
    StatDown,
    /// One-turn tag; a stunned enemy skips its action.
    Stun,
}

impl StatusKind {
    pub fn is_bad(self) -> bool {
        matches!(self, StatusKind::Dot | StatusKind::StatDown | StatusKind::Stun)
    }

    pub fn icon(self) -> &'static str {
        match self {
            StatusKind::Dot => "flame",
            StatusKind::Regen => "leaf",
            StatusKind::StatUp => "sword-up",
            StatusKind::StatDown => "sword-down",
            StatusKind::Stun => "spiral",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusKind::Dot => write!(f, "Dot"),
            StatusKind::Regen => write!(f, "Regen"),
            StatusKind::StatUp => write!(f, "StatUp"),
            StatusKind::StatDown => write!(f, "StatDown"),
            StatusKind::Stun => write!(f, "Stun"),
        }
    }
}

/// A timed effect attached to a unit. Decremented once per side-turn
/// boundary by the status tick pass; removed at zero or when cleansed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveStatus {
    pub kind: StatusKind,
    pub value: i32,
    pub turns_left: u8,
}

// ── Stats ──────────────────────────────────────────────────────────────

/// Mutable per-battle copy of a template's stats. Permanent in-battle
/// stat deltas land here and last until the battle ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub max_hp: i32,
    pub attack: i32,
}

// ── Content ids ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterId {
    Kael,
    Seris,
    Liora,
    Draven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyId {
    Husk,
    Ravager,
    Dreadmaw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardId {
    Strike,
    Cleave,
    Guard,
    Bulwark,
    Salve,
    Triage,
    ShieldBash,
    AegisBurst,
    Detonate,
    LeechBlade,
    PurgingLight,
    Sanctuary,
    Ember,
    Regrowth,
    FlashPowder,
    WarBanner,
}

// ── Card content ───────────────────────────────────────────────────────

/// Immutable card template from the content catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardDef {
    pub id: CardId,
    pub name: &'static str,
    pub kind: CardKind,
    pub value: i32,
    pub cost: u8,
    pub target: TargetPolicy,
    pub special: Option<SpecialEffect>,
    /// Ultimate gauge granted to the actor, once per use.
    pub ult_gain: i32,
    /// Duration for effects that create statuses.
    pub duration: Option<u8>,
    /// Some cards only fit one character's kit.
    pub exclusive_to: Option<CharacterId>,
}

/// A physical copy of a card in the deck/hand/discard. Two copies of
/// the same content id carry distinct uids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub uid: u32,
    pub card: CardId,
}

// ── Ultimates ──────────────────────────────────────────────────────────

/// One step of an ultimate. At cast time each effect becomes a synthetic
/// card and runs through the same action pipeline as a normal play,
/// strictly in listed order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UltimateEffect {
    pub kind: CardKind,
    pub special: Option<SpecialEffect>,
    pub value: i32,
    pub duration: Option<u8>,
    pub target: TargetPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UltimateSpec {
    pub name: &'static str,
    pub effects: &'static [UltimateEffect],
}

// ── Character / enemy content ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CharacterTemplate {
    pub id: CharacterId,
    pub name: &'static str,
    pub role: &'static str,
    /// Art key for the presentation layer.
    pub avatar: &'static str,
    pub stats: StatBlock,
    pub ultimate: UltimateSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: &'static str,
    pub avatar: &'static str,
    pub stats: StatBlock,
}

// ── Unit (combatant instance) ──────────────────────────────────────────

/// A combatant on either side. Invariants: `dead` iff `hp == 0`; a dead
/// unit has zero shield and no statuses; `0 <= ult <= max_ult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u32,
    pub side: Side,
    pub name: String,
    pub character: Option<CharacterId>,
    pub stats: StatBlock,
    pub hp: i32,
    pub shield: i32,
    pub ult: i32,
    pub max_ult: i32,
    pub dead: bool,
    pub statuses: Vec<ActiveStatus>,
}

impl Unit {
    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn missing_hp(&self) -> i32 {
        (self.stats.max_hp - self.hp).max(0)
    }

    pub fn ult_ready(&self) -> bool {
        self.ult >= self.max_ult
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.statuses.iter().any(|s| s.kind == kind)
    }

    pub fn bad_status_count(&self) -> u8 {
        self.statuses.iter().filter(|s| s.kind.is_bad()).count() as u8
    }

    /// Additive card-value bonus from the unit's active buffs/debuffs.
    pub fn value_bonus(&self) -> i32 {
        self.statuses
            .iter()
            .map(|s| match s.kind {
                StatusKind::StatUp => s.value,
                StatusKind::StatDown => -s.value,
                _ => 0,
            })
            .sum()
    }
}

// ── Action errors ──────────────────────────────────────────────────────

/// Rejected action requests. A rejection never mutates battle state;
/// the UI layer is expected to have gated these already, so they carry
/// just enough detail to be asserted on in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    WrongPhase,
    UnknownUnit,
    DeadActor,
    UnknownCard,
    UltimateNotReady,
    NotUsableBy,
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::WrongPhase => write!(f, "action not legal in the current phase"),
            ActionError::UnknownUnit => write!(f, "no such unit"),
            ActionError::DeadActor => write!(f, "acting unit is dead"),
            ActionError::UnknownCard => write!(f, "card is not in hand"),
            ActionError::UltimateNotReady => write!(f, "ultimate gauge is not full"),
            ActionError::NotUsableBy => write!(f, "card is exclusive to another character"),
        }
    }
}

impl std::error::Error for ActionError {}

// ── Battle state ───────────────────────────────────────────────────────

/// Aggregate battle session state. Created at battle start, mutated
/// only through the engine's phase-gated entry points, discarded at
/// battle end. Slot index 0 is the front of each roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub players: Vec<Unit>,
    pub enemies: Vec<Unit>,

    pub hand: Vec<CardInstance>,
    pub draw_pile: Vec<CardInstance>,
    pub discard_pile: Vec<CardInstance>,

    pub phase: Phase,
    /// Player card/ultimate uses this turn; reset by restock.
    pub actions_taken: u8,
    /// Running log line mirrored to the presentation layer.
    pub log: String,

    // Deterministic RNG
    pub seed: u64,
    pub rng_counter: u64,

    // Runtime id source for dealt cards and units
    pub next_uid: u32,
}

impl BattleState {
    pub fn roster(&self, side: Side) -> &[Unit] {
        match side {
            Side::Player => &self.players,
            Side::Enemy => &self.enemies,
        }
    }

    pub fn roster_mut(&mut self, side: Side) -> &mut Vec<Unit> {
        match side {
            Side::Player => &mut self.players,
            Side::Enemy => &mut self.enemies,
        }
    }

    /// Slot of the player unit with the given id.
    pub fn player_slot(&self, unit_id: u32) -> Option<usize> {
        self.players.iter().position(|u| u.id == unit_id)
    }

    /// Hand index of the card instance with the given uid.
    pub fn hand_index(&self, card_uid: u32) -> Option<usize> {
        self.hand.iter().position(|c| c.uid == card_uid)
    }

    pub fn all_dead(&self, side: Side) -> bool {
        self.roster(side).iter().all(|u| u.dead)
    }

    pub fn fresh_uid(&mut self) -> u32 {
        self.next_uid += 1;
        self.next_uid
    }

    /// Derive a fresh RNG from the battle seed. Keeps the state plain
    /// serializable data while staying seed-deterministic.
    pub fn derive_rng(&mut self) -> ChaCha8Rng {
        self.rng_counter = self.rng_counter.wrapping_add(1);
        ChaCha8Rng::seed_from_u64(
            self.seed
                .wrapping_add(self.rng_counter.wrapping_mul(999_961)),
        )
    }

    /// State dump for the presentation layer / debugging.
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
