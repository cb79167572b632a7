// ═══════════════════════════════════════════════════════════════════════
// Content tables — card catalog, characters, ultimates, enemies
// Read-only data consumed by the engine; numbers live here, not in logic.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::*;

// ── Card catalog ───────────────────────────────────────────────────────

pub fn card_def(id: CardId) -> CardDef {
    use CardId::*;
    match id {
        Strike => CardDef {
            id, name: "Strike", kind: CardKind::Attack, value: 18, cost: 1,
            target: TargetPolicy::SingleEnemy, special: None,
            ult_gain: 15, duration: None, exclusive_to: None,
        },
        Cleave => CardDef {
            id, name: "Cleave", kind: CardKind::Attack, value: 12, cost: 2,
            target: TargetPolicy::AllEnemies, special: None,
            ult_gain: 15, duration: None, exclusive_to: None,
        },
        Guard => CardDef {
            id, name: "Guard", kind: CardKind::Barrier, value: 16, cost: 1,
            target: TargetPolicy::SelfOnly, special: None,
            ult_gain: 10, duration: None, exclusive_to: None,
        },
        Bulwark => CardDef {
            id, name: "Bulwark", kind: CardKind::Barrier, value: 22, cost: 2,
            target: TargetPolicy::SingleAlly, special: None,
            ult_gain: 12, duration: None, exclusive_to: None,
        },
        Salve => CardDef {
            id, name: "Salve", kind: CardKind::Heal, value: 15, cost: 1,
            target: TargetPolicy::SingleAlly, special: None,
            ult_gain: 10, duration: None, exclusive_to: None,
        },
        Triage => CardDef {
            id, name: "Triage", kind: CardKind::Heal, value: 10, cost: 2,
            target: TargetPolicy::TeamAll, special: None,
            ult_gain: 12, duration: None, exclusive_to: None,
        },
        ShieldBash => CardDef {
            id, name: "Shield Bash", kind: CardKind::Attack, value: 0, cost: 2,
            target: TargetPolicy::SingleEnemy, special: Some(SpecialEffect::ShieldBash),
            ult_gain: 15, duration: None, exclusive_to: Some(CharacterId::Kael),
        },
        AegisBurst => CardDef {
            id, name: "Aegis Burst", kind: CardKind::Attack, value: 0, cost: 3,
            target: TargetPolicy::SingleEnemy, special: Some(SpecialEffect::ShieldBurst),
            ult_gain: 20, duration: None, exclusive_to: Some(CharacterId::Kael),
        },
        Detonate => CardDef {
            id, name: "Detonate", kind: CardKind::Attack, value: 0, cost: 2,
            target: TargetPolicy::SingleEnemy, special: Some(SpecialEffect::Detonate),
            ult_gain: 15, duration: None, exclusive_to: Some(CharacterId::Seris),
        },
        LeechBlade => CardDef {
            id, name: "Leech Blade", kind: CardKind::Attack, value: 16, cost: 2,
            target: TargetPolicy::SingleEnemy, special: Some(SpecialEffect::Drain),
            ult_gain: 15, duration: None, exclusive_to: Some(CharacterId::Draven),
        },
        PurgingLight => CardDef {
            id, name: "Purging Light", kind: CardKind::Heal, value: 0, cost: 2,
            target: TargetPolicy::TeamAll, special: Some(SpecialEffect::PurgeHeal),
            ult_gain: 15, duration: None, exclusive_to: Some(CharacterId::Liora),
        },
        Sanctuary => CardDef {
            id, name: "Sanctuary", kind: CardKind::Special, value: 0, cost: 3,
            target: TargetPolicy::SingleEnemy, special: Some(SpecialEffect::Sanctuary),
            ult_gain: 20, duration: None, exclusive_to: Some(CharacterId::Liora),
        },
        Ember => CardDef {
            id, name: "Ember", kind: CardKind::Special, value: 8, cost: 1,
            target: TargetPolicy::SingleEnemy, special: Some(SpecialEffect::Ignite),
            ult_gain: 12, duration: Some(3), exclusive_to: None,
        },
        Regrowth => CardDef {
            id, name: "Regrowth", kind: CardKind::Special, value: 6, cost: 1,
            target: TargetPolicy::SingleAlly, special: Some(SpecialEffect::Regrowth),
            ult_gain: 12, duration: Some(3), exclusive_to: None,
        },
        // Duration 2 spans two tick boundaries: the daze survives the
        // enemy-turn entry tick and covers that whole enemy turn.
        FlashPowder => CardDef {
            id, name: "Flash Powder", kind: CardKind::Special, value: 0, cost: 1,
            target: TargetPolicy::SingleEnemy, special: Some(SpecialEffect::Daze),
            ult_gain: 10, duration: Some(2), exclusive_to: None,
        },
        WarBanner => CardDef {
            id, name: "War Banner", kind: CardKind::Special, value: 4, cost: 2,
            target: TargetPolicy::TeamAll, special: Some(SpecialEffect::Empower),
            ult_gain: 12, duration: None, exclusive_to: None,
        },
    }
}

/// Deck lists arrive from the session layer as content keys. Unknown
/// keys fall back to the default card so a battle is always startable.
pub fn card_id_from_key(key: &str) -> Option<CardId> {
    use CardId::*;
    match key {
        "strike" => Some(Strike),
        "cleave" => Some(Cleave),
        "guard" => Some(Guard),
        "bulwark" => Some(Bulwark),
        "salve" => Some(Salve),
        "triage" => Some(Triage),
        "shield_bash" => Some(ShieldBash),
        "aegis_burst" => Some(AegisBurst),
        "detonate" => Some(Detonate),
        "leech_blade" => Some(LeechBlade),
        "purging_light" => Some(PurgingLight),
        "sanctuary" => Some(Sanctuary),
        "ember" => Some(Ember),
        "regrowth" => Some(Regrowth),
        "flash_powder" => Some(FlashPowder),
        "war_banner" => Some(WarBanner),
        _ => None,
    }
}

/// Stand-in for missing content references during deck build.
pub const FALLBACK_CARD: CardId = CardId::Strike;

/// Deck used when the session layer supplies no card list.
pub const DEFAULT_DECK: [CardId; 12] = [
    CardId::Strike,
    CardId::Strike,
    CardId::Strike,
    CardId::Cleave,
    CardId::Guard,
    CardId::Guard,
    CardId::Salve,
    CardId::Salve,
    CardId::Triage,
    CardId::Ember,
    CardId::FlashPowder,
    CardId::WarBanner,
];

// ── Ultimates ──────────────────────────────────────────────────────────

const AEGIS_OVERLOAD_EFFECTS: [UltimateEffect; 2] = [
    UltimateEffect {
        kind: CardKind::Barrier, special: None,
        value: 30, duration: None, target: TargetPolicy::TeamAll,
    },
    UltimateEffect {
        kind: CardKind::Attack, special: Some(SpecialEffect::ShieldBash),
        value: 0, duration: None, target: TargetPolicy::SingleEnemy,
    },
];

const CONFLAGRATION_EFFECTS: [UltimateEffect; 2] = [
    UltimateEffect {
        kind: CardKind::Special, special: Some(SpecialEffect::Ignite),
        value: 10, duration: Some(3), target: TargetPolicy::AllEnemies,
    },
    UltimateEffect {
        kind: CardKind::Attack, special: Some(SpecialEffect::Detonate),
        value: 0, duration: None, target: TargetPolicy::SingleEnemy,
    },
];

const BENEDICTION_EFFECTS: [UltimateEffect; 2] = [
    UltimateEffect {
        kind: CardKind::Heal, special: Some(SpecialEffect::PurgeHeal),
        value: 0, duration: None, target: TargetPolicy::TeamAll,
    },
    UltimateEffect {
        kind: CardKind::Special, special: Some(SpecialEffect::Regrowth),
        value: 8, duration: Some(3), target: TargetPolicy::TeamAll,
    },
];

const DEATH_WALTZ_EFFECTS: [UltimateEffect; 3] = [
    UltimateEffect {
        kind: CardKind::Attack, special: None,
        value: 24, duration: None, target: TargetPolicy::SingleEnemy,
    },
    UltimateEffect {
        kind: CardKind::Attack, special: Some(SpecialEffect::Drain),
        value: 18, duration: None, target: TargetPolicy::SingleEnemy,
    },
    UltimateEffect {
        kind: CardKind::Special, special: Some(SpecialEffect::Empower),
        value: 4, duration: None, target: TargetPolicy::SelfOnly,
    },
];

// ── Character catalog ──────────────────────────────────────────────────

pub fn character_template(id: CharacterId) -> CharacterTemplate {
    match id {
        CharacterId::Kael => CharacterTemplate {
            id, name: "Kael", role: "Bulwark", avatar: "kael",
            stats: StatBlock { max_hp: 120, attack: 14 },
            ultimate: UltimateSpec { name: "Aegis Overload", effects: &AEGIS_OVERLOAD_EFFECTS },
        },
        CharacterId::Seris => CharacterTemplate {
            id, name: "Seris", role: "Pyromancer", avatar: "seris",
            stats: StatBlock { max_hp: 90, attack: 12 },
            ultimate: UltimateSpec { name: "Conflagration", effects: &CONFLAGRATION_EFFECTS },
        },
        CharacterId::Liora => CharacterTemplate {
            id, name: "Liora", role: "Cleric", avatar: "liora",
            stats: StatBlock { max_hp: 95, attack: 9 },
            ultimate: UltimateSpec { name: "Benediction", effects: &BENEDICTION_EFFECTS },
        },
        CharacterId::Draven => CharacterTemplate {
            id, name: "Draven", role: "Duelist", avatar: "draven",
            stats: StatBlock { max_hp: 100, attack: 16 },
            ultimate: UltimateSpec { name: "Death Waltz", effects: &DEATH_WALTZ_EFFECTS },
        },
    }
}

pub fn all_character_ids() -> Vec<CharacterId> {
    vec![
        CharacterId::Kael,
        CharacterId::Seris,
        CharacterId::Liora,
        CharacterId::Draven,
    ]
}

// ── Enemy catalog ──────────────────────────────────────────────────────

pub fn enemy_template(id: EnemyId) -> EnemyTemplate {
    match id {
        EnemyId::Husk => EnemyTemplate {
            id, name: "Husk", avatar: "husk",
            stats: StatBlock { max_hp: 70, attack: 10 },
        },
        EnemyId::Ravager => EnemyTemplate {
            id, name: "Ravager", avatar: "ravager",
            stats: StatBlock { max_hp: 110, attack: 14 },
        },
        EnemyId::Dreadmaw => EnemyTemplate {
            id, name: "Dreadmaw", avatar: "dreadmaw",
            stats: StatBlock { max_hp: 180, attack: 18 },
        },
    }
}
