// ═══════════════════════════════════════════════════════════════════════
// Database — SQLite storage for battle results and win-rate stats
// ═══════════════════════════════════════════════════════════════════════

use crate::runner::BattleReport;
use rusqlite::{params, Connection};

pub struct Database {
    conn: Connection,
}

/// Aggregated results for one party composition.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyStats {
    pub party: String,
    pub battles: i64,
    pub wins: i64,
    pub avg_rounds: f64,
}

impl Database {
    /// Open (or create) a database at the given path.
    pub fn new(path: &str) -> Self {
        let conn = Connection::open(path).expect("Failed to open database");
        let db = Database { conn };
        db.create_schema();
        db
    }

    /// In-memory database (useful for tests).
    pub fn in_memory() -> Self {
        let conn = Connection::open_in_memory().expect("Failed to open in-memory database");
        let db = Database { conn };
        db.create_schema();
        db
    }

    fn create_schema(&self) {
        self.conn
            .execute_batch(
                "
            CREATE TABLE IF NOT EXISTS battles (
                id           INTEGER PRIMARY KEY,
                seed         INTEGER NOT NULL,
                agent        TEXT NOT NULL,
                party        TEXT NOT NULL,
                enemies      TEXT NOT NULL,
                victory      INTEGER NOT NULL,
                rounds       INTEGER NOT NULL,
                decisions    INTEGER NOT NULL,
                surviving_hp INTEGER NOT NULL,
                played_at    TEXT NOT NULL DEFAULT (datetime('now'))
            );
        ",
            )
            .expect("Failed to create schema");
    }

    /// Store one battle result. The event stream is not persisted;
    /// replays are reproducible from the seed.
    pub fn store_report(&self, report: &BattleReport) {
        let party = serde_json::to_string(&report.party).expect("party serializes");
        let enemies = serde_json::to_string(&report.enemies).expect("enemies serialize");
        self.conn
            .execute(
                "INSERT INTO battles (seed, agent, party, enemies, victory, rounds, decisions, surviving_hp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    report.seed as i64,
                    report.agent_name,
                    party,
                    enemies,
                    report.victory as i64,
                    report.rounds as i64,
                    report.decisions as i64,
                    report.surviving_hp as i64,
                ],
            )
            .expect("Failed to store battle");
    }

    pub fn battle_count(&self) -> i64 {
        self.conn
            .query_row("SELECT COUNT(*) FROM battles", [], |row| row.get(0))
            .unwrap_or(0)
    }

    /// Win rates grouped by party composition, most-played first.
    pub fn party_stats(&self) -> Vec<PartyStats> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT party, COUNT(*), SUM(victory), AVG(rounds)
                 FROM battles GROUP BY party ORDER BY COUNT(*) DESC",
            )
            .expect("Failed to prepare stats query");
        let rows = stmt
            .query_map([], |row| {
                Ok(PartyStats {
                    party: row.get(0)?,
                    battles: row.get(1)?,
                    wins: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                    avg_rounds: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
                })
            })
            .expect("Failed to query stats");
        rows.filter_map(Result::ok).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_engine::{CharacterId, EnemyId};

    fn report(seed: u64, victory: bool) -> BattleReport {
        BattleReport {
            seed,
            agent_name: "Random".to_string(),
            party: vec![CharacterId::Kael, CharacterId::Liora],
            enemies: vec![EnemyId::Husk],
            victory,
            rounds: 6,
            decisions: 30,
            surviving_hp: if victory { 80 } else { 0 },
            events: Vec::new(),
            final_state: skirmish_engine::setup::create_battle(
                &[CharacterId::Kael, CharacterId::Liora],
                &[EnemyId::Husk],
                &[],
                seed,
            ),
        }
    }

    #[test]
    fn stores_and_aggregates_results() {
        let db = Database::in_memory();
        db.store_report(&report(1, true));
        db.store_report(&report(2, false));
        db.store_report(&report(3, true));
        assert_eq!(db.battle_count(), 3);

        let stats = db.party_stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].battles, 3);
        assert_eq!(stats[0].wins, 2);
        assert!((stats[0].avg_rounds - 6.0).abs() < f64::EPSILON);
    }
}
