// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for battles and batch simulations
// ═══════════════════════════════════════════════════════════════════════

use clap::{Parser, Subcommand};
use rand::Rng;
use skirmish_agents::RandomAgent;
use skirmish_arena::database::Database;
use skirmish_arena::{run_batch, run_battle, BatchConfig};
use skirmish_engine::{BattleEvent, CharacterId, EnemyId};

#[derive(Parser)]
#[command(name = "skirmish-runner", about = "Skirmish card battle lab")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single battle and print its event stream as JSON lines
    Play {
        /// Battle seed; random when omitted
        #[arg(short, long)]
        seed: Option<u64>,
        /// Comma-separated party, e.g. "kael,seris"
        #[arg(short, long, default_value = "kael,seris,liora,draven")]
        party: String,
        /// Comma-separated enemy lineup, e.g. "husk,ravager"
        #[arg(short, long, default_value = "husk,ravager")]
        enemies: String,
        /// Comma-separated deck card keys; empty = default deck
        #[arg(short, long, default_value = "")]
        deck: String,
        /// Pacing delay between enemy actions, for watchable output
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
        /// Dump the final battle state as JSON after the summary
        #[arg(long)]
        dump_state: bool,
    },
    /// Run a batch of battles into the results database
    Batch {
        #[arg(short, long, default_value_t = 100)]
        games: u32,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value = "kael,seris,liora,draven")]
        party: String,
        #[arg(short, long, default_value = "husk,ravager")]
        enemies: String,
        #[arg(long, default_value = "results.db")]
        db: String,
    },
    /// Show win-rate stats from the results database
    Stats {
        #[arg(long, default_value = "results.db")]
        db: String,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Play { seed, party, enemies, deck, delay_ms, dump_state } => {
            cmd_play(seed, &party, &enemies, &deck, delay_ms, dump_state)
        }
        Commands::Batch { games, seed, party, enemies, db } => {
            cmd_batch(games, seed, &party, &enemies, &db)
        }
        Commands::Stats { db } => cmd_stats(&db),
    }
}

fn cmd_play(
    seed: Option<u64>,
    party: &str,
    enemies: &str,
    deck: &str,
    delay_ms: u64,
    dump_state: bool,
) {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    let party = parse_party(party);
    let enemies = parse_enemies(enemies);
    let deck_keys: Vec<&str> = deck.split(',').filter(|k| !k.is_empty()).collect();

    println!("=== Skirmish: seed={} ===", seed);

    let mut agent = RandomAgent::new(seed);
    match run_battle(&mut agent, &party, &enemies, &deck_keys, seed, 10_000) {
        Ok(report) => {
            for event in &report.events {
                println!("{}", serde_json::to_string(event).expect("event serializes"));
                if delay_ms > 0 && matches!(event, BattleEvent::EnemyAction { .. }) {
                    std::thread::sleep(std::time::Duration::from_millis(delay_ms));
                }
            }
            println!();
            println!("Battle finished!");
            println!("  Outcome: {}", if report.victory { "victory" } else { "defeat" });
            println!("  Enemy turns survived: {}", report.rounds);
            println!("  Party HP remaining: {}", report.surviving_hp);
            if dump_state {
                println!("{}", report.final_state.snapshot_json());
            }
        }
        Err(e) => eprintln!("Battle error: {}", e),
    }
}

fn cmd_batch(games: u32, seed: u64, party: &str, enemies: &str, db_path: &str) {
    println!("=== Batch: {} battles, seed={} ===\n", games, seed);

    let config = BatchConfig {
        games,
        base_seed: seed,
        party: parse_party(party),
        enemies: parse_enemies(enemies),
        deck_keys: Vec::new(),
        max_decisions: 10_000,
    };
    let results = run_batch(&config);

    let db = Database::new(db_path);
    let mut wins = 0u32;
    let mut errors = 0u32;
    for result in &results {
        match result {
            Ok(report) => {
                if report.victory {
                    wins += 1;
                }
                db.store_report(report);
            }
            Err(e) => {
                errors += 1;
                eprintln!("Battle ERROR -- {}", e);
            }
        }
    }

    println!("--- Summary ({} battles, {} errors) ---", games, errors);
    let played = games - errors;
    let pct = if played > 0 { wins as f64 / played as f64 * 100.0 } else { 0.0 };
    println!("  Wins: {}/{} ({:.1}%)", wins, played, pct);
    println!("\nResults saved to: {}", db_path);
    println!("Total battles in DB: {}", db.battle_count());
}

fn cmd_stats(db_path: &str) {
    let db = Database::new(db_path);
    let stats = db.party_stats();
    if stats.is_empty() {
        println!("No battles found. Run a batch first.");
        return;
    }
    println!("=== Party stats ===\n");
    println!("{:<40} {:>8} {:>8} {:>10}", "Party", "Battles", "Wins", "AvgRounds");
    println!("{}", "-".repeat(70));
    for row in &stats {
        println!(
            "{:<40} {:>8} {:>8} {:>10.1}",
            row.party, row.battles, row.wins, row.avg_rounds
        );
    }
}

fn parse_party(list: &str) -> Vec<CharacterId> {
    let parsed: Vec<CharacterId> = list
        .split(',')
        .filter_map(|name| match name.trim().to_lowercase().as_str() {
            "kael" => Some(CharacterId::Kael),
            "seris" => Some(CharacterId::Seris),
            "liora" => Some(CharacterId::Liora),
            "draven" => Some(CharacterId::Draven),
            _ => None,
        })
        .collect();
    if parsed.is_empty() {
        vec![CharacterId::Kael, CharacterId::Seris]
    } else {
        parsed
    }
}

fn parse_enemies(list: &str) -> Vec<EnemyId> {
    let parsed: Vec<EnemyId> = list
        .split(',')
        .filter_map(|name| match name.trim().to_lowercase().as_str() {
            "husk" => Some(EnemyId::Husk),
            "ravager" => Some(EnemyId::Ravager),
            "dreadmaw" => Some(EnemyId::Dreadmaw),
            _ => None,
        })
        .collect();
    if parsed.is_empty() {
        vec![EnemyId::Husk, EnemyId::Ravager]
    } else {
        parsed
    }
}
