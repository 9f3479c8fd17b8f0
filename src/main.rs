use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use ipl_terminal::dataset;
use ipl_terminal::export;
use ipl_terminal::normalize::DEFAULT_TEAM_ALIASES;
use ipl_terminal::rankings;
use ipl_terminal::snapshot::Snapshot;

const TOP_N: usize = 10;

fn main() -> Result<()> {
    // Optional .env for local data paths; missing file is fine.
    let _ = dotenvy::dotenv();

    let matches_path = env_path("IPL_MATCHES_CSV", "matches.csv");
    let deliveries_path = env_path("IPL_DELIVERIES_CSV", "deliveries.csv");

    let matches = dataset::load_matches(&matches_path)?;
    let deliveries = dataset::load_deliveries(&deliveries_path)?;

    let snapshot = Snapshot::build(matches, deliveries, &DEFAULT_TEAM_ALIASES)
        .context("build snapshot")?;

    println!(
        "Loaded {} matches, {} joined deliveries ({} dropped without match context)",
        snapshot.matches.len(),
        snapshot.joined.len(),
        snapshot.dropped_events
    );

    let boards = rankings::all_leaderboards(&snapshot);
    for board in &boards {
        println!();
        println!("== {} ==", board.title);
        if board.rows.is_empty() {
            println!("(no qualifying entries)");
            continue;
        }
        for row in board.rows.iter().take(TOP_N) {
            match &row.team {
                Some(team) => println!(
                    "{:>3}. {:<30} {:>8}  {}",
                    row.rank, row.name, row.value, team
                ),
                None => println!("{:>3}. {:<30} {:>8}", row.rank, row.name, row.value),
            }
        }
    }

    if let Ok(raw) = env::var("IPL_EXPORT_XLSX") {
        let path = PathBuf::from(raw.trim());
        let report = export::export_leaderboards(&path, &boards)?;
        println!();
        println!(
            "Exported {} sheets ({} rows) to {}",
            report.sheets,
            report.rows,
            path.display()
        );
    }

    Ok(())
}

fn env_path(var: &str, default: &str) -> PathBuf {
    env::var(var)
        .map(|s| PathBuf::from(s.trim().to_string()))
        .unwrap_or_else(|_| PathBuf::from(default))
}
