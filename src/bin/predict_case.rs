use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use ipl_terminal::dataset;
use ipl_terminal::normalize::DEFAULT_TEAM_ALIASES;
use ipl_terminal::predict::{
    self, BatterContext, BowlerContext, FormRunsModel, FormWicketsModel, MatchContext,
    WinRateModel,
};
use ipl_terminal::rolling::{self, RollingForm};
use ipl_terminal::snapshot::Snapshot;

#[derive(Debug, serde::Deserialize)]
struct PredictCase {
    matches_csv: PathBuf,
    deliveries_csv: PathBuf,
    task: String,
    #[serde(default)]
    team1: Option<String>,
    #[serde(default)]
    team2: Option<String>,
    #[serde(default)]
    venue: Option<String>,
    #[serde(default)]
    toss_winner: Option<String>,
    #[serde(default)]
    toss_decision: Option<String>,
    #[serde(default)]
    batter: Option<String>,
    #[serde(default)]
    bowler: Option<String>,
    #[serde(default)]
    opponent: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/predict_case.json"));

    let raw = fs::read_to_string(&path)?;
    let case: PredictCase = serde_json::from_str(&raw)?;

    let matches = dataset::load_matches(&case.matches_csv)?;
    let deliveries = dataset::load_deliveries(&case.deliveries_csv)?;
    let snapshot = Snapshot::build(matches, deliveries, &DEFAULT_TEAM_ALIASES)?;

    // An optional precomputed rolling stats table takes priority over
    // recomputing trailing form from the full delivery history.
    let precomputed: HashMap<String, RollingForm> = match std::env::var("IPL_ROLLING_STATS_CSV") {
        Ok(raw) => {
            let rows = dataset::load_rolling_stats(&PathBuf::from(raw.trim()))?;
            rolling::form_index(&rows)
        }
        Err(_) => HashMap::new(),
    };

    // This binary is intentionally simple: it loads one case file, runs the
    // baseline models against the snapshot and prints the point estimate.
    match case.task.as_str() {
        "winner" => {
            let model = WinRateModel::from_snapshot(&snapshot);
            let winner = predict::predict_winner(
                &model,
                MatchContext {
                    team1: case.team1,
                    team2: case.team2,
                    venue: case.venue,
                    toss_winner: case.toss_winner,
                    toss_decision: case.toss_decision,
                },
            )?;
            println!("Predicted winner: {winner}");
        }
        "batter_runs" => {
            let form = case.batter.as_deref().and_then(|name| {
                precomputed
                    .get(name)
                    .copied()
                    .or_else(|| rolling::batter_form(&snapshot, name))
            });
            let runs = predict::predict_batter_runs(
                &FormRunsModel,
                BatterContext {
                    batter: case.batter,
                    opponent: case.opponent,
                    venue: case.venue,
                    form,
                },
            )?;
            println!("Predicted runs: {runs:.1}");
        }
        "bowler_wickets" => {
            let form = case.bowler.as_deref().and_then(|name| {
                precomputed
                    .get(name)
                    .copied()
                    .or_else(|| rolling::bowler_form(&snapshot, name))
            });
            let wickets = predict::predict_bowler_wickets(
                &FormWicketsModel,
                BowlerContext {
                    bowler: case.bowler,
                    opponent: case.opponent,
                    venue: case.venue,
                    form,
                },
            )?;
            println!("Predicted wickets: {wickets}");
        }
        other => anyhow::bail!("unknown task {other:?} (expected winner, batter_runs or bowler_wickets)"),
    }

    Ok(())
}
