use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// One delivery (ball) as it appears in the ball-by-ball CSV. Extra columns
/// in the source file (over number, extras breakdown, dismissal kind) are
/// ignored by the header-driven decoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRow {
    pub match_id: u64,
    pub batting_team: String,
    pub bowling_team: String,
    pub batter: String,
    pub bowler: String,
    pub batsman_runs: u32,
    pub total_runs: u32,
    pub is_wicket: u8,
    #[serde(default, deserialize_with = "opt_cell")]
    pub fielder: Option<String>,
}

/// One match row from the match-level CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRow {
    pub id: u64,
    pub season: String,
    pub venue: String,
    pub team1: String,
    pub team2: String,
    pub toss_winner: String,
    pub toss_decision: String,
    /// None for no-result matches (empty or "NA" in the source).
    #[serde(default, deserialize_with = "opt_cell")]
    pub winner: Option<String>,
}

/// Precomputed per-player trailing averages, for deployments that skip
/// recomputing rolling form from the full delivery history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollingStatsRow {
    pub player_id: String,
    pub avg_last_5: f64,
    pub avg_last_10: f64,
}

pub fn load_deliveries(path: &Path) -> Result<Vec<DeliveryRow>> {
    read_csv(path).with_context(|| format!("load deliveries csv {}", path.display()))
}

pub fn load_matches(path: &Path) -> Result<Vec<MatchRow>> {
    read_csv(path).with_context(|| format!("load matches csv {}", path.display()))
}

pub fn load_rolling_stats(path: &Path) -> Result<Vec<RollingStatsRow>> {
    read_csv(path).with_context(|| format!("load rolling stats csv {}", path.display()))
}

fn read_csv<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut out = Vec::new();
    for (idx, row) in reader.deserialize().enumerate() {
        out.push(row.with_context(|| format!("decode csv row {}", idx + 1))?);
    }
    Ok(out)
}

/// The source files mark absent values as an empty cell or the literal "NA".
fn opt_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "NA" {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}
