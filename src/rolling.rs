use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dataset::RollingStatsRow;
use crate::snapshot::{JoinedDelivery, Snapshot, season_order};

/// Trailing averages over a player's most recent appearances, as of the
/// latest data in the snapshot. Fewer than N appearances average over
/// however many exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingForm {
    pub avg_last_5: f64,
    pub avg_last_10: f64,
}

/// Trailing run averages for a batter. None if the batter never faced a
/// delivery in the snapshot.
pub fn batter_form(snapshot: &Snapshot, batter: &str) -> Option<RollingForm> {
    let series = appearance_series(snapshot, |row| {
        (row.batter == batter).then_some(row.batsman_runs as f64)
    });
    form_from_series(&series)
}

/// Trailing wicket averages for a bowler.
pub fn bowler_form(snapshot: &Snapshot, bowler: &str) -> Option<RollingForm> {
    let series = appearance_series(snapshot, |row| {
        (row.bowler == bowler).then_some(if row.is_wicket { 1.0 } else { 0.0 })
    });
    form_from_series(&series)
}

/// Index over a precomputed rolling stats table, the alternative entry
/// point when full-history recomputation is skipped.
pub fn form_index(rows: &[RollingStatsRow]) -> HashMap<String, RollingForm> {
    rows.iter()
        .map(|r| {
            (
                r.player_id.clone(),
                RollingForm {
                    avg_last_5: r.avg_last_5,
                    avg_last_10: r.avg_last_10,
                },
            )
        })
        .collect()
}

/// Per-appearance totals for one player, one entry per match, in
/// chronological order (season, then seq of the player's first delivery
/// in that match).
fn appearance_series<F>(snapshot: &Snapshot, select: F) -> Vec<f64>
where
    F: Fn(&JoinedDelivery) -> Option<f64>,
{
    // match_id -> (season, first seq, total)
    let mut per_match: HashMap<u64, (String, usize, f64)> = HashMap::new();
    for row in &snapshot.joined {
        let Some(value) = select(row) else { continue };
        per_match
            .entry(row.match_id)
            .and_modify(|(_, first_seq, total)| {
                *first_seq = (*first_seq).min(row.seq);
                *total += value;
            })
            .or_insert_with(|| (row.season.clone(), row.seq, value));
    }

    let mut appearances: Vec<(String, usize, f64)> = per_match.into_values().collect();
    appearances.sort_by(|a, b| season_order(&a.0, &b.0).then_with(|| a.1.cmp(&b.1)));
    appearances.into_iter().map(|(_, _, total)| total).collect()
}

fn form_from_series(series: &[f64]) -> Option<RollingForm> {
    if series.is_empty() {
        return None;
    }
    Some(RollingForm {
        avg_last_5: trailing_avg(series, 5),
        avg_last_10: trailing_avg(series, 10),
    })
}

fn trailing_avg(series: &[f64], n: usize) -> f64 {
    let tail = &series[series.len().saturating_sub(n)..];
    tail.iter().sum::<f64>() / tail.len() as f64
}
