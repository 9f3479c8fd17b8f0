use std::collections::{HashMap, HashSet};

use crate::affiliation::{self, Role};
use crate::snapshot::{JoinedDelivery, Snapshot};

/// Minimum deliveries bowled to qualify for the "least runs conceded" board.
pub const MIN_BALLS_BOWLED: u64 = 480;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Desc,
    Asc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    /// Dense 1-based rank assigned by post-sort position.
    pub rank: usize,
    pub name: String,
    pub value: u64,
    /// Latest team annotation, where one is resolvable.
    pub team: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    pub title: &'static str,
    pub metric_label: &'static str,
    pub rows: Vec<LeaderboardRow>,
}

/// Every leaderboard the engine produces, in presentation order.
pub fn all_leaderboards(snapshot: &Snapshot) -> Vec<Leaderboard> {
    vec![
        team_wins(snapshot),
        team_total_runs(snapshot),
        team_sixes(snapshot),
        batter_runs(snapshot),
        batter_sixes(snapshot),
        batter_fours(snapshot),
        catches(snapshot),
        bowler_wickets(snapshot),
        bowler_least_runs_conceded(snapshot),
    ]
}

/// Wins per team, from the match table. No-result matches carry no winner
/// and contribute nothing; a team that never won simply does not appear.
pub fn team_wins(snapshot: &Snapshot) -> Leaderboard {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for m in &snapshot.matches {
        if let Some(winner) = &m.winner {
            *totals.entry(winner.as_str()).or_insert(0) += 1;
        }
    }
    Leaderboard {
        title: "Team Ranking by Wins",
        metric_label: "Matches Won",
        rows: rank_rows(owned(totals), Direction::Desc, None),
    }
}

pub fn team_total_runs(snapshot: &Snapshot) -> Leaderboard {
    let totals = sum_by(snapshot, |row| (row.batting_team.as_str(), row.total_runs as u64));
    Leaderboard {
        title: "Team Ranking by Runs",
        metric_label: "Total Runs",
        rows: rank_rows(totals, Direction::Desc, None),
    }
}

pub fn team_sixes(snapshot: &Snapshot) -> Leaderboard {
    let totals = count_by(snapshot, |row| {
        (row.batsman_runs == 6).then_some(row.batting_team.as_str())
    });
    Leaderboard {
        title: "Team Ranking by Sixes",
        metric_label: "Sixes",
        rows: rank_rows(totals, Direction::Desc, None),
    }
}

pub fn batter_runs(snapshot: &Snapshot) -> Leaderboard {
    let teams = affiliation::latest_teams(snapshot, Role::Batter);
    let totals = sum_by(snapshot, |row| (row.batter.as_str(), row.batsman_runs as u64));
    Leaderboard {
        title: "Batsmen Ranking by Runs",
        metric_label: "Total Runs",
        rows: rank_rows(totals, Direction::Desc, Some(&teams)),
    }
}

pub fn batter_sixes(snapshot: &Snapshot) -> Leaderboard {
    let teams = affiliation::latest_teams(snapshot, Role::Batter);
    let totals = count_by(snapshot, |row| {
        (row.batsman_runs == 6).then_some(row.batter.as_str())
    });
    Leaderboard {
        title: "Batsmen Ranking by Sixes",
        metric_label: "Sixes",
        rows: rank_rows(totals, Direction::Desc, Some(&teams)),
    }
}

pub fn batter_fours(snapshot: &Snapshot) -> Leaderboard {
    let teams = affiliation::latest_teams(snapshot, Role::Batter);
    let totals = count_by(snapshot, |row| {
        (row.batsman_runs == 4).then_some(row.batter.as_str())
    });
    Leaderboard {
        title: "Batsmen Ranking by Fours",
        metric_label: "Fours",
        rows: rank_rows(totals, Direction::Desc, Some(&teams)),
    }
}

/// Catches: count of deliveries where the player is recorded as fielder.
/// The team annotation uses the fielder's latest *batting* affiliation,
/// since fielding rows carry no side for the fielder themselves.
pub fn catches(snapshot: &Snapshot) -> Leaderboard {
    let teams = affiliation::latest_teams(snapshot, Role::Batter);
    let totals = count_by(snapshot, |row| row.fielder.as_deref());
    Leaderboard {
        title: "Ranking by Catches",
        metric_label: "Catches",
        rows: rank_rows(totals, Direction::Desc, Some(&teams)),
    }
}

pub fn bowler_wickets(snapshot: &Snapshot) -> Leaderboard {
    let teams = affiliation::latest_teams(snapshot, Role::Bowler);
    let totals = count_by(snapshot, |row| row.is_wicket.then_some(row.bowler.as_str()));
    Leaderboard {
        title: "Bowler Ranking by Wickets",
        metric_label: "Wickets",
        rows: rank_rows(totals, Direction::Desc, Some(&teams)),
    }
}

/// Least runs conceded among bowlers with at least `MIN_BALLS_BOWLED`
/// deliveries. The qualifying set is computed from delivery volume,
/// independently of the ranked metric, and joined on bowler identity
/// before sorting.
pub fn bowler_least_runs_conceded(snapshot: &Snapshot) -> Leaderboard {
    let teams = affiliation::latest_teams(snapshot, Role::Bowler);
    let balls = count_by(snapshot, |row| Some(row.bowler.as_str()));
    let qualified: HashSet<&str> = balls
        .iter()
        .filter(|(_, n)| *n >= MIN_BALLS_BOWLED)
        .map(|(name, _)| name.as_str())
        .collect();

    let conceded = sum_by(snapshot, |row| (row.bowler.as_str(), row.total_runs as u64));
    let filtered: Vec<(String, u64)> = conceded
        .into_iter()
        .filter(|(name, _)| qualified.contains(name.as_str()))
        .collect();

    Leaderboard {
        title: "Bowler Ranking by Least Runs Conceded",
        metric_label: "Runs Conceded",
        rows: rank_rows(filtered, Direction::Asc, Some(&teams)),
    }
}

/// Sorts totals into a deterministic total order (metric in the requested
/// direction, then entity name ascending) and assigns dense 1-based ranks.
fn rank_rows(
    mut totals: Vec<(String, u64)>,
    direction: Direction,
    teams: Option<&HashMap<String, String>>,
) -> Vec<LeaderboardRow> {
    totals.sort_by(|a, b| {
        let by_value = match direction {
            Direction::Desc => b.1.cmp(&a.1),
            Direction::Asc => a.1.cmp(&b.1),
        };
        by_value.then_with(|| a.0.cmp(&b.0))
    });
    totals
        .into_iter()
        .enumerate()
        .map(|(idx, (name, value))| LeaderboardRow {
            rank: idx + 1,
            team: teams.and_then(|t| t.get(&name).cloned()),
            name,
            value,
        })
        .collect()
}

fn sum_by<'a, F>(snapshot: &'a Snapshot, select: F) -> Vec<(String, u64)>
where
    F: Fn(&'a JoinedDelivery) -> (&'a str, u64),
{
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for row in &snapshot.joined {
        let (key, value) = select(row);
        *totals.entry(key).or_insert(0) += value;
    }
    owned(totals)
}

/// Counts rows for which the selector yields a key. Entities never selected
/// get no synthetic zero row.
fn count_by<'a, F>(snapshot: &'a Snapshot, select: F) -> Vec<(String, u64)>
where
    F: Fn(&'a JoinedDelivery) -> Option<&'a str>,
{
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for row in &snapshot.joined {
        if let Some(key) = select(row) {
            *totals.entry(key).or_insert(0) += 1;
        }
    }
    owned(totals)
}

fn owned(totals: HashMap<&str, u64>) -> Vec<(String, u64)> {
    totals
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}
