use std::collections::HashMap;

use crate::snapshot::{JoinedDelivery, Snapshot, season_year};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Batter,
    Bowler,
}

/// Latest team affiliation per player: the side value attached to each
/// player's chronologically last appearance, ordered by (season, seq).
///
/// Players with zero appearances are absent from the map; this is an
/// annotation source only and never decides leaderboard membership.
pub fn latest_teams(snapshot: &Snapshot, role: Role) -> HashMap<String, String> {
    // (season year, season label, seq) per player; seq is unique so the
    // ordering is total and the result does not depend on iteration order.
    let mut best: HashMap<&str, (u32, &str, usize, &str)> = HashMap::new();

    for row in &snapshot.joined {
        let (player, team) = player_and_team(row, role);
        let candidate = (
            season_year(&row.season).unwrap_or(0),
            row.season.as_str(),
            row.seq,
            team,
        );
        match best.get(player) {
            Some(current) if (current.0, current.1, current.2) > (candidate.0, candidate.1, candidate.2) => {}
            _ => {
                best.insert(player, candidate);
            }
        }
    }

    best.into_iter()
        .map(|(player, (_, _, _, team))| (player.to_string(), team.to_string()))
        .collect()
}

fn player_and_team<'a>(row: &'a JoinedDelivery, role: Role) -> (&'a str, &'a str) {
    match role {
        Role::Batter => (row.batter.as_str(), row.batting_team.as_str()),
        Role::Bowler => (row.bowler.as_str(), row.bowling_team.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DeliveryRow, MatchRow};
    use crate::normalize::AliasMap;

    fn match_row(id: u64, season: &str) -> MatchRow {
        MatchRow {
            id,
            season: season.to_string(),
            venue: "V".to_string(),
            team1: "T1".to_string(),
            team2: "T2".to_string(),
            toss_winner: "T1".to_string(),
            toss_decision: "bat".to_string(),
            winner: None,
        }
    }

    fn delivery(match_id: u64, batter: &str, batting_team: &str) -> DeliveryRow {
        DeliveryRow {
            match_id,
            batting_team: batting_team.to_string(),
            bowling_team: "T2".to_string(),
            batter: batter.to_string(),
            bowler: "B1".to_string(),
            batsman_runs: 1,
            total_runs: 1,
            is_wicket: 0,
            fielder: None,
        }
    }

    #[test]
    fn latest_season_wins() {
        let matches = vec![match_row(1, "2019"), match_row(2, "2021")];
        let deliveries = vec![
            delivery(2, "A", "Punjab Kings"),
            delivery(1, "A", "Delhi Capitals"),
        ];
        let snap = Snapshot::build(matches, deliveries, &AliasMap::default_ipl()).unwrap();
        let teams = latest_teams(&snap, Role::Batter);
        assert_eq!(teams.get("A").map(String::as_str), Some("Punjab Kings"));
    }

    #[test]
    fn ties_within_a_season_resolve_by_input_order() {
        let matches = vec![match_row(1, "2020"), match_row(2, "2020")];
        let deliveries = vec![
            delivery(1, "A", "Delhi Capitals"),
            delivery(2, "A", "Punjab Kings"),
        ];
        let snap = Snapshot::build(matches, deliveries, &AliasMap::default_ipl()).unwrap();
        let teams = latest_teams(&snap, Role::Batter);
        // seq 1 is the later appearance within the same season.
        assert_eq!(teams.get("A").map(String::as_str), Some("Punjab Kings"));
    }

    #[test]
    fn player_without_appearances_is_absent() {
        let snap = Snapshot::build(
            vec![match_row(1, "2020")],
            vec![delivery(1, "A", "Delhi Capitals")],
            &AliasMap::default_ipl(),
        )
        .unwrap();
        let teams = latest_teams(&snap, Role::Batter);
        assert!(!teams.contains_key("Z"));
        // Bowler map is keyed independently of the batter map.
        let bowlers = latest_teams(&snap, Role::Bowler);
        assert!(bowlers.contains_key("B1"));
        assert!(!bowlers.contains_key("A"));
    }
}
