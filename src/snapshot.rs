use std::cmp::Ordering;
use std::collections::HashMap;

use crate::dataset::{DeliveryRow, MatchRow};
use crate::error::EngineError;
use crate::normalize::AliasMap;

/// A delivery joined with its match context. `seq` is the 0-based position
/// of the delivery in the input table and serves as the documented
/// within-season tiebreak for every chronological ordering downstream.
#[derive(Debug, Clone)]
pub struct JoinedDelivery {
    pub seq: usize,
    pub match_id: u64,
    pub season: String,
    pub venue: String,
    pub batting_team: String,
    pub bowling_team: String,
    pub batter: String,
    pub bowler: String,
    pub batsman_runs: u32,
    pub total_runs: u32,
    pub is_wicket: bool,
    pub fielder: Option<String>,
}

/// Immutable working set handed to every component. Built once at setup;
/// the engine itself never mutates it, so concurrent readers are safe.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub matches: Vec<MatchRow>,
    pub joined: Vec<JoinedDelivery>,
    /// Deliveries whose match id had no match row. Dropped by design
    /// (strict inner join), counted so callers can assert on the loss.
    pub dropped_events: usize,
}

impl Snapshot {
    /// Normalizes both tables with the alias map, then inner-joins
    /// deliveries to matches on the match identifier. Duplicate match ids
    /// would silently duplicate event rows, so they are fatal here.
    pub fn build(
        mut matches: Vec<MatchRow>,
        deliveries: Vec<DeliveryRow>,
        aliases: &AliasMap,
    ) -> Result<Self, EngineError> {
        for row in &mut matches {
            aliases.normalize_match(row);
        }

        let mut by_id: HashMap<u64, usize> = HashMap::with_capacity(matches.len());
        for (idx, row) in matches.iter().enumerate() {
            if by_id.insert(row.id, idx).is_some() {
                return Err(EngineError::Configuration(format!(
                    "duplicate match id {} in match table",
                    row.id
                )));
            }
        }

        let mut joined = Vec::with_capacity(deliveries.len());
        let mut dropped_events = 0usize;
        for (seq, mut delivery) in deliveries.into_iter().enumerate() {
            let Some(&idx) = by_id.get(&delivery.match_id) else {
                dropped_events += 1;
                continue;
            };
            aliases.normalize_delivery(&mut delivery);
            let m = &matches[idx];
            joined.push(JoinedDelivery {
                seq,
                match_id: delivery.match_id,
                season: m.season.clone(),
                venue: m.venue.clone(),
                batting_team: delivery.batting_team,
                bowling_team: delivery.bowling_team,
                batter: delivery.batter,
                bowler: delivery.bowler,
                batsman_runs: delivery.batsman_runs,
                total_runs: delivery.total_runs,
                is_wicket: delivery.is_wicket != 0,
                fielder: delivery.fielder,
            });
        }

        Ok(Self {
            matches,
            joined,
            dropped_events,
        })
    }
}

/// Leading year of a season label. Handles both plain ("2020") and split
/// ("2007/08") labels.
pub fn season_year(label: &str) -> Option<u32> {
    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}

/// Chronological ordering for season labels: leading-year key first,
/// lexical comparison as the fallback for labels without one.
pub fn season_order(a: &str, b: &str) -> Ordering {
    let ka = season_year(a).unwrap_or(0);
    let kb = season_year(b).unwrap_or(0);
    ka.cmp(&kb).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DeliveryRow, MatchRow};

    fn match_row(id: u64, season: &str) -> MatchRow {
        MatchRow {
            id,
            season: season.to_string(),
            venue: "Wankhede Stadium".to_string(),
            team1: "Mumbai Indians".to_string(),
            team2: "Chennai Super Kings".to_string(),
            toss_winner: "Mumbai Indians".to_string(),
            toss_decision: "bat".to_string(),
            winner: Some("Mumbai Indians".to_string()),
        }
    }

    fn delivery(match_id: u64, batter: &str, runs: u32) -> DeliveryRow {
        DeliveryRow {
            match_id,
            batting_team: "Mumbai Indians".to_string(),
            bowling_team: "Chennai Super Kings".to_string(),
            batter: batter.to_string(),
            bowler: "D Chahar".to_string(),
            batsman_runs: runs,
            total_runs: runs,
            is_wicket: 0,
            fielder: None,
        }
    }

    #[test]
    fn join_drops_orphan_deliveries_and_counts_them() {
        let matches = vec![match_row(1, "2020")];
        let deliveries = vec![delivery(1, "A", 4), delivery(99, "B", 6)];
        let snap = Snapshot::build(matches, deliveries, &AliasMap::default_ipl()).unwrap();
        assert_eq!(snap.joined.len(), 1);
        assert_eq!(snap.dropped_events, 1);
        assert_eq!(snap.joined[0].batter, "A");
    }

    #[test]
    fn joined_rows_carry_match_context() {
        let matches = vec![match_row(7, "2019")];
        let deliveries = vec![delivery(7, "A", 1)];
        let snap = Snapshot::build(matches, deliveries, &AliasMap::default_ipl()).unwrap();
        let row = &snap.joined[0];
        assert_eq!(row.season, "2019");
        assert_eq!(row.venue, "Wankhede Stadium");
        assert_eq!(row.match_id, 7);
        assert_eq!(row.seq, 0);
    }

    #[test]
    fn duplicate_match_ids_are_fatal() {
        let matches = vec![match_row(1, "2020"), match_row(1, "2021")];
        let err = Snapshot::build(matches, Vec::new(), &AliasMap::default_ipl()).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn season_ordering_handles_split_labels() {
        assert_eq!(season_year("2007/08"), Some(2007));
        assert_eq!(season_year("2020"), Some(2020));
        assert_eq!(season_year("Winter Cup"), None);
        assert_eq!(season_order("2007/08", "2008"), Ordering::Less);
        assert_eq!(season_order("2020", "2020"), Ordering::Equal);
    }
}
