use ipl_terminal::dataset::{DeliveryRow, MatchRow};

pub fn match_row(id: u64, season: &str, winner: Option<&str>) -> MatchRow {
    MatchRow {
        id,
        season: season.to_string(),
        venue: "Wankhede Stadium".to_string(),
        team1: "Mumbai Indians".to_string(),
        team2: "Chennai Super Kings".to_string(),
        toss_winner: "Mumbai Indians".to_string(),
        toss_decision: "bat".to_string(),
        winner: winner.map(str::to_string),
    }
}

pub fn delivery(match_id: u64, batter: &str, bowler: &str, runs: u32) -> DeliveryRow {
    DeliveryRow {
        match_id,
        batting_team: "Mumbai Indians".to_string(),
        bowling_team: "Chennai Super Kings".to_string(),
        batter: batter.to_string(),
        bowler: bowler.to_string(),
        batsman_runs: runs,
        total_runs: runs,
        is_wicket: 0,
        fielder: None,
    }
}
