use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::rolling::RollingForm;
use crate::snapshot::Snapshot;

pub const WINNER_FEATURE_NAMES: [&str; 5] =
    ["team1", "team2", "venue", "toss_winner", "toss_decision"];
pub const BATTER_FEATURE_NAMES: [&str; 4] =
    ["avg_last_5", "avg_last_10", "opponent", "venue"];
pub const BOWLER_FEATURE_NAMES: [&str; 4] =
    ["avg_last_5", "avg_last_10", "opponent", "venue"];

/// Fully-specified feature record for the match winner model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchFeatures {
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub toss_winner: String,
    pub toss_decision: String,
}

/// Feature record for the batter runs model: trailing form plus the
/// opposing side and venue. The batter's name is presentation context
/// only and is not part of the model schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatterFeatures {
    pub avg_last_5: f64,
    pub avg_last_10: f64,
    pub opponent: String,
    pub venue: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BowlerFeatures {
    pub avg_last_5: f64,
    pub avg_last_10: f64,
    pub opponent: String,
    pub venue: String,
}

/// Partially-specified user context; validated into `MatchFeatures` before
/// any model sees it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchContext {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub venue: Option<String>,
    pub toss_winner: Option<String>,
    pub toss_decision: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatterContext {
    /// Display label only; never required and never forwarded to the model.
    pub batter: Option<String>,
    pub opponent: Option<String>,
    pub venue: Option<String>,
    pub form: Option<RollingForm>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BowlerContext {
    /// Display label only; never required and never forwarded to the model.
    pub bowler: Option<String>,
    pub opponent: Option<String>,
    pub venue: Option<String>,
    pub form: Option<RollingForm>,
}

impl MatchContext {
    pub fn into_features(self) -> Result<MatchFeatures, EngineError> {
        Ok(MatchFeatures {
            team1: required(self.team1, "team1")?,
            team2: required(self.team2, "team2")?,
            venue: required(self.venue, "venue")?,
            toss_winner: required(self.toss_winner, "toss_winner")?,
            toss_decision: required(self.toss_decision, "toss_decision")?,
        })
    }
}

impl BatterContext {
    pub fn into_features(self) -> Result<BatterFeatures, EngineError> {
        let form = self
            .form
            .ok_or(EngineError::MissingContext { field: "avg_last_5" })?;
        Ok(BatterFeatures {
            avg_last_5: form.avg_last_5,
            avg_last_10: form.avg_last_10,
            opponent: required(self.opponent, "opponent")?,
            venue: required(self.venue, "venue")?,
        })
    }
}

impl BowlerContext {
    pub fn into_features(self) -> Result<BowlerFeatures, EngineError> {
        let form = self
            .form
            .ok_or(EngineError::MissingContext { field: "avg_last_5" })?;
        Ok(BowlerFeatures {
            avg_last_5: form.avg_last_5,
            avg_last_10: form.avg_last_10,
            opponent: required(self.opponent, "opponent")?,
            venue: required(self.venue, "venue")?,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, EngineError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(EngineError::MissingContext { field }),
    }
}

/// Externally supplied match winner model. The engine treats it as a pure
/// function and never mutates or retrains it.
pub trait WinnerModel {
    fn predict(&self, features: &MatchFeatures) -> Result<String>;
}

pub trait RunsModel {
    fn predict(&self, features: &BatterFeatures) -> Result<f64>;
}

pub trait WicketsModel {
    fn predict(&self, features: &BowlerFeatures) -> Result<f64>;
}

/// Winner prediction: label returned unmodified.
pub fn predict_winner(model: &dyn WinnerModel, context: MatchContext) -> Result<String> {
    let features = context.into_features()?;
    model.predict(&features)
}

/// Batter runs: continuous quantity, rounded to one decimal for display.
pub fn predict_batter_runs(model: &dyn RunsModel, context: BatterContext) -> Result<f64> {
    let features = context.into_features()?;
    let raw = model.predict(&features)?;
    Ok((raw * 10.0).round() / 10.0)
}

/// Bowler wickets: a count, rounded to the nearest whole number.
pub fn predict_bowler_wickets(model: &dyn WicketsModel, context: BowlerContext) -> Result<u32> {
    let features = context.into_features()?;
    let raw = model.predict(&features)?;
    Ok(raw.max(0.0).round() as u32)
}

/// Baseline winner model: picks the side with more historical wins in the
/// snapshot; the toss winner breaks ties when it is one of the two sides.
#[derive(Debug, Clone)]
pub struct WinRateModel {
    wins: HashMap<String, u64>,
}

impl WinRateModel {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut wins: HashMap<String, u64> = HashMap::new();
        for m in &snapshot.matches {
            if let Some(winner) = &m.winner {
                *wins.entry(winner.clone()).or_insert(0) += 1;
            }
        }
        Self { wins }
    }

    fn wins_for(&self, team: &str) -> u64 {
        self.wins.get(team).copied().unwrap_or(0)
    }
}

impl WinnerModel for WinRateModel {
    fn predict(&self, features: &MatchFeatures) -> Result<String> {
        let w1 = self.wins_for(&features.team1);
        let w2 = self.wins_for(&features.team2);
        if w1 > w2 {
            return Ok(features.team1.clone());
        }
        if w2 > w1 {
            return Ok(features.team2.clone());
        }
        if features.toss_winner == features.team1 || features.toss_winner == features.team2 {
            return Ok(features.toss_winner.clone());
        }
        Ok(features.team1.clone())
    }
}

/// Baseline form models: recent form weighted over the longer window.
const FORM_RECENT_WEIGHT: f64 = 0.6;

#[derive(Debug, Clone, Copy, Default)]
pub struct FormRunsModel;

impl RunsModel for FormRunsModel {
    fn predict(&self, features: &BatterFeatures) -> Result<f64> {
        Ok(FORM_RECENT_WEIGHT * features.avg_last_5
            + (1.0 - FORM_RECENT_WEIGHT) * features.avg_last_10)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormWicketsModel;

impl WicketsModel for FormWicketsModel {
    fn predict(&self, features: &BowlerFeatures) -> Result<f64> {
        Ok(FORM_RECENT_WEIGHT * features.avg_last_5
            + (1.0 - FORM_RECENT_WEIGHT) * features.avg_last_10)
    }
}
