use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::dataset::{DeliveryRow, MatchRow};
use crate::error::EngineError;

/// Historical franchise labels mapped to the current canonical label.
/// Venue strings are deliberately out of scope: variants of the same ground
/// that differ by an appended city name stay distinct, matching the source
/// data as-is.
const DEFAULT_PAIRS: [(&str, &str); 4] = [
    ("Delhi Daredevils", "Delhi Capitals"),
    ("Kings XI Punjab", "Punjab Kings"),
    ("Rising Pune Supergiant", "Rising Pune Supergiants"),
    ("Royal Challengers Bangalore", "Royal Challengers Bengaluru"),
];

/// Process-wide default map; the binaries share this instead of rebuilding
/// the table per call site.
pub static DEFAULT_TEAM_ALIASES: Lazy<AliasMap> = Lazy::new(AliasMap::default_ipl);

/// Many-to-one mapping from historical alias to canonical team name.
#[derive(Debug, Clone)]
pub struct AliasMap {
    canonical: HashMap<String, String>,
}

impl AliasMap {
    /// Validates the mapping up front: an alias mapping to itself, two
    /// conflicting targets for one alias, or a canonical name that is itself
    /// an alias key would all break normalization idempotence.
    pub fn new<I>(pairs: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut canonical: HashMap<String, String> = HashMap::new();
        for (alias, current) in pairs {
            if alias == current {
                return Err(EngineError::Configuration(format!(
                    "alias {alias:?} maps to itself"
                )));
            }
            if let Some(existing) = canonical.get(&alias)
                && *existing != current
            {
                return Err(EngineError::Configuration(format!(
                    "alias {alias:?} maps to both {existing:?} and {current:?}"
                )));
            }
            canonical.insert(alias, current);
        }
        for current in canonical.values() {
            if canonical.contains_key(current) {
                return Err(EngineError::Configuration(format!(
                    "canonical name {current:?} is itself an alias key"
                )));
            }
        }
        Ok(Self { canonical })
    }

    pub fn default_ipl() -> Self {
        // The fixed default list trivially satisfies the `new` invariants.
        let canonical = DEFAULT_PAIRS
            .iter()
            .map(|(alias, current)| (alias.to_string(), current.to_string()))
            .collect();
        Self { canonical }
    }

    /// Canonical form of a team label; unmapped values pass through.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.canonical.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn apply(&self, value: &mut String) {
        if let Some(current) = self.canonical.get(value.as_str()) {
            value.clone_from(current);
        }
    }

    fn apply_opt(&self, value: &mut Option<String>) {
        if let Some(v) = value {
            self.apply(v);
        }
    }

    /// Rewrites every side-valued column of a match row.
    pub fn normalize_match(&self, row: &mut MatchRow) {
        self.apply(&mut row.team1);
        self.apply(&mut row.team2);
        self.apply(&mut row.toss_winner);
        self.apply_opt(&mut row.winner);
    }

    /// Rewrites every side-valued column of a delivery row.
    pub fn normalize_delivery(&self, row: &mut DeliveryRow) {
        self.apply(&mut row.batting_team);
        self.apply(&mut row.bowling_team);
    }
}
