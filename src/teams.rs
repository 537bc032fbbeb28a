//! Static franchise reference data
//!
//! One entry per franchise keyed by its play-by-play abbreviation, plus the
//! relocation aliases older seasons still carry. The registry is checked
//! against every loaded dataset so an unknown abbreviation fails the load
//! instead of silently dropping a team from the league averages.

use polars::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use thiserror::Error;

use crate::utils::str_values;

/// Team reference record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub abbr: &'static str,
    pub name: &'static str,
    pub nickname: &'static str,
    pub color: &'static str,
    pub color2: &'static str,
}

impl Team {
    /// ESPN logo image
    pub fn logo_url(&self) -> String {
        format!(
            "https://a.espncdn.com/i/teamlogos/nfl/500/{}.png",
            self.abbr.to_lowercase()
        )
    }

    /// nflverse wordmark image
    pub fn wordmark_url(&self) -> String {
        format!(
            "https://github.com/nflverse/nflfastR-data/raw/master/wordmarks/{}.png",
            self.abbr
        )
    }
}

pub const TEAMS: &[Team] = &[
    Team { abbr: "ARI", name: "Arizona Cardinals", nickname: "Cardinals", color: "#97233F", color2: "#000000" },
    Team { abbr: "ATL", name: "Atlanta Falcons", nickname: "Falcons", color: "#A71930", color2: "#000000" },
    Team { abbr: "BAL", name: "Baltimore Ravens", nickname: "Ravens", color: "#241773", color2: "#9E7C0C" },
    Team { abbr: "BUF", name: "Buffalo Bills", nickname: "Bills", color: "#00338D", color2: "#C60C30" },
    Team { abbr: "CAR", name: "Carolina Panthers", nickname: "Panthers", color: "#0085CA", color2: "#000000" },
    Team { abbr: "CHI", name: "Chicago Bears", nickname: "Bears", color: "#0B162A", color2: "#C83803" },
    Team { abbr: "CIN", name: "Cincinnati Bengals", nickname: "Bengals", color: "#FB4F14", color2: "#000000" },
    Team { abbr: "CLE", name: "Cleveland Browns", nickname: "Browns", color: "#FF3C00", color2: "#311D00" },
    Team { abbr: "DAL", name: "Dallas Cowboys", nickname: "Cowboys", color: "#002244", color2: "#B0B7BC" },
    Team { abbr: "DEN", name: "Denver Broncos", nickname: "Broncos", color: "#002244", color2: "#FB4F14" },
    Team { abbr: "DET", name: "Detroit Lions", nickname: "Lions", color: "#0076B6", color2: "#B0B7BC" },
    Team { abbr: "GB", name: "Green Bay Packers", nickname: "Packers", color: "#203731", color2: "#FFB612" },
    Team { abbr: "HOU", name: "Houston Texans", nickname: "Texans", color: "#03202F", color2: "#A71930" },
    Team { abbr: "IND", name: "Indianapolis Colts", nickname: "Colts", color: "#002C5F", color2: "#A2AAAD" },
    Team { abbr: "JAX", name: "Jacksonville Jaguars", nickname: "Jaguars", color: "#006778", color2: "#D7A22A" },
    Team { abbr: "KC", name: "Kansas City Chiefs", nickname: "Chiefs", color: "#E31837", color2: "#FFB612" },
    Team { abbr: "LA", name: "Los Angeles Rams", nickname: "Rams", color: "#003594", color2: "#FFD100" },
    Team { abbr: "LAC", name: "Los Angeles Chargers", nickname: "Chargers", color: "#007BC7", color2: "#FFC20E" },
    Team { abbr: "LV", name: "Las Vegas Raiders", nickname: "Raiders", color: "#000000", color2: "#A5ACAF" },
    Team { abbr: "MIA", name: "Miami Dolphins", nickname: "Dolphins", color: "#008E97", color2: "#F58220" },
    Team { abbr: "MIN", name: "Minnesota Vikings", nickname: "Vikings", color: "#4F2683", color2: "#FFC62F" },
    Team { abbr: "NE", name: "New England Patriots", nickname: "Patriots", color: "#002244", color2: "#C60C30" },
    Team { abbr: "NO", name: "New Orleans Saints", nickname: "Saints", color: "#D3BC8D", color2: "#101820" },
    Team { abbr: "NYG", name: "New York Giants", nickname: "Giants", color: "#0B2265", color2: "#A71930" },
    Team { abbr: "NYJ", name: "New York Jets", nickname: "Jets", color: "#125740", color2: "#000000" },
    Team { abbr: "PHI", name: "Philadelphia Eagles", nickname: "Eagles", color: "#004C54", color2: "#A5ACAF" },
    Team { abbr: "PIT", name: "Pittsburgh Steelers", nickname: "Steelers", color: "#000000", color2: "#FFB612" },
    Team { abbr: "SEA", name: "Seattle Seahawks", nickname: "Seahawks", color: "#002244", color2: "#69BE28" },
    Team { abbr: "SF", name: "San Francisco 49ers", nickname: "49ers", color: "#AA0000", color2: "#B3995D" },
    Team { abbr: "TB", name: "Tampa Bay Buccaneers", nickname: "Buccaneers", color: "#A71930", color2: "#322F2B" },
    Team { abbr: "TEN", name: "Tennessee Titans", nickname: "Titans", color: "#002244", color2: "#4B92DB" },
    Team { abbr: "WAS", name: "Washington Commanders", nickname: "Commanders", color: "#5A1414", color2: "#FFB612" },
];

/// Historical abbreviation → current abbreviation
pub const TEAM_ALIASES: &[(&str, &str)] = &[
    ("OAK", "LV"),
    ("SD", "LAC"),
    ("STL", "LA"),
];

/// Play columns holding team abbreviations
pub const TEAM_COLUMNS: &[&str] = &["posteam", "defteam", "home_team", "away_team", "td_team"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TeamError {
    #[error("unknown team '{0}'")]
    Unknown(String),

    #[error("dataset contains unknown team abbreviations: {0:?}")]
    UnknownInDataset(Vec<String>),
}

/// Lookup over [`TEAMS`] by abbreviation, alias or nickname
#[derive(Debug)]
pub struct TeamRegistry {
    by_key: FxHashMap<String, usize>,
}

impl Default for TeamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamRegistry {
    pub fn new() -> Self {
        let mut by_key = FxHashMap::default();
        for (idx, team) in TEAMS.iter().enumerate() {
            by_key.insert(team.abbr.to_ascii_lowercase(), idx);
            by_key.insert(team.nickname.to_ascii_lowercase(), idx);
        }
        for (alias, abbr) in TEAM_ALIASES {
            if let Some(&idx) = by_key.get(&abbr.to_ascii_lowercase()) {
                by_key.insert(alias.to_ascii_lowercase(), idx);
            }
        }
        Self { by_key }
    }

    /// Resolve an abbreviation, alias or nickname (case-insensitive)
    pub fn resolve(&self, key: &str) -> Result<&'static Team, TeamError> {
        self.by_key
            .get(&key.trim().to_ascii_lowercase())
            .map(|&idx| &TEAMS[idx])
            .ok_or_else(|| TeamError::Unknown(key.to_string()))
    }

    /// All teams sorted by nickname, the order used by the team selector
    pub fn by_nickname(&self) -> Vec<&'static Team> {
        let mut teams: Vec<&'static Team> = TEAMS.iter().collect();
        teams.sort_by(|a, b| a.nickname.cmp(b.nickname));
        teams
    }

    /// Check every team column of a loaded dataset against the registry
    ///
    /// Aliases are expected to be rewritten by the loader already, so only
    /// current abbreviations pass.
    pub fn validate_frame(&self, plays: &DataFrame) -> anyhow::Result<()> {
        let current: FxHashSet<&str> = TEAMS.iter().map(|t| t.abbr).collect();
        let mut unknown: Vec<String> = Vec::new();

        for &name in TEAM_COLUMNS {
            if plays.column(name).is_err() {
                continue;
            }
            let distinct = plays
                .clone()
                .lazy()
                .select([col(name).drop_nulls().unique()])
                .collect()?;
            for value in str_values(&distinct, name)?.into_iter().flatten() {
                if !current.contains(value.as_str()) && !unknown.contains(&value) {
                    unknown.push(value);
                }
            }
        }

        if unknown.is_empty() {
            Ok(())
        } else {
            unknown.sort();
            Err(TeamError::UnknownInDataset(unknown).into())
        }
    }
}

/// Rewrite relocation aliases in a team column to current abbreviations
pub fn canonical_team_expr(name: &str) -> Expr {
    let source = col(name).cast(DataType::String);
    let mut expr = source.clone();
    for (alias, abbr) in TEAM_ALIASES {
        expr = when(source.clone().eq(lit(*alias)))
            .then(lit(*abbr))
            .otherwise(expr);
    }
    expr.alias(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_franchises() {
        assert_eq!(TEAMS.len(), 32);
        let registry = TeamRegistry::new();
        for team in TEAMS {
            assert_eq!(registry.resolve(team.abbr).unwrap().abbr, team.abbr);
            assert_eq!(registry.resolve(team.nickname).unwrap().abbr, team.abbr);
        }
    }

    #[test]
    fn test_resolve_aliases_and_nicknames() {
        let registry = TeamRegistry::new();
        assert_eq!(registry.resolve("Raiders").unwrap().abbr, "LV");
        assert_eq!(registry.resolve("oak").unwrap().abbr, "LV");
        assert_eq!(registry.resolve("SD").unwrap().abbr, "LAC");
        assert_eq!(registry.resolve("rams").unwrap().abbr, "LA");
        assert_eq!(
            registry.resolve("Oilers"),
            Err(TeamError::Unknown("Oilers".to_string()))
        );
    }

    #[test]
    fn test_by_nickname_is_sorted() {
        let teams = TeamRegistry::new().by_nickname();
        assert_eq!(teams.first().unwrap().nickname, "49ers");
        assert_eq!(teams.last().unwrap().nickname, "Vikings");
    }

    #[test]
    fn test_validate_frame_flags_unknown() {
        let registry = TeamRegistry::new();
        let good = df![
            "posteam" => &[Some("NE"), None],
            "defteam" => &[Some("BUF"), None],
        ].unwrap();
        assert!(registry.validate_frame(&good).is_ok());

        let bad = df![
            "posteam" => &["NE", "XYZ"],
            "home_team" => &["OAK", "NE"],
        ].unwrap();
        let err = registry.validate_frame(&bad).unwrap_err().to_string();
        assert!(err.contains("OAK"));
        assert!(err.contains("XYZ"));
    }

    #[test]
    fn test_canonical_team_expr_rewrites_aliases() {
        let df = df!["home_team" => &["OAK", "SD", "NE"]].unwrap();
        let out = df
            .lazy()
            .select([canonical_team_expr("home_team")])
            .collect()
            .unwrap();
        let values = str_values(&out, "home_team").unwrap();
        assert_eq!(
            values,
            vec![Some("LV".to_string()), Some("LAC".to_string()), Some("NE".to_string())]
        );
    }
}
