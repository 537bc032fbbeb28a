//! Per-request filter selection
//!
//! Every report is built from one explicit `Selection`; nothing about the
//! chosen season, team or comparison lives in shared state.

use serde::Serialize;
use thiserror::Error;

use crate::comparison::Comparator;
use crate::config::ServerConfig;
use crate::data::season_key;
use crate::filters::GameType;
use crate::teams::{Team, TeamError, TeamRegistry};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no season selected")]
    NoSeasons,

    #[error("season {season} is outside {first}-{latest}")]
    SeasonOutOfRange { season: i32, first: i32, latest: i32 },

    #[error("invalid season '{0}'")]
    InvalidSeason(String),

    #[error(transparent)]
    Team(#[from] TeamError),
}

/// Parse a comma-separated season list such as `2020,2021`
///
/// An absent or blank list selects the latest configured season.
pub fn parse_seasons(config: &ServerConfig, raw: Option<&str>) -> Result<Vec<i32>, SelectionError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Ok(vec![config.latest_season]);
    }

    let seasons = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .map_err(|_| SelectionError::InvalidSeason(part.to_string()))
        })
        .collect::<Result<Vec<i32>, _>>()?;

    validate_seasons(config, &seasons)
}

/// Validated filters for one team report
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub seasons: Vec<i32>,
    pub game_type: GameType,
    pub team: &'static Team,
    pub comparator: Comparator,
}

/// Check seasons against the configured range; sorted and de-duplicated
pub fn validate_seasons(config: &ServerConfig, seasons: &[i32]) -> Result<Vec<i32>, SelectionError> {
    if seasons.is_empty() {
        return Err(SelectionError::NoSeasons);
    }
    if let Some(&season) = seasons.iter().find(|&&s| !config.contains_season(s)) {
        return Err(SelectionError::SeasonOutOfRange {
            season,
            first: config.first_season,
            latest: config.latest_season,
        });
    }
    Ok(season_key(seasons))
}

impl Selection {
    pub fn new(
        config: &ServerConfig,
        registry: &TeamRegistry,
        seasons: &[i32],
        game_type: GameType,
        team: &str,
        compare: &str,
    ) -> Result<Self, SelectionError> {
        let seasons = validate_seasons(config, seasons)?;
        let team = registry.resolve(team)?;
        let comparator = match Comparator::parse(compare) {
            Comparator::League => Comparator::League,
            Comparator::Team(other) => Comparator::Team(registry.resolve(&other)?.abbr.to_string()),
        };

        Ok(Self { seasons, game_type, team, comparator })
    }

    /// Heading such as `Regular Season - 2021`
    pub fn heading(&self) -> String {
        let seasons: Vec<String> = self.seasons.iter().map(|s| s.to_string()).collect();
        format!("{} - {}", self.game_type.label(), seasons.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_resolves_names() {
        let config = ServerConfig::default();
        let registry = TeamRegistry::new();
        let selection = Selection::new(&config, &registry, &[2021], GameType::Regular, "patriots", "Raiders")
            .unwrap();
        assert_eq!(selection.team.abbr, "NE");
        assert_eq!(selection.comparator, Comparator::Team("LV".to_string()));
        assert_eq!(selection.heading(), "Regular Season - 2021");
    }

    #[test]
    fn test_selection_errors() {
        let config = ServerConfig::default();
        let registry = TeamRegistry::new();

        let err = Selection::new(&config, &registry, &[1999], GameType::All, "NE", "league").unwrap_err();
        assert!(matches!(err, SelectionError::SeasonOutOfRange { season: 1999, .. }));

        let err = Selection::new(&config, &registry, &[], GameType::All, "NE", "league").unwrap_err();
        assert_eq!(err, SelectionError::NoSeasons);

        let err = Selection::new(&config, &registry, &[2020], GameType::All, "XFL", "league").unwrap_err();
        assert_eq!(err, SelectionError::Team(TeamError::Unknown("XFL".to_string())));
    }

    #[test]
    fn test_parse_seasons() {
        let config = ServerConfig::default();
        assert_eq!(parse_seasons(&config, None).unwrap(), vec![2021]);
        assert_eq!(parse_seasons(&config, Some(" ")).unwrap(), vec![2021]);
        assert_eq!(parse_seasons(&config, Some("2021, 2019,2021")).unwrap(), vec![2019, 2021]);
        assert_eq!(
            parse_seasons(&config, Some("twenty")).unwrap_err(),
            SelectionError::InvalidSeason("twenty".to_string())
        );
    }
}
