//! Data Loading and Management
//!
//! Loads season play-by-play tables with Polars and projects them onto the
//! canonical play schema every aggregator relies on. The statistics store is
//! an external collaborator behind [`PlaySource`]; a season it cannot supply is
//! a hard error for that request, never an empty table.

use polars::prelude::*;
use anyhow::{Context, Result, anyhow, bail};
use std::path::{Path, PathBuf};

use crate::teams::{canonical_team_expr, TeamRegistry, TEAM_COLUMNS};
use crate::utils::{require_columns, i64_values};

/// Integer identifier columns
pub const INT_COLUMNS: &[&str] = &["season", "week"];

/// Free-text columns (team columns are listed in [`TEAM_COLUMNS`])
pub const STRING_COLUMNS: &[&str] = &[
    "season_type",
    "play_type",
    "passer",
    "receiver",
    "pass_location",
    "pass_length",
    "yrdln",
];

/// Numeric columns, including every 0/1 indicator
pub const FLOAT_COLUMNS: &[&str] = &[
    "qtr",
    "down",
    "drive",
    "home_score",
    "away_score",
    "yards_gained",
    "yards_after_catch",
    "yardline_100",
    "complete_pass",
    "incomplete_pass",
    "pass_attempt",
    "rush_attempt",
    "pass",
    "interception",
    "touchdown",
    "pass_touchdown",
    "sack",
    "fumble_lost",
    "solo_tackle",
    "assist_tackle",
    "third_down_converted",
    "third_down_failed",
    "goal_to_go",
];

/// Every column of the canonical play schema
pub fn required_columns() -> Vec<&'static str> {
    INT_COLUMNS
        .iter()
        .chain(TEAM_COLUMNS)
        .chain(STRING_COLUMNS)
        .chain(FLOAT_COLUMNS)
        .copied()
        .collect()
}

/// Projection onto the canonical schema: fixed dtypes, team aliases rewritten
pub fn canonical_projection() -> Vec<Expr> {
    let ints = INT_COLUMNS
        .iter()
        .map(|&name| col(name).cast(DataType::Int32));
    let teams = TEAM_COLUMNS.iter().map(|&name| canonical_team_expr(name));
    let strings = STRING_COLUMNS
        .iter()
        .map(|&name| col(name).cast(DataType::String));
    let floats = FLOAT_COLUMNS
        .iter()
        .map(|&name| col(name).cast(DataType::Float64));

    ints.chain(teams).chain(strings).chain(floats).collect()
}

/// Validate and project a raw play table onto the canonical schema
pub fn canonicalize(lazy: LazyFrame, context: &str) -> Result<LazyFrame> {
    require_columns(&lazy, &required_columns(), context)?;
    Ok(lazy.select(canonical_projection()))
}

/// Sorted, de-duplicated season list used as the cache key
pub fn season_key(seasons: &[i32]) -> Vec<i32> {
    let mut key = seasons.to_vec();
    key.sort_unstable();
    key.dedup();
    key
}

/// Provider of raw season play-by-play tables
pub trait PlaySource: Send + Sync {
    /// Short description for logs
    fn describe(&self) -> String;

    /// Load the canonical play table for the given seasons
    fn load_seasons(&self, seasons: &[i32]) -> Result<DataFrame>;
}

/// Reads `play_by_play_{season}.parquet` (or `.csv`) files from a directory
#[derive(Debug, Clone)]
pub struct ParquetDirSource {
    data_dir: PathBuf,
}

impl ParquetDirSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    fn season_path(&self, season: i32, extension: &str) -> PathBuf {
        self.data_dir
            .join(format!("play_by_play_{}.{}", season, extension))
    }

    fn scan_season(&self, season: i32) -> Result<LazyFrame> {
        let parquet = self.season_path(season, "parquet");
        if parquet.exists() {
            return LazyFrame::scan_parquet(&parquet, Default::default())
                .with_context(|| format!("Failed to scan parquet: {}", parquet.display()));
        }

        let csv = self.season_path(season, "csv");
        if csv.exists() {
            return LazyCsvReader::new(&csv)
                .with_has_header(true)
                .with_infer_schema_length(Some(10_000))
                .finish()
                .with_context(|| format!("Failed to scan CSV: {}", csv.display()));
        }

        Err(anyhow!(
            "No play-by-play file for season {} in {}",
            season,
            self.data_dir.display()
        ))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl PlaySource for ParquetDirSource {
    fn describe(&self) -> String {
        format!("play-by-play files in {}", self.data_dir.display())
    }

    fn load_seasons(&self, seasons: &[i32]) -> Result<DataFrame> {
        if seasons.is_empty() {
            bail!("No seasons requested");
        }

        let mut frames = Vec::with_capacity(seasons.len());
        for &season in seasons {
            let lazy = self.scan_season(season)?;
            frames.push(canonicalize(lazy, &format!("season {}", season))?);
        }

        concat(frames, UnionArgs::default())?
            .collect()
            .with_context(|| format!("Failed to load seasons {:?}", seasons))
    }
}

/// Serves seasons out of an in-memory play table
///
/// Used by tests and demos in place of the file store.
#[derive(Debug, Clone)]
pub struct MemorySource {
    plays: DataFrame,
}

impl MemorySource {
    pub fn new(plays: DataFrame) -> Result<Self> {
        let plays = canonicalize(plays.lazy(), "in-memory plays")?.collect()?;
        Ok(Self { plays })
    }

    pub fn available_seasons(&self) -> Result<Vec<i32>> {
        let distinct = self
            .plays
            .clone()
            .lazy()
            .select([col("season").unique()])
            .collect()?;
        let seasons: Vec<i32> = i64_values(&distinct, "season")?
            .into_iter()
            .flatten()
            .map(|s| s as i32)
            .collect();
        Ok(season_key(&seasons))
    }
}

impl PlaySource for MemorySource {
    fn describe(&self) -> String {
        format!("in-memory table ({} plays)", self.plays.height())
    }

    fn load_seasons(&self, seasons: &[i32]) -> Result<DataFrame> {
        let available = self.available_seasons()?;
        let missing: Vec<i32> = seasons
            .iter()
            .copied()
            .filter(|s| !available.contains(s))
            .collect();
        if !missing.is_empty() {
            bail!("Seasons {:?} not available in {}", missing, self.describe());
        }

        let Some(predicate) = seasons
            .iter()
            .map(|&s| col("season").eq(lit(s)))
            .reduce(|acc, e| acc.or(e))
        else {
            bail!("No seasons requested");
        };

        self.plays
            .clone()
            .lazy()
            .filter(predicate)
            .collect()
            .context("Failed to select seasons from in-memory plays")
    }
}

/// Load seasons from a source and check team abbreviations against the registry
pub fn load_scope(
    source: &dyn PlaySource,
    registry: &TeamRegistry,
    seasons: &[i32],
) -> Result<DataFrame> {
    let key = season_key(seasons);
    tracing::info!("Loading seasons {:?} from {}", key, source.describe());

    let plays = source.load_seasons(&key)?;
    registry
        .validate_frame(&plays)
        .with_context(|| format!("Team validation failed for seasons {:?}", key))?;

    tracing::info!("Loaded {} plays for seasons {:?}", plays.height(), key);
    Ok(plays)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_plays() -> DataFrame {
        let n = 2;
        let mut columns: Vec<Column> = Vec::new();
        columns.push(Column::new("season".into(), &[2020i64, 2021]));
        columns.push(Column::new("week".into(), &[1i64, 1]));
        columns.push(Column::new("posteam".into(), &["OAK", "NE"]));
        columns.push(Column::new("defteam".into(), &["NE", "LV"]));
        columns.push(Column::new("home_team".into(), &["NE", "LV"]));
        columns.push(Column::new("away_team".into(), &["OAK", "NE"]));
        columns.push(Column::new("td_team".into(), &[None::<&str>, None]));
        for &name in STRING_COLUMNS {
            columns.push(Column::new(name.into(), vec![None::<&str>; n]));
        }
        for &name in FLOAT_COLUMNS {
            columns.push(Column::new(name.into(), vec![0i32; n]));
        }
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_canonicalize_casts_and_rewrites_aliases() {
        let plays = canonicalize(raw_plays().lazy(), "test").unwrap().collect().unwrap();

        assert_eq!(plays.column("season").unwrap().dtype(), &DataType::Int32);
        assert_eq!(plays.column("sack").unwrap().dtype(), &DataType::Float64);
        assert!(TeamRegistry::new().validate_frame(&plays).is_ok());
    }

    #[test]
    fn test_canonicalize_missing_column() {
        let plays = raw_plays().drop("sack").unwrap();
        let err = canonicalize(plays.lazy(), "season 2019").err().expect("expected error").to_string();
        assert!(err.contains("sack"));
    }

    #[test]
    fn test_memory_source_selects_seasons() {
        let source = MemorySource::new(raw_plays()).unwrap();
        assert_eq!(source.available_seasons().unwrap(), vec![2020, 2021]);

        let plays = source.load_seasons(&[2021]).unwrap();
        assert_eq!(plays.height(), 1);

        assert!(source.load_seasons(&[2019]).is_err());
    }

    #[test]
    fn test_parquet_dir_source_missing_season() {
        let source = ParquetDirSource::new("/nonexistent/play_by_play");
        let err = source.load_seasons(&[2021]).unwrap_err().to_string();
        assert!(err.contains("2021"));
    }

    /// One CSV row in canonical column order; unset columns are empty or 0
    fn csv_row(values: &[(&str, &str)]) -> String {
        required_columns()
            .iter()
            .map(|name| {
                values
                    .iter()
                    .find(|(column, _)| column == name)
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| {
                        if FLOAT_COLUMNS.contains(name) { "0".to_string() } else { String::new() }
                    })
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    fn write_season_csv(dir: &Path, season: i32, rows: &[Vec<(&str, &str)>]) {
        let mut lines = vec![required_columns().join(",")];
        lines.extend(rows.iter().map(|row| csv_row(row)));
        std::fs::write(
            dir.join(format!("play_by_play_{}.csv", season)),
            lines.join("\n") + "\n",
        )
        .unwrap();
    }

    #[test]
    fn test_parquet_dir_source_reads_csv_seasons() {
        let dir = tempfile::tempdir().unwrap();
        let raiders = vec![
            ("season", "2020"), ("week", "3"), ("season_type", "REG"),
            ("posteam", "OAK"), ("defteam", "KC"), ("home_team", "KC"), ("away_team", "OAK"),
            ("play_type", "run"), ("yards_gained", "4"), ("rush_attempt", "1"),
        ];
        let chiefs = vec![
            ("season", "2020"), ("week", "3"), ("season_type", "REG"),
            ("posteam", "KC"), ("defteam", "OAK"), ("home_team", "KC"), ("away_team", "OAK"),
            ("play_type", "pass"), ("passer", "P.Mahomes"), ("yards_gained", "12.5"),
            ("pass_attempt", "1"), ("complete_pass", "1"),
        ];
        let patriots = vec![
            ("season", "2021"), ("week", "1"), ("season_type", "REG"),
            ("posteam", "NE"), ("defteam", "BUF"), ("home_team", "NE"), ("away_team", "BUF"),
            ("play_type", "run"), ("yards_gained", "2"), ("rush_attempt", "1"),
        ];
        write_season_csv(dir.path(), 2020, &[raiders, chiefs]);
        write_season_csv(dir.path(), 2021, &[patriots]);

        let source = ParquetDirSource::new(dir.path());
        let plays = source.load_seasons(&[2020, 2021]).unwrap();
        assert_eq!(plays.height(), 3);
        assert_eq!(plays.column("season").unwrap().dtype(), &DataType::Int32);
        assert_eq!(plays.column("week").unwrap().dtype(), &DataType::Int32);
        assert_eq!(plays.column("yards_gained").unwrap().dtype(), &DataType::Float64);
        assert_eq!(plays.column("sack").unwrap().dtype(), &DataType::Float64);

        let seasons = i64_values(&plays, "season").unwrap();
        assert_eq!(seasons, vec![Some(2020), Some(2020), Some(2021)]);

        let posteams: Vec<Option<&str>> =
            plays.column("posteam").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(posteams, vec![Some("LV"), Some("KC"), Some("NE")]);

        let scope = load_scope(&source, &TeamRegistry::new(), &[2021, 2020]).unwrap();
        assert_eq!(scope.height(), 3);
    }

    #[test]
    fn test_season_key_sorted_unique() {
        assert_eq!(season_key(&[2021, 2019, 2021]), vec![2019, 2021]);
    }
}
