//! Server configuration from environment variables
//!
//! | variable | default |
//! |---|---|
//! | `DATA_DIR` | `data/pbp` |
//! | `PORT` | `3000` |
//! | `FIRST_SEASON` | `2010` |
//! | `LATEST_SEASON` | `2021` |
//! | `CACHE_TTL_SECS` | `3600` |
//! | `CACHE_CAPACITY` | `8` |
//! | `MIN_QB_ATTEMPTS` | `100` |

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub port: u16,
    pub first_season: i32,
    pub latest_season: i32,
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
    /// Passers below this many attempts are left out of the selector
    pub min_qb_attempts: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/pbp"),
            port: 3000,
            first_season: 2010,
            latest_season: 2021,
            cache_ttl: Duration::from_secs(3600),
            cache_capacity: 8,
            min_qb_attempts: 100,
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", name, raw)),
        None => Ok(default),
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup (tests pass a map)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            data_dir: lookup("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            first_season: parse_var(&lookup, "FIRST_SEASON", defaults.first_season)?,
            latest_season: parse_var(&lookup, "LATEST_SEASON", defaults.latest_season)?,
            cache_ttl: Duration::from_secs(parse_var(
                &lookup,
                "CACHE_TTL_SECS",
                defaults.cache_ttl.as_secs(),
            )?),
            cache_capacity: parse_var(&lookup, "CACHE_CAPACITY", defaults.cache_capacity)?,
            min_qb_attempts: parse_var(&lookup, "MIN_QB_ATTEMPTS", defaults.min_qb_attempts)?,
        };

        if config.first_season > config.latest_season {
            bail!(
                "FIRST_SEASON {} is after LATEST_SEASON {}",
                config.first_season,
                config.latest_season
            );
        }
        Ok(config)
    }

    /// Selectable seasons, newest first
    pub fn seasons(&self) -> Vec<i32> {
        (self.first_season..=self.latest_season).rev().collect()
    }

    pub fn contains_season(&self, season: i32) -> bool {
        (self.first_season..=self.latest_season).contains(&season)
    }
}
