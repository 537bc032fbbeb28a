//! Gridiron Explorer
//!
//! Play-by-play statistics dashboard: league-wide and per-team aggregates,
//! quarterback production and weekly yardage charts.
//!
//! Module layout:
//! - `utils/`: Column validation, expression builders, rounding
//! - `data`: Season loading with Polars behind the `PlaySource` trait
//! - `teams`: Static franchise registry with relocation aliases
//! - `filters`: Team, game-type and passer row filters
//! - `metrics/`: Metric families (team, league and quarterback scope)
//! - `comparison`, `selection`, `report`: Per-request orchestration
//! - `api_server`, `web/`, `cache` (feature `api`): Axum pages and JSON API

pub mod utils;
pub mod config;
pub mod data;
pub mod teams;
pub mod filters;
pub mod metrics;
pub mod comparison;
pub mod selection;
pub mod report;

#[cfg(feature = "api")]
pub mod cache;
#[cfg(feature = "api")]
pub mod api_server;
#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use config::ServerConfig;
pub use data::{load_scope, MemorySource, ParquetDirSource, PlaySource};
pub use teams::{Team, TeamError, TeamRegistry, TEAMS};
pub use filters::{
    defense_filter, game_type_filter, has_offensive_plays, offense_filter, passer_filter,
    team_season_filter, GameType,
};
pub use comparison::{compare, Comparator, Comparison, MetricFamily};
pub use selection::{Selection, SelectionError};
pub use report::{QuarterbackReport, TeamReport};
pub use metrics::*;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
#[cfg(feature = "api")]
pub use cache::SeasonCache;
