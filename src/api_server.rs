// Axum server: dashboard pages + JSON API over the season cache
//
// Aggregation is CPU-bound polars work, so every report is built on the
// blocking pool and the async handlers only await it.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cache::SeasonCache;
use crate::config::ServerConfig;
use crate::data::{ParquetDirSource, PlaySource};
use crate::filters::GameType;
use crate::metrics::{passers, PasserSummary};
use crate::report::{QuarterbackReport, TeamReport};
use crate::selection::{parse_seasons, Selection, SelectionError};
use crate::teams::{TeamError, TeamRegistry};
use crate::web::handlers::pages;
use crate::web::Page;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub registry: Arc<TeamRegistry>,
    pub seasons: SeasonCache,
}

impl AppState {
    /// State backed by the play-by-play files in `config.data_dir`
    pub fn new(config: ServerConfig) -> Self {
        let source = ParquetDirSource::new(config.data_dir.clone());
        Self::with_source(config, Arc::new(source))
    }

    pub fn with_source(config: ServerConfig, source: Arc<dyn PlaySource>) -> Self {
        let registry = Arc::new(TeamRegistry::new());

        tracing::info!(
            "Initializing season cache (capacity {}, TTL {:?}) over {}",
            config.cache_capacity,
            config.cache_ttl,
            source.describe()
        );
        let seasons = SeasonCache::new(
            source,
            Arc::clone(&registry),
            config.cache_capacity,
            config.cache_ttl,
        );

        Self {
            config: Arc::new(config),
            registry,
            seasons,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new();

    // Dashboard pages (same registry drives the nav menu)
    for page in Page::ALL {
        router = match page {
            Page::Home => router.route(page.path(), get(pages::home_page)),
            Page::TeamStats => router.route(page.path(), get(pages::team_stats_page)),
            Page::Quarterbacks => router.route(page.path(), get(pages::quarterbacks_page)),
        };
    }

    router
        // Health check
        .route("/health", get(health_check))

        // JSON API
        .route("/api/teams", get(list_teams))
        .route("/api/stats/team", get(team_stats))
        .route("/api/stats/qb", get(quarterback_stats))
        .route("/api/passers", get(list_passers))
        .route("/api/cache/refresh", post(refresh_cache))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Query parameters
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamQuery {
    /// Comma-separated seasons, latest configured season when absent
    pub season: Option<String>,
    pub game_type: Option<GameType>,
    pub team: Option<String>,
    pub compare: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasserQuery {
    pub season: Option<String>,
    pub passer: Option<String>,
}

// ============================================================================
// Shared report builders (used by the JSON API and the HTML pages)
// ============================================================================

pub(crate) async fn build_team_report(
    state: &AppState,
    seasons: Vec<i32>,
    game_type: GameType,
    team: &str,
    compare: &str,
) -> Result<TeamReport, AppError> {
    let selection = Selection::new(&state.config, &state.registry, &seasons, game_type, team, compare)?;
    let plays = state.seasons.get(&selection.seasons).await.map_err(AppError::upstream)?;

    tokio::task::spawn_blocking(move || TeamReport::build(&plays, selection))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Team report error: {:#}", e)))
}

pub(crate) async fn build_quarterback_report(
    state: &AppState,
    seasons: Vec<i32>,
    passer: String,
) -> Result<QuarterbackReport, AppError> {
    let plays = state.seasons.get(&seasons).await.map_err(AppError::upstream)?;

    tokio::task::spawn_blocking(move || QuarterbackReport::build(&plays, seasons, &passer))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Quarterback report error: {:#}", e)))
}

pub(crate) async fn load_passers(
    state: &AppState,
    seasons: &[i32],
) -> Result<Vec<PasserSummary>, AppError> {
    let plays = state.seasons.get(seasons).await.map_err(AppError::upstream)?;
    let min_attempts = state.config.min_qb_attempts;

    tokio::task::spawn_blocking(move || passers(&plays, min_attempts))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Passer list error: {:#}", e)))
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "source": state.seasons.describe_source(),
        "cached_scopes": state.seasons.entry_count(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[derive(Debug, Serialize)]
struct TeamEntry {
    abbr: &'static str,
    name: &'static str,
    nickname: &'static str,
    color: &'static str,
    color2: &'static str,
    logo_url: String,
    wordmark_url: String,
}

async fn list_teams(State(state): State<AppState>) -> Json<Vec<TeamEntry>> {
    let teams = state
        .registry
        .by_nickname()
        .into_iter()
        .map(|team| TeamEntry {
            abbr: team.abbr,
            name: team.name,
            nickname: team.nickname,
            color: team.color,
            color2: team.color2,
            logo_url: team.logo_url(),
            wordmark_url: team.wordmark_url(),
        })
        .collect();
    Json(teams)
}

async fn team_stats(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Result<Json<TeamReport>, AppError> {
    let seasons = parse_seasons(&state.config, query.season.as_deref())?;
    let team = query
        .team
        .ok_or_else(|| AppError::BadRequest("Missing 'team' parameter".to_string()))?;
    let compare = query.compare.unwrap_or_default();

    tracing::info!("Team stats for {} {:?} (compare: {:?})", team, seasons, compare);
    let report = build_team_report(
        &state,
        seasons,
        query.game_type.unwrap_or_default(),
        &team,
        &compare,
    )
    .await?;
    Ok(Json(report))
}

async fn quarterback_stats(
    State(state): State<AppState>,
    Query(query): Query<PasserQuery>,
) -> Result<Json<QuarterbackReport>, AppError> {
    let seasons = parse_seasons(&state.config, query.season.as_deref())?;
    let passer = query
        .passer
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'passer' parameter".to_string()))?;

    tracing::info!("Quarterback stats for {} {:?}", passer, seasons);
    let report = build_quarterback_report(&state, seasons, passer).await?;
    Ok(Json(report))
}

async fn list_passers(
    State(state): State<AppState>,
    Query(query): Query<PasserQuery>,
) -> Result<Json<Vec<PasserSummary>>, AppError> {
    let seasons = parse_seasons(&state.config, query.season.as_deref())?;
    Ok(Json(load_passers(&state, &seasons).await?))
}

async fn refresh_cache(State(state): State<AppState>) -> impl IntoResponse {
    state.seasons.refresh().await;
    Json(serde_json::json!({
        "status": "refreshed",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    /// The play-by-play store could not supply the requested seasons
    Upstream(String),
    Internal(String),
}

impl AppError {
    fn upstream(err: anyhow::Error) -> Self {
        tracing::error!("Season load failed: {:#}", err);
        AppError::Upstream(format!("{:#}", err))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Upstream(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::Team(TeamError::Unknown(_)) => AppError::NotFound(err.to_string()),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(serde_json::json!({
            "error": self.message()
        }));

        (self.status(), body).into_response()
    }
}
