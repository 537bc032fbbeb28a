// Page handlers for HTML rendering with Askama
//
// Full page loads render the sidebar form plus the report; htmx requests from
// the form (HX-Request header) get the report fragment only.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRequest;

use crate::api_server::{
    build_quarterback_report, build_team_report, load_passers, AppError, AppState, PasserQuery,
    TeamQuery,
};
use crate::comparison::Comparator;
use crate::filters::GameType;
use crate::report::{QuarterbackReport, TeamReport};
use crate::selection::parse_seasons;
use crate::web::chart::BarChart;
use crate::web::view_models::{KpiGroupView, PassRowView};
use crate::web::{nav_links, NavLink, Page};

fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}

/// `<option>` entry of a sidebar select
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

fn season_options(state: &AppState, selected: &[i32]) -> Vec<SelectOption> {
    state
        .config
        .seasons()
        .into_iter()
        .map(|s| SelectOption::new(s.to_string(), s.to_string(), selected.contains(&s)))
        .collect()
}

// ============================================================================
// Home Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub first_season: i32,
    pub latest_season: i32,
    pub team_count: usize,
}

pub async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = HomeTemplate {
        title: Page::Home.title().to_string(),
        nav: nav_links(Page::Home),
        first_season: state.config.first_season,
        latest_season: state.config.latest_season,
        team_count: state.registry.by_nickname().len(),
    };
    render(&template)
}

// ============================================================================
// Team Stats Page
// ============================================================================

/// Report section of the team page
#[derive(Debug, Clone)]
pub struct TeamReportView {
    pub heading: String,
    pub team_name: String,
    pub logo_url: String,
    pub wordmark_url: String,
    /// Set when the team has no plays for the selection
    pub empty_message: Option<String>,
    pub groups: Vec<KpiGroupView>,
    pub chart: Option<BarChart>,
}

impl From<&TeamReport> for TeamReportView {
    fn from(report: &TeamReport) -> Self {
        let team = report.selection.team;
        let mut groups = Vec::new();
        if let Some(c) = &report.record {
            groups.push(KpiGroupView::from_comparison(c));
        }
        if let Some(c) = &report.overview {
            groups.push(KpiGroupView::from_comparison(c));
        }
        if let Some(c) = &report.passing {
            groups.push(KpiGroupView::from_comparison(c));
        }
        if let Some(c) = &report.receiving {
            groups.push(KpiGroupView::from_comparison(c));
        }
        if let Some(c) = &report.rushing {
            groups.push(KpiGroupView::from_comparison(c));
        }
        if let Some(c) = &report.defense {
            groups.push(KpiGroupView::from_comparison(c));
        }

        let chart = BarChart::weekly_yards(team, &report.weekly_yards);
        let empty_message = (!report.has_plays).then(|| {
            format!("The {} do not have any plays in the {}", team.name, report.heading)
        });

        Self {
            heading: report.heading.clone(),
            team_name: team.name.to_string(),
            logo_url: team.logo_url(),
            wordmark_url: team.wordmark_url(),
            empty_message,
            groups,
            chart: (!chart.is_empty()).then_some(chart),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/team_stats.html")]
pub struct TeamStatsTemplate {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub seasons: Vec<SelectOption>,
    pub game_types: Vec<SelectOption>,
    pub teams: Vec<SelectOption>,
    pub comparators: Vec<SelectOption>,
    pub report: Option<TeamReportView>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "partials/team_report.html")]
pub struct TeamReportFragment {
    pub report: Option<TeamReportView>,
    pub error: Option<String>,
}

pub async fn team_stats_page(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    Query(query): Query<TeamQuery>,
) -> Response {
    // Last team by nickname, the Vikings
    let default_team = state
        .registry
        .by_nickname()
        .last()
        .map(|t| t.abbr)
        .unwrap_or("MIN");
    let team = query.team.clone().unwrap_or_else(|| default_team.to_string());
    let game_type = query.game_type.unwrap_or_default();
    let compare = query.compare.clone().unwrap_or_default();

    let result = match parse_seasons(&state.config, query.season.as_deref()) {
        Ok(seasons) => build_team_report(&state, seasons, game_type, &team, &compare)
            .await
            .map(|report| (report.selection.seasons.clone(), TeamReportView::from(&report))),
        Err(err) => Err(AppError::from(err)),
    };

    let (status, seasons, report, error) = match result {
        Ok((seasons, view)) => (StatusCode::OK, seasons, Some(view), None),
        Err(err) => {
            tracing::warn!("Team page error: {}", err.message());
            (err.status(), vec![state.config.latest_season], None, Some(err.message().to_string()))
        }
    };

    if is_htmx {
        return (status, render(&TeamReportFragment { report, error })).into_response();
    }

    let selected_team = state.registry.resolve(&team).map(|t| t.abbr).ok();
    let selected_compare = Comparator::parse(&compare);
    let teams = state.registry.by_nickname();

    let mut comparators = vec![SelectOption::new(
        "league",
        "NFL average",
        selected_compare == Comparator::League,
    )];
    comparators.extend(teams.iter().map(|t| {
        SelectOption::new(
            t.abbr,
            t.name,
            selected_compare == Comparator::Team(t.abbr.to_string()),
        )
    }));

    let template = TeamStatsTemplate {
        title: Page::TeamStats.title().to_string(),
        nav: nav_links(Page::TeamStats),
        seasons: season_options(&state, &seasons),
        game_types: GameType::ALL
            .iter()
            .map(|g| SelectOption::new(g.slug(), g.label(), *g == game_type))
            .collect(),
        teams: teams
            .iter()
            .map(|t| SelectOption::new(t.abbr, t.name, Some(t.abbr) == selected_team))
            .collect(),
        comparators,
        report,
        error,
    };
    (status, render(&template)).into_response()
}

// ============================================================================
// Quarterbacks Page
// ============================================================================

/// Shareable link to one passer's report, e.g. `/quarterbacks?season=2021&passer=A.St.%20Brown`
pub fn quarterback_url(seasons: &[i32], passer: &str) -> String {
    let seasons: Vec<String> = seasons.iter().map(|s| s.to_string()).collect();
    format!(
        "{}?season={}&passer={}",
        Page::Quarterbacks.path(),
        urlencoding::encode(&seasons.join(",")),
        urlencoding::encode(passer)
    )
}

/// Report section of the quarterback page
#[derive(Debug, Clone)]
pub struct QuarterbackReportView {
    pub heading: String,
    pub permalink: String,
    pub stats: KpiGroupView,
    pub passes: Vec<PassRowView>,
}

impl From<&QuarterbackReport> for QuarterbackReportView {
    fn from(report: &QuarterbackReport) -> Self {
        let seasons: Vec<String> = report.seasons.iter().map(|s| s.to_string()).collect();
        Self {
            heading: format!("Pass Plays for {} in {}", report.passer, seasons.join(", ")),
            permalink: quarterback_url(&report.seasons, &report.passer),
            stats: KpiGroupView::from_quarterback(&report.stats),
            passes: report.passes.iter().map(PassRowView::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/quarterbacks.html")]
pub struct QuarterbacksTemplate {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub seasons: Vec<SelectOption>,
    pub passers: Vec<SelectOption>,
    pub report: Option<QuarterbackReportView>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "partials/quarterback_report.html")]
pub struct QuarterbackReportFragment {
    pub report: Option<QuarterbackReportView>,
    pub error: Option<String>,
}

async fn quarterback_page_data(
    state: &AppState,
    query: &PasserQuery,
) -> Result<(Vec<i32>, Vec<SelectOption>, QuarterbackReportView), AppError> {
    let seasons = parse_seasons(&state.config, query.season.as_deref())?;
    let listed = load_passers(state, &seasons).await?;

    let passer = query
        .passer
        .clone()
        .filter(|p| !p.trim().is_empty())
        .or_else(|| listed.first().map(|p| p.name.clone()))
        .ok_or_else(|| AppError::NotFound(format!("No passers with enough attempts in {:?}", seasons)))?;

    let options = listed
        .iter()
        .map(|p| {
            let label = match &p.team {
                Some(team) => format!("{} ({})", p.name, team),
                None => p.name.clone(),
            };
            SelectOption::new(p.name.clone(), label, p.name == passer)
        })
        .collect();

    let report = build_quarterback_report(state, seasons.clone(), passer).await?;
    Ok((seasons, options, QuarterbackReportView::from(&report)))
}

pub async fn quarterbacks_page(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    Query(query): Query<PasserQuery>,
) -> Response {
    let (status, seasons, passers, report, error) = match quarterback_page_data(&state, &query).await {
        Ok((seasons, passers, view)) => (StatusCode::OK, seasons, passers, Some(view), None),
        Err(err) => {
            tracing::warn!("Quarterback page error: {}", err.message());
            (
                err.status(),
                vec![state.config.latest_season],
                Vec::new(),
                None,
                Some(err.message().to_string()),
            )
        }
    };

    if is_htmx {
        return (status, render(&QuarterbackReportFragment { report, error })).into_response();
    }

    let template = QuarterbacksTemplate {
        title: Page::Quarterbacks.title().to_string(),
        nav: nav_links(Page::Quarterbacks),
        seasons: season_options(&state, &seasons),
        passers,
        report,
        error,
    };
    (status, render(&template)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarterback_url_encodes_names() {
        assert_eq!(
            quarterback_url(&[2021], "M.Jones"),
            "/quarterbacks?season=2021&passer=M.Jones"
        );
        assert_eq!(
            quarterback_url(&[2020, 2021], "A.St. Brown"),
            "/quarterbacks?season=2020%2C2021&passer=A.St.%20Brown"
        );
        assert_eq!(
            quarterback_url(&[2021], "D'Andre&Co"),
            "/quarterbacks?season=2021&passer=D%27Andre%26Co"
        );
    }
}
