//! HTTP API serving pie charts for a user's last 7 days.

pub mod query;
pub mod shutdown;

use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::{error::ChartError, pipeline::Category, service::ChartService};

use self::query::{parse_chart_query, QueryError};

#[derive(Clone)]
struct ServerState {
    service: ChartService,
}

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Couldn't create a pie chart for some reason")]
    ChartMissing,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Query(_) => StatusCode::BAD_REQUEST,
            ServerError::Chart(ChartError::Fetch { .. } | ChartError::Registry(_)) => {
                StatusCode::BAD_GATEWAY
            }
            ServerError::Chart(_) | ServerError::ChartMissing => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Failed to serve chart: {self}");
        } else {
            warn!("Rejected chart request: {self}");
        }
        (status, self.to_string()).into_response()
    }
}

pub fn router(service: ChartService) -> Router {
    Router::new()
        .route("/api/:username/pie/languages", get(languages))
        .route("/api/:username/pie/projects", get(projects))
        .route("/api/:username/pie/editors", get(editors))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(ServerState { service })
}

/// Serves the API on `addr` until `shutdown` is cancelled.
pub async fn serve(
    addr: SocketAddr,
    service: ChartService,
    shutdown: CancellationToken,
) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Serving charts on {}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("Chart server shutting down");
        })
        .await?;
    Ok(())
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn languages(
    State(state): State<ServerState>,
    Path(username): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Response, ServerError> {
    pie_chart(state, Category::Languages, username, query).await
}

async fn projects(
    State(state): State<ServerState>,
    Path(username): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Response, ServerError> {
    pie_chart(state, Category::Projects, username, query).await
}

async fn editors(
    State(state): State<ServerState>,
    Path(username): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Response, ServerError> {
    pie_chart(state, Category::Editors, username, query).await
}

async fn pie_chart(
    state: ServerState,
    category: Category,
    username: String,
    query: Vec<(String, String)>,
) -> Result<Response, ServerError> {
    let request = parse_chart_query(category, username, &query)?;

    let Some(chart) = state.service.create_chart(&request).await? else {
        return Err(ServerError::ChartMissing);
    };

    let body = tokio::fs::read(&chart.path).await.map_err(ChartError::from)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    use crate::{
        client::{MockColorRegistry, MockStatsProvider, RegistryColor, StatsData},
        error::ChartError,
        pipeline::entry::UsageEntry,
        render::json::JsonChartRenderer,
        service::ChartService,
    };

    use super::router;

    fn stats() -> StatsData {
        StatsData {
            languages: Some(vec![
                UsageEntry::new("Rust", 7200., 50., 2, 0),
                UsageEntry::new("Markdown", 3600., 25., 1, 0),
                UsageEntry::new("YAML", 3600., 25., 1, 0),
            ]),
            projects: Some(vec![
                UsageEntry::new("wakachart", 7200., 50., 2, 0),
                UsageEntry::new("notes-work", 3600., 25., 1, 0),
                UsageEntry::new("notes-home", 3600., 25., 1, 0),
            ]),
            editors: Some(vec![UsageEntry::new("Neovim", 14400., 100., 4, 0)]),
        }
    }

    fn app(stats_provider: MockStatsProvider) -> Result<(Router, TempDir)> {
        let dir = tempdir()?;
        let mut registry = MockColorRegistry::new();
        registry.expect_fetch().returning(|| {
            Ok(vec![RegistryColor {
                name: "Rust".into(),
                color: "#dea584".into(),
            }])
        });
        let service = ChartService::new(
            Arc::new(stats_provider),
            Arc::new(registry),
            Arc::new(JsonChartRenderer::new(dir.path().to_path_buf())?),
        );
        Ok((router(service), dir))
    }

    fn working_stats() -> MockStatsProvider {
        let mut stats_provider = MockStatsProvider::new();
        stats_provider.expect_fetch().returning(|_| Ok(stats()));
        stats_provider
    }

    async fn get(app: Router, uri: &str) -> Result<(StatusCode, Vec<u8>)> {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, body.to_vec()))
    }

    #[tokio::test]
    async fn health_check_responds() -> Result<()> {
        let (app, _dir) = app(MockStatsProvider::new())?;

        let (status, body) = get(app, "/health").await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
        Ok(())
    }

    #[tokio::test]
    async fn languages_chart_is_returned_as_json() -> Result<()> {
        let (app, dir) = app(working_stats())?;

        let (status, body) = get(app, "/api/krios/pie/languages?hide=yaml&Markdown=000").await?;

        assert_eq!(status, StatusCode::OK);
        let document: serde_json::Value = serde_json::from_slice(&body)?;
        let slices = document["slices"].as_array().unwrap();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0]["color"], "#dea584");
        assert_eq!(slices[1]["color"], "#000");
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn projects_chart_groups_entries() -> Result<()> {
        let (app, _dir) = app(working_stats())?;

        let (status, body) = get(
            app,
            "/api/krios/pie/projects?group=Notes&Notes=notes**&Notes_color=00ff00&width=640",
        )
        .await?;

        assert_eq!(status, StatusCode::OK);
        let document: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(document["size"]["width"], 640);
        assert_eq!(document["entries"].as_array().unwrap().len(), 2);
        assert_eq!(document["entries"][0]["name"], "Notes");
        assert_eq!(document["entries"][0]["total_seconds"], 7200.);
        assert_eq!(document["slices"][0]["color"], "#00ff00");
        Ok(())
    }

    #[tokio::test]
    async fn editors_route_serves_editors() -> Result<()> {
        let (app, _dir) = app(working_stats())?;

        let (status, body) = get(app, "/api/krios/pie/editors").await?;

        assert_eq!(status, StatusCode::OK);
        let document: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(document["entries"][0]["name"], "Neovim");
        Ok(())
    }

    #[tokio::test]
    async fn bad_dimension_is_a_client_error() -> Result<()> {
        let (app, _dir) = app(MockStatsProvider::new())?;

        let (status, _) = get(app, "/api/krios/pie/editors?width=wide").await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn missing_credentials_are_a_server_error() -> Result<()> {
        let mut stats_provider = MockStatsProvider::new();
        stats_provider
            .expect_fetch()
            .returning(|_| Err(ChartError::MissingCredentials("WAKATIME_API_KEY")));
        let (app, _dir) = app(stats_provider)?;

        let (status, body) = get(app, "/api/krios/pie/projects").await?;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            String::from_utf8(body)?,
            "WAKATIME_API_KEY is not set, aborting API call"
        );
        Ok(())
    }
}
