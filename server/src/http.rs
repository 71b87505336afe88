use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{self, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use products_directory::{DirectoryProvider, Employee, EmployeeGroup, StaticDirectory};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, instrument};

use crate::{config::AppConfig, graphql::SchemaType};

#[derive(Clone)]
pub struct AppState {
    pub provider: StaticDirectory,
    pub schema: SchemaType,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// State wired to the demo seed with the configured latencies.
    pub fn from_config(config: Arc<AppConfig>) -> Self {
        let provider = StaticDirectory::new()
            .with_latency(config.groups_latency, config.employees_latency);
        let schema = crate::graphql::build_schema(provider.clone());
        Self {
            provider,
            schema,
            config,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "directory server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/employee-groups", get(groups_handler))
        .route("/api/employees", get(employees_handler))
        .route("/graphql", post(graphql_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct EmployeesQuery {
    #[serde(rename = "groupId")]
    group_id: Option<String>,
}

impl EmployeesQuery {
    /// Non-numeric ids are treated like a missing id.
    fn group_id(&self) -> Option<i64> {
        self.group_id.as_deref()?.trim().parse().ok()
    }
}

#[instrument(name = "http.groups", skip_all)]
async fn groups_handler(State(state): State<AppState>) -> HttpResult<Json<Vec<EmployeeGroup>>> {
    let groups = state
        .provider
        .groups()
        .await
        .map_err(|err| HttpError::internal(err.into()))?;
    Ok(Json(groups))
}

#[instrument(name = "http.employees", skip_all)]
async fn employees_handler(
    State(state): State<AppState>,
    Query(query): Query<EmployeesQuery>,
) -> HttpResult<Json<Vec<Employee>>> {
    let group_id = query.group_id();
    debug!(raw = ?query.group_id, ?group_id, "employee list requested");
    let employees = state
        .provider
        .employees(group_id)
        .await
        .map_err(|err| HttpError::internal(err.into()))?;
    Ok(Json(employees))
}

async fn graphql_handler(State(state): State<AppState>, request: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(request.into_inner()).await.into()
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
}

type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn internal(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { message: self.message })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn test_router() -> Router {
        let config = AppConfig {
            groups_latency: std::time::Duration::ZERO,
            employees_latency: std::time::Duration::ZERO,
            ..AppConfig::default()
        };
        build_router(AppState::from_config(Arc::new(config)))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = test_router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn groups_endpoint_lists_seed_groups() {
        let (status, body) = get_json("/api/employee-groups").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(6));
        assert_eq!(body[5], json!({"id": 6, "name": "경영지원팀", "count": 10}));
    }

    #[tokio::test]
    async fn employees_endpoint_filters_by_group() {
        let (status, body) = get_json("/api/employees?groupId=4").await;
        assert_eq!(status, StatusCode::OK);
        let employees = body.as_array().cloned().unwrap_or_default();
        assert_eq!(employees.len(), 2);
        assert!(employees.iter().all(|e| e["department"] == "영업팀"));
        assert!(employees[0].get("joinDate").is_some());
    }

    #[tokio::test]
    async fn unknown_or_malformed_group_returns_everyone() {
        for uri in [
            "/api/employees",
            "/api/employees?groupId=99",
            "/api/employees?groupId=abc",
        ] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body.as_array().map(Vec::len), Some(15), "{uri}");
        }
    }

    #[tokio::test]
    async fn non_get_methods_are_not_allowed() {
        let response = test_router()
            .oneshot(
                Request::post("/api/employees")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.headers().contains_key(header::ALLOW));
    }

    #[tokio::test]
    async fn health_reports_version_and_request_id() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ok"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn graphql_endpoint_serves_the_schema() {
        let payload = json!({ "query": "{ employeeView(groupId: 2) { totalMatches } }" });
        let response = test_router()
            .oneshot(
                Request::post("/graphql")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["employeeView"]["totalMatches"], 3);
    }
}
