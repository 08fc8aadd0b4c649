use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{self, HeaderName, HeaderValue, Method},
    routing::{get, post},
};
use platform_api::ApiResult;
use products_hr::{Directory, EmployeeList, EmployeeQuery, ListParams};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument};

use crate::{
    config::AppConfig,
    diagnostics::{StoreReport, store_report},
};

#[derive(Clone)]
pub struct AppState {
    pub directory: Directory,
    pub config: Arc<AppConfig>,
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
    let layer = CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST]);
    // Credentials cannot be combined with a wildcard origin.
    if allowed.is_empty() {
        layer.allow_origin(AllowOrigin::any())
    } else {
        layer
            .allow_origin(AllowOrigin::list(allowed))
            .allow_credentials(true)
    }
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/", get(root_handler))
        .route("/api/hello", get(hello_handler))
        .route("/test", get(store_test_handler))
        .route("/api/employees", get(list_employees_handler))
        .route("/api/employees/seed", post(seed_employees_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct SeedResponse {
    inserted: u64,
}

type HttpResult<T> = ApiResult<T>;

async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the directory backend!",
    })
}

async fn hello_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!",
    })
}

#[instrument(name = "http.store_test", skip_all)]
async fn store_test_handler(State(state): State<AppState>) -> Json<StoreReport> {
    Json(store_report(state.directory.store(), &state.config.store).await)
}

#[instrument(name = "http.employees.list", skip_all)]
async fn list_employees_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> HttpResult<Json<EmployeeList>> {
    let query = EmployeeQuery::try_from(params)?;
    let list = state.directory.list(&query).await?;
    Ok(Json(list))
}

#[instrument(name = "http.employees.seed", skip_all)]
async fn seed_employees_handler(State(state): State<AppState>) -> HttpResult<Json<SeedResponse>> {
    let inserted = state.directory.seed().await?;
    Ok(Json(SeedResponse { inserted }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
