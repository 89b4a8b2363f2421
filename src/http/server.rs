//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a catch-all into the route table
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind the server to a listener, run with graceful shutdown
//! - Dispatch matched actions to the CRUD handlers
//! - Observability (request metrics, structured logs)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Mutex};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::http::handlers;
use crate::observability::metrics;
use crate::routing::{Action, Router as RouteTable};
use crate::storage::{Store, StoreError};

/// Largest request body the dispatcher will buffer.
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub store: Arc<Mutex<Store>>,
}

/// HTTP server for the task API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server, opening the backing store.
    pub fn new(config: ApiConfig) -> Result<Self, StoreError> {
        let store = Store::open(&config.storage.data_path)?;

        let state = AppState {
            routes: Arc::new(RouteTable::task_routes()),
            store: Arc::new(Mutex::new(store)),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ApiConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Shuts down gracefully on Ctrl+C or when `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = shutdown.recv() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: route table lookup, body buffering, action dispatch.
async fn dispatch(
    State(state): State<AppState>,
    ConnectInfo(_addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let uri = request.uri().clone();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    // 1. Match against the route table
    let (action, params) = match state.routes.match_request(&method, &path) {
        Some(matched) => matched,
        None => {
            tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
            let response = handlers::error_response(StatusCode::NOT_FOUND, "route not found");
            metrics::record_request(method.as_str(), 404, "none", start_time);
            return response;
        }
    };

    // 2. Buffer the request body
    let body = match axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            let response =
                handlers::error_response(StatusCode::BAD_REQUEST, "unreadable request body");
            metrics::record_request(method.as_str(), 400, action.name(), start_time);
            return response;
        }
    };

    // 3. Run the handler
    let response = match action {
        Action::ListTasks => handlers::list_tasks(&state, &uri).await,
        Action::CreateTask => handlers::create_task(&state, &body).await,
        Action::UpdateTask => handlers::update_task(&state, &params, &body).await,
        Action::DeleteTask => handlers::delete_task(&state, &params).await,
    };

    let status = response.status();
    tracing::debug!(
        request_id = %request_id,
        action = action.name(),
        status = status.as_u16(),
        "Request handled"
    );
    metrics::record_request(method.as_str(), status.as_u16(), action.name(), start_time);

    response
}
