//! HTTP front end for a [`PoolManager`]
//!
//! Routes keep the paths of the original pool service. Objects travel as
//! JSON tagged with their type, e.g. `{"type": "shirt", "size": "M", "color": "blue"}`.

use crate::config::PoolConfiguration;
use crate::errors::{ErrorKind, PoolError};
use crate::health::HealthReport;
use crate::manager::PoolManager;
use crate::object::Object;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type SharedManager = Arc<PoolManager>;

/// Query of `POST /create_object_pool/`.
///
/// The pool is named after its type unless `pool_name` is given.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePoolQuery {
    pub type_name: String,
    pub pool_name: Option<String>,
}

/// Query naming the pool an operation targets
#[derive(Debug, Clone, Deserialize)]
pub struct PoolQuery {
    #[serde(alias = "type_name")]
    pub pool_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// A [`PoolError`] on its way to becoming an HTTP response
#[derive(Debug)]
pub struct ApiError(pub PoolError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound | ErrorKind::EmptyPool => StatusCode::NOT_FOUND,
            ErrorKind::UnknownType
            | ErrorKind::AlreadyExists
            | ErrorKind::TypeMismatch
            | ErrorKind::CapacityExceeded => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<PoolError> for ApiError {
    fn from(error: PoolError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(error = %self.0, status = status.as_u16(), "Request rejected");

        let body = ErrorBody {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the service router around `manager`
pub fn router(manager: SharedManager) -> Router {
    let router = Router::new()
        .route("/create_object_pool/", post(create_object_pool))
        .route("/add_object_to_pool/", post(add_object_to_pool))
        .route("/remove/", delete(remove_object_from_pool))
        .route("/random/", get(get_random_object_from_pool))
        .route("/health", get(health));

    #[cfg(feature = "metrics")]
    let router = router.route("/metrics", get(metrics));

    router.with_state(manager)
}

/// Bind to the configured address and serve until Ctrl-C
pub async fn serve(config: &PoolConfiguration, manager: SharedManager) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Pool service listening");

    axum::serve(listener, router(manager))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(e) => tracing::error!(error = %e, "Could not listen for shutdown signal"),
    }
}

async fn create_object_pool(
    State(manager): State<SharedManager>,
    Query(query): Query<CreatePoolQuery>,
) -> Result<Json<Message>, ApiError> {
    let pool_name = query.pool_name.as_deref().unwrap_or(&query.type_name);
    manager.create_pool(pool_name, &query.type_name)?;
    Ok(Json(Message::new(format!("Pool created for type {}", query.type_name))))
}

async fn add_object_to_pool(
    State(manager): State<SharedManager>,
    Query(query): Query<PoolQuery>,
    Json(item): Json<Object>,
) -> Result<Json<Message>, ApiError> {
    manager.add_object(&query.pool_name, item)?;
    Ok(Json(Message::new("Object added successfully")))
}

async fn remove_object_from_pool(
    State(manager): State<SharedManager>,
    Query(query): Query<PoolQuery>,
    Json(item): Json<Object>,
) -> Result<Json<Message>, ApiError> {
    manager.remove_object(&query.pool_name, &item)?;
    Ok(Json(Message::new("Object removed successfully")))
}

async fn get_random_object_from_pool(
    State(manager): State<SharedManager>,
    Query(query): Query<PoolQuery>,
) -> Result<Json<Object>, ApiError> {
    Ok(Json(manager.random_object(&query.pool_name)?))
}

async fn health(State(manager): State<SharedManager>) -> Json<HealthReport> {
    Json(manager.health_report())
}

#[cfg(feature = "metrics")]
async fn metrics(State(manager): State<SharedManager>) -> Response {
    use axum::http::header;

    match crate::metrics::MetricsExporter::export_prometheus(&manager.metrics(), None) {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to export metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
