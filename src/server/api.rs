//! JSON routes used by the canvas front-end.

use super::AppState;
use crate::codegen::{GeneratedCode, IndentStrategy, traverse};
use crate::error::{CodegenError, GraphConversionError, StoreError};
use crate::graph::{CanvasDocument, Edge, Graph, IntoGraph, Node};
use crate::store::CanvasStore;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info};

#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error,
            message: message.into(),
        }
    }

    fn not_found(what: &str, id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", format!("{what} '{id}' not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingId | StoreError::InvalidBlob { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "invalid_payload", err.to_string())
            }
            StoreError::DuplicateConnection { .. } => {
                Self::new(StatusCode::CONFLICT, "duplicate_connection", err.to_string())
            }
            StoreError::Sqlite(_) | StoreError::Json(_) | StoreError::Task(_) => {
                error!(error = %err, "canvas store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "store_failure", err.to_string())
            }
        }
    }
}

impl From<CodegenError> for ApiError {
    fn from(err: CodegenError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "codegen_failed", err.to_string())
    }
}

impl From<GraphConversionError> for ApiError {
    fn from(err: GraphConversionError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_graph", err.to_string())
    }
}

/// Runs a store call on the blocking pool; each call opens its own connection.
async fn blocking<T, F>(store: &CanvasStore, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&CanvasStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = store.clone();
    let result = tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?;
    Ok(result?)
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

pub async fn list_rigs(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(blocking(&state.canvas, |s| s.list_rigs()).await?))
}

pub async fn save_rig(
    State(state): State<AppState>,
    Json(blob): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let saved = blocking(&state.canvas, move |s| s.save_rig(blob)).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn delete_rig(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let key = id.clone();
    if blocking(&state.canvas, move |s| s.delete_rig(&key)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Rig", &id))
    }
}

pub async fn list_connections(
    State(state): State<AppState>,
) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(blocking(&state.canvas, |s| s.list_connections()).await?))
}

pub async fn save_connection(
    State(state): State<AppState>,
    Json(blob): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let saved = blocking(&state.canvas, move |s| s.save_connection(blob)).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn delete_connection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let key = id.clone();
    if blocking(&state.canvas, move |s| s.delete_connection(&key)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Connection", &id))
    }
}

#[derive(Debug, Serialize)]
pub struct ExecuteResponse {
    pub status: &'static str,
    pub rooted: bool,
    pub order: Vec<String>,
    pub message: String,
}

/// Walks the stored graph from its start node and reports the visit order.
/// Nothing is actually run.
pub async fn execute(State(state): State<AppState>) -> Result<Json<ExecuteResponse>, ApiError> {
    let graph = blocking(&state.canvas, |s| s.load_graph()).await?;
    let traversal = traverse(&graph);
    let order: Vec<String> = traversal.ids().into_iter().map(str::to_string).collect();
    info!(blocks = order.len(), rooted = traversal.is_rooted(), "execute requested");
    Ok(Json(ExecuteResponse {
        status: "ok",
        rooted: traversal.is_rooted(),
        message: format!("Executed {} blocks", order.len()),
        order,
    }))
}

#[derive(Debug, Deserialize, Default)]
pub struct GenerateRequest {
    pub language: Option<String>,
    pub strategy: Option<IndentStrategy>,
    /// Inline graph; the stored canvas is used when absent. Edges without
    /// nodes are rejected.
    pub nodes: Option<Vec<Node>>,
    #[serde(default, alias = "connections")]
    pub edges: Vec<Edge>,
}

pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedCode>, ApiError> {
    let graph: Graph = match request.nodes {
        Some(nodes) => CanvasDocument {
            nodes,
            edges: request.edges,
        }
        .into_graph()?,
        None if !request.edges.is_empty() => {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                "edges were supplied without nodes",
            ));
        }
        None => blocking(&state.canvas, |s| s.load_graph()).await?,
    };
    let language = request
        .language
        .unwrap_or_else(|| state.config.default_language.clone());
    let strategy = request.strategy.unwrap_or(state.config.indent_strategy);
    let generated = state.generator.generate_with(&graph, &language, strategy)?;
    Ok(Json(generated))
}

pub async fn languages(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "languages": state.generator.languages(),
        "default": state.config.default_language,
    }))
}
