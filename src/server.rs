use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::config::AppConfig;
use crate::investment;
use crate::tools::catalogue::{ToolSummary, list_tools};
use crate::tools::{InvocationError, RegistryError, SchemaFlattener, ToolInvoker, ToolRegistry};

/// Build the registry from the statically declared tool list.
pub fn build_registry(config: &AppConfig) -> Result<ToolRegistry, RegistryError> {
    let flattener = SchemaFlattener::new(config.tools.expandable_titles.iter().cloned());
    ToolRegistry::new(investment::default_tools(&flattener))
}

pub fn build_state(config: Arc<AppConfig>) -> Result<AppState, RegistryError> {
    let registry = Arc::new(build_registry(&config)?);

    for tool in registry.tools() {
        info!(
            name: "tool.registered",
            tool = %tool.name,
            dangerous = tool.is_dangerous,
            long_running = tool.is_long_running_tool,
            "Tool registered"
        );
    }

    Ok(AppState {
        invoker: ToolInvoker::new(Arc::clone(&registry)),
        registry,
        config,
    })
}

pub fn router(state: AppState) -> Router {
    let cors_permissive = state.config.server.cors_permissive;

    let mut app = Router::new()
        .route("/cmnd-tools", get(api_list_tools))
        .route("/list-tools", get(api_list_tools))
        .route("/run-cmnd-tool", post(api_run_tool))
        .route("/run-tool", post(api_run_tool))
        .route("/health", get(api_health))
        .with_state(state);

    if cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }
    app.layer(TraceLayer::new_for_http())
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = build_state(Arc::clone(&config))?;
    let tool_count = state.registry.len();
    let app = router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        name: "server.started",
        address = %address,
        tools = tool_count,
        "Server started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Response of the tool listing endpoints.
#[derive(Debug, Serialize)]
struct ToolsResponse<'a> {
    tools: Vec<ToolSummary<'a>>,
}

/// Body of the tool invocation endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunToolRequest {
    #[serde(default)]
    pub tool_name: String,
    #[serde(default)]
    pub props: Option<Map<String, Value>>,
}

/// Invocation failure rendered as `{"error": message}`.
///
/// Validation failures keep a 200 status so callers can tell "bad input"
/// apart from a broken tool.
#[derive(Debug)]
pub struct ApiError(pub InvocationError);

impl From<InvocationError> for ApiError {
    fn from(err: InvocationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            InvocationError::NotFound(_) => StatusCode::NOT_FOUND,
            InvocationError::Validation(_) => StatusCode::OK,
            InvocationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// GET /cmnd-tools - List every registered tool.
async fn api_list_tools(State(state): State<AppState>) -> Response {
    Json(ToolsResponse {
        tools: list_tools(&state.registry),
    })
    .into_response()
}

/// POST /run-cmnd-tool - Invoke one tool by name.
async fn api_run_tool(
    State(state): State<AppState>,
    Json(req): Json<RunToolRequest>,
) -> Result<Json<Value>, ApiError> {
    info!(tool = %req.tool_name, "Received tool invocation");

    let props = req.props.unwrap_or_default();
    let value = state.invoker.invoke(&req.tool_name, props).await?;
    Ok(Json(value))
}

/// GET /health - Liveness probe.
async fn api_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "tools": state.registry.len() }))
}
