//! HTTP surface: the liveness probe and the blueprint endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::blueprint::prompt::{PromptVariant, build_user_prompt};
use crate::blueprint::request::{LevelRequest, LevelResponse};
use crate::error::ApiError;
use crate::provider::{CompletionProvider, LlmError};

/// Shared per-process state. Requests are otherwise fully independent:
/// each owns its credential, prompt, and upstream call.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<dyn CompletionProvider>,
    variant: PromptVariant,
}

impl AppState {
    pub fn new(gateway: Arc<dyn CompletionProvider>, variant: PromptVariant) -> Self {
        Self { gateway, variant }
    }
}

/// Route table plus middleware: cross-origin requests are permitted
/// unconditionally, and every request is traced.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/level-blueprint", post(generate_level_blueprints))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "levelforge is running"
}

/// Validate the request, fold it into a prompt, forward to the upstream
/// model with the caller's credential, and pass the generated text back
/// unmodified.
async fn generate_level_blueprints(
    State(state): State<AppState>,
    Json(request): Json<LevelRequest>,
) -> Result<Json<LevelResponse>, ApiError> {
    let params = request.validate()?;
    info!(
        genre = %params.genre,
        count = params.count,
        variant = %state.variant,
        "generating level blueprints"
    );

    let system_prompt = state.variant.system_prompt();
    let user_prompt = build_user_prompt(&params);

    let content = state
        .gateway
        .complete(&params.api_key, &system_prompt, &user_prompt)
        .await
        .map_err(|err| {
            error!(error = %err, "upstream completion failed");
            match err {
                LlmError::Api { body, .. } => ApiError::Upstream(body),
                other => ApiError::Internal(other.to_string()),
            }
        })?;

    Ok(Json(LevelResponse { content }))
}
