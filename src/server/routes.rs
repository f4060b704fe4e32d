//! Axum route handlers.
//!
//! # Routes
//!
//! - `GET  /`            — Question page, first persona selected
//! - `POST /`            — Submit the page form (`persona`, `question`)
//! - `POST /api/answer`  — JSON variant: `{persona, question}` → `{persona, heading, answer}`
//! - `GET  /health`      — Returns `{"status": "ok", "version": ..., "service": ...}`

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    routing::post,
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::dispatcher::ResponseDispatcher;
use crate::error::AssistantError;
use crate::interaction::{Answer, Interaction, InteractionState};
use crate::llms::base_llm::BaseLLM;
use crate::persona::PersonaRegistry;
use crate::server::render::{PageRenderer, PageView};

/// Message shown when the model call fails. Details go to the log only.
pub const REMOTE_FAILURE_MESSAGE: &str =
    "回答の取得に失敗しました。しばらくしてから再度お試しください。";

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: ResponseDispatcher,
    pub registry: Arc<PersonaRegistry>,
    pub renderer: Arc<PageRenderer>,
}

impl AppState {
    /// Wire `registry` and `llm` into a dispatcher and compile the templates.
    pub fn new(registry: Arc<PersonaRegistry>, llm: Arc<dyn BaseLLM>) -> Result<Self, tera::Error> {
        Ok(Self {
            dispatcher: ResponseDispatcher::new(registry.clone(), llm),
            registry,
            renderer: Arc::new(PageRenderer::new()?),
        })
    }

    fn interaction(&self) -> Interaction {
        Interaction::new(self.dispatcher.clone())
    }
}

/// Body of `POST /` and `POST /api/answer`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Persona label; the first registered persona when omitted.
    #[serde(default)]
    pub persona: Option<String>,
    #[serde(default)]
    pub question: String,
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(ask_form_handler))
        .route("/api/answer", post(ask_json_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health — liveness check.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": crate::SERVICE_NAME,
    }))
}

/// GET / — the idle page.
async fn index_handler(State(state): State<AppState>) -> Response {
    let interaction = state.interaction();
    let view = PageView::from_interaction(state.registry.personas(), &interaction);
    render_page(&state, view, StatusCode::OK)
}

/// POST / — validate, dispatch and render the resulting page.
async fn ask_form_handler(
    State(state): State<AppState>,
    Form(request): Form<AskRequest>,
) -> Response {
    let mut interaction = state.interaction();

    if let Some(label) = request.persona.as_deref() {
        if let Err(e) = interaction.select_persona(label) {
            tracing::warn!("rejecting form submission: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    }
    interaction.edit_text(request.question);

    let failure = interaction.submit().await.err();
    let view = PageView::from_interaction(state.registry.personas(), &interaction);

    match failure {
        None => render_page(&state, view, StatusCode::OK),
        Some(e) => {
            tracing::error!("dispatch failed: {}", e);
            render_page(&state, view.with_error(REMOTE_FAILURE_MESSAGE), status_for(&e))
        }
    }
}

/// POST /api/answer — JSON rendition of the same flow.
///
/// Request:  `{ "persona": "技術コンサルタント", "question": "..." }`
/// Response: `{ "persona": ..., "heading": "...からの回答", "answer": ... }`
async fn ask_json_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<Answer>, (StatusCode, Json<Value>)> {
    let mut interaction = state.interaction();

    if let Some(label) = request.persona.as_deref() {
        interaction.select_persona(label).map_err(json_error)?;
    }
    interaction.edit_text(request.question);

    match interaction.submit().await {
        Ok(InteractionState::Displaying(answer)) => Ok(Json(answer.clone())),
        Ok(InteractionState::Rejected { warning }) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": warning })),
        )),
        Ok(other) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": format!("unexpected interaction state: {:?}", other)})),
        )),
        Err(e) => Err(json_error(e)),
    }
}

fn status_for(err: &AssistantError) -> StatusCode {
    match err {
        AssistantError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
        AssistantError::UnknownPersona(_) => StatusCode::BAD_REQUEST,
        AssistantError::InvalidRegistry(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AssistantError::RemoteCall(_) => StatusCode::BAD_GATEWAY,
    }
}

fn json_error(err: AssistantError) -> (StatusCode, Json<Value>) {
    let status = status_for(&err);
    let message = match err {
        AssistantError::RemoteCall(ref e) => {
            tracing::error!("dispatch failed: {}", e);
            REMOTE_FAILURE_MESSAGE.to_string()
        }
        ref other => other.to_string(),
    };
    (status, Json(serde_json::json!({ "error": message })))
}

fn render_page(state: &AppState, view: PageView<'_>, status: StatusCode) -> Response {
    match state.renderer.render(&view) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
