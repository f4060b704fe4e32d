//! Expert assistant HTTP server binary.
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY` — Completion API key (requests fail without it)
//! - `OPENAI_BASE_URL` — Alternate API base URL
//! - `OPENAI_ORGANIZATION` — Organization for the `OpenAI-Organization` header
//! - `HOST` — Bind address (default: 0.0.0.0)
//! - `PORT` — HTTP port (default: 8080)
//! - `RUST_LOG` — Tracing filter (default: "info,expert_assistant=debug")
//!
//! Variables may also come from a `.env` file in the working directory.
//!
//! # Usage
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run --bin server
//! ```

use std::sync::Arc;

use anyhow::Context;
use expert_assistant::dispatcher::{MODEL_ID, TEMPERATURE};
use expert_assistant::llms::providers::OpenAICompletion;
use expert_assistant::server::{app_router, AppState};
use expert_assistant::{AppConfig, PersonaRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,expert_assistant=debug".into()),
        )
        .init();

    if !config.has_api_key() {
        tracing::warn!("OPENAI_API_KEY is not set; every question will fail until it is");
    }

    let registry = Arc::new(PersonaRegistry::builtin());
    let llm = Arc::new(OpenAICompletion::new(
        MODEL_ID,
        TEMPERATURE,
        config.api_key.clone(),
        config.base_url.clone(),
    )
    .with_organization(config.organization.clone()));
    let state = AppState::new(registry.clone(), llm).context("failed to compile page templates")?;
    let app = app_router(state);

    let bind_addr = config.bind_addr();
    tracing::info!("expert-assistant {} starting on {}", expert_assistant::VERSION, bind_addr);
    tracing::info!("Model: {} (temperature {})", MODEL_ID, TEMPERATURE);
    tracing::info!("Personas: {}", registry.labels().collect::<Vec<_>>().join(", "));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
