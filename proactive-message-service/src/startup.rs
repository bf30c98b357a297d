//! Application startup and lifecycle management.
//!
//! Everything a request needs (rendered prompt, provider client) is built here
//! once, before the listener accepts connections.

use crate::catalog::Catalog;
use crate::config::GatewayConfig;
use crate::handlers::proactive::get_proactive_message;
use crate::prompt::build_proactive_prompt;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::ProactiveMessageService;
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{cors::public_read_cors, tracing::request_id_middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: ProactiveMessageService,
}

impl AppState {
    pub fn new(gateway: ProactiveMessageService) -> Self {
        Self { gateway }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/get-proactive-message", get(get_proactive_message))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(public_read_cors())
        .with_state(state)
}

/// Load the catalog and render the opening prompt.
pub fn prepare_prompt(config: &GatewayConfig) -> Result<String, AppError> {
    let catalog = Catalog::load(config.catalog.path.as_deref())
        .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

    tracing::info!(
        stones = catalog.len(),
        source = %config
            .catalog
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
        "Loaded gemstone catalog"
    );

    build_proactive_prompt(&catalog).map_err(|e| AppError::InternalError(anyhow::Error::new(e)))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let prompt = prepare_prompt(&config)?;

        let gemini_config = GeminiConfig {
            api_key: config.google.api_key.clone(),
            model: config.models.text_model.clone(),
            api_base: config.google.api_base.clone(),
            request_timeout: config.google.request_timeout,
        };
        let text_provider: Arc<dyn TextProvider> = Arc::new(
            GeminiTextProvider::new(gemini_config)
                .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?,
        );

        tracing::info!(
            model = %config.models.text_model,
            timeout_secs = config.google.request_timeout.map(|t| t.as_secs()),
            "Initialized Gemini text provider"
        );

        let state = AppState::new(ProactiveMessageService::new(prompt, text_provider));

        // Port 0 = random port for testing
        let address = config.common.bind_address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Proactive message service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })?;

        tracing::info!("Service shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
