use proactive_message_service::config::GatewayConfig;
use proactive_message_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("proactive-message-service", "info", otlp_endpoint.as_deref())?;

    // A missing credential must stop the process before the port is bound.
    let config = GatewayConfig::load().map_err(|e| {
        eprintln!("ERROR: {}", e);
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::Error::new(e)
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start application: {}", e);
        anyhow::Error::new(e)
    })?;

    app.run_until_stopped().await?;

    Ok(())
}
