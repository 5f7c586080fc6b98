use async_openai::{config::OpenAIConfig, Client};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use planwisr_backend::infrastructure::config::{Config, LogFormat};
use planwisr_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use planwisr_backend::infrastructure::http::{build_router, start_http_server};
use planwisr_backend::infrastructure::repositories::OpenAiTaskAssistant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting PlanWisr Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    // AI assistant client
    if config.openai_api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; AI routes will fail until it is configured");
    }
    let mut openai_config = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());
    if let Some(base_url) = &config.openai_base_url {
        tracing::info!(base_url = %base_url, "Using custom OpenAI-compatible endpoint");
        openai_config = openai_config.with_api_base(base_url.clone());
    }
    let openai_client = Arc::new(Client::with_config(openai_config));
    let assistant = Arc::new(OpenAiTaskAssistant::new(
        openai_client,
        config.openai_model.clone(),
    ));
    tracing::info!(model = %config.openai_model, "AI assistant initialized");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    let app = build_router(pool, config.clone(), assistant);

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "planwisr_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "planwisr_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
