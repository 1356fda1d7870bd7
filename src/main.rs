use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tubefeed_backend::infrastructure::config::{Config, LogFormat};
use tubefeed_backend::infrastructure::db::{check_connection, create_pool};
use tubefeed_backend::infrastructure::http::start_http_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting TubeFeed Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    tracing::info!("Instantiating repositories...");
    let account_repo = Arc::new(
        tubefeed_backend::infrastructure::repositories::PgAccountRepository::new(pool.clone()),
    );
    let video_repo = Arc::new(
        tubefeed_backend::infrastructure::repositories::PgVideoRepository::new(pool.clone()),
    );

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let syndication_service = Arc::new(
        tubefeed_backend::domain::syndication::SyndicationService::new(
            account_repo,
            video_repo,
            config.instance.clone(),
        ),
    );

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let feeds_controller = Arc::new(tubefeed_backend::controllers::feeds::FeedsController::new(
        syndication_service,
    ));

    // Start HTTP server with all routes
    start_http_server(pool, config, feeds_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "tubefeed_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "tubefeed_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
