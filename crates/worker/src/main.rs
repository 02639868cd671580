use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clubhub_events::{BrokerConfig, EventConsumer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clubhub_worker=debug,clubhub_events=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = clubhub_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    clubhub_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    clubhub_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping consumer");
            signal_cancel.cancel();
        }
    });

    let consumer = EventConsumer::new(BrokerConfig::from_env(), pool);
    if let Err(e) = consumer.run(cancel).await {
        tracing::error!(error = %e, "Consumer failed");
        std::process::exit(1);
    }

    tracing::info!("Worker stopped");
}
