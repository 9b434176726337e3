use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use resource_api::api::{self, AppState};
use resource_api::auth::SessionStoreRef;
use resource_api::config::AppConfig;
use resource_api::infrastructure::sessions::{InMemorySessionStore, PostgresSessionStore};
use resource_api::infrastructure::storage::{InMemoryStorage, PostgresStorage, StorageAdapter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let (storage, sessions): (Arc<dyn StorageAdapter>, SessionStoreRef) =
        match &config.database_url {
            Some(database_url) => {
                // Connect to database
                tracing::info!("Connecting to database...");
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(database_url)
                    .await?;

                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database connected and migrated");

                let storage: Arc<dyn StorageAdapter> = Arc::new(PostgresStorage::new(pool.clone()));
                let sessions: SessionStoreRef = Arc::new(PostgresSessionStore::new(pool));
                (storage, sessions)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory storage");
                let storage: Arc<dyn StorageAdapter> = Arc::new(InMemoryStorage::new());
                let sessions: SessionStoreRef = Arc::new(InMemorySessionStore::new());
                (storage, sessions)
            }
        };

    let app = api::app(AppState::from_storage(storage, sessions), &config.ui_root);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
