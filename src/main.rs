use dotenv::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskboard::build_rocket;
use taskboard::environment::{Env, StorageMode};
use taskboard::repository::Storage;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Env::load().inspect_err(|error| {
        tracing::error!("Configuration error: {}", error);
    })?;

    let storage = match &config.storage {
        StorageMode::InMemory => {
            tracing::warn!("using in-memory storage, data is lost on restart");
            Storage::in_memory()
        }
        StorageMode::Postgres { database_url } => Storage::postgres(database_url)
            .await
            .inspect_err(|error| tracing::error!("Failed to connect to the database: {}", error))?,
    };

    let _rocket = build_rocket(storage, config.auth).launch().await?;
    Ok(())
}
