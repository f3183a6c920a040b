//! CLI subcommands.

pub mod menu;
pub mod migrate;
pub mod products;
pub mod settings;

use magbridge_admin::db::{self, RepositoryError};
use magbridge_admin::magento::MagentoError;
use magbridge_admin::services::ServiceError;
use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A service call failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The Magento client could not be built.
    #[error(transparent)]
    Magento(#[from] MagentoError),

    /// Invalid argument.
    #[error("{0}")]
    Invalid(String),
}

/// `ADMIN_DATABASE_URL`, falling back to `DATABASE_URL`.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();
    std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("ADMIN_DATABASE_URL"))
}

async fn connect() -> Result<PgPool, CommandError> {
    let url = database_url()?;
    tracing::info!("Connecting to admin database...");
    Ok(db::create_pool(&url).await?)
}
