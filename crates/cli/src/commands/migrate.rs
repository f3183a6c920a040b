//! Database migration command.
//!
//! ```bash
//! magbridge migrate
//! ```
//!
//! Migrations live in `crates/admin/migrations/`.

use super::{CommandError, connect};

/// Run all pending admin migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running admin migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Admin migrations complete!");
    Ok(())
}
