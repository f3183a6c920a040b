//! Menu version commands.
//!
//! ```bash
//! magbridge menu versions --shop example.myshopify.com
//! ```

use magbridge_admin::db::{MenuVersionRepository, MenuVersionStore, MenuVersionSummary};

use super::{CommandError, connect};

/// Print every version of `shop`, newest first, marking the active one.
pub async fn versions(shop: &str) -> Result<(), CommandError> {
    let pool = connect().await?;
    let versions = MenuVersionRepository::new(&pool).list(shop).await?;

    if versions.is_empty() {
        tracing::warn!(shop, "No menu versions");
        return Ok(());
    }

    #[allow(clippy::print_stdout)]
    {
        for version in &versions {
            println!("{}", format_line(version));
        }
    }
    Ok(())
}

fn format_line(version: &MenuVersionSummary) -> String {
    format!(
        "{} {:>6}  {}  {}",
        if version.is_active { "*" } else { " " },
        version.id.as_i32(),
        version.version_name,
        version.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}
