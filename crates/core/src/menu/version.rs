//! Menu version naming.

use chrono::{DateTime, Utc};

/// Prefix used for versions saved from the menu editor.
pub const DEFAULT_VERSION_PREFIX: &str = "version";

/// Name a snapshot after the moment it was taken: `{prefix}-YYYYMMDD-HHMMSS`.
#[must_use]
pub fn version_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}-{}", at.format("%Y%m%d-%H%M%S"))
}
