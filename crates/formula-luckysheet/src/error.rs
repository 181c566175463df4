use thiserror::Error;

use crate::MigrationReport;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("invalid Luckysheet document: {0}")]
    Json(#[from] serde_json::Error),
    /// Strict mode refused a migration that would have dropped or degraded legacy content.
    #[error("strict migration refused {count} lossy legacy entries", count = .0.len())]
    Rejected(MigrationReport),
}
