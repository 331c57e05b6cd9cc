use chrono::{DateTime, Utc};

use super::domain::{PanelistId, ResponseRow, RewardLedgerEntry, SurveyCategory, SurveyQuestion};

/// Read-only access to category definitions and their question schemas.
pub trait SurveyCatalog: Send + Sync {
    fn category(&self, category_id: i32) -> Result<Option<SurveyCategory>, RepositoryError>;

    /// Questions for a category, including nested options and matrix rows.
    fn questions_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<SurveyQuestion>, RepositoryError>;
}

/// Existence check against the panelist registry.
pub trait PanelistDirectory: Send + Sync {
    fn exists(&self, panelist: &PanelistId) -> Result<bool, RepositoryError>;
}

/// Storage for response rows and the reward ledger.
///
/// Implementors own the consistency of the write path: concurrent
/// submissions by the same panelist for the same category must be serialized
/// so that `last_submission_at` and `save_submission` observe a consistent
/// history. The engine performs no locking or retries of its own.
pub trait ProfileStore: Send + Sync {
    /// Timestamp of the most recent stored row for this panelist+category.
    fn last_submission_at(
        &self,
        panelist: &PanelistId,
        category_id: i32,
    ) -> Result<Option<DateTime<Utc>>, RepositoryError>;

    /// Persist one submission's rows together with its ledger entry.
    /// All writes succeed or none do.
    fn save_submission(
        &self,
        rows: Vec<ResponseRow>,
        reward: RewardLedgerEntry,
    ) -> Result<(), RepositoryError>;

    /// All stored rows for this panelist+category, every submission included.
    fn responses(
        &self,
        panelist: &PanelistId,
        category_id: i32,
    ) -> Result<Vec<ResponseRow>, RepositoryError>;

    /// The panelist's full reward ledger, earned and redeemed.
    fn rewards(&self, panelist: &PanelistId) -> Result<Vec<RewardLedgerEntry>, RepositoryError>;
}

/// Error enumeration for collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected: {0}")]
    Rejected(String),
}
