use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque ULID-like identifier for a panelist. Response rows and ledger
/// entries reference the panelist by this value only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelistId(pub String);

impl PanelistId {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Declared answer format for a profiling question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    /// One option from the question's option set.
    Single,
    /// Any number of options from the question's option set.
    Multi,
    /// Free text (dates submitted here are detected and stored as timestamps).
    Text,
}

/// Distinguishes plain questions from row-by-row matrix grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    Standard,
    Matrix,
}

/// A selectable answer option belonging to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyOption {
    pub option_id: i64,
    pub label: String,
}

/// One row of a matrix question's grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub row_id: i64,
    pub label: String,
}

/// Schema record for a profiling question, read-only at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyQuestion {
    pub question_id: i64,
    pub text: String,
    pub category_id: i32,
    pub response_type: ResponseType,
    pub kind: QuestionKind,
    pub options: Vec<SurveyOption>,
    pub matrix_rows: Vec<MatrixRow>,
}

impl SurveyQuestion {
    pub fn option_label(&self, option_id: i64) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.option_id == option_id)
            .map(|option| option.label.as_str())
    }

    pub fn matrix_row_label(&self, row_id: i64) -> Option<&str> {
        self.matrix_rows
            .iter()
            .find(|row| row.row_id == row_id)
            .map(|row| row.label.as_str())
    }
}

/// Normalized answer record written per submitted answer.
///
/// Exactly one of the value slots (`answer_ids`, `text`, `numeric`,
/// `timestamp`) is populated by the normalizer; rows are immutable once
/// created, a retake appends new rows instead of updating old ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRow {
    pub response_id: Uuid,
    pub panelist_id: PanelistId,
    pub category_id: i32,
    pub question_id: i64,
    pub matrix_row_id: Option<i64>,
    /// Comma-joined selected option ids (or literal tokens for booleans and
    /// out-of-range numbers).
    pub answer_ids: Option<String>,
    pub text: Option<String>,
    pub numeric: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub created_on: DateTime<Utc>,
}

impl ResponseRow {
    pub(crate) fn new(
        panelist_id: PanelistId,
        category_id: i32,
        question_id: i64,
        created_on: DateTime<Utc>,
    ) -> Self {
        Self {
            response_id: Uuid::new_v4(),
            panelist_id,
            category_id,
            question_id,
            matrix_row_id: None,
            answer_ids: None,
            text: None,
            numeric: None,
            timestamp: None,
            created_on,
        }
    }
}

/// Category schema record carrying the reward policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyCategory {
    pub category_id: i32,
    pub name: String,
    pub is_active: bool,
    /// Points for the first-ever submission in this category.
    pub first_completion_points: i32,
    /// Points for an eligible retake.
    pub retake_points: i32,
    /// Days before a retake earns points again; `0` means always eligible.
    pub retake_cooldown_days: i32,
}

/// Direction of a reward ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardKind {
    Earned,
    Redeemed,
}

impl RewardKind {
    pub const fn label(self) -> &'static str {
        match self {
            RewardKind::Earned => "earned",
            RewardKind::Redeemed => "redeemed",
        }
    }
}

/// Immutable ledger record of points earned or redeemed. The panelist's
/// balance is always derived from these entries, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardLedgerEntry {
    pub reward_id: Uuid,
    pub panelist_id: PanelistId,
    pub category_id: Option<i32>,
    /// Positive for earned points, negative magnitude for redemptions.
    pub points: i32,
    pub kind: RewardKind,
    pub description: String,
    pub created_on: DateTime<Utc>,
}
