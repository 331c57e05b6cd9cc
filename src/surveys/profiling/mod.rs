//! Survey response ingestion and reward eligibility for profiling surveys.
//!
//! The write path normalizes a raw answer payload against the category's
//! question schema and appends response rows plus one reward ledger entry in
//! a single atomic store call. The read path reverses the normalization,
//! resolving stored option ids back into label text.

pub mod details;
pub mod domain;
pub mod eligibility;
pub mod normalizer;
pub mod repository;
pub mod service;


pub use details::{build_profile_details, AnswerDetail, ProfileSurveyDetails, QuestionAnswers};
pub use domain::{
    MatrixRow, PanelistId, QuestionKind, ResponseRow, ResponseType, RewardKind, RewardLedgerEntry,
    SurveyCategory, SurveyOption, SurveyQuestion,
};
pub use eligibility::{award_points, reward_description};
pub use normalizer::normalize_responses;
pub use repository::{PanelistDirectory, ProfileStore, RepositoryError, SurveyCatalog};
pub use service::{ProfileServiceError, ProfileSurveyService, SubmissionOutcome};
