use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::surveys::rewards::{summarize_rewards, RewardsSummary};

use super::details::{build_profile_details, ProfileSurveyDetails};
use super::domain::{PanelistId, RewardKind, RewardLedgerEntry, SurveyQuestion};
use super::eligibility::{award_points, reward_description};
use super::normalizer::normalize_responses;
use super::repository::{PanelistDirectory, ProfileStore, RepositoryError, SurveyCatalog};

/// Facade composing the normalizer, eligibility rules, and reconstructor over
/// the collaborator traits.
pub struct ProfileSurveyService<C, D, S> {
    catalog: Arc<C>,
    panelists: Arc<D>,
    store: Arc<S>,
}

/// Points collected by one submission. Every input-shape failure (blank ids,
/// unknown panelist or category, empty schema, unusable payload) collapses to
/// the same zero-point outcome with nothing written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub points_collected: i32,
}

impl SubmissionOutcome {
    pub const EMPTY: Self = Self {
        points_collected: 0,
    };
}

impl<C, D, S> ProfileSurveyService<C, D, S>
where
    C: SurveyCatalog + 'static,
    D: PanelistDirectory + 'static,
    S: ProfileStore + 'static,
{
    pub fn new(catalog: Arc<C>, panelists: Arc<D>, store: Arc<S>) -> Self {
        Self {
            catalog,
            panelists,
            store,
        }
    }

    /// Ingest one survey submission: normalize the payload, persist the
    /// response rows plus one reward ledger entry as a single unit, and
    /// return the points awarded.
    ///
    /// A ledger entry is written even when the submission earns zero points,
    /// so the audit trail records every accepted submission.
    pub fn submit(
        &self,
        panelist: &PanelistId,
        category_id: i32,
        raw_json: &str,
        now: DateTime<Utc>,
    ) -> Result<SubmissionOutcome, ProfileServiceError> {
        if panelist.is_blank() || raw_json.trim().is_empty() {
            return Ok(SubmissionOutcome::EMPTY);
        }

        if !self.panelists.exists(panelist)? {
            return Ok(SubmissionOutcome::EMPTY);
        }

        let Some(category) = self.catalog.category(category_id)? else {
            return Ok(SubmissionOutcome::EMPTY);
        };

        let questions: HashMap<i64, SurveyQuestion> = self
            .catalog
            .questions_by_category(category_id)?
            .into_iter()
            .map(|question| (question.question_id, question))
            .collect();

        if questions.is_empty() {
            return Ok(SubmissionOutcome::EMPTY);
        }

        let last_submission = self.store.last_submission_at(panelist, category_id)?;

        let rows = normalize_responses(raw_json, panelist, category_id, &questions, now);
        if rows.is_empty() {
            return Ok(SubmissionOutcome::EMPTY);
        }

        let points_collected = award_points(&category, now, last_submission);
        let reward = RewardLedgerEntry {
            reward_id: Uuid::new_v4(),
            panelist_id: panelist.clone(),
            category_id: Some(category_id),
            points: points_collected,
            kind: RewardKind::Earned,
            description: reward_description(&category, last_submission, points_collected),
            created_on: now,
        };

        let row_count = rows.len();
        self.store.save_submission(rows, reward)?;

        tracing::info!(
            panelist = %panelist.0,
            category_id,
            rows = row_count,
            points = points_collected,
            "survey submission stored"
        );

        Ok(SubmissionOutcome { points_collected })
    }

    /// Reconstruct the panelist's stored answers for one category into a
    /// display-ready view. Empty schemas and blank panelist ids yield an
    /// empty-but-valid result without touching the row store.
    pub fn profile_details(
        &self,
        panelist: &PanelistId,
        category_id: i32,
    ) -> Result<ProfileSurveyDetails, ProfileServiceError> {
        let questions = self.catalog.questions_by_category(category_id)?;

        if questions.is_empty() || panelist.is_blank() {
            return Ok(ProfileSurveyDetails::empty(category_id, questions.len()));
        }

        let rows = self.store.responses(panelist, category_id)?;
        Ok(build_profile_details(category_id, &questions, &rows))
    }

    /// Aggregate the panelist's reward ledger into a balance summary, with
    /// earned entries older than `expiry_months` counted as expired.
    pub fn rewards_summary(
        &self,
        panelist: &PanelistId,
        now: DateTime<Utc>,
        expiry_months: u32,
    ) -> Result<RewardsSummary, ProfileServiceError> {
        let entries = self.store.rewards(panelist)?;
        Ok(summarize_rewards(&entries, now, expiry_months))
    }
}

/// Error raised by the profile survey service. Malformed submissions are not
/// an error path; only collaborator failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
