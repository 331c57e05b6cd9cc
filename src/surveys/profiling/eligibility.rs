//! Reward eligibility rules for profiling survey submissions.
//!
//! Pure functions over the category's reward policy: no I/O, fully
//! deterministic given their inputs.

use chrono::{DateTime, Duration, Utc};

use super::domain::SurveyCategory;

/// Points earned by a submission at `submitted_at`, given the panelist's most
/// recent prior submission in the category.
///
/// First-ever submissions earn the first-completion value. Retakes earn the
/// retake value, gated by the category's cooldown: a submission before
/// `last + cooldown days` is accepted but earns nothing. A cooldown of zero
/// (or less) means retakes are always eligible. Negative policy values clamp
/// to zero at the point of award.
pub fn award_points(
    category: &SurveyCategory,
    submitted_at: DateTime<Utc>,
    last_submission: Option<DateTime<Utc>>,
) -> i32 {
    let Some(last) = last_submission else {
        return clamp_points(category.first_completion_points);
    };

    if category.retake_cooldown_days <= 0 {
        return clamp_points(category.retake_points);
    }

    let next_eligible = last + Duration::days(i64::from(category.retake_cooldown_days));
    if submitted_at < next_eligible {
        return 0;
    }

    clamp_points(category.retake_points)
}

fn clamp_points(points: i32) -> i32 {
    points.max(0)
}

/// Human-readable ledger description distinguishing unrewarded submissions,
/// first completions, and retakes.
pub fn reward_description(
    category: &SurveyCategory,
    last_submission: Option<DateTime<Utc>>,
    points: i32,
) -> String {
    let name = match category.name.trim() {
        "" => "Profile survey",
        trimmed => trimmed,
    };

    if points <= 0 {
        return format!("{name} survey submitted (no points awarded)");
    }

    if last_submission.is_some() {
        format!("{name} survey retake reward")
    } else {
        format!("{name} survey completion reward")
    }
}
