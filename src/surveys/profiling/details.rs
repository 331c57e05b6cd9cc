//! Read-path inverse of the normalizer: rebuilds display-ready answers from
//! stored response rows and the current question schema.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{ResponseRow, SurveyQuestion};

/// Display-ready view of a panelist's answers for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSurveyDetails {
    pub category_id: i32,
    pub total_question_count: usize,
    pub last_response_on: Option<DateTime<Utc>>,
    pub responses: Vec<QuestionAnswers>,
}

impl ProfileSurveyDetails {
    pub fn empty(category_id: i32, total_question_count: usize) -> Self {
        Self {
            category_id,
            total_question_count,
            last_response_on: None,
            responses: Vec::new(),
        }
    }
}

/// All displayable answers for a single question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionAnswers {
    pub question_id: i64,
    pub question_text: String,
    pub answers: Vec<AnswerDetail>,
}

/// One rendered answer; matrix answers carry their resolved row label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix_row: Option<String>,
    pub value: String,
}

/// Group stored rows by question and render each into a display string.
///
/// Rows referencing questions no longer in the schema are dropped (the schema
/// may have evolved since submission); rows rendering to an empty string are
/// excluded, and groups left with no displayable answers are dropped whole.
/// `last_response_on` is the maximum timestamp across retained rows, not just
/// displayed ones.
pub fn build_profile_details(
    category_id: i32,
    questions: &[SurveyQuestion],
    rows: &[ResponseRow],
) -> ProfileSurveyDetails {
    if questions.is_empty() || rows.is_empty() {
        return ProfileSurveyDetails::empty(category_id, questions.len());
    }

    let mut last_response_on: Option<DateTime<Utc>> = None;
    let mut responses = Vec::new();

    for question in questions {
        let mut group: Vec<&ResponseRow> = rows
            .iter()
            .filter(|row| row.question_id == question.question_id)
            .collect();
        if group.is_empty() {
            continue;
        }
        group.sort_by_key(|row| row.matrix_row_id.unwrap_or(0));

        for row in &group {
            if last_response_on.map_or(true, |max| row.created_on > max) {
                last_response_on = Some(row.created_on);
            }
        }

        let mut answers = Vec::new();
        for row in group {
            let Some(value) = render_answer(row, question) else {
                continue;
            };

            let matrix_row = row
                .matrix_row_id
                .and_then(|row_id| question.matrix_row_label(row_id))
                .map(str::to_string);

            answers.push(AnswerDetail { matrix_row, value });
        }

        if answers.is_empty() {
            continue;
        }

        responses.push(QuestionAnswers {
            question_id: question.question_id,
            question_text: question.text.clone(),
            answers,
        });
    }

    ProfileSurveyDetails {
        category_id,
        total_question_count: questions.len(),
        last_response_on,
        responses,
    }
}

/// Render one row into its display string, mirroring the normalizer's slot
/// precedence: text, then numeric, then timestamp, then option resolution.
fn render_answer(row: &ResponseRow, question: &SurveyQuestion) -> Option<String> {
    if let Some(text) = &row.text {
        if !text.trim().is_empty() {
            return Some(text.clone());
        }
    }

    if let Some(numeric) = row.numeric {
        return Some(numeric.to_string());
    }

    if let Some(timestamp) = row.timestamp {
        return Some(timestamp.format("%Y-%m-%d %H:%M:%SZ").to_string());
    }

    let answer_ids = row.answer_ids.as_deref()?;
    resolve_option_labels(answer_ids, question)
}

/// Split the stored option-list on commas and map each token to its option
/// label. Tokens that do not resolve to a known option stay in the output
/// verbatim. Labels are joined in option-id ascending order, independent of
/// the stored token order; unparseable tokens sort last.
fn resolve_option_labels(answer_ids: &str, question: &SurveyQuestion) -> Option<String> {
    let mut tokens: Vec<(Option<i64>, &str)> = answer_ids
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| (token.parse::<i64>().ok(), token))
        .collect();
    tokens.sort_by_key(|(parsed, _)| parsed.unwrap_or(i64::MAX));

    let mut labels = Vec::new();
    for (parsed, raw) in tokens {
        match parsed.and_then(|option_id| question.option_label(option_id)) {
            Some(label) if !label.trim().is_empty() => labels.push(label.to_string()),
            _ => labels.push(raw.to_string()),
        }
    }

    if labels.is_empty() {
        None
    } else {
        Some(labels.join(", "))
    }
}
