//! Turns a raw survey answer payload into typed [`ResponseRow`]s.
//!
//! The payload is a JSON object keyed by question id. Dispatch follows the
//! runtime shape of each value rather than the question's declared response
//! type: matrix answers arrive as nested objects regardless of the declared
//! type, so the shape is the reliable signal. Unknown or malformed keys are
//! tolerated and skipped.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use super::domain::{PanelistId, ResponseRow, ResponseType, SurveyQuestion};

/// Normalize `raw_json` against the category's question schema.
///
/// Returns an empty list when the payload is not a JSON object at the top
/// level. Entries whose key does not parse as an integer or does not match a
/// known question id are dropped silently.
pub fn normalize_responses(
    raw_json: &str,
    panelist: &PanelistId,
    category_id: i32,
    questions: &HashMap<i64, SurveyQuestion>,
    submitted_at: DateTime<Utc>,
) -> Vec<ResponseRow> {
    let payload: Value = match serde_json::from_str(raw_json) {
        Ok(value) => value,
        Err(_) => return Vec::new(),
    };

    let Value::Object(entries) = payload else {
        return Vec::new();
    };

    let mut rows = Vec::new();

    for (key, value) in &entries {
        let Ok(question_id) = key.trim().parse::<i64>() else {
            continue;
        };
        let Some(question) = questions.get(&question_id) else {
            continue;
        };

        match value {
            Value::Object(cells) => {
                for (row_key, cell) in cells {
                    let mut row =
                        ResponseRow::new(panelist.clone(), category_id, question_id, submitted_at);
                    row.matrix_row_id = row_key.trim().parse::<i64>().ok();
                    fill_scalar_slot(&mut row, cell, question);
                    rows.push(row);
                }
            }
            Value::Array(items) => {
                let mut row =
                    ResponseRow::new(panelist.clone(), category_id, question_id, submitted_at);
                row.answer_ids = join_elements(items);
                rows.push(row);
            }
            scalar => {
                let mut row =
                    ResponseRow::new(panelist.clone(), category_id, question_id, submitted_at);
                fill_scalar_slot(&mut row, scalar, question);
                rows.push(row);
            }
        }
    }

    rows
}

/// Scalar dispatch: picks the storage slot from the JSON value's type. Nulls
/// leave every slot empty; the row is still emitted by the caller.
fn fill_scalar_slot(row: &mut ResponseRow, value: &Value, question: &SurveyQuestion) {
    match value {
        Value::String(text) => {
            if question.response_type == ResponseType::Text {
                match parse_datetime_utc(text) {
                    Some(timestamp) => row.timestamp = Some(timestamp),
                    None => row.text = Some(text.clone()),
                }
            } else {
                row.answer_ids = Some(text.clone());
            }
        }
        Value::Number(number) => match number.as_f64() {
            Some(numeric) => row.numeric = Some(numeric),
            None => row.answer_ids = Some(number.to_string()),
        },
        Value::Bool(flag) => {
            row.answer_ids = Some(if *flag { "true" } else { "false" }.to_string());
        }
        Value::Null => {}
        // A nested array/object inside a matrix cell keeps its JSON text.
        other => row.answer_ids = Some(other.to_string()),
    }
}

/// Comma-join the textual form of each array element, skipping nulls and
/// blank strings. `None` when nothing stringifies.
fn join_elements(items: &[Value]) -> Option<String> {
    let mut joined = String::new();

    for item in items {
        let Some(token) = stringify_element(item) else {
            continue;
        };
        if token.trim().is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push(',');
        }
        joined.push_str(&token);
    }

    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn stringify_element(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(if *flag { "true" } else { "false" }.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Best-effort date-time parse for free-text answers, normalized to UTC.
pub(crate) fn parse_datetime_utc(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.and_utc());
        }
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return parsed.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
        }
    }

    None
}
