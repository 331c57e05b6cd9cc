use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::surveys::profiling::domain::{
    MatrixRow, PanelistId, QuestionKind, ResponseRow, ResponseType, RewardLedgerEntry,
    SurveyCategory, SurveyOption, SurveyQuestion,
};
use crate::surveys::profiling::repository::{
    PanelistDirectory, ProfileStore, RepositoryError, SurveyCatalog,
};
use crate::surveys::profiling::service::ProfileSurveyService;

pub(super) const CATEGORY_ID: i32 = 7;

pub(super) fn panelist() -> PanelistId {
    PanelistId("01J0EXAMPLEPANELIST0000000".to_string())
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 20, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn finance_category() -> SurveyCategory {
    SurveyCategory {
        category_id: CATEGORY_ID,
        name: "Finance".to_string(),
        is_active: true,
        first_completion_points: 50,
        retake_points: 20,
        retake_cooldown_days: 30,
    }
}

fn option(option_id: i64, label: &str) -> SurveyOption {
    SurveyOption {
        option_id,
        label: label.to_string(),
    }
}

fn question(
    question_id: i64,
    text: &str,
    response_type: ResponseType,
    kind: QuestionKind,
) -> SurveyQuestion {
    SurveyQuestion {
        question_id,
        text: text.to_string(),
        category_id: CATEGORY_ID,
        response_type,
        kind,
        options: Vec::new(),
        matrix_rows: Vec::new(),
    }
}

pub(super) fn single_choice_question() -> SurveyQuestion {
    let mut q = question(
        1,
        "Which bank do you primarily use?",
        ResponseType::Single,
        QuestionKind::Standard,
    );
    q.options = vec![
        option(11, "Local credit union"),
        option(12, "National bank"),
        option(13, "Online-only bank"),
    ];
    q
}

pub(super) fn multi_choice_question() -> SurveyQuestion {
    let mut q = question(
        3,
        "Which financial products do you hold?",
        ResponseType::Multi,
        QuestionKind::Standard,
    );
    q.options = vec![
        option(1, "Checking account"),
        option(2, "Credit card"),
        option(3, "Mortgage"),
    ];
    q
}

pub(super) fn matrix_question() -> SurveyQuestion {
    let mut q = question(
        5,
        "How often do you use these services?",
        ResponseType::Single,
        QuestionKind::Matrix,
    );
    q.options = vec![option(1, "Daily"), option(2, "Weekly")];
    q.matrix_rows = vec![
        MatrixRow {
            row_id: 10,
            label: "Mobile banking".to_string(),
        },
        MatrixRow {
            row_id: 11,
            label: "Budgeting apps".to_string(),
        },
    ];
    q
}

pub(super) fn text_question() -> SurveyQuestion {
    question(
        7,
        "When did you open your first account?",
        ResponseType::Text,
        QuestionKind::Standard,
    )
}

pub(super) fn finance_questions() -> Vec<SurveyQuestion> {
    vec![
        single_choice_question(),
        multi_choice_question(),
        matrix_question(),
        text_question(),
    ]
}

pub(super) fn question_map() -> HashMap<i64, SurveyQuestion> {
    finance_questions()
        .into_iter()
        .map(|q| (q.question_id, q))
        .collect()
}

#[derive(Default)]
pub(super) struct MemoryCatalog {
    pub(super) categories: HashMap<i32, SurveyCategory>,
    pub(super) questions: HashMap<i32, Vec<SurveyQuestion>>,
}

impl MemoryCatalog {
    pub(super) fn with_finance() -> Self {
        let mut catalog = Self::default();
        catalog.categories.insert(CATEGORY_ID, finance_category());
        catalog.questions.insert(CATEGORY_ID, finance_questions());
        catalog
    }
}

impl SurveyCatalog for MemoryCatalog {
    fn category(&self, category_id: i32) -> Result<Option<SurveyCategory>, RepositoryError> {
        Ok(self.categories.get(&category_id).cloned())
    }

    fn questions_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<SurveyQuestion>, RepositoryError> {
        Ok(self.questions.get(&category_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub(super) struct MemoryPanelists {
    pub(super) known: Vec<PanelistId>,
}

impl PanelistDirectory for MemoryPanelists {
    fn exists(&self, panelist: &PanelistId) -> Result<bool, RepositoryError> {
        Ok(self.known.contains(panelist))
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    pub(super) rows: Mutex<Vec<ResponseRow>>,
    pub(super) ledger: Mutex<Vec<RewardLedgerEntry>>,
}

impl MemoryStore {
    pub(super) fn stored_rows(&self) -> Vec<ResponseRow> {
        self.rows.lock().expect("row mutex poisoned").clone()
    }

    pub(super) fn ledger_entries(&self) -> Vec<RewardLedgerEntry> {
        self.ledger.lock().expect("ledger mutex poisoned").clone()
    }
}

impl ProfileStore for MemoryStore {
    fn last_submission_at(
        &self,
        panelist: &PanelistId,
        category_id: i32,
    ) -> Result<Option<DateTime<Utc>>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .expect("row mutex poisoned")
            .iter()
            .filter(|row| &row.panelist_id == panelist && row.category_id == category_id)
            .map(|row| row.created_on)
            .max())
    }

    fn save_submission(
        &self,
        rows: Vec<ResponseRow>,
        reward: RewardLedgerEntry,
    ) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .expect("row mutex poisoned")
            .extend(rows);
        self.ledger
            .lock()
            .expect("ledger mutex poisoned")
            .push(reward);
        Ok(())
    }

    fn responses(
        &self,
        panelist: &PanelistId,
        category_id: i32,
    ) -> Result<Vec<ResponseRow>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .expect("row mutex poisoned")
            .iter()
            .filter(|row| &row.panelist_id == panelist && row.category_id == category_id)
            .cloned()
            .collect())
    }

    fn rewards(&self, panelist: &PanelistId) -> Result<Vec<RewardLedgerEntry>, RepositoryError> {
        Ok(self
            .ledger
            .lock()
            .expect("ledger mutex poisoned")
            .iter()
            .filter(|entry| &entry.panelist_id == panelist)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableStore;

impl ProfileStore for UnavailableStore {
    fn last_submission_at(
        &self,
        _panelist: &PanelistId,
        _category_id: i32,
    ) -> Result<Option<DateTime<Utc>>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_submission(
        &self,
        _rows: Vec<ResponseRow>,
        _reward: RewardLedgerEntry,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn responses(
        &self,
        _panelist: &PanelistId,
        _category_id: i32,
    ) -> Result<Vec<ResponseRow>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn rewards(
        &self,
        _panelist: &PanelistId,
    ) -> Result<Vec<RewardLedgerEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    ProfileSurveyService<MemoryCatalog, MemoryPanelists, MemoryStore>,
    Arc<MemoryStore>,
) {
    let catalog = Arc::new(MemoryCatalog::with_finance());
    let panelists = Arc::new(MemoryPanelists {
        known: vec![panelist()],
    });
    let store = Arc::new(MemoryStore::default());
    let service = ProfileSurveyService::new(catalog, panelists, store.clone());
    (service, store)
}
