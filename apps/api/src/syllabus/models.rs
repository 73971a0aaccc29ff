use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::NotStarted => "NOT_STARTED",
            AssignmentStatus::InProgress => "IN_PROGRESS",
            AssignmentStatus::Done => "DONE",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown assignment status {0:?}, expected NOT_STARTED, IN_PROGRESS or DONE")]
pub struct ParseStatusError(pub String);

impl FromStr for AssignmentStatus {
    type Err = ParseStatusError;

    // Case-sensitive on purpose: "done" is rejected, only the canonical
    // spelling is stored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(AssignmentStatus::NotStarted),
            "IN_PROGRESS" => Ok(AssignmentStatus::InProgress),
            "DONE" => Ok(AssignmentStatus::Done),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Drafts: the lenient shape produced by extraction and accepted on write
// endpoints. Every field is optional so a partial payload can be inspected
// and reported on field by field instead of failing at deserialization.
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentDraft {
    pub name: Option<String>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub submission_link: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyllabusDraft {
    pub id: Option<i64>,
    pub class_name: Option<String>,
    pub course_code: Option<String>,
    pub assignments: Option<Vec<AssignmentDraft>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Validated payloads: only constructed by validation, safe to persist.
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssignment {
    pub name: String,
    pub due_date: NaiveDate,
    pub due_time: String,
    pub submission_link: String,
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSyllabus {
    pub class_name: String,
    pub course_code: String,
    pub assignments: Vec<NewAssignment>,
}

/// Caller intent for a syllabus write. `Update` carries the target id; an
/// `Update` whose id matches no stored syllabus falls back to creating a
/// fresh record.
#[derive(Debug, Clone)]
pub enum SyllabusWrite {
    Create(NewSyllabus),
    Update(i64, NewSyllabus),
}

// ─────────────────────────────────────────────────────────────────────────────
// Persisted domain shapes returned by the store.
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub name: String,
    pub due_date: NaiveDate,
    pub due_time: String,
    pub submission_link: String,
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Syllabus {
    pub id: i64,
    pub class_name: String,
    pub course_code: String,
    pub assignments: Vec<Assignment>,
}
