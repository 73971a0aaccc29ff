use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::syllabus::models::{
    AssignmentDraft, AssignmentStatus, NewAssignment, NewSyllabus, SyllabusDraft,
};

#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize)]
#[error("validation failed: {}", violated_fields(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

fn violated_fields(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates a draft syllabus, collecting every violation instead of
/// stopping at the first.
///
/// Checks:
/// - `class_name` and `course_code` are present and non-empty
/// - `assignments` is present (an empty list is accepted)
/// - each assignment has a non-empty `name` and a `YYYY-MM-DD` `due_date`
/// - `due_time` and `submission_link` are present; their content is free text
/// - `status`, when given, is one of the known variants (case-sensitive);
///   when absent it defaults to `NOT_STARTED`
pub fn validate_syllabus(draft: &SyllabusDraft) -> Result<NewSyllabus, ValidationError> {
    let mut violations = Vec::new();

    let class_name = require_text(draft.class_name.as_deref(), "class_name", &mut violations);
    let course_code = require_text(draft.course_code.as_deref(), "course_code", &mut violations);

    let mut assignments = Vec::new();
    match draft.assignments.as_deref() {
        None => violations.push(FieldViolation {
            field: "assignments".to_string(),
            message: "field is required (an empty list is accepted)".to_string(),
        }),
        Some(drafts) => {
            for (idx, assignment) in drafts.iter().enumerate() {
                if let Some(valid) = validate_assignment(assignment, idx, &mut violations) {
                    assignments.push(valid);
                }
            }
        }
    }

    match (class_name, course_code) {
        (Some(class_name), Some(course_code)) if violations.is_empty() => Ok(NewSyllabus {
            class_name,
            course_code,
            assignments,
        }),
        _ => Err(ValidationError { violations }),
    }
}

fn validate_assignment(
    draft: &AssignmentDraft,
    idx: usize,
    violations: &mut Vec<FieldViolation>,
) -> Option<NewAssignment> {
    let name = require_text(
        draft.name.as_deref(),
        &format!("assignments[{idx}].name"),
        violations,
    );

    let due_date = match draft.due_date.as_deref() {
        None => {
            violations.push(FieldViolation {
                field: format!("assignments[{idx}].due_date"),
                message: "field is required".to_string(),
            });
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                violations.push(FieldViolation {
                    field: format!("assignments[{idx}].due_date"),
                    message: format!("{raw:?} is not a YYYY-MM-DD date"),
                });
                None
            }
        },
    };

    let due_time = require_present(
        draft.due_time.clone(),
        &format!("assignments[{idx}].due_time"),
        violations,
    );
    let submission_link = require_present(
        draft.submission_link.clone(),
        &format!("assignments[{idx}].submission_link"),
        violations,
    );

    let status = match draft.status.as_deref() {
        None => Some(AssignmentStatus::default()),
        Some(raw) => match raw.parse::<AssignmentStatus>() {
            Ok(status) => Some(status),
            Err(e) => {
                violations.push(FieldViolation {
                    field: format!("assignments[{idx}].status"),
                    message: e.to_string(),
                });
                None
            }
        },
    };

    match (name, due_date, due_time, submission_link, status) {
        (Some(name), Some(due_date), Some(due_time), Some(submission_link), Some(status)) => {
            Some(NewAssignment {
                name,
                due_date,
                due_time,
                submission_link,
                status,
            })
        }
        _ => None,
    }
}

/// Present and non-empty after trimming.
fn require_text(
    value: Option<&str>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match value {
        None => {
            violations.push(FieldViolation {
                field: field.to_string(),
                message: "field is required".to_string(),
            });
            None
        }
        Some(s) if s.trim().is_empty() => {
            violations.push(FieldViolation {
                field: field.to_string(),
                message: "must not be empty".to_string(),
            });
            None
        }
        Some(s) => Some(s.to_string()),
    }
}

/// Present, any content. Due times and submission links are stored verbatim.
fn require_present(
    value: Option<String>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match value {
        None => {
            violations.push(FieldViolation {
                field: field.to_string(),
                message: "field is required".to_string(),
            });
            None
        }
        Some(s) => Some(s),
    }
}
