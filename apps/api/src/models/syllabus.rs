use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::syllabus::models::Assignment;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SyllabusRow {
    pub id: i64,
    pub class_name: String,
    pub course_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssignmentRow {
    pub id: i64,
    pub name: String,
    pub due_date: NaiveDate,
    pub due_time: String,
    pub submission_link: String,
    pub status: String,
    pub syllabus_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssignmentRow {
    /// Converts a stored row into the domain shape. Fails if the stored
    /// status string is not one of the known variants.
    pub fn into_assignment(self) -> Result<Assignment, sqlx::Error> {
        let status = self
            .status
            .parse()
            .map_err(|e: crate::syllabus::models::ParseStatusError| sqlx::Error::Decode(e.into()))?;
        Ok(Assignment {
            id: self.id,
            name: self.name,
            due_date: self.due_date,
            due_time: self.due_time,
            submission_link: self.submission_link,
            status,
        })
    }
}
