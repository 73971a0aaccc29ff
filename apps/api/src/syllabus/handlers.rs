use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::syllabus::AssignmentRow;
use crate::state::AppState;
use crate::syllabus::models::{Syllabus, SyllabusDraft, SyllabusWrite};
use crate::syllabus::store;
use crate::syllabus::validation::validate_syllabus;

/// Default width of the upcoming-assignments window, in days.
const DEFAULT_DAYS_AHEAD: i64 = 7;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub syllabus_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SyllabusListResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<Syllabus>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub days_ahead: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// POST /api/v1/syllabi
///
/// Create-or-replace. A payload without an id always creates; a payload
/// with an id replaces that syllabus, or creates a fresh one if the id is
/// unknown.
pub async fn handle_save(
    State(state): State<AppState>,
    Json(draft): Json<SyllabusDraft>,
) -> Result<Json<SaveResponse>, AppError> {
    let payload = validate_syllabus(&draft)?;
    let write = match draft.id {
        Some(id) => SyllabusWrite::Update(id, payload),
        None => SyllabusWrite::Create(payload),
    };
    let saved = store::upsert_syllabus(&state.db, write).await?;
    Ok(Json(SaveResponse {
        success: true,
        message: "Syllabus saved to database successfully".to_string(),
        syllabus_id: Some(saved.id),
    }))
}

/// GET /api/v1/syllabi
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<SyllabusListResponse>, AppError> {
    let syllabi = store::get_all_syllabi(&state.db).await?;
    Ok(Json(SyllabusListResponse {
        success: true,
        message: format!("Retrieved {} syllabi", syllabi.len()),
        data: syllabi,
    }))
}

/// GET /api/v1/syllabi/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Syllabus>, AppError> {
    let syllabus = store::get_syllabus(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Syllabus with ID {id} not found")))?;
    Ok(Json(syllabus))
}

/// GET /api/v1/syllabi/by-course/:code
pub async fn handle_get_by_course_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Syllabus>, AppError> {
    let syllabus = store::get_syllabus_by_course_code(&state.db, &code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No syllabus found for course code {code}")))?;
    Ok(Json(syllabus))
}

/// PUT /api/v1/syllabi/:id
///
/// Unlike POST, the target must already exist. The path id wins over any
/// id carried in the payload. The body is validated before the target is
/// looked up; field errors win over the 404.
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<SyllabusDraft>,
) -> Result<Json<SaveResponse>, AppError> {
    let payload = validate_syllabus(&draft)?;
    if !store::syllabus_exists(&state.db, id).await? {
        return Err(AppError::NotFound(format!(
            "Syllabus with ID {id} not found"
        )));
    }
    let saved = store::upsert_syllabus(&state.db, SyllabusWrite::Update(id, payload)).await?;
    Ok(Json(SaveResponse {
        success: true,
        message: "Syllabus updated successfully".to_string(),
        syllabus_id: Some(saved.id),
    }))
}

/// DELETE /api/v1/syllabi/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SaveResponse>, AppError> {
    if !store::delete_syllabus(&state.db, id).await? {
        return Err(AppError::NotFound(format!(
            "Syllabus with ID {id} not found"
        )));
    }
    Ok(Json(SaveResponse {
        success: true,
        message: "Syllabus deleted successfully".to_string(),
        syllabus_id: None,
    }))
}

/// GET /api/v1/assignments/upcoming?days_ahead=N
pub async fn handle_upcoming(
    State(state): State<AppState>,
    Query(params): Query<UpcomingQuery>,
) -> Result<Json<Vec<AssignmentRow>>, AppError> {
    let days_ahead = params.days_ahead.unwrap_or(DEFAULT_DAYS_AHEAD);
    let today = Utc::now().date_naive();
    let assignments = store::get_upcoming_assignments(&state.db, today, days_ahead).await?;
    Ok(Json(assignments))
}

/// GET /api/v1/assignments/due/:date
pub async fn handle_due_on(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Vec<AssignmentRow>>, AppError> {
    let assignments = store::get_assignments_on(&state.db, date).await?;
    Ok(Json(assignments))
}

/// GET /api/v1/assignments/search?q=term
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<AssignmentRow>>, AppError> {
    let assignments = store::search_assignments(&state.db, &params.q).await?;
    Ok(Json(assignments))
}
