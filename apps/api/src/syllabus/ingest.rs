//! PDF upload endpoints: extract a syllabus draft from an uploaded file,
//! optionally persisting the validated result in the same request.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::syllabus::handlers::SaveResponse;
use crate::syllabus::models::{NewSyllabus, SyllabusWrite};
use crate::syllabus::store;
use crate::syllabus::validation::validate_syllabus;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub message: String,
    pub data: NewSyllabus,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeAndSaveResponse {
    pub analysis: AnalysisResponse,
    pub database: SaveResponse,
}

/// POST /api/v1/syllabi/analyze
///
/// Extracts and validates syllabus data from an uploaded PDF without
/// touching the store.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let (_filename, pdf) = read_pdf_upload(multipart).await?;
    let draft = state.extractor.extract(&pdf).await?;
    let payload = validate_syllabus(&draft)?;
    Ok(Json(AnalysisResponse {
        success: true,
        message: "Syllabus analyzed successfully".to_string(),
        data: payload,
    }))
}

/// POST /api/v1/syllabi/analyze-and-save
///
/// The analyze pipeline plus persistence in one request. Extraction always
/// creates a new syllabus; nothing is written when extraction or
/// validation fails.
pub async fn handle_analyze_and_save(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeAndSaveResponse>, AppError> {
    let (_filename, pdf) = read_pdf_upload(multipart).await?;
    let draft = state.extractor.extract(&pdf).await?;
    let payload = validate_syllabus(&draft)?;

    let saved = store::upsert_syllabus(&state.db, SyllabusWrite::Create(payload.clone())).await?;

    Ok(Json(AnalyzeAndSaveResponse {
        analysis: AnalysisResponse {
            success: true,
            message: "Syllabus analyzed successfully".to_string(),
            data: payload,
        },
        database: SaveResponse {
            success: true,
            message: "Syllabus saved to database successfully".to_string(),
            syllabus_id: Some(saved.id),
        },
    }))
}

/// Pulls the `file` part out of a multipart upload, enforcing a `.pdf`
/// filename. Returns the filename and raw bytes.
async fn read_pdf_upload(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::invalid_field("file", "malformed multipart body"))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::invalid_field("file", "upload has no filename"))?
            .to_string();
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(AppError::invalid_field("file", "File must be a PDF"));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|_| AppError::invalid_field("file", "failed to read upload"))?;
        return Ok((filename, bytes));
    }

    Err(AppError::invalid_field(
        "file",
        "missing multipart field 'file'",
    ))
}
