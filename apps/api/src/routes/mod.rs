pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::syllabus::{handlers, ingest};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Extraction pipeline
        .route("/api/v1/syllabi/analyze", post(ingest::handle_analyze))
        .route(
            "/api/v1/syllabi/analyze-and-save",
            post(ingest::handle_analyze_and_save),
        )
        // Syllabus CRUD
        .route(
            "/api/v1/syllabi",
            post(handlers::handle_save).get(handlers::handle_list),
        )
        .route(
            "/api/v1/syllabi/by-course/:code",
            get(handlers::handle_get_by_course_code),
        )
        .route(
            "/api/v1/syllabi/:id",
            get(handlers::handle_get)
                .put(handlers::handle_update)
                .delete(handlers::handle_delete),
        )
        // Assignment queries
        .route(
            "/api/v1/assignments/upcoming",
            get(handlers::handle_upcoming),
        )
        .route("/api/v1/assignments/due/:date", get(handlers::handle_due_on))
        .route("/api/v1/assignments/search", get(handlers::handle_search))
        // PDFs are forwarded inline to the extraction API, which caps
        // inline payloads at 20 MB.
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
        .with_state(state)
}
