// Syllabus feature module.
// Implements: draft validation, persistence, CRUD handlers, and the PDF
// upload pipeline. All Gemini calls go through extraction; no direct API
// calls here.

pub mod handlers;
pub mod ingest;
pub mod models;
pub mod store;
pub mod validation;
