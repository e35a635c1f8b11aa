use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::db::SchoolStorage;
use crate::handlers::{info, schools, students};

/// Shared application state; the store handle is injected here once and
/// reaches handlers through the `DbSession` extractor.
#[derive(Clone)]
pub struct SchoolState {
    pub storage: SchoolStorage,
}

impl SchoolState {
    pub fn new(storage: SchoolStorage) -> Self {
        Self { storage }
    }
}

pub fn school_router(state: SchoolState) -> Router {
    Router::new()
        .route("/", get(info::api_info))
        .route(
            "/schools/",
            get(schools::list_schools).post(schools::create_school),
        )
        .route(
            "/schools",
            get(schools::list_schools).post(schools::create_school),
        )
        .route("/schools/{school_id}", get(schools::get_school))
        .route(
            "/schools/{school_id}/students",
            get(schools::list_school_students),
        )
        .route(
            "/students/",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route("/students/{student_id}", get(students::get_student))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
