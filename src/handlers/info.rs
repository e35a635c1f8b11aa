use axum::Json;
use serde_json::{Value, json};
use std::sync::LazyLock;

pub static API_INFO: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "message": "School Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "schools": {
                "create_school": "POST /schools/",
                "get_all_schools": "GET /schools/",
                "get_school": "GET /schools/{id}",
                "get_school_students": "GET /schools/{id}/students"
            },
            "students": {
                "create_student": "POST /students/",
                "get_all_students": "GET /students/",
                "get_student_with_school": "GET /students/{id}"
            }
        }
    })
});

/// GET / -> static description of the available endpoints.
pub async fn api_info() -> Json<Value> {
    Json(API_INFO.clone())
}
