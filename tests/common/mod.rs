#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

use school_registry::{SchoolState, SchoolStorage, school_router};

/// Router backed by a throwaway SQLite file, removed on drop.
pub struct TestApp {
    pub app: Router,
    pub storage: SchoolStorage,
    path: PathBuf,
}

impl TestApp {
    pub async fn spawn(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "school-registry-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", path.display());
        let storage = SchoolStorage::connect(&database_url, 4)
            .await
            .expect("failed to open test database");
        let app = school_router(SchoolState::new(storage.clone()));

        Self { app, storage, path }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.send(req).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(uri, body)).await
    }

    /// POST with parameters carried in the query string and no body.
    pub async fn post_query(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.send(req).await
    }

    pub async fn create_school(&self, name: &str, email: &str) -> i64 {
        let (status, body) = self
            .post_json(
                "/schools/",
                serde_json::json!({ "name": name, "address": "1 Main St", "email": email }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create school failed: {body}");
        body["id"].as_i64().expect("school id missing")
    }

    pub async fn create_student(&self, name: &str, email: &str, school_id: i64) -> i64 {
        let (status, body) = self
            .post_json(
                "/students/",
                serde_json::json!({ "name": name, "age": 15, "email": email, "school_id": school_id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create student failed: {body}");
        body["id"].as_i64().expect("student id missing")
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        send(self.app.clone(), req).await
    }
}

pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

/// Drive one request through an owned router; usable from spawned tasks.
pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not JSON")
    };
    (status, body)
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
        for suffix in ["-wal", "-shm"] {
            let mut side = self.path.clone().into_os_string();
            side.push(suffix);
            let _ = fs::remove_file(side);
        }
    }
}
