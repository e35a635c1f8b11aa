//! Database module: models, schema and store access for schools and students.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and insert payloads
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pooled store handle and per-request sessions

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{
    DbSchool, DbSchoolWithCount, DbStudent, DbStudentWithSchoolName, NewSchool, NewStudent,
};
pub use schema::SQLITE_INIT;
pub use sqlite::{SchoolStorage, SqlitePool, StoreSession};
