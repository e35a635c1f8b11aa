//! SQL DDL for initializing the school registry.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `schools.email` and `students.email` UNIQUE; duplicate inserts surface
///   as constraint violations
/// - `students.school_id` nullable FOREIGN KEY to `schools(id)`; enforced only
///   when the connection runs with `PRAGMA foreign_keys = ON`
/// - `address` and `age` nullable
/// - Index on `students.school_id` for per-school listing and counting
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS schools (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    address TEXT NULL,
    email TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NULL,
    email TEXT NOT NULL UNIQUE,
    school_id INTEGER NULL REFERENCES schools(id)
);

CREATE INDEX IF NOT EXISTS idx_students_school_id ON students(school_id);
"#;
