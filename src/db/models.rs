use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbSchool {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbStudent {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub email: String,
    pub school_id: Option<i64>,
}

/// A school row joined with the number of students referencing it.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbSchoolWithCount {
    #[sqlx(flatten)]
    pub school: DbSchool,
    pub student_count: i64,
}

/// A student row joined with its school's name, `None` when unassociated.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbStudentWithSchoolName {
    #[sqlx(flatten)]
    pub student: DbStudent,
    pub school_name: Option<String>,
}

/// Insert payload for `schools`; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSchool {
    pub name: String,
    pub address: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub age: Option<i64>,
    pub email: String,
    pub school_id: Option<i64>,
}
