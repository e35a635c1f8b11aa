use serde::{Deserialize, Serialize};

use super::school::SchoolView;
use crate::db::{DbSchool, DbStudent, DbStudentWithSchoolName, NewStudent};

pub const STUDENT_CREATED: &str = "Student created successfully";

/// Parameters accepted by `POST /students/`. `school_id` is mandatory here
/// even though the column is nullable.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentParams {
    pub name: String,
    #[serde(default)]
    pub age: Option<i64>,
    pub email: String,
    pub school_id: i64,
}

impl From<CreateStudentParams> for NewStudent {
    fn from(p: CreateStudentParams) -> Self {
        Self {
            name: p.name,
            age: p.age,
            email: p.email,
            school_id: Some(p.school_id),
        }
    }
}

/// Bare student fields, used by the per-school listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentView {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub email: String,
}

impl From<DbStudent> for StudentView {
    fn from(d: DbStudent) -> Self {
        Self {
            id: d.id,
            name: d.name,
            age: d.age,
            email: d.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentCreated {
    #[serde(flatten)]
    pub student: StudentView,
    pub school_id: Option<i64>,
    pub message: String,
}

impl From<DbStudent> for StudentCreated {
    fn from(d: DbStudent) -> Self {
        let school_id = d.school_id;
        Self {
            student: d.into(),
            school_id,
            message: STUDENT_CREATED.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentListing {
    #[serde(flatten)]
    pub student: StudentView,
    pub school_id: Option<i64>,
    pub school_name: Option<String>,
}

impl From<DbStudentWithSchoolName> for StudentListing {
    fn from(d: DbStudentWithSchoolName) -> Self {
        let school_id = d.student.school_id;
        Self {
            student: d.student.into(),
            school_id,
            school_name: d.school_name,
        }
    }
}

/// A student with its school nested, `school: null` when unassociated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub student: StudentView,
    pub school: Option<SchoolView>,
}

impl StudentDetail {
    pub fn new(student: DbStudent, school: Option<DbSchool>) -> Self {
        Self {
            student: student.into(),
            school: school.map(Into::into),
        }
    }
}
