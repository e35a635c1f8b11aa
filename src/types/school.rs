use serde::{Deserialize, Serialize};

use crate::db::{DbSchool, DbSchoolWithCount, NewSchool};

pub const SCHOOL_CREATED: &str = "School created successfully";

/// Parameters accepted by `POST /schools/`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchoolParams {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub email: String,
}

impl From<CreateSchoolParams> for NewSchool {
    fn from(p: CreateSchoolParams) -> Self {
        Self {
            name: p.name,
            address: p.address,
            email: p.email,
        }
    }
}

/// School fields as exposed by the API; also nested inside student details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchoolView {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub email: String,
}

impl From<DbSchool> for SchoolView {
    fn from(d: DbSchool) -> Self {
        Self {
            id: d.id,
            name: d.name,
            address: d.address,
            email: d.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchoolCreated {
    #[serde(flatten)]
    pub school: SchoolView,
    pub message: String,
}

impl From<DbSchool> for SchoolCreated {
    fn from(d: DbSchool) -> Self {
        Self {
            school: d.into(),
            message: SCHOOL_CREATED.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchoolSummary {
    #[serde(flatten)]
    pub school: SchoolView,
    pub student_count: i64,
}

impl From<DbSchoolWithCount> for SchoolSummary {
    fn from(d: DbSchoolWithCount) -> Self {
        Self {
            school: d.school.into(),
            student_count: d.student_count,
        }
    }
}
