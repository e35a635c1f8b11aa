use axum::{
    Json,
    extract::{Path, rejection::PathRejection},
};
use tracing::{info, warn};

use crate::error::{Entity, SchoolError};
use crate::middleware::{CreateParams, DbSession, DbWriteSession};
use crate::types::student::{CreateStudentParams, StudentCreated, StudentDetail, StudentListing};

/// POST /students/ -> registers a student under an existing school.
///
/// Email uniqueness is checked before the school reference, so a request that
/// fails both reports the duplicate email.
pub async fn create_student(
    DbWriteSession(mut session): DbWriteSession,
    CreateParams(params): CreateParams<CreateStudentParams>,
) -> Result<Json<StudentCreated>, SchoolError> {
    if session.find_student_by_email(&params.email).await?.is_some() {
        warn!(email = %params.email, "rejecting student with registered email");
        return Err(SchoolError::DuplicateEmail(Entity::Student));
    }

    if session.find_school(params.school_id).await?.is_none() {
        warn!(school_id = params.school_id, "rejecting student for unknown school");
        return Err(SchoolError::NotFound(Entity::School));
    }

    let student = session.insert_student(params.into()).await?;
    session.commit().await?;

    info!(student_id = student.id, school_id = ?student.school_id, "student created");
    Ok(Json(student.into()))
}

/// GET /students/ -> every student with the name of its school.
pub async fn list_students(
    DbSession(mut session): DbSession,
) -> Result<Json<Vec<StudentListing>>, SchoolError> {
    let rows = session.list_students_with_school_name().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /students/{student_id} -> the student with its school nested.
pub async fn get_student(
    DbSession(mut session): DbSession,
    student_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<StudentDetail>, SchoolError> {
    let Path(student_id) = student_id?;
    let student = session
        .find_student(student_id)
        .await?
        .ok_or(SchoolError::NotFound(Entity::Student))?;

    let school = match student.school_id {
        Some(school_id) => session.find_school(school_id).await?,
        None => None,
    };

    Ok(Json(StudentDetail::new(student, school)))
}
