use axum::{
    Json,
    extract::{Path, rejection::PathRejection},
};
use tracing::{info, warn};

use crate::error::{Entity, SchoolError};
use crate::middleware::{CreateParams, DbSession, DbWriteSession};
use crate::types::school::{CreateSchoolParams, SchoolCreated, SchoolSummary, SchoolView};
use crate::types::student::StudentView;

/// POST /schools/ -> registers a school unless its email is already taken.
pub async fn create_school(
    DbWriteSession(mut session): DbWriteSession,
    CreateParams(params): CreateParams<CreateSchoolParams>,
) -> Result<Json<SchoolCreated>, SchoolError> {
    if session.find_school_by_email(&params.email).await?.is_some() {
        warn!(email = %params.email, "rejecting school with registered email");
        return Err(SchoolError::DuplicateEmail(Entity::School));
    }

    let school = session.insert_school(params.into()).await?;
    session.commit().await?;

    info!(school_id = school.id, "school created");
    Ok(Json(school.into()))
}

/// GET /schools/ -> every school with its current student count.
pub async fn list_schools(
    DbSession(mut session): DbSession,
) -> Result<Json<Vec<SchoolSummary>>, SchoolError> {
    let rows = session.list_schools_with_student_count().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /schools/{school_id}
pub async fn get_school(
    DbSession(mut session): DbSession,
    school_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SchoolView>, SchoolError> {
    let Path(school_id) = school_id?;
    let school = session
        .find_school(school_id)
        .await?
        .ok_or(SchoolError::NotFound(Entity::School))?;
    Ok(Json(school.into()))
}

/// GET /schools/{school_id}/students
pub async fn list_school_students(
    DbSession(mut session): DbSession,
    school_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<StudentView>>, SchoolError> {
    let Path(school_id) = school_id?;
    if session.find_school(school_id).await?.is_none() {
        return Err(SchoolError::NotFound(Entity::School));
    }

    let students = session.list_students_by_school(school_id).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}
