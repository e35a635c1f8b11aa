use school_registry::db::{NewSchool, NewStudent, SchoolStorage};
use school_registry::{Entity, SchoolError};

async fn memory_storage() -> SchoolStorage {
    SchoolStorage::connect("sqlite::memory:", 4)
        .await
        .expect("failed to open in-memory database")
}

fn school(email: &str) -> NewSchool {
    NewSchool {
        name: "Lincoln High".to_string(),
        address: Some("1 Main St".to_string()),
        email: email.to_string(),
    }
}

fn student(name: &str, email: &str, school_id: Option<i64>) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        age: Some(15),
        email: email.to_string(),
        school_id,
    }
}

#[tokio::test]
async fn unique_constraint_surfaces_as_duplicate_email() {
    let storage = memory_storage().await;
    let mut session = storage.session().await.expect("session");

    session.insert_school(school("lh@ex.com")).await.expect("first insert");
    let err = session
        .insert_school(school("lh@ex.com"))
        .await
        .expect_err("second insert must fail");
    assert!(matches!(err, SchoolError::DuplicateEmail(Entity::School)));

    let school_id = session.list_schools().await.expect("list")[0].id;
    session
        .insert_student(student("Ann", "ann@ex.com", Some(school_id)))
        .await
        .expect("first student");
    let err = session
        .insert_student(student("Ann", "ann@ex.com", Some(school_id)))
        .await
        .expect_err("duplicate student must fail");
    assert!(matches!(err, SchoolError::DuplicateEmail(Entity::Student)));
}

#[tokio::test]
async fn dangling_school_reference_surfaces_as_not_found() {
    let storage = memory_storage().await;
    let mut session = storage.session().await.expect("session");

    let err = session
        .insert_student(student("Ann", "ann@ex.com", Some(404)))
        .await
        .expect_err("foreign key must be enforced");
    assert!(matches!(err, SchoolError::NotFound(Entity::School)));
    assert!(session.list_students().await.expect("list").is_empty());
}

#[tokio::test]
async fn uncommitted_session_rolls_back() {
    let storage = memory_storage().await;

    {
        let mut session = storage.session().await.expect("session");
        session.insert_school(school("lh@ex.com")).await.expect("insert");
    }

    let mut session = storage.session().await.expect("session");
    assert!(session.list_schools().await.expect("list").is_empty());
    assert!(
        session
            .find_school_by_email("lh@ex.com")
            .await
            .expect("lookup")
            .is_none()
    );
}

#[tokio::test]
async fn relationship_queries_follow_school_id() {
    let storage = memory_storage().await;
    let mut session = storage.write_session().await.expect("session");

    let alpha = session.insert_school(school("alpha@ex.com")).await.expect("alpha");
    let beta = session.insert_school(school("beta@ex.com")).await.expect("beta");
    let ann = session
        .insert_student(student("Ann", "ann@ex.com", Some(alpha.id)))
        .await
        .expect("ann");
    session
        .insert_student(student("Bob", "bob@ex.com", Some(alpha.id)))
        .await
        .expect("bob");
    let solo = session
        .insert_student(student("Solo", "solo@ex.com", None))
        .await
        .expect("solo");
    session.commit().await.expect("commit");

    let mut session = storage.session().await.expect("session");

    let of_alpha = session.list_students_by_school(alpha.id).await.expect("by school");
    assert_eq!(of_alpha.len(), 2);
    assert_eq!(of_alpha[0], ann);
    assert!(session.list_students_by_school(beta.id).await.expect("beta").is_empty());

    let counts: Vec<(i64, i64)> = session
        .list_schools_with_student_count()
        .await
        .expect("counts")
        .into_iter()
        .map(|row| (row.school.id, row.student_count))
        .collect();
    assert_eq!(counts, vec![(alpha.id, 2), (beta.id, 0)]);

    let named = session.list_students_with_school_name().await.expect("named");
    assert_eq!(named.len(), 3);
    assert_eq!(named[0].school_name.as_deref(), Some("Lincoln High"));
    assert_eq!(named[2].student, solo);
    assert_eq!(named[2].school_name, None);

    let found = session.find_student(ann.id).await.expect("find").expect("present");
    assert_eq!(found.school_id, Some(alpha.id));
    assert_eq!(
        session
            .find_student_by_email("bob@ex.com")
            .await
            .expect("by email")
            .map(|s| (s.name, s.email)),
        Some(("Bob".to_string(), "bob@ex.com".to_string()))
    );
    assert_eq!(session.find_school(alpha.id).await.expect("school"), Some(alpha));
    assert!(session.find_school(999).await.expect("missing").is_none());
}
