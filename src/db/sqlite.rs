use crate::db::models::{
    DbSchool, DbSchoolWithCount, DbStudent, DbStudentWithSchoolName, NewSchool, NewStudent,
};
use crate::db::schema::SQLITE_INIT;
use crate::error::{Entity, SchoolError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, Transaction};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

const SCHOOL_COLUMNS: &str = "id, name, address, email";
const STUDENT_COLUMNS: &str = "id, name, age, email, school_id";

/// Process-wide store handle. Cheap to clone; all access goes through a
/// per-request [`StoreSession`].
#[derive(Clone)]
pub struct SchoolStorage {
    pool: SqlitePool,
}

impl SchoolStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the pool (creating the database file if missing, foreign keys on)
    /// and make sure the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, SchoolError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database lives only as long as a connection to it,
        // so keep a single connection that is never recycled.
        let pool_opts = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_opts.connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), SchoolError> {
        // one table or index per statement; DDL is idempotent (IF NOT EXISTS)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Begin a unit of work. Dropping the session without [`StoreSession::commit`]
    /// rolls it back and returns the connection to the pool.
    pub async fn session(&self) -> Result<StoreSession, SchoolError> {
        let tx = self.pool.begin().await?;
        Ok(StoreSession { tx })
    }

    /// Begin a unit of work that will write. `BEGIN IMMEDIATE` takes the write
    /// lock up front, so concurrent writers wait under the busy timeout instead
    /// of failing to upgrade a read transaction with `SQLITE_BUSY`.
    pub async fn write_session(&self) -> Result<StoreSession, SchoolError> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(StoreSession { tx })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Map constraint violations raised by an insert into domain errors.
fn translate_insert_error(err: sqlx::Error, entity: Entity) -> SchoolError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return SchoolError::DuplicateEmail(entity);
        }
        if db_err.is_foreign_key_violation() {
            return SchoolError::NotFound(Entity::School);
        }
    }
    err.into()
}

pub struct StoreSession {
    tx: Transaction<'static, Sqlite>,
}

impl StoreSession {
    pub async fn commit(self) -> Result<(), SchoolError> {
        self.tx.commit().await?;
        Ok(())
    }

    pub async fn insert_school(&mut self, school: NewSchool) -> Result<DbSchool, SchoolError> {
        let row = sqlx::query_as::<_, DbSchool>(&format!(
            "INSERT INTO schools (name, address, email) VALUES (?, ?, ?) RETURNING {SCHOOL_COLUMNS}"
        ))
        .bind(school.name)
        .bind(school.address)
        .bind(school.email)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| translate_insert_error(e, Entity::School))?;
        debug!(school_id = row.id, "inserted school row");
        Ok(row)
    }

    pub async fn insert_student(&mut self, student: NewStudent) -> Result<DbStudent, SchoolError> {
        let row = sqlx::query_as::<_, DbStudent>(&format!(
            "INSERT INTO students (name, age, email, school_id) VALUES (?, ?, ?, ?) RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(student.name)
        .bind(student.age)
        .bind(student.email)
        .bind(student.school_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| translate_insert_error(e, Entity::Student))?;
        debug!(student_id = row.id, "inserted student row");
        Ok(row)
    }

    pub async fn find_school(&mut self, id: i64) -> Result<Option<DbSchool>, SchoolError> {
        let row = sqlx::query_as::<_, DbSchool>(&format!(
            "SELECT {SCHOOL_COLUMNS} FROM schools WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row)
    }

    pub async fn find_school_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<DbSchool>, SchoolError> {
        let row = sqlx::query_as::<_, DbSchool>(&format!(
            "SELECT {SCHOOL_COLUMNS} FROM schools WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row)
    }

    pub async fn find_student(&mut self, id: i64) -> Result<Option<DbStudent>, SchoolError> {
        let row = sqlx::query_as::<_, DbStudent>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row)
    }

    pub async fn find_student_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<DbStudent>, SchoolError> {
        let row = sqlx::query_as::<_, DbStudent>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row)
    }

    pub async fn list_schools(&mut self) -> Result<Vec<DbSchool>, SchoolError> {
        let rows = sqlx::query_as::<_, DbSchool>(&format!(
            "SELECT {SCHOOL_COLUMNS} FROM schools ORDER BY id"
        ))
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    /// Every school with the number of students whose `school_id` points at it.
    pub async fn list_schools_with_student_count(
        &mut self,
    ) -> Result<Vec<DbSchoolWithCount>, SchoolError> {
        let rows = sqlx::query_as::<_, DbSchoolWithCount>(
            r#"SELECT sc.id, sc.name, sc.address, sc.email,
                      COUNT(st.id) AS student_count
               FROM schools sc
               LEFT JOIN students st ON st.school_id = sc.id
               GROUP BY sc.id
               ORDER BY sc.id"#,
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    pub async fn list_students(&mut self) -> Result<Vec<DbStudent>, SchoolError> {
        let rows = sqlx::query_as::<_, DbStudent>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"
        ))
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    pub async fn list_students_with_school_name(
        &mut self,
    ) -> Result<Vec<DbStudentWithSchoolName>, SchoolError> {
        let rows = sqlx::query_as::<_, DbStudentWithSchoolName>(
            r#"SELECT st.id, st.name, st.age, st.email, st.school_id,
                      sc.name AS school_name
               FROM students st
               LEFT JOIN schools sc ON sc.id = st.school_id
               ORDER BY st.id"#,
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    pub async fn list_students_by_school(
        &mut self,
        school_id: i64,
    ) -> Result<Vec<DbStudent>, SchoolError> {
        let rows = sqlx::query_as::<_, DbStudent>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE school_id = ? ORDER BY id"
        ))
        .bind(school_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }
}
