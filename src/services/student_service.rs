use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::student::Student;

const STUDENT_COLUMNS: &str = "id, name, email, resume_url, skills, created_at, updated_at";

#[derive(Clone)]
pub struct StudentService {
    pool: PgPool,
}

impl StudentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: String, email: String) -> Result<Student> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM students WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::BadRequest(
                "A student with this email address already exists".to_string(),
            ));
        }

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (name, email) VALUES ($1, $2) RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&name)
        .bind(&email)
        .fetch_one(&self.pool)
        .await?;
        Ok(student)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }
}
