use sqlx::PgConnection;

use crate::pkg::internal::adaptors::jobs::spec::{JobDraft, JobEntry};
use crate::prelude::Result;

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: &JobDraft) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (title, company, location, salary, category, level, type, posted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, company, location, salary, category, level, type, posted_at
            "#,
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.salary)
        .bind(&job.category)
        .bind(&job.level)
        .bind(&job.job_type)
        .bind(job.posted_at)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrites every column; absent fields are written as NULL.
    pub async fn update(&mut self, id: i32, job: &JobDraft) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE jobs
            SET title = $2, company = $3, location = $4, salary = $5,
                category = $6, level = $7, type = $8, posted_at = $9
            WHERE id = $1
            RETURNING id, title, company, location, salary, category, level, type, posted_at
            "#,
        )
        .bind(id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.salary)
        .bind(&job.category)
        .bind(&job.level)
        .bind(&job.job_type)
        .bind(job.posted_at)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
