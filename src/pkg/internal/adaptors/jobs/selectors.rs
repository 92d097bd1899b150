use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, JobFilter};
use crate::prelude::Result;

const JOB_COLUMNS: &str = "id, title, company, location, salary, category, level, type, posted_at";

fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    let mut clause = " WHERE ";
    if let Some(pattern) = filter.term_pattern() {
        qb.push(clause)
            .push("(LOWER(title) LIKE ")
            .push_bind(pattern.clone())
            .push(" OR LOWER(company) LIKE ")
            .push_bind(pattern.clone())
            .push(" OR LOWER(category) LIKE ")
            .push_bind(pattern)
            .push(")");
        clause = " AND ";
    }
    if let Some(pattern) = filter.location_pattern() {
        qb.push(clause).push("LOWER(location) LIKE ").push_bind(pattern);
    }
}

pub fn count_query(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM jobs");
    push_predicate(&mut qb, filter);
    qb
}

/// Ties on `posted_at` are broken by newest id first so pages never overlap.
pub fn page_query(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM jobs", JOB_COLUMNS));
    push_predicate(&mut qb, filter);
    qb.push(" ORDER BY posted_at DESC, id DESC LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.offset());
    qb
}

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn count(&mut self, filter: &JobFilter) -> Result<i64> {
        let mut qb = count_query(filter);
        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(total)
    }

    pub async fn search(&mut self, filter: &JobFilter) -> Result<Vec<JobEntry>> {
        let mut qb = page_query(filter);
        tracing::debug!(sql = qb.sql(), "fetching job page");
        let rows = qb
            .build_query_as::<JobEntry>()
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }
}
