use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::instrument;

use super::JobStore;
use crate::conf::Settings;
use crate::pkg::internal::adaptors::jobs::{
    mutators::JobMutator,
    selectors::JobSelector,
    spec::{JobDraft, JobEntry, JobFilter, JobPage},
};
use crate::prelude::Result;

#[derive(Debug, Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        PgJobStore { pool }
    }

    /// Builds a lazily connecting pool; nothing is dialed until the first request.
    pub fn from_settings(settings: &Settings) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(settings.database_pool_max_connections)
            .connect_lazy_with(settings.connect_options());
        PgJobStore::new(pool)
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("select 1").execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip_all, err, fields(page = filter.page, limit = filter.limit))]
    async fn search(&self, filter: &JobFilter) -> Result<JobPage> {
        let mut conn = self.pool.acquire().await?;
        // two separate statements, no shared snapshot
        let total = JobSelector::new(&mut *conn).count(filter).await?;
        let items = JobSelector::new(&mut *conn).search(filter).await?;
        Ok(JobPage {
            total,
            page: filter.page,
            limit: filter.limit,
            items,
        })
    }

    async fn get(&self, id: i32) -> Result<Option<JobEntry>> {
        let mut conn = self.pool.acquire().await?;
        JobSelector::new(&mut *conn).get_by_id(id).await
    }

    #[instrument(skip_all, err)]
    async fn create(&self, job: &JobDraft) -> Result<JobEntry> {
        let mut conn = self.pool.acquire().await?;
        JobMutator::new(&mut *conn).create(job).await
    }

    #[instrument(skip(self, job), err)]
    async fn update(&self, id: i32, job: &JobDraft) -> Result<Option<JobEntry>> {
        let mut conn = self.pool.acquire().await?;
        JobMutator::new(&mut *conn).update(id, job).await
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: i32) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        JobMutator::new(&mut *conn).delete(id).await
    }
}
