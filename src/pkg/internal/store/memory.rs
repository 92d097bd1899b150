use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use super::JobStore;
use crate::pkg::internal::adaptors::jobs::spec::{JobDraft, JobEntry, JobFilter, JobPage};
use crate::prelude::Result;

#[derive(Default)]
struct JobTable {
    rows: BTreeMap<i32, JobEntry>,
    last_id: i32,
}

/// Process-local job table with the same filter, ordering and paging rules
/// as the Postgres store. Ids are never reused after a delete.
#[derive(Clone, Default)]
pub struct MemoryJobStore {
    table: Arc<RwLock<JobTable>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn entry(id: i32, job: &JobDraft) -> JobEntry {
    JobEntry {
        id,
        title: job.title.clone(),
        company: job.company.clone(),
        location: job.location.clone(),
        salary: job.salary.clone(),
        category: job.category.clone(),
        level: job.level.clone(),
        job_type: job.job_type.clone(),
        posted_at: job.posted_at,
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    #[instrument(skip_all, err, fields(page = filter.page, limit = filter.limit))]
    async fn search(&self, filter: &JobFilter) -> Result<JobPage> {
        let table = self.table.read().await;
        let mut matched: Vec<&JobEntry> = table
            .rows
            .values()
            .filter(|job| filter.matches(job))
            .collect();
        matched.sort_by(|a, b| b.posted_at.cmp(&a.posted_at).then(b.id.cmp(&a.id)));

        let offset = usize::try_from(filter.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.limit).unwrap_or(usize::MAX);
        let items = matched
            .iter()
            .skip(offset)
            .take(limit)
            .map(|job| (*job).clone())
            .collect();

        Ok(JobPage {
            total: matched.len() as i64,
            page: filter.page,
            limit: filter.limit,
            items,
        })
    }

    async fn get(&self, id: i32) -> Result<Option<JobEntry>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, job: &JobDraft) -> Result<JobEntry> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let row = entry(table.last_id, job);
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, job: &JobDraft) -> Result<Option<JobEntry>> {
        let mut table = self.table.write().await;
        let Some(existing) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        *existing = entry(id, job);
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
