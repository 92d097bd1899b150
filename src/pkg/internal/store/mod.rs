mod memory;
mod postgres;

pub use memory::MemoryJobStore;
pub use postgres::PgJobStore;

use async_trait::async_trait;

use crate::pkg::internal::adaptors::jobs::spec::{JobDraft, JobEntry, JobFilter, JobPage};
use crate::prelude::Result;

/// Storage seam behind the HTTP handlers.
///
/// `search` returns the total for the filter alongside the requested page.
/// Implementations are not required to read both from one snapshot.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn ping(&self) -> Result<()>;

    async fn search(&self, filter: &JobFilter) -> Result<JobPage>;

    async fn get(&self, id: i32) -> Result<Option<JobEntry>>;

    async fn create(&self, job: &JobDraft) -> Result<JobEntry>;

    /// `None` when no row has this id.
    async fn update(&self, id: i32, job: &JobDraft) -> Result<Option<JobEntry>>;

    /// `false` when no row has this id.
    async fn delete(&self, id: i32) -> Result<bool>;
}
