use std::sync::Arc;

use crate::pkg::internal::store::{JobStore, MemoryJobStore, PgJobStore};

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobStore>,
}

impl AppState {
    pub fn new(jobs: Arc<dyn JobStore>) -> AppState {
        AppState { jobs }
    }

    pub fn postgres(store: PgJobStore) -> AppState {
        AppState::new(Arc::new(store))
    }

    pub fn in_memory() -> AppState {
        AppState::new(Arc::new(MemoryJobStore::new()))
    }
}
