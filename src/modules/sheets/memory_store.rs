use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{ReportStore, StoreError, Table};

/// Process-local store, used for development (`STORE_BACKEND=memory`) and tests
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new(table: Table) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn list(&self) -> Result<Table, StoreError> {
        Ok(self.table.read().await.clone())
    }

    async fn replace_all(&self, table: Table) -> Result<(), StoreError> {
        *self.table.write().await = table;
        Ok(())
    }
}
