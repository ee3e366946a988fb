use std::sync::Arc;

use async_trait::async_trait;
use dinescout_core::{RestaurantFilter, RestaurantRecord};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{ensure_objects, RestaurantStore};
use crate::DbError;

/// Process-local restaurant store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryRestaurantStore {
    records: Arc<RwLock<Vec<RestaurantRecord>>>,
}

impl MemoryRestaurantStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_records(records: Vec<RestaurantRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

#[async_trait]
impl RestaurantStore for MemoryRestaurantStore {
    async fn count(&self) -> Result<u64, DbError> {
        let records = self.records.read().await;
        Ok(records.len() as u64)
    }

    async fn find(&self, skip: u64, limit: u64) -> Result<Vec<RestaurantRecord>, DbError> {
        let records = self.records.read().await;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(records.iter().skip(skip).take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RestaurantRecord>, DbError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn find_matching(
        &self,
        filter: &RestaurantFilter,
    ) -> Result<Vec<RestaurantRecord>, DbError> {
        let predicate = filter.predicate();
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect())
    }

    async fn insert_many(&self, documents: Vec<Value>) -> Result<usize, DbError> {
        ensure_objects(&documents)?;

        let mut records = self.records.write().await;
        let inserted = documents.len();
        records.extend(
            documents
                .into_iter()
                .map(|document| RestaurantRecord::from_document(Uuid::new_v4(), document)),
        );
        Ok(inserted)
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
