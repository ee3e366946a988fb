use async_trait::async_trait;
use dinescout_core::{RestaurantFilter, RestaurantRecord};
use serde_json::Value;
use uuid::Uuid;

use crate::DbError;

/// Storage contract for restaurant documents.
///
/// Reads return records in insertion order. Faults are reported as
/// [`DbError`] and never retried here.
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    async fn count(&self) -> Result<u64, DbError>;

    async fn find(&self, skip: u64, limit: u64) -> Result<Vec<RestaurantRecord>, DbError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RestaurantRecord>, DbError>;

    async fn find_matching(
        &self,
        filter: &RestaurantFilter,
    ) -> Result<Vec<RestaurantRecord>, DbError>;

    /// Stores raw documents, assigning each a fresh id. Returns how many were
    /// written. Every document must be a JSON object; nothing is written if
    /// any is not.
    async fn insert_many(&self, documents: Vec<Value>) -> Result<usize, DbError>;

    /// Cheap liveness check used by health endpoints.
    async fn ping(&self) -> Result<(), DbError>;
}

pub(crate) fn ensure_objects(documents: &[Value]) -> Result<(), DbError> {
    match documents.iter().position(|doc| !doc.is_object()) {
        Some(index) => Err(DbError::InvalidDocument { index }),
        None => Ok(()),
    }
}
