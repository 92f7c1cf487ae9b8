use std::path::Path;
use std::sync::Arc;

use models::record::{ensure_unique_ids, Record};
use serde::{Serialize, Serializer};
use tokio::fs;
use tracing::info;

use crate::errors::ServiceError;

/// Ordered, immutable collection of records of one kind.
///
/// Cloning is cheap: clones share the same backing slice.
#[derive(Debug, Clone)]
pub struct ResourceCollection<R> {
    records: Arc<[R]>,
}

impl<R: Record> ResourceCollection<R> {
    pub fn new(records: Vec<R>) -> Result<Self, ServiceError> {
        ensure_unique_ids(&records)?;
        Ok(Self { records: records.into() })
    }

    /// Collection holding the record type's built-in seed.
    pub fn seeded() -> Result<Self, ServiceError> {
        Self::new(R::seed())
    }

    /// Load records from a JSON array file.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let bytes = fs::read(path)
            .await
            .map_err(|source| ServiceError::SeedIo { path: shown.clone(), source })?;
        let records: Vec<R> = serde_json::from_slice(&bytes)
            .map_err(|source| ServiceError::SeedParse { path: shown.clone(), source })?;
        let collection = Self::new(records)?;
        info!(resource = %R::KIND, path = %shown, count = collection.len(), "loaded seed file");
        Ok(collection)
    }

    /// Seed file when one is configured, built-in seed otherwise.
    pub async fn load(seed_path: Option<&str>) -> Result<Self, ServiceError> {
        match seed_path {
            Some(path) => Self::from_file(path).await,
            None => Self::seeded(),
        }
    }

    pub fn list(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Serializes as a JSON array in collection order.
impl<R: Serialize> Serialize for ResourceCollection<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.as_ref().serialize(serializer)
    }
}
