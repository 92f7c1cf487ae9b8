use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::ModelError;
use crate::resource::ResourceKind;

/// A read-only domain entity served by one backend resource service.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: ResourceKind;

    fn id(&self) -> u64;

    /// Records a service starts with when no seed file is configured.
    fn seed() -> Vec<Self>;
}

/// Identifiers must be unique within one collection.
pub fn ensure_unique_ids<R: Record>(records: &[R]) -> Result<(), ModelError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(ModelError::Validation(format!(
                "duplicate {} id {}",
                R::KIND,
                record.id()
            )));
        }
    }
    Ok(())
}
