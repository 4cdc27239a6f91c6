use crate::domain::ports::ReferenceDataSource;
use crate::domain::reference::ReferenceData;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Reference data held in memory.
///
/// Shares a single immutable `ReferenceData` behind an `Arc`, so clones are
/// cheap. Used by the binary when no reference file is given, and by tests.
#[derive(Default, Clone)]
pub struct InMemoryReferenceSource {
    reference: Arc<ReferenceData>,
}

impl InMemoryReferenceSource {
    /// Creates a source that always yields `reference`.
    pub fn new(reference: ReferenceData) -> Self {
        Self {
            reference: Arc::new(reference),
        }
    }
}

#[async_trait]
impl ReferenceDataSource for InMemoryReferenceSource {
    async fn load(&self) -> Result<ReferenceData> {
        Ok(self.reference.as_ref().clone())
    }
}
