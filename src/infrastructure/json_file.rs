use crate::domain::ports::ReferenceDataSource;
use crate::domain::reference::ReferenceData;
use crate::error::{EligibilityError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Reads reference data from a JSON file.
///
/// The file is read on every `load`; the engine calls it once at startup.
/// Keys missing from the file take their default values.
#[derive(Debug, Clone)]
pub struct JsonFileReferenceSource {
    path: PathBuf,
}

impl JsonFileReferenceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReferenceDataSource for JsonFileReferenceSource {
    async fn load(&self) -> Result<ReferenceData> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let reference: ReferenceData = serde_json::from_str(&contents).map_err(|e| {
            EligibilityError::ValidationError(format!(
                "Invalid reference data in {}: {e}",
                self.path.display()
            ))
        })?;

        info!(
            path = %self.path.display(),
            recognized_entities = reference.recognized_entities.len(),
            rules = reference.rule_order.len(),
            "Loaded reference data"
        );
        Ok(reference)
    }
}
