use super::reference::ReferenceData;
use crate::error::Result;
use async_trait::async_trait;

/// Supplies the reference data a rule engine is built from.
#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    async fn load(&self) -> Result<ReferenceData>;
}

pub type ReferenceDataSourceBox = Box<dyn ReferenceDataSource>;
pub type ReferenceDataSourceFactory = Box<dyn Fn() -> ReferenceDataSourceBox + Send + Sync>;
