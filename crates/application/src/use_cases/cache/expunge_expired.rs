use crate::ports::RecordCache;
use iterdns_domain::DomainError;
use std::sync::Arc;
use tracing::info;

pub struct ExpungeExpiredRecordsUseCase {
    cache: Arc<dyn RecordCache>,
}

impl ExpungeExpiredRecordsUseCase {
    pub fn new(cache: Arc<dyn RecordCache>) -> Self {
        Self { cache }
    }

    pub async fn execute(&self) -> Result<u64, DomainError> {
        let removed = self.cache.expunge_expired().await?;
        info!(removed, "Expired cache records expunged");
        Ok(removed)
    }
}
