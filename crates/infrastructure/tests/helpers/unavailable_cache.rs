#![allow(dead_code)]
use async_trait::async_trait;
use iterdns_application::ports::RecordCache;
use iterdns_domain::{CachedRecord, DomainError, RecordType, ResourceRecord};
use std::sync::atomic::{AtomicU64, Ordering};

/// Record cache whose storage is always down.
#[derive(Default)]
pub struct UnavailableCache {
    pub add_calls: AtomicU64,
}

impl UnavailableCache {
    fn offline() -> DomainError {
        DomainError::CacheUnavailable("database is locked".to_string())
    }
}

#[async_trait]
impl RecordCache for UnavailableCache {
    async fn add(&self, _record: &ResourceRecord) -> Result<(), DomainError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        Err(Self::offline())
    }

    async fn find_all(
        &self,
        _name: &str,
        _record_type: RecordType,
    ) -> Result<Vec<CachedRecord>, DomainError> {
        Err(Self::offline())
    }

    async fn expunge_expired(&self) -> Result<u64, DomainError> {
        Err(Self::offline())
    }

    async fn count(&self, _name: &str, _record_type: RecordType) -> Result<u64, DomainError> {
        Err(Self::offline())
    }
}
