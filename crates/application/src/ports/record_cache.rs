use async_trait::async_trait;
use iterdns_domain::{CachedRecord, DomainError, RecordType, ResourceRecord};

/// TTL-expiring store of resource records keyed by `(name, type)`.
///
/// Names are matched case-insensitively. Implementations report storage
/// failures as [`DomainError::CacheUnavailable`].
#[async_trait]
pub trait RecordCache: Send + Sync {
    /// Stores `record` with `expires_at = now + max(ttl, 0)`, unless a live
    /// row already exists for the same name and type.
    async fn add(&self, record: &ResourceRecord) -> Result<(), DomainError>;

    /// All live rows for the key, most recently created first.
    async fn find_all(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<CachedRecord>, DomainError>;

    async fn find_first(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<CachedRecord>, DomainError> {
        Ok(self.find_all(name, record_type).await?.into_iter().next())
    }

    /// Deletes every expired row and returns how many were removed.
    async fn expunge_expired(&self) -> Result<u64, DomainError>;

    /// Number of stored rows for the key, expired ones included.
    async fn count(&self, name: &str, record_type: RecordType) -> Result<u64, DomainError>;
}
