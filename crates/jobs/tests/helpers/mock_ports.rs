use async_trait::async_trait;
use iterdns_application::ports::{Ipv4Resolver, RecordCache};
use iterdns_domain::{CachedRecord, DomainError, RecordType, ResourceRecord};
use std::collections::{HashMap, VecDeque};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Only `expunge_expired` matters to the jobs; it reports `expired` once and
/// then zero.
pub struct MockRecordCache {
    expired: Arc<AtomicU64>,
    expunge_calls: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockRecordCache {
    pub fn new() -> Self {
        Self {
            expired: Arc::new(AtomicU64::new(0)),
            expunge_calls: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub fn with_expired(expired: u64) -> Self {
        let cache = Self::new();
        cache.expired.store(expired, Ordering::Relaxed);
        cache
    }

    pub fn expunge_calls(&self) -> u64 {
        self.expunge_calls.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl RecordCache for MockRecordCache {
    async fn add(&self, _record: &ResourceRecord) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_all(
        &self,
        _name: &str,
        _record_type: RecordType,
    ) -> Result<Vec<CachedRecord>, DomainError> {
        Ok(vec![])
    }

    async fn expunge_expired(&self) -> Result<u64, DomainError> {
        self.expunge_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::CacheUnavailable("disk I/O error".to_string()));
        }
        Ok(self.expired.swap(0, Ordering::Relaxed))
    }

    async fn count(&self, _name: &str, _record_type: RecordType) -> Result<u64, DomainError> {
        Ok(0)
    }
}

type Scripted = Result<Option<Ipv4Addr>, DomainError>;

/// Returns scripted results per domain in order; an exhausted script
/// repeats its last result, an unscripted domain yields `Ok(None)`.
pub struct MockResolver {
    scripts: Arc<RwLock<HashMap<String, VecDeque<Scripted>>>>,
    last: Arc<RwLock<HashMap<String, Scripted>>>,
    call_count: Arc<AtomicU64>,
    deadlines: Arc<RwLock<Vec<Duration>>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self {
            scripts: Arc::new(RwLock::new(HashMap::new())),
            last: Arc::new(RwLock::new(HashMap::new())),
            call_count: Arc::new(AtomicU64::new(0)),
            deadlines: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn script(&self, domain: &str, results: Vec<Scripted>) {
        self.scripts
            .write()
            .await
            .insert(domain.to_string(), results.into());
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub async fn deadlines(&self) -> Vec<Duration> {
        self.deadlines.read().await.clone()
    }
}

#[async_trait]
impl Ipv4Resolver for MockResolver {
    async fn resolve_ipv4(
        &self,
        domain: &str,
        deadline: Duration,
    ) -> Result<Option<Ipv4Addr>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.deadlines.write().await.push(deadline);

        let next = self
            .scripts
            .write()
            .await
            .get_mut(domain)
            .and_then(|queue| queue.pop_front());

        match next {
            Some(result) => {
                self.last
                    .write()
                    .await
                    .insert(domain.to_string(), result.clone());
                result
            }
            None => self
                .last
                .read()
                .await
                .get(domain)
                .cloned()
                .unwrap_or(Ok(None)),
        }
    }
}
