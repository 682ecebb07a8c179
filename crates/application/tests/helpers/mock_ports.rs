#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use iterdns_application::ports::{NameserverTransport, RecordCache};
use iterdns_domain::domain_name::names_equal;
use iterdns_domain::{CachedRecord, DomainError, Message, Question, RecordType, ResourceRecord};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory record cache with the same insert and ordering rules as the
/// SQLite implementation.
#[derive(Clone, Default)]
pub struct MockRecordCache {
    records: Arc<Mutex<Vec<CachedRecord>>>,
    should_fail: Arc<AtomicBool>,
    lookups: Arc<AtomicU64>,
}

impl MockRecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, record: ResourceRecord) {
        self.records
            .lock()
            .unwrap()
            .push(CachedRecord::from_resource_record(&record, Utc::now()));
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            Err(DomainError::CacheUnavailable("mock cache offline".to_string()))
        } else {
            Ok(())
        }
    }

    fn matches(record: &CachedRecord, name: &str, record_type: RecordType) -> bool {
        record.record_type == record_type && names_equal(&record.name, name)
    }
}

#[async_trait]
impl RecordCache for MockRecordCache {
    async fn add(&self, record: &ResourceRecord) -> Result<(), DomainError> {
        self.check()?;
        let now = Utc::now();
        let mut records = self.records.lock().unwrap();
        let live = records
            .iter()
            .any(|r| Self::matches(r, &record.name, record.rtype) && !r.is_expired(now));
        if !live {
            records.push(CachedRecord::from_resource_record(record, now));
        }
        Ok(())
    }

    async fn find_all(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<CachedRecord>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let now = Utc::now();
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| Self::matches(r, name, record_type) && !r.is_expired(now))
            .cloned()
            .collect())
    }

    async fn expunge_expired(&self) -> Result<u64, DomainError> {
        self.check()?;
        let now = Utc::now();
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !r.is_expired(now));
        Ok((before - records.len()) as u64)
    }

    async fn count(&self, name: &str, record_type: RecordType) -> Result<u64, DomainError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| Self::matches(r, name, record_type))
            .count() as u64)
    }
}

/// Scripted nameservers keyed by `(server, qname)`.
///
/// Each key holds a queue of replies; the last reply repeats once the queue
/// is down to one entry. Unscripted queries fail with `QueryTimeout`.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<HashMap<(Ipv4Addr, String), Vec<Message>>>>,
    calls: Arc<Mutex<Vec<(Ipv4Addr, String)>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    cache: Option<MockRecordCache>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes every reply into `cache`, as the UDP transport does.
    pub fn with_cache(cache: MockRecordCache) -> Self {
        Self {
            cache: Some(cache),
            ..Self::default()
        }
    }

    pub fn script(&self, server: Ipv4Addr, name: &str, build: impl FnOnce(Message) -> Message) {
        let request = Message::request(0, Question::new(name, RecordType::A));
        let reply = build(Message::reply_to(&request));
        self.replies
            .lock()
            .unwrap()
            .entry((server, name.to_ascii_lowercase()))
            .or_default()
            .push(reply);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(Ipv4Addr, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn next_reply(&self, server: Ipv4Addr, name: &str) -> Option<Message> {
        let mut replies = self.replies.lock().unwrap();
        let queue = replies.get_mut(&(server, name.to_ascii_lowercase()))?;
        if queue.len() > 1 {
            Some(queue.remove(0))
        } else {
            queue.first().cloned()
        }
    }
}

#[async_trait]
impl NameserverTransport for MockTransport {
    async fn query(
        &self,
        nameserver: Ipv4Addr,
        question: &Question,
    ) -> Result<Message, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((nameserver, question.name.clone()));

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .next_reply(nameserver, &question.name)
            .ok_or(DomainError::QueryTimeout)?;

        if let Some(cache) = &self.cache {
            for record in reply.records() {
                let _ = cache.add(record).await;
            }
        }

        Ok(reply)
    }
}
