use super::RecordType;
use crate::message::ResourceRecord;
use chrono::{DateTime, Duration, Utc};

/// A resource record as persisted in the record cache.
///
/// `name` is compared case-insensitively by the cache; `data` holds the
/// semantic rdata string (dotted address or target name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRecord {
    pub name: String,

    pub record_type: RecordType,

    pub class: u16,

    pub ttl: i32,

    pub data: String,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl CachedRecord {
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        class: u16,
        ttl: i32,
        data: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
            ttl,
            data: data.into(),
            created_at,
            expires_at: created_at + Duration::seconds(i64::from(ttl.max(0))),
        }
    }

    /// Snapshot of a wire record as observed at `created_at`.
    pub fn from_resource_record(record: &ResourceRecord, created_at: DateTime<Utc>) -> Self {
        Self::new(
            record.name.clone(),
            record.rtype,
            record.class,
            record.ttl,
            record.data(),
            created_at,
        )
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
