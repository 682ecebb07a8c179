#![allow(dead_code)]
use chrono::{DateTime, TimeZone, Utc};
use iterdns_domain::{CachedRecord, RecordType};

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub struct CachedRecordBuilder {
    name: String,
    record_type: RecordType,
    ttl: i32,
    data: String,
    created_at: DateTime<Utc>,
}

impl CachedRecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "example.com.".to_string(),
            record_type: RecordType::A,
            ttl: 300,
            data: "192.0.2.1".to_string(),
            created_at: fixed_time(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn ttl(mut self, ttl: i32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn data(mut self, data: &str) -> Self {
        self.data = data.to_string();
        self
    }

    pub fn build(self) -> CachedRecord {
        CachedRecord::new(
            self.name,
            self.record_type,
            1,
            self.ttl,
            self.data,
            self.created_at,
        )
    }
}
