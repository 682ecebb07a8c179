use async_trait::async_trait;
use chrono::{DateTime, Utc};
use iterdns_application::ports::RecordCache;
use iterdns_domain::domain_name::normalize;
use iterdns_domain::{CachedRecord, DomainError, RecordType, ResourceRecord};
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};

/// name, type, class, ttl, data, expires_at, created_at
type RecordRow = (String, i64, i64, i64, String, i64, i64);

/// Record cache stored in the `resource_records` table.
///
/// Timestamps are Unix milliseconds; `name` uses `COLLATE NOCASE` so every
/// lookup is case-insensitive.
pub struct SqliteRecordCache {
    pool: SqlitePool,
}

impl SqliteRecordCache {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: RecordRow) -> CachedRecord {
        let (name, record_type, class, ttl, data, expires_at, created_at) = row;
        CachedRecord {
            name,
            record_type: RecordType::from_u16(record_type as u16),
            class: class as u16,
            ttl: ttl as i32,
            data,
            created_at: from_millis(created_at),
            expires_at: from_millis(expires_at),
        }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

fn storage_error(context: &str, e: sqlx::Error) -> DomainError {
    error!(error = %e, "{}", context);
    DomainError::CacheUnavailable(format!("{}: {}", context, e))
}

#[async_trait]
impl RecordCache for SqliteRecordCache {
    #[instrument(skip(self, record), fields(name = %record.name, record_type = %record.rtype))]
    async fn add(&self, record: &ResourceRecord) -> Result<(), DomainError> {
        let now = now_millis();
        let expires_at = now + i64::from(record.ttl.max(0)) * 1000;
        let name = normalize(&record.name);
        let record_type = i64::from(record.rtype.to_u16());

        let result = sqlx::query(
            "INSERT INTO resource_records (name, type, class, ttl, data, expires_at, created_at)
             SELECT ?, ?, ?, ?, ?, ?, ?
             WHERE NOT EXISTS (
                 SELECT 1 FROM resource_records
                 WHERE name = ? AND type = ? AND expires_at > ?
             )",
        )
        .bind(&name)
        .bind(record_type)
        .bind(i64::from(record.class))
        .bind(i64::from(record.ttl))
        .bind(record.data())
        .bind(expires_at)
        .bind(now)
        .bind(&name)
        .bind(record_type)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to insert cached record", e))?;

        if result.rows_affected() == 0 {
            debug!("Live record already cached, insert skipped");
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_all(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<CachedRecord>, DomainError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            "SELECT name, type, class, ttl, data, expires_at, created_at
             FROM resource_records
             WHERE name = ? AND type = ? AND expires_at > ?
             ORDER BY created_at DESC, rowid DESC",
        )
        .bind(normalize(name))
        .bind(i64::from(record_type.to_u16()))
        .bind(now_millis())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to query cached records", e))?;

        Ok(rows.into_iter().map(Self::row_to_record).collect())
    }

    #[instrument(skip(self))]
    async fn find_first(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<CachedRecord>, DomainError> {
        let row = sqlx::query_as::<_, RecordRow>(
            "SELECT name, type, class, ttl, data, expires_at, created_at
             FROM resource_records
             WHERE name = ? AND type = ? AND expires_at > ?
             ORDER BY created_at DESC, rowid DESC
             LIMIT 1",
        )
        .bind(normalize(name))
        .bind(i64::from(record_type.to_u16()))
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to query cached record", e))?;

        Ok(row.map(Self::row_to_record))
    }

    #[instrument(skip(self))]
    async fn expunge_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM resource_records WHERE expires_at <= ?")
            .bind(now_millis())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to expunge expired records", e))?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count(&self, name: &str, record_type: RecordType) -> Result<u64, DomainError> {
        let row = sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM resource_records WHERE name = ? AND type = ?",
        )
        .bind(normalize(name))
        .bind(i64::from(record_type.to_u16()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to count cached records", e))?;

        Ok(row.0 as u64)
    }
}
