pub mod record_cache_repository;

pub use record_cache_repository::SqliteRecordCache;
