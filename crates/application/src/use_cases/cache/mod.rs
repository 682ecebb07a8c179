mod expunge_expired;

pub use expunge_expired::ExpungeExpiredRecordsUseCase;
