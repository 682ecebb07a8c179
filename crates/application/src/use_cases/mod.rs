pub mod cache;
pub mod resolution;

pub use cache::ExpungeExpiredRecordsUseCase;
pub use resolution::ResolveIpv4UseCase;
