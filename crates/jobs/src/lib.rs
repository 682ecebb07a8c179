pub mod cache_expunge;
pub mod domain_monitor;
pub mod runner;

pub use cache_expunge::CacheExpungeJob;
pub use domain_monitor::{DomainMonitorJob, MonitorOutcome};
pub use runner::JobRunner;
