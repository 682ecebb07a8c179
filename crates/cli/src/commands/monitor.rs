use crate::di::Services;
use iterdns_application::ports::Ipv4Resolver;
use iterdns_domain::Config;
use iterdns_jobs::{CacheExpungeJob, DomainMonitorJob, JobRunner};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub async fn monitor(services: &Services, config: &Config) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();

    if config.monitor.domains.is_empty() {
        warn!("No monitored domains configured, only the cache expunge job will run");
    }

    let expunge = CacheExpungeJob::new(Arc::clone(&services.expunge))
        .with_interval(config.monitor.expunge_interval_secs);

    let resolver: Arc<dyn Ipv4Resolver> = services.resolver.clone();
    let domain_monitor = DomainMonitorJob::new(resolver, config.monitor.domains.clone())
        .with_interval(config.monitor.interval_secs)
        .with_deadline(config.resolver.resolve_timeout());

    let mut runner = JobRunner::new()
        .with_cache_expunge(expunge)
        .with_shutdown_token(shutdown.clone());
    if !config.monitor.domains.is_empty() {
        runner = runner.with_domain_monitor(domain_monitor);
    }
    runner.start().await;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping jobs");
    shutdown.cancel();

    Ok(())
}
