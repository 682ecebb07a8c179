use iterdns_application::ports::Ipv4Resolver;
use iterdns_domain::DomainError;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const DEFAULT_INTERVAL_SECS: u64 = 60;
const DEFAULT_DEADLINE_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    Unchanged(Ipv4Addr),
    /// `previous` is `None` the first time a domain resolves.
    Changed {
        previous: Option<Ipv4Addr>,
        current: Ipv4Addr,
    },
    NotFound,
    TimedOut,
    Failed,
}

/// Periodically resolves a fixed set of domains and reports address changes.
///
/// A failed or timed-out run keeps the last observed address, so the next
/// successful run is compared against it.
pub struct DomainMonitorJob {
    resolver: Arc<dyn Ipv4Resolver>,
    domains: Vec<String>,
    interval_secs: u64,
    deadline: Duration,
    last_seen: RwLock<HashMap<String, Ipv4Addr>>,
    shutdown: CancellationToken,
}

impl DomainMonitorJob {
    pub fn new(resolver: Arc<dyn Ipv4Resolver>, domains: Vec<String>) -> Self {
        Self {
            resolver,
            domains,
            interval_secs: DEFAULT_INTERVAL_SECS,
            deadline: Duration::from_secs(DEFAULT_DEADLINE_SECS),
            last_seen: RwLock::new(HashMap::new()),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    /// Upper bound for a single domain's resolution.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn last_seen(&self, domain: &str) -> Option<Ipv4Addr> {
        self.last_seen.read().await.get(domain).copied()
    }

    /// Resolves every monitored domain once, in order.
    pub async fn check_all(&self) -> Vec<MonitorOutcome> {
        let mut outcomes = Vec::with_capacity(self.domains.len());
        for domain in &self.domains {
            outcomes.push(self.check(domain).await);
        }
        outcomes
    }

    async fn check(&self, domain: &str) -> MonitorOutcome {
        let current = match self.resolver.resolve_ipv4(domain, self.deadline).await {
            Ok(Some(ip)) => ip,
            Ok(None) => {
                warn!(domain = %domain, "Monitored domain did not resolve");
                return MonitorOutcome::NotFound;
            }
            Err(DomainError::QueryTimeout) => {
                warn!(
                    domain = %domain,
                    deadline_ms = self.deadline.as_millis() as u64,
                    "Monitored domain resolution timed out"
                );
                return MonitorOutcome::TimedOut;
            }
            Err(e) => {
                error!(domain = %domain, error = %e, "Monitored domain resolution failed");
                return MonitorOutcome::Failed;
            }
        };

        debug!(domain = %domain, ip = %current, "Monitored domain resolved");

        let previous = self
            .last_seen
            .write()
            .await
            .insert(domain.to_string(), current);

        if previous == Some(current) {
            return MonitorOutcome::Unchanged(current);
        }

        match previous {
            Some(previous) => {
                info!(domain = %domain, previous = %previous, current = %current, "Domain address changed")
            }
            None => info!(domain = %domain, current = %current, "Domain address observed"),
        }
        MonitorOutcome::Changed { previous, current }
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            domains = self.domains.len(),
            interval_secs = self.interval_secs,
            "Starting domain monitor job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("DomainMonitorJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.check_all().await;
                    }
                }
            }
        });
    }
}
