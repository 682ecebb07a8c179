use iterdns_application::use_cases::ExpungeExpiredRecordsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Deletes expired cache rows on a fixed interval. The first run happens
/// immediately on start.
pub struct CacheExpungeJob {
    expunge: Arc<ExpungeExpiredRecordsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheExpungeJob {
    pub fn new(expunge: Arc<ExpungeExpiredRecordsUseCase>) -> Self {
        Self {
            expunge,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting cache expunge job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheExpungeJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = self.expunge.execute().await {
                            error!(error = %e, "Cache expunge failed");
                        }
                    }
                }
            }
        });
    }
}
