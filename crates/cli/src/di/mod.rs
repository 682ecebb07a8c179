use iterdns_application::ports::RecordCache;
use iterdns_application::use_cases::{ExpungeExpiredRecordsUseCase, ResolveIpv4UseCase};
use iterdns_domain::Config;
use iterdns_infrastructure::dns::UdpNameserverTransport;
use iterdns_infrastructure::repositories::SqliteRecordCache;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Services {
    pub resolver: Arc<ResolveIpv4UseCase>,
    pub expunge: Arc<ExpungeExpiredRecordsUseCase>,
}

impl Services {
    /// Must be called from within the tokio runtime; the transport spawns
    /// its receive loop here.
    pub fn new(config: &Config, pool: SqlitePool) -> anyhow::Result<Self> {
        let cache: Arc<dyn RecordCache> = Arc::new(SqliteRecordCache::new(pool));
        let transport = Arc::new(UdpNameserverTransport::from_config(
            Arc::clone(&cache),
            &config.resolver,
        )?);

        let resolver = ResolveIpv4UseCase::new(
            Arc::clone(&cache),
            transport,
            config.resolver.root_hints(),
        )
        .with_max_delegation_depth(config.resolver.max_delegation_depth);

        Ok(Self {
            resolver: Arc::new(resolver),
            expunge: Arc::new(ExpungeExpiredRecordsUseCase::new(cache)),
        })
    }
}
