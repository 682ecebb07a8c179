use async_trait::async_trait;
use iterdns_domain::DomainError;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Entry point consumed by monitoring jobs and the CLI.
#[async_trait]
pub trait Ipv4Resolver: Send + Sync {
    /// `Ok(None)` when the name could not be resolved, `Err(QueryTimeout)`
    /// when `deadline` elapsed first.
    async fn resolve_ipv4(
        &self,
        domain: &str,
        deadline: Duration,
    ) -> Result<Option<Ipv4Addr>, DomainError>;
}
