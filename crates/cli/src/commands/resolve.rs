use crate::di::Services;
use iterdns_application::ports::Ipv4Resolver;
use iterdns_domain::{Config, DomainError};
use tracing::warn;

pub async fn resolve(
    services: &Services,
    config: &Config,
    domains: &[String],
) -> anyhow::Result<()> {
    let deadline = config.resolver.resolve_timeout();

    for domain in domains {
        match services.resolver.resolve_ipv4(domain, deadline).await {
            Ok(Some(ip)) => println!("{} {}", domain, ip),
            Ok(None) => println!("{} not found", domain),
            Err(DomainError::QueryTimeout) => {
                warn!(domain = %domain, deadline_secs = deadline.as_secs(), "Resolution timed out");
                println!("{} not found", domain);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
