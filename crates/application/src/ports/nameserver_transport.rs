use async_trait::async_trait;
use iterdns_domain::{DomainError, Message, Question};
use std::net::Ipv4Addr;

#[async_trait]
pub trait NameserverTransport: Send + Sync {
    /// Sends a single non-recursive query to `nameserver` and waits for the
    /// reply carrying the same transaction id.
    ///
    /// Records from every section of the reply are written to the record
    /// cache before it is returned.
    async fn query(&self, nameserver: Ipv4Addr, question: &Question)
        -> Result<Message, DomainError>;
}
