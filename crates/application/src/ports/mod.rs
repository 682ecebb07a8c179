mod ipv4_resolver;
mod nameserver_transport;
mod record_cache;

pub use ipv4_resolver::Ipv4Resolver;
pub use nameserver_transport::NameserverTransport;
pub use record_cache::RecordCache;

pub use iterdns_domain::{CachedRecord, DomainError, Message, Question, RecordType, ResourceRecord};
