//! iterdns domain layer: DNS message model, cached records, configuration
//! and the error type shared by every other crate.
pub mod config;
pub mod dns_record;
pub mod domain_name;
pub mod errors;
pub mod message;
pub mod root_hints;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{CachedRecord, RecordClass, RecordType};
pub use errors::DomainError;
pub use message::{Header, Message, OpCode, Question, RData, ResourceRecord, ResponseCode};
pub use root_hints::{RootServer, ROOT_SERVERS};
