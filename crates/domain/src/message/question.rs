use crate::dns_record::{RecordClass, RecordType};
use crate::domain_name;

/// Question section entry, RFC 1035 §4.1.2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: RecordType,
    pub qclass: u16,
}

impl Question {
    /// Builds an IN-class question; `name` gains its trailing dot if missing.
    pub fn new(name: &str, qtype: RecordType) -> Self {
        Self {
            name: domain_name::normalize(name),
            qtype,
            qclass: RecordClass::IN.to_u16(),
        }
    }
}
