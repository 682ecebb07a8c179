use crate::dns_record::{RecordClass, RecordType};
use crate::domain_name;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Decoded rdata, one variant per record kind the resolver understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(String),
    Cname(String),
    Opaque(Vec<u8>),
}

impl RData {
    pub fn as_ipv4(&self) -> Option<Ipv4Addr> {
        match self {
            RData::A(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            RData::Ns(name) | RData::Cname(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RData::A(addr) => write!(f, "{}", addr),
            RData::Aaaa(addr) => write!(f, "{}", addr),
            RData::Ns(name) | RData::Cname(name) => write!(f, "{}", name),
            RData::Opaque(_) => Ok(()),
        }
    }
}

/// Resource record, RFC 1035 §4.1.3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: RecordType,
    pub class: u16,
    pub ttl: i32,
    pub rdata: RData,
}

impl ResourceRecord {
    pub fn a(name: &str, ttl: i32, addr: Ipv4Addr) -> Self {
        Self::new(name, RecordType::A, ttl, RData::A(addr))
    }

    pub fn aaaa(name: &str, ttl: i32, addr: Ipv6Addr) -> Self {
        Self::new(name, RecordType::AAAA, ttl, RData::Aaaa(addr))
    }

    pub fn ns(name: &str, ttl: i32, nameserver: &str) -> Self {
        Self::new(
            name,
            RecordType::NS,
            ttl,
            RData::Ns(domain_name::normalize(nameserver)),
        )
    }

    pub fn cname(name: &str, ttl: i32, target: &str) -> Self {
        Self::new(
            name,
            RecordType::CNAME,
            ttl,
            RData::Cname(domain_name::normalize(target)),
        )
    }

    pub fn opaque(name: &str, rtype: RecordType, ttl: i32, payload: Vec<u8>) -> Self {
        Self::new(name, rtype, ttl, RData::Opaque(payload))
    }

    fn new(name: &str, rtype: RecordType, ttl: i32, rdata: RData) -> Self {
        Self {
            name: domain_name::normalize(name),
            rtype,
            class: RecordClass::IN.to_u16(),
            ttl,
            rdata,
        }
    }

    /// Semantic data string: dotted address, target name, or empty.
    pub fn data(&self) -> String {
        self.rdata.to_string()
    }
}
