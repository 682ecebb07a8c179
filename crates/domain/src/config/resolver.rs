use crate::root_hints;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Per-datagram wait before a single nameserver query gives up.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Deadline for one complete `resolve_ipv4` call.
    #[serde(default = "default_resolve_timeout_secs")]
    pub resolve_timeout_secs: u64,

    #[serde(default = "default_nameserver_port")]
    pub nameserver_port: u16,

    #[serde(default = "default_max_delegation_depth")]
    pub max_delegation_depth: usize,

    /// Overrides the built-in root hints when non-empty.
    #[serde(default)]
    pub root_servers: Vec<Ipv4Addr>,
}

impl ResolverConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }

    pub fn root_hints(&self) -> Vec<Ipv4Addr> {
        if self.root_servers.is_empty() {
            root_hints::root_server_addrs()
        } else {
            self.root_servers.clone()
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: default_query_timeout_ms(),
            resolve_timeout_secs: default_resolve_timeout_secs(),
            nameserver_port: default_nameserver_port(),
            max_delegation_depth: default_max_delegation_depth(),
            root_servers: vec![],
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_resolve_timeout_secs() -> u64 {
    30
}

fn default_nameserver_port() -> u16 {
    53
}

fn default_max_delegation_depth() -> usize {
    16
}
