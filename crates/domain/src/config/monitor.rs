use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Domains whose IPv4 address is resolved on every monitor tick.
    #[serde(default)]
    pub domains: Vec<String>,

    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_expunge_interval_secs")]
    pub expunge_interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            domains: vec![],
            interval_secs: default_interval_secs(),
            expunge_interval_secs: default_expunge_interval_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    60
}

fn default_expunge_interval_secs() -> u64 {
    300
}
