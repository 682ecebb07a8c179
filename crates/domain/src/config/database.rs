use serde::{Deserialize, Serialize};

pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite file backing the record cache. `:memory:` keeps the cache
    /// in-process and drops it on exit.
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_DATABASE
    }

    pub fn database_url(&self) -> String {
        if self.is_in_memory() {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite:{}", self.path)
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_path() -> String {
    IN_MEMORY_DATABASE.to_string()
}

fn default_max_connections() -> u32 {
    4
}
