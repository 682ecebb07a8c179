use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport failure talking to {server}: {reason}")]
    TransportFailure { server: String, reason: String },

    #[error("Record cache unavailable: {0}")]
    CacheUnavailable(String),
}

impl DomainError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        DomainError::MalformedMessage(reason.into())
    }

    pub fn transport(server: impl ToString, reason: impl ToString) -> Self {
        DomainError::TransportFailure {
            server: server.to_string(),
            reason: reason.to_string(),
        }
    }
}
