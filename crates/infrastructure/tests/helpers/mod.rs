pub mod dns_server_mock;
pub mod unavailable_cache;

pub use dns_server_mock::*;
pub use unavailable_cache::*;
