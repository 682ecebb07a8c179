//! Adapters behind the application ports: the DNS wire codec, the UDP
//! nameserver transport and the SQLite record cache.
pub mod database;
pub mod dns;
pub mod repositories;
