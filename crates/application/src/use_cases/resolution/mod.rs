mod resolve_ipv4;

pub use resolve_ipv4::{ResolveIpv4UseCase, DEFAULT_MAX_DELEGATION_DEPTH};
