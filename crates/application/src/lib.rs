//! Ports and use cases: the resolution engine lives here, speaking to the
//! record cache and the nameserver transport only through traits.
pub mod ports;
pub mod use_cases;
