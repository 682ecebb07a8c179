pub mod udp;

pub use udp::UdpNameserverTransport;
