use std::net::Ipv4Addr;

/// One of the thirteen root name servers (IANA root hints).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootServer {
    pub name: &'static str,
    pub ipv4: Ipv4Addr,
}

/// IPv4 addresses of the root servers, `a` through `m`.
pub static ROOT_SERVERS: [RootServer; 13] = [
    root("a.root-servers.net.", 198, 41, 0, 4),
    root("b.root-servers.net.", 170, 247, 170, 2),
    root("c.root-servers.net.", 192, 33, 4, 12),
    root("d.root-servers.net.", 199, 7, 91, 13),
    root("e.root-servers.net.", 192, 203, 230, 10),
    root("f.root-servers.net.", 192, 5, 5, 241),
    root("g.root-servers.net.", 192, 112, 36, 4),
    root("h.root-servers.net.", 198, 97, 190, 53),
    root("i.root-servers.net.", 192, 36, 148, 17),
    root("j.root-servers.net.", 192, 58, 128, 30),
    root("k.root-servers.net.", 193, 0, 14, 129),
    root("l.root-servers.net.", 199, 7, 83, 42),
    root("m.root-servers.net.", 202, 12, 27, 33),
];

const fn root(name: &'static str, a: u8, b: u8, c: u8, d: u8) -> RootServer {
    RootServer {
        name,
        ipv4: Ipv4Addr::new(a, b, c, d),
    }
}

pub fn root_server_addrs() -> Vec<Ipv4Addr> {
    ROOT_SERVERS.iter().map(|server| server.ipv4).collect()
}
