use crate::ports::{Ipv4Resolver, NameserverTransport, RecordCache};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use iterdns_domain::domain_name::{names_equal, normalize, suffixes};
use iterdns_domain::{CachedRecord, DomainError, Message, Question, RData, RecordType};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_MAX_DELEGATION_DEPTH: usize = 16;

/// Nameserver addresses looked up during one top-level resolution. `None`
/// marks a lookup that is still running or came up empty.
#[derive(Default)]
struct Walk {
    nameservers: HashMap<String, Option<Ipv4Addr>>,
}

/// Iterative IPv4 resolution starting from cached delegations or the root.
///
/// Every nested lookup (glue resolution, referral following) counts towards
/// `max_depth`; a branch that exceeds it yields nothing.
pub struct ResolveIpv4UseCase {
    cache: Arc<dyn RecordCache>,
    transport: Arc<dyn NameserverTransport>,
    root_hints: Arc<[Ipv4Addr]>,
    max_depth: usize,
}

impl ResolveIpv4UseCase {
    pub fn new(
        cache: Arc<dyn RecordCache>,
        transport: Arc<dyn NameserverTransport>,
        root_hints: impl Into<Arc<[Ipv4Addr]>>,
    ) -> Self {
        Self {
            cache,
            transport,
            root_hints: root_hints.into(),
            max_depth: DEFAULT_MAX_DELEGATION_DEPTH,
        }
    }

    pub fn with_max_delegation_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolves `name` without a deadline.
    #[instrument(skip(self))]
    pub async fn execute(&self, name: &str) -> Option<Ipv4Addr> {
        self.resolve(&mut Walk::default(), normalize(name), 0).await
    }

    /// Address of the closest known nameserver for `name`, falling back to
    /// the first root hint.
    pub async fn resolve_ns(&self, name: &str) -> Option<Ipv4Addr> {
        self.nameserver_for(&mut Walk::default(), normalize(name), 0)
            .await
    }

    /// Walks delegations for `A? name` starting at `nameserver`.
    pub async fn resolve_ipv4_via(&self, name: &str, nameserver: Ipv4Addr) -> Option<Ipv4Addr> {
        self.resolve_via(&mut Walk::default(), normalize(name), nameserver, 0)
            .await
    }

    fn resolve<'a>(
        &'a self,
        walk: &'a mut Walk,
        name: String,
        depth: usize,
    ) -> BoxFuture<'a, Option<Ipv4Addr>> {
        async move {
            if self.depth_exceeded(&name, depth) {
                return None;
            }

            // Only one CNAME hop is followed from the cache.
            let mut name = name;
            if let Some(cname) = self.cached(&name, RecordType::CNAME).await {
                debug!(from = %name, to = %cname.data, "Following cached CNAME");
                name = normalize(&cname.data);
            }

            if let Some(addr) = self.cached_ipv4(&name).await {
                debug!(name = %name, ip = %addr, "Cache hit");
                return Some(addr);
            }

            let nameserver = self.nameserver_for(walk, name.clone(), depth + 1).await?;
            if let Some(addr) = self
                .resolve_via(walk, name.clone(), nameserver, depth + 1)
                .await
            {
                return Some(addr);
            }

            let root = self.first_root()?;
            info!(name = %name, root = %root, "Retrying resolution from root");
            self.resolve_via(walk, name, root, depth + 1).await
        }
        .boxed()
    }

    fn nameserver_for<'a>(
        &'a self,
        walk: &'a mut Walk,
        name: String,
        depth: usize,
    ) -> BoxFuture<'a, Option<Ipv4Addr>> {
        async move {
            if !self.depth_exceeded(&name, depth) {
                for zone in suffixes(&name) {
                    let Some(ns) = self.cached(&zone, RecordType::NS).await else {
                        continue;
                    };
                    // An in-zone nameserver cannot be used to find its own address.
                    if names_equal(&ns.data, &name) {
                        continue;
                    }

                    if let Some(addr) = self
                        .nameserver_address(walk, normalize(&ns.data), depth + 1)
                        .await
                    {
                        debug!(zone = %zone, nameserver = %ns.data, ip = %addr, "Using cached delegation");
                        return Some(addr);
                    }
                }
            }

            self.first_root()
        }
        .boxed()
    }

    fn resolve_via<'a>(
        &'a self,
        walk: &'a mut Walk,
        name: String,
        nameserver: Ipv4Addr,
        depth: usize,
    ) -> BoxFuture<'a, Option<Ipv4Addr>> {
        async move {
            if self.depth_exceeded(&name, depth) {
                return None;
            }

            let reply = self.ask(nameserver, &name).await?;

            if let Some(addr) = answer_address(&reply, &name) {
                debug!(name = %name, nameserver = %nameserver, ip = %addr, "Answer received");
                return Some(addr);
            }

            for authority in reply.authority.iter().filter(|r| r.rtype == RecordType::NS) {
                let Some(target) = authority.rdata.as_name() else {
                    continue;
                };

                let glue = match glue_address(&reply, target) {
                    Some(addr) => addr,
                    None => {
                        debug!(nameserver = %target, "No glue, resolving nameserver address");
                        match self
                            .nameserver_address(walk, normalize(target), depth + 1)
                            .await
                        {
                            Some(addr) => addr,
                            None => continue,
                        }
                    }
                };

                if let Some(addr) = self
                    .resolve_via(walk, name.clone(), glue, depth + 1)
                    .await
                {
                    return Some(addr);
                }
            }

            None
        }
        .boxed()
    }

    /// Resolves a nameserver's own address at most once per walk. A name
    /// met again while its lookup is still running is treated as
    /// unresolvable, which breaks glueless delegation cycles.
    fn nameserver_address<'a>(
        &'a self,
        walk: &'a mut Walk,
        nameserver: String,
        depth: usize,
    ) -> BoxFuture<'a, Option<Ipv4Addr>> {
        async move {
            let key = nameserver.to_ascii_lowercase();
            if let Some(known) = walk.nameservers.get(&key) {
                if known.is_none() {
                    debug!(nameserver = %nameserver, "Nameserver already looked up in this walk, skipping");
                }
                return *known;
            }

            walk.nameservers.insert(key.clone(), None);
            let addr = self.resolve(walk, nameserver, depth).await;
            walk.nameservers.insert(key, addr);
            addr
        }
        .boxed()
    }

    async fn ask(&self, nameserver: Ipv4Addr, name: &str) -> Option<Message> {
        let question = Question::new(name, RecordType::A);
        match self.transport.query(nameserver, &question).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!(name = %name, nameserver = %nameserver, error = %e, "No answer from nameserver");
                None
            }
        }
    }

    async fn cached(&self, name: &str, record_type: RecordType) -> Option<CachedRecord> {
        match self.cache.find_first(name, record_type).await {
            Ok(record) => record,
            Err(e) => {
                warn!(name = %name, record_type = %record_type, error = %e, "Cache lookup failed, treating as miss");
                None
            }
        }
    }

    async fn cached_ipv4(&self, name: &str) -> Option<Ipv4Addr> {
        let record = self.cached(name, RecordType::A).await?;
        match record.data.parse() {
            Ok(addr) => Some(addr),
            Err(_) => {
                warn!(name = %name, data = %record.data, "Ignoring unparsable cached A record");
                None
            }
        }
    }

    fn first_root(&self) -> Option<Ipv4Addr> {
        self.root_hints.first().copied()
    }

    fn depth_exceeded(&self, name: &str, depth: usize) -> bool {
        if depth > self.max_depth {
            warn!(name = %name, depth, max_depth = self.max_depth, "Delegation depth exceeded");
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl Ipv4Resolver for ResolveIpv4UseCase {
    async fn resolve_ipv4(
        &self,
        domain: &str,
        deadline: Duration,
    ) -> Result<Option<Ipv4Addr>, DomainError> {
        tokio::time::timeout(deadline, self.execute(domain))
            .await
            .map_err(|_| DomainError::QueryTimeout)
    }
}

/// An A record owned by `name` if present, otherwise the first A in the
/// answer section (CNAME chains answered in one reply).
fn answer_address(reply: &Message, name: &str) -> Option<Ipv4Addr> {
    let mut first = None;
    for record in &reply.answers {
        if let RData::A(addr) = record.rdata {
            if names_equal(&record.name, name) {
                return Some(addr);
            }
            if first.is_none() {
                first = Some(addr);
            }
        }
    }
    first
}

fn glue_address(reply: &Message, nameserver: &str) -> Option<Ipv4Addr> {
    reply
        .additional
        .iter()
        .filter(|r| names_equal(&r.name, nameserver))
        .find_map(|r| r.rdata.as_ipv4())
}
