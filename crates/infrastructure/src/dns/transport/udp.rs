//! Multiplexed UDP transport (RFC 1035 §4.2.1)
//!
//! One socket is shared by every in-flight query. A single background task
//! owns all receives and hands each reply to the caller waiting on its
//! transaction id, so concurrent callers never see each other's replies.

use crate::dns::wire::{deserialize, serialize};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use iterdns_application::ports::{NameserverTransport, RecordCache};
use iterdns_domain::config::ResolverConfig;
use iterdns_domain::{DomainError, Message, Question};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Larger than any message we send; oversized replies are still decoded.
const RECV_BUFFER_SIZE: usize = 4096;

struct Waiter {
    server: Ipv4Addr,
    ticket: u64,
    reply: oneshot::Sender<Message>,
}

type PendingMap = DashMap<u16, Waiter>;

pub struct UdpNameserverTransport {
    socket: Arc<UdpSocket>,
    pending: Arc<PendingMap>,
    cache: Arc<dyn RecordCache>,
    port: u16,
    query_timeout: Duration,
    tickets: AtomicU64,
    shutdown: CancellationToken,
}

impl UdpNameserverTransport {
    /// Binds an ephemeral IPv4 socket and starts the receive loop.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        cache: Arc<dyn RecordCache>,
        port: u16,
        query_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let socket = Arc::new(
            create_socket().map_err(|e| DomainError::transport("0.0.0.0:0", e))?,
        );
        let pending = Arc::new(PendingMap::new());
        let shutdown = CancellationToken::new();

        tokio::spawn(receive_loop(
            Arc::clone(&socket),
            Arc::clone(&pending),
            shutdown.clone(),
        ));

        if let Ok(local) = socket.local_addr() {
            info!(local = %local, port, timeout_ms = query_timeout.as_millis() as u64, "Nameserver transport ready");
        }

        Ok(Self {
            socket,
            pending,
            cache,
            port,
            query_timeout,
            tickets: AtomicU64::new(0),
            shutdown,
        })
    }

    pub fn from_config(
        cache: Arc<dyn RecordCache>,
        config: &ResolverConfig,
    ) -> Result<Self, DomainError> {
        Self::new(cache, config.nameserver_port, config.query_timeout())
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::transport("local socket", e))
    }

    /// Queries currently awaiting a reply.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn register(&self, server: Ipv4Addr, reply: oneshot::Sender<Message>) -> PendingGuard<'_> {
        let ticket = self.tickets.fetch_add(1, Ordering::Relaxed);
        let waiter = Waiter {
            server,
            ticket,
            reply,
        };

        loop {
            let id = fastrand::u16(..);
            match self.pending.entry(id) {
                Entry::Vacant(slot) => {
                    slot.insert(waiter);
                    return PendingGuard {
                        pending: &self.pending,
                        id,
                        ticket,
                    };
                }
                Entry::Occupied(_) => continue,
            }
        }
    }

    async fn prime_cache(&self, reply: &Message) {
        for record in reply.records() {
            if let Err(e) = self.cache.add(record).await {
                warn!(name = %record.name, record_type = %record.rtype, error = %e, "Failed to cache record");
            }
        }
    }
}

impl Drop for UdpNameserverTransport {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[async_trait]
impl NameserverTransport for UdpNameserverTransport {
    async fn query(
        &self,
        nameserver: Ipv4Addr,
        question: &Question,
    ) -> Result<Message, DomainError> {
        let target = SocketAddr::from((nameserver, self.port));
        let (tx, rx) = oneshot::channel();
        let guard = self.register(nameserver, tx);

        let request = Message::request(guard.id, question.clone());
        let bytes = serialize(&request)?;

        self.socket
            .send_to(&bytes, target)
            .await
            .map_err(|e| DomainError::transport(target, e))?;

        debug!(
            server = %target,
            id = guard.id,
            name = %question.name,
            record_type = %question.qtype,
            bytes_sent = bytes.len(),
            "Query sent"
        );

        let reply = match tokio::time::timeout(self.query_timeout, rx).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(_)) => return Err(DomainError::transport(target, "receive loop stopped")),
            Err(_) => {
                debug!(server = %target, id = guard.id, name = %question.name, "Query timed out");
                return Err(DomainError::QueryTimeout);
            }
        };
        drop(guard);

        debug!(
            server = %target,
            id = reply.header.id,
            rcode = reply.header.response_code.as_str(),
            answers = reply.answers.len(),
            authority = reply.authority.len(),
            additional = reply.additional.len(),
            "Reply received"
        );

        self.prime_cache(&reply).await;
        Ok(reply)
    }
}

/// Removes the waiter it was issued for, unless the receive loop already
/// consumed it and the id has since been reused.
struct PendingGuard<'a> {
    pending: &'a PendingMap,
    id: u16,
    ticket: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let ticket = self.ticket;
        self.pending.remove_if(&self.id, |_, waiter| waiter.ticket == ticket);
    }
}

fn create_socket() -> std::io::Result<UdpSocket> {
    use socket2::{Domain, Protocol, Socket, Type};

    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(128 * 1024)?;

    let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0));
    socket.bind(&bind_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}

async fn receive_loop(
    socket: Arc<UdpSocket>,
    pending: Arc<PendingMap>,
    shutdown: CancellationToken,
) {
    let mut buf = vec![0u8; RECV_BUFFER_SIZE];

    loop {
        let (len, from) = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut buf) => match received {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "UDP receive failed");
                    continue;
                }
            },
        };

        let message = match deserialize(&buf[..len]) {
            Ok(message) => message,
            Err(e) => {
                debug!(from = %from, bytes = len, error = %e, "Dropping undecodable datagram");
                continue;
            }
        };

        let id = message.header.id;
        let matched = pending.remove_if(&id, |_, waiter| IpAddr::V4(waiter.server) == from.ip());

        match matched {
            Some((_, waiter)) => {
                // The caller may have given up already.
                let _ = waiter.reply.send(message);
            }
            None if pending.contains_key(&id) => {
                warn!(from = %from, id, "Reply from unexpected source, dropping");
            }
            None => {
                debug!(from = %from, id, "Reply for unknown transaction id, dropping");
            }
        }
    }

    debug!("Receive loop stopped");
}
