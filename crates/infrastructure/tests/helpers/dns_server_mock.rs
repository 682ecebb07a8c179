#![allow(dead_code)]
use iterdns_domain::Message;
use iterdns_infrastructure::dns::wire::{deserialize, serialize};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

type Handler = Arc<dyn Fn(&Message) -> Option<Message> + Send + Sync>;

/// Nameserver on 127.0.0.1 answering with a scripted handler.
///
/// Queries are buffered until `batch` of them have arrived and then answered
/// newest first, which lets tests force out-of-order replies.
pub struct MockNameserver {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockNameserver {
    pub async fn start(
        handler: impl Fn(&Message) -> Option<Message> + Send + Sync + 'static,
    ) -> Result<Self, std::io::Error> {
        Self::start_batched(1, handler).await
    }

    /// Receives queries and never answers.
    pub async fn silent() -> Result<Self, std::io::Error> {
        Self::start(|_| None).await
    }

    pub async fn start_batched(
        batch: usize,
        handler: impl Fn(&Message) -> Option<Message> + Send + Sync + 'static,
    ) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let handler: Handler = Arc::new(handler);
        let received = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&received);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            let mut held: Vec<(Message, SocketAddr)> = Vec::new();

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let Ok(query) = deserialize(&buf[..len]) else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        held.push((query, peer));

                        if held.len() < batch {
                            continue;
                        }
                        while let Some((query, peer)) = held.pop() {
                            if let Some(reply) = handler(&query) {
                                if let Ok(bytes) = serialize(&reply) {
                                    let _ = socket.send_to(&bytes, peer).await;
                                }
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }
}

impl Drop for MockNameserver {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
