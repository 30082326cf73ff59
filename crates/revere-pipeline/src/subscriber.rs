use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A single delivered message. Acking is an explicit async step rather than
/// a drop-time side effect, since a real transport's ack is itself a
/// network round trip the caller must be able to await (and must skip
/// entirely on the unrecoverable-handler path).
pub struct Message {
    data: Vec<u8>,
    ack: Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>,
}

impl Message {
    pub fn new<F, Fut>(data: Vec<u8>, ack: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Message {
            data,
            ack: Box::new(move || Box::pin(ack())),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub async fn ack(self) {
        (self.ack)().await
    }
}

/// Abstracts the upstream message transport so the pipeline is testable
/// without a live subscription. Implementations own their own retry and
/// reconnect behavior; `recv` returns `None` once the subscription has been
/// cancelled and fully drained.
#[async_trait]
pub trait Subscriber: Send {
    async fn recv(&mut self) -> Option<Message>;
}
