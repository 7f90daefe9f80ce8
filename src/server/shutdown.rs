use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Creates a linked pair: once the handle is used or dropped, the signal resolves and the gRPC
/// server it was given to stops accepting connections.
pub(crate) fn shutdown_signal() -> (RpcServerShutdownHandle, RpcServerShutdownSignal) {
    let (tx, rx) = oneshot::channel();

    (RpcServerShutdownHandle { tx }, RpcServerShutdownSignal { rx })
}

pub(crate) struct RpcServerShutdownHandle {
    tx: oneshot::Sender<ShutdownReason>,
}

impl RpcServerShutdownHandle {
    pub(crate) fn shutdown(self) {
        let _ = self.tx.send(ShutdownReason::Requested);
    }
}

#[derive(Debug, Eq, PartialEq)]
pub(crate) enum ShutdownReason {
    Requested,
    HandleDropped,
}

pub(crate) struct RpcServerShutdownSignal {
    rx: oneshot::Receiver<ShutdownReason>,
}

impl Future for RpcServerShutdownSignal {
    type Output = ShutdownReason;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(ShutdownReason::HandleDropped))
    }
}
