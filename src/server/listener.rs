use crate::common::Address;
use crate::server::RpcServerShutdownSignal;
use std::future::Future;
use std::io;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;

#[derive(Debug, thiserror::Error)]
pub enum StartServerError {
    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),
    #[error("Failed to bind listener")]
    Bind(#[from] io::Error),
    #[error("Illegal options: {0}")]
    IllegalOptions(String),
}

/// Binds the listening socket up front, so that a taken port fails start-up instead of a
/// background task.
pub(crate) async fn bind(address: &Address) -> Result<TcpListenerStream, StartServerError> {
    if address.as_str().is_empty() {
        return Err(StartServerError::InvalidAddress(address.to_string()));
    }

    let listener = TcpListener::bind(address.as_str()).await?;
    Ok(TcpListenerStream::new(listener))
}

/// Adapts the shutdown signal into what `tonic` expects, logging why the server stopped.
pub(crate) fn logged_shutdown(
    logger: slog::Logger,
    signal: RpcServerShutdownSignal,
) -> impl Future<Output = ()> {
    async move {
        let reason = signal.await;
        slog::info!(logger, "Shutting down RPC server: {:?}", reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_fails_when_port_is_taken() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = Address::new(taken.local_addr().unwrap().to_string());

        assert!(matches!(bind(&address).await, Err(StartServerError::Bind(_))));
    }

    #[tokio::test]
    async fn bind_rejects_empty_address() {
        assert!(matches!(
            bind(&Address::new("")).await,
            Err(StartServerError::InvalidAddress(_))
        ));
    }
}
