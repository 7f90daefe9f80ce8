use crate::common::Address;
use std::time::Duration;
use tonic::codegen::http::uri;
use tonic::transport::{Channel, Endpoint};

#[derive(Debug, thiserror::Error)]
pub(crate) enum ChannelError {
    #[error("Invalid URI")]
    InvalidUri(#[from] uri::InvalidUri),
    #[error("Transport failure")]
    Transport(#[from] tonic::transport::Error),
}

/// Channel to `address` that connects on first use, and reconnects after failures.
pub(crate) fn lazy_channel(address: &Address, rpc_timeout: Duration) -> Result<Channel, ChannelError> {
    let endpoint = Endpoint::from_shared(format!("http://{}", address))?.timeout(rpc_timeout);

    Ok(endpoint.connect_lazy()?)
}
