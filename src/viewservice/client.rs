use crate::common::{lazy_channel, Address, ChannelError, Epoch, View};
use crate::grpc::grpc_view_service_client::GrpcViewServiceClient;
use crate::grpc::{ProtoGetViewReq, ProtoPingReq, ProtoView};
use crate::viewservice::api::{PingOutput, ViewServiceError, ViewServiceTransport};
use std::time::Duration;
use tonic::transport::Channel;

/// ViewServiceClient is the gRPC client of the view service. The connection is established lazily
/// and re-established on demand, so the view service does not need to be up at construction.
#[derive(Clone)]
pub(crate) struct ViewServiceClient {
    logger: slog::Logger,
    inner: GrpcViewServiceClient<Channel>,
    rpc_timeout: Duration,
}

impl ViewServiceClient {
    pub(crate) fn new(
        logger: slog::Logger,
        view_service_address: &Address,
        rpc_timeout: Duration,
    ) -> Result<Self, ChannelError> {
        let channel = lazy_channel(view_service_address, rpc_timeout)?;

        Ok(ViewServiceClient {
            logger,
            inner: GrpcViewServiceClient::new(channel),
            rpc_timeout,
        })
    }

    fn convert_view(view: Option<ProtoView>) -> Result<View, ViewServiceError> {
        view.map(View::from)
            .ok_or_else(|| ViewServiceError::Malformed("Reply is missing the view".to_string()))
    }
}

#[async_trait::async_trait]
impl ViewServiceTransport for ViewServiceClient {
    async fn ping(&self, caller: &Address, reported_epoch: Epoch) -> Result<PingOutput, ViewServiceError> {
        let rpc_request = ProtoPingReq {
            caller_address: caller.to_string(),
            reported_epoch: reported_epoch.as_u64(),
        };
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_request);

        let mut client = self.inner.clone();
        let rpc_result = tokio::time::timeout(self.rpc_timeout, client.ping(rpc_request)).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_result);

        match rpc_result {
            Ok(Ok(rpc_reply)) => {
                let rpc_reply = rpc_reply.into_inner();
                Ok(PingOutput {
                    view: Self::convert_view(rpc_reply.view)?,
                    initialized_view: rpc_reply.initialized_view,
                })
            }
            Ok(Err(status)) => Err(ViewServiceError::Unreachable(status.to_string())),
            Err(_) => Err(ViewServiceError::Unreachable("Timed out".to_string())),
        }
    }

    async fn get(&self) -> Result<View, ViewServiceError> {
        let mut client = self.inner.clone();
        let rpc_result = tokio::time::timeout(self.rpc_timeout, client.get(ProtoGetViewReq {})).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_result);

        match rpc_result {
            Ok(Ok(rpc_reply)) => Self::convert_view(rpc_reply.into_inner().view),
            Ok(Err(status)) => Err(ViewServiceError::Unreachable(status.to_string())),
            Err(_) => Err(ViewServiceError::Unreachable("Timed out".to_string())),
        }
    }
}
