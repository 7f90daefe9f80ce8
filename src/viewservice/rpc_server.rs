use crate::common::{Address, Epoch};
use crate::grpc::grpc_view_service_server::{GrpcViewService, GrpcViewServiceServer};
use crate::grpc::{ProtoGetViewReply, ProtoGetViewReq, ProtoPingReply, ProtoPingReq};
use crate::server;
use crate::server::RpcServerShutdownSignal;
use crate::viewservice::actor::ViewServiceActorClient;
use crate::viewservice::api::{PingInput, ViewServiceError};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// RpcServer is the type that implements the view service's gRPC interface.
pub(crate) struct RpcServer {
    logger: slog::Logger,
    view_service: ViewServiceActorClient,
}

impl RpcServer {
    pub(crate) fn new(logger: slog::Logger, view_service: ViewServiceActorClient) -> Self {
        RpcServer { logger, view_service }
    }

    pub(crate) async fn run(self, listener: TcpListenerStream, shutdown_signal: RpcServerShutdownSignal) {
        let logger = self.logger.clone();
        slog::info!(logger, "View service listening");

        let result = Server::builder()
            .add_service(GrpcViewServiceServer::new(self))
            .serve_with_incoming_shutdown(listener, server::logged_shutdown(logger.clone(), shutdown_signal))
            .await;

        slog::info!(logger, "Server run() has exited: {:?}", result);
    }

    async fn handle_ping(&self, rpc_request: ProtoPingReq) -> Result<ProtoPingReply, Status> {
        let app_input = Self::convert_ping_input(rpc_request)?;
        let app_output = self.view_service.ping(app_input).await.map_err(Self::convert_error)?;

        Ok(ProtoPingReply {
            view: Some(app_output.view.into()),
            initialized_view: app_output.initialized_view,
        })
    }

    fn convert_ping_input(rpc_request: ProtoPingReq) -> Result<PingInput, Status> {
        if rpc_request.caller_address.is_empty() {
            return Err(Status::invalid_argument("Missing caller address"));
        }

        Ok(PingInput {
            caller: Address::new(rpc_request.caller_address),
            reported_epoch: Epoch::new(rpc_request.reported_epoch),
        })
    }

    async fn handle_get(&self) -> Result<ProtoGetViewReply, Status> {
        let view = self.view_service.get().await.map_err(Self::convert_error)?;

        Ok(ProtoGetViewReply { view: Some(view.into()) })
    }

    fn convert_error(error: ViewServiceError) -> Status {
        Status::unavailable(error.to_string())
    }
}

#[async_trait::async_trait]
impl GrpcViewService for RpcServer {
    async fn ping(&self, rpc_request_wrapped: Request<ProtoPingReq>) -> Result<Response<ProtoPingReply>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_ping(rpc_request).await;
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn get(
        &self,
        rpc_request_wrapped: Request<ProtoGetViewReq>,
    ) -> Result<Response<ProtoGetViewReply>, Status> {
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request_wrapped.get_ref());
        let rpc_result = self.handle_get().await;
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }
}
