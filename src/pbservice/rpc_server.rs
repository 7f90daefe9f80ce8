use crate::common::{ClientId, Epoch, Token};
use crate::grpc::grpc_pb_service_server::{GrpcPbService, GrpcPbServiceServer};
use crate::grpc::{
    proto_get_result, proto_pb_error, proto_put_result, ProtoGetReq, ProtoGetResult, ProtoGetSuccess, ProtoNoKey,
    ProtoPbError, ProtoPutReq, ProtoPutResult, ProtoPutSuccess, ProtoServerFault, ProtoShutdownReply,
    ProtoShutdownReq, ProtoSyncFailure, ProtoWrongServer,
};
use crate::pbservice::actor::PbServerActorClient;
use crate::pbservice::api::{GetAllError, GetError, GetInput, GetOutput, PutError, PutInput, PutOutput};
use crate::pbservice::store::Snapshot;
use crate::server;
use crate::server::RpcServerShutdownSignal;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// RpcServer is the type that implements the replica's gRPC interface.
pub(crate) struct RpcServer {
    logger: slog::Logger,
    replica: PbServerActorClient,
}

impl RpcServer {
    pub(crate) fn new(logger: slog::Logger, replica: PbServerActorClient) -> Self {
        RpcServer { logger, replica }
    }

    pub(crate) async fn run(self, listener: TcpListenerStream, shutdown_signal: RpcServerShutdownSignal) {
        let logger = self.logger.clone();
        slog::info!(logger, "Replica listening");

        let result = Server::builder()
            .add_service(GrpcPbServiceServer::new(self))
            .serve_with_incoming_shutdown(listener, server::logged_shutdown(logger.clone(), shutdown_signal))
            .await;

        slog::info!(logger, "Server run() has exited: {:?}", result);
    }

    fn convert_put_input(rpc_request: ProtoPutReq) -> PutInput {
        PutInput {
            client_id: ClientId::new(rpc_request.client_id),
            token: Token::new(rpc_request.token),
            key: rpc_request.key,
            value: rpc_request.value,
            combine_with_hash: rpc_request.combine_with_hash,
        }
    }

    fn convert_put_result(app_result: Result<PutOutput, PutError>) -> ProtoPutResult {
        let result = match app_result {
            Ok(output) => proto_put_result::Result::Ok(ProtoPutSuccess {
                previous_value: output.previous_value,
            }),
            Err(PutError::WrongServer(_)) => proto_put_result::Result::Err(wrong_server()),
            Err(PutError::SyncFailure) => proto_put_result::Result::Err(ProtoPbError {
                err: Some(proto_pb_error::Err::SyncFailure(ProtoSyncFailure {
                    message: "Failed to replicate write to backup".to_string(),
                })),
            }),
            Err(e @ PutError::ActorExited) => proto_put_result::Result::Err(server_fault(e.to_string())),
        };

        ProtoPutResult { result: Some(result) }
    }

    async fn handle_get(&self, rpc_request: ProtoGetReq) -> ProtoGetResult {
        let result = if rpc_request.get_all {
            let app_result = self.replica.get_all(Epoch::new(rpc_request.epoch)).await;
            Self::convert_get_all_result(app_result)
        } else {
            let app_result = self.replica.get(GetInput { key: rpc_request.key }).await;
            Self::convert_get_result(app_result)
        };

        ProtoGetResult { result: Some(result) }
    }

    fn convert_get_result(app_result: Result<GetOutput, GetError>) -> proto_get_result::Result {
        match app_result {
            Ok(output) => proto_get_result::Result::Ok(ProtoGetSuccess {
                value: output.value,
                snapshot: None,
            }),
            Err(GetError::WrongServer) => proto_get_result::Result::Err(wrong_server()),
            Err(GetError::NoKey) => proto_get_result::Result::Err(ProtoPbError {
                err: Some(proto_pb_error::Err::NoKey(ProtoNoKey {
                    // Empty
                })),
            }),
            Err(e @ GetError::ActorExited) => proto_get_result::Result::Err(server_fault(e.to_string())),
        }
    }

    fn convert_get_all_result(app_result: Result<Snapshot, GetAllError>) -> proto_get_result::Result {
        match app_result {
            Ok(snapshot) => proto_get_result::Result::Ok(ProtoGetSuccess {
                value: String::new(),
                snapshot: Some(snapshot.into()),
            }),
            Err(GetAllError::WrongServer) => proto_get_result::Result::Err(wrong_server()),
            Err(e @ GetAllError::ActorExited) => proto_get_result::Result::Err(server_fault(e.to_string())),
        }
    }
}

fn wrong_server() -> ProtoPbError {
    ProtoPbError {
        err: Some(proto_pb_error::Err::WrongServer(ProtoWrongServer {
            // Empty
        })),
    }
}

fn server_fault(message: String) -> ProtoPbError {
    ProtoPbError {
        err: Some(proto_pb_error::Err::ServerFault(ProtoServerFault { message })),
    }
}

#[async_trait::async_trait]
impl GrpcPbService for RpcServer {
    async fn put(&self, rpc_request_wrapped: Request<ProtoPutReq>) -> Result<Response<ProtoPutResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - Put {:?}", rpc_request);

        let app_result = self.replica.put(Self::convert_put_input(rpc_request)).await;
        let rpc_reply = Self::convert_put_result(app_result);
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);

        Ok(Response::new(rpc_reply))
    }

    async fn sync_put(&self, rpc_request_wrapped: Request<ProtoPutReq>) -> Result<Response<ProtoPutResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - SyncPut {:?}", rpc_request);

        let app_result = self.replica.sync_put(Self::convert_put_input(rpc_request)).await;
        let rpc_reply = Self::convert_put_result(app_result);
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);

        Ok(Response::new(rpc_reply))
    }

    async fn get(&self, rpc_request_wrapped: Request<ProtoGetReq>) -> Result<Response<ProtoGetResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let rpc_reply = self.handle_get(rpc_request).await;
        if let Some(proto_get_result::Result::Ok(ProtoGetSuccess { snapshot: Some(_), .. })) = &rpc_reply.result {
            slog::debug!(self.logger, "ServerWire - GetAll snapshot");
        } else {
            slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        }

        Ok(Response::new(rpc_reply))
    }

    async fn shutdown(
        &self,
        _rpc_request_wrapped: Request<ProtoShutdownReq>,
    ) -> Result<Response<ProtoShutdownReply>, Status> {
        slog::debug!(self.logger, "ServerWire - Shutdown");

        let output = self
            .replica
            .shutdown()
            .await
            .map_err(|e| Status::unavailable(e.to_string()))?;

        Ok(Response::new(ProtoShutdownReply {
            requests_served: output.requests_served,
        }))
    }
}
