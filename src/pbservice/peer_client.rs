use crate::common::{lazy_channel, Address, ChannelError, Epoch};
use crate::grpc::grpc_pb_service_client::GrpcPbServiceClient;
use crate::grpc::{
    proto_get_result, proto_pb_error, proto_put_result, ProtoGetReq, ProtoGetResult, ProtoPbError, ProtoPutReq,
    ProtoPutResult, ProtoShutdownReq,
};
use crate::pbservice::api::{GetInput, GetOutput, PbCallError, PeerTransport, PrimaryTransport, PutInput, PutOutput};
use crate::pbservice::store::Snapshot;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tonic::transport::Channel;
use tonic::{Response, Status};

/// PbClient is the gRPC client of one replica.
#[derive(Clone)]
pub(crate) struct PbClient {
    logger: slog::Logger,
    inner: GrpcPbServiceClient<Channel>,
    rpc_timeout: Duration,
}

impl PbClient {
    pub(crate) fn new(logger: slog::Logger, address: &Address, rpc_timeout: Duration) -> Result<Self, ChannelError> {
        let channel = lazy_channel(address, rpc_timeout)?;

        Ok(PbClient {
            logger,
            inner: GrpcPbServiceClient::new(channel),
            rpc_timeout,
        })
    }

    pub(crate) async fn put(&self, input: PutInput) -> Result<PutOutput, PbCallError> {
        let rpc_request = Self::convert_put_input(input);
        slog::debug!(self.logger, "ClientWire - Put {:?}", rpc_request);

        let mut client = self.inner.clone();
        let rpc_reply = self.call(client.put(rpc_request)).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_reply);

        Self::convert_put_result(rpc_reply?)
    }

    pub(crate) async fn sync_put(&self, input: PutInput) -> Result<PutOutput, PbCallError> {
        let rpc_request = Self::convert_put_input(input);
        slog::debug!(self.logger, "ClientWire - SyncPut {:?}", rpc_request);

        let mut client = self.inner.clone();
        let rpc_reply = self.call(client.sync_put(rpc_request)).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_reply);

        Self::convert_put_result(rpc_reply?)
    }

    pub(crate) async fn get(&self, input: GetInput) -> Result<GetOutput, PbCallError> {
        let rpc_request = ProtoGetReq {
            key: input.key,
            get_all: false,
            epoch: 0,
        };
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_request);

        let mut client = self.inner.clone();
        let rpc_reply = self.call(client.get(rpc_request)).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_reply);

        let success = Self::convert_get_result(rpc_reply?)?;
        Ok(GetOutput { value: success.value })
    }

    pub(crate) async fn get_all(&self, epoch: Epoch) -> Result<Snapshot, PbCallError> {
        let rpc_request = ProtoGetReq {
            key: String::new(),
            get_all: true,
            epoch: epoch.as_u64(),
        };
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_request);

        let mut client = self.inner.clone();
        let rpc_reply = self.call(client.get(rpc_request)).await;
        // Snapshots can be big, don't log the payload.
        slog::debug!(self.logger, "ClientWire - GetAll reply ok={}", rpc_reply.is_ok());

        let success = Self::convert_get_result(rpc_reply?)?;
        success
            .snapshot
            .map(Snapshot::from)
            .ok_or_else(|| PbCallError::ServerFault("Reply is missing the snapshot".to_string()))
    }

    pub(crate) async fn shutdown(&self) -> Result<u64, PbCallError> {
        let mut client = self.inner.clone();
        let rpc_reply = self.call(client.shutdown(ProtoShutdownReq {})).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_reply);

        Ok(rpc_reply?.requests_served)
    }

    async fn call<T, F>(&self, rpc: F) -> Result<T, PbCallError>
    where
        F: Future<Output = Result<Response<T>, Status>>,
    {
        match tokio::time::timeout(self.rpc_timeout, rpc).await {
            Ok(Ok(rpc_reply)) => Ok(rpc_reply.into_inner()),
            Ok(Err(status)) => Err(PbCallError::Unreachable(status.to_string())),
            Err(_) => Err(PbCallError::Unreachable("Timed out".to_string())),
        }
    }

    fn convert_put_input(input: PutInput) -> ProtoPutReq {
        ProtoPutReq {
            client_id: input.client_id.as_u64(),
            token: input.token.as_u64(),
            key: input.key,
            value: input.value,
            combine_with_hash: input.combine_with_hash,
        }
    }

    fn convert_put_result(rpc_reply: ProtoPutResult) -> Result<PutOutput, PbCallError> {
        match rpc_reply.result {
            Some(proto_put_result::Result::Ok(ok)) => Ok(PutOutput {
                previous_value: ok.previous_value,
            }),
            Some(proto_put_result::Result::Err(err)) => Err(Self::convert_error(err)),
            None => Err(PbCallError::ServerFault("Reply is missing the result".to_string())),
        }
    }

    fn convert_get_result(rpc_reply: ProtoGetResult) -> Result<crate::grpc::ProtoGetSuccess, PbCallError> {
        match rpc_reply.result {
            Some(proto_get_result::Result::Ok(ok)) => Ok(ok),
            Some(proto_get_result::Result::Err(err)) => Err(Self::convert_error(err)),
            None => Err(PbCallError::ServerFault("Reply is missing the result".to_string())),
        }
    }

    fn convert_error(rpc_error: ProtoPbError) -> PbCallError {
        match rpc_error.err {
            Some(proto_pb_error::Err::WrongServer(_)) => PbCallError::WrongServer,
            Some(proto_pb_error::Err::NoKey(_)) => PbCallError::NoKey,
            Some(proto_pb_error::Err::SyncFailure(_)) => PbCallError::SyncFailure,
            Some(proto_pb_error::Err::ServerFault(fault)) => PbCallError::ServerFault(fault.message),
            None => PbCallError::ServerFault("Error is missing its kind".to_string()),
        }
    }
}

/// PbClients lazily creates and caches one client per replica address.
pub(crate) struct PbClients {
    logger: slog::Logger,
    rpc_timeout: Duration,
    clients: Mutex<HashMap<Address, PbClient>>,
}

impl PbClients {
    pub(crate) fn new(logger: slog::Logger, rpc_timeout: Duration) -> Self {
        PbClients {
            logger,
            rpc_timeout,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) async fn client(&self, address: &Address) -> Result<PbClient, PbCallError> {
        let mut clients = self.clients.lock().await;
        if let Some(client) = clients.get(address) {
            return Ok(client.clone());
        }

        let logger = self.logger.new(slog::o!("Peer" => address.to_string()));
        let client = PbClient::new(logger, address, self.rpc_timeout)
            .map_err(|e| PbCallError::Unreachable(format!("Bad address {:?}: {}", address, e)))?;
        clients.insert(address.clone(), client.clone());

        Ok(client)
    }
}

#[async_trait::async_trait]
impl PeerTransport for PbClients {
    async fn sync_put(&self, backup: &Address, input: PutInput) -> Result<PutOutput, PbCallError> {
        self.client(backup).await?.sync_put(input).await
    }

    async fn get_all(&self, primary: &Address, epoch: Epoch) -> Result<Snapshot, PbCallError> {
        self.client(primary).await?.get_all(epoch).await
    }
}

#[async_trait::async_trait]
impl PrimaryTransport for PbClients {
    async fn put(&self, primary: &Address, input: PutInput) -> Result<PutOutput, PbCallError> {
        self.client(primary).await?.put(input).await
    }

    async fn get(&self, primary: &Address, input: GetInput) -> Result<GetOutput, PbCallError> {
        self.client(primary).await?.get(input).await
    }
}
