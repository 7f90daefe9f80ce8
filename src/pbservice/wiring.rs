use crate::common::{Address, RPC_TIMEOUT};
use crate::pbservice::actor::{PbServerActor, PbServerActorClient, ServingResources};
use crate::pbservice::api::PbCallError;
use crate::pbservice::heartbeat::Heartbeat;
use crate::pbservice::options::PbServerOptionsValidated;
use crate::pbservice::pb_server::PbServer;
use crate::pbservice::peer_client::{PbClient, PbClients};
use crate::pbservice::rpc_server::RpcServer;
use crate::pbservice::PbServerOptions;
use crate::server;
use crate::server::StartServerError;
use crate::timer::TickerHandle;
use crate::viewservice::ViewServiceClient;
use std::convert::TryFrom;
use std::sync::Arc;

pub struct PbServerConfig {
    pub address: Address,
    pub view_service_address: Address,
    pub logger: slog::Logger,
    pub options: PbServerOptions,
}

/// PbServerHandle owns a running replica. `kill()` (or dropping the handle) stops its listener and
/// heartbeat, as if the process had died.
pub struct PbServerHandle {
    logger: slog::Logger,
    address: Address,
    actor_client: PbServerActorClient,
}

impl PbServerHandle {
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Stops the replica. Returns how many client requests it served.
    pub async fn kill(self) -> Result<u64, PbCallError> {
        slog::info!(self.logger, "Killing replica");
        let output = self
            .actor_client
            .shutdown()
            .await
            .map_err(|e| PbCallError::ServerFault(e.to_string()))?;

        Ok(output.requests_served)
    }
}

impl Drop for PbServerHandle {
    fn drop(&mut self) {
        self.actor_client.shutdown_detached();
    }
}

pub async fn start_pb_server(config: PbServerConfig) -> Result<PbServerHandle, StartServerError> {
    let PbServerConfig {
        address,
        view_service_address,
        logger,
        options,
    } = config;
    let logger = logger.new(slog::o!("Server" => address.to_string()));

    let options = PbServerOptionsValidated::try_from(options)
        .map_err(|e| StartServerError::IllegalOptions(e.to_string()))?;

    let view_service = ViewServiceClient::new(logger.clone(), &view_service_address, options.rpc_timeout)
        .map_err(|_| StartServerError::InvalidAddress(view_service_address.to_string()))?;
    let peers = Arc::new(PbClients::new(logger.clone(), options.rpc_timeout));

    let listener = server::bind(&address).await?;

    let (actor_client, actor_queue) = PbServerActorClient::new(64);
    let pb_server = PbServer::new(logger.clone(), address.clone(), peers.clone());
    let mut actor = PbServerActor::new(logger.clone(), actor_queue, pb_server);

    let (server_shutdown_handle, server_shutdown_signal) = server::shutdown_signal();
    let rpc_server = RpcServer::new(logger.clone(), actor_client.clone());
    tokio::spawn(rpc_server.run(listener, server_shutdown_signal));

    let heartbeat = Heartbeat::new(
        logger.clone(),
        address.clone(),
        actor_client.clone(),
        Arc::new(view_service),
        peers,
    );
    let ticker_handle = TickerHandle::spawn_ticker_task(options.ping_interval, heartbeat);

    actor.set_resources(ServingResources {
        server_shutdown_handle,
        ticker_handle,
    });
    tokio::spawn(actor.run_event_loop());

    slog::info!(logger, "Started replica with {:?}", options);

    Ok(PbServerHandle {
        logger,
        address,
        actor_client,
    })
}

/// Asks the replica at `address` to shut down, over the network. Returns how many client requests
/// it served.
pub async fn shutdown_remote_replica(logger: slog::Logger, address: &Address) -> Result<u64, PbCallError> {
    let client =
        PbClient::new(logger, address, RPC_TIMEOUT).map_err(|e| PbCallError::Unreachable(e.to_string()))?;

    client.shutdown().await
}
