use crate::common::{Address, View};
use crate::server;
use crate::server::{RpcServerShutdownHandle, StartServerError};
use crate::timer::TickerHandle;
use crate::viewservice::actor::{ViewServiceActor, ViewServiceActorClient};
use crate::viewservice::api::ViewServiceError;
use crate::viewservice::options::ViewServiceOptionsValidated;
use crate::viewservice::rpc_server::RpcServer;
use crate::viewservice::view_server::ViewServer;
use crate::viewservice::ViewServiceOptions;
use std::convert::TryFrom;

pub struct ViewServiceConfig {
    pub address: Address,
    pub logger: slog::Logger,
    pub options: ViewServiceOptions,
}

/// ViewServiceHandle owns a running view service. Dropping it (or calling `kill()`) stops the
/// listener and the failure detector.
pub struct ViewServiceHandle {
    logger: slog::Logger,
    address: Address,
    actor_client: ViewServiceActorClient,
    _server_shutdown_handle: RpcServerShutdownHandle,
    _ticker_handle: TickerHandle,
}

impl ViewServiceHandle {
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Current view, read in-process without going over the network.
    pub async fn view(&self) -> Result<View, ViewServiceError> {
        self.actor_client.get().await
    }

    pub fn kill(self) {
        slog::info!(self.logger, "Killing view service");
    }
}

pub async fn start_view_service(config: ViewServiceConfig) -> Result<ViewServiceHandle, StartServerError> {
    let logger = config
        .logger
        .new(slog::o!("ViewService" => config.address.to_string()));

    let options = ViewServiceOptionsValidated::try_from(config.options)
        .map_err(|e| StartServerError::IllegalOptions(e.to_string()))?;

    let listener = server::bind(&config.address).await?;

    let (actor_client, actor_queue) = ViewServiceActorClient::new(64);
    let view_server = ViewServer::new(logger.clone(), options.dead_pings);
    let actor = ViewServiceActor::new(logger.clone(), actor_queue, view_server);
    tokio::spawn(actor.run_event_loop());

    let (server_shutdown_handle, server_shutdown_signal) = server::shutdown_signal();
    let rpc_server = RpcServer::new(logger.clone(), actor_client.clone());
    tokio::spawn(rpc_server.run(listener, server_shutdown_signal));

    let ticker_handle = TickerHandle::spawn_ticker_task(options.ping_interval, actor_client.clone());

    slog::info!(logger, "Started view service with {:?}", options);

    Ok(ViewServiceHandle {
        logger,
        address: config.address,
        actor_client,
        _server_shutdown_handle: server_shutdown_handle,
        _ticker_handle: ticker_handle,
    })
}
