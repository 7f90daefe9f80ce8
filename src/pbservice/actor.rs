use crate::common::{Callback, Epoch, View};
use crate::pbservice::api::{
    GetAllError, GetError, GetInput, GetOutput, PutError, PutInput, PutOutput, ShutdownOutput,
};
use crate::pbservice::pb_server::{PbServer, ViewObservation};
use crate::pbservice::store::Snapshot;
use crate::server::RpcServerShutdownHandle;
use crate::timer::TickerHandle;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
enum Event {
    // Primary: dedup, forward to backup, then commit.
    // Otherwise: reject.
    Put(PutInput, Callback<Result<PutOutput, PutError>>),
    // Bootstrapped backup: dedup, then commit.
    // Otherwise: reject.
    SyncPut(PutInput, Callback<Result<PutOutput, PutError>>),
    Get(GetInput, Callback<Result<GetOutput, GetError>>),
    GetAll(Epoch, Callback<Result<Snapshot, GetAllError>>),

    // Heartbeat.
    LastKnownEpoch(Callback<Epoch>),
    // View from a ping reply, and whether that ping created the view.
    ObserveView(View, bool, Callback<ViewObservation>),
    InstallSnapshot(Epoch, Snapshot, Callback<bool>),

    Shutdown(Callback<ShutdownOutput>),
}

/// Client of the replica's event loop. All methods fail with `ActorExited` (or equivalent) once the
/// event loop is gone.
#[derive(Clone)]
pub(crate) struct PbServerActorClient {
    sender: mpsc::Sender<Event>,
}

#[derive(Debug, thiserror::Error)]
#[error("Replica's internal task has exited")]
pub(crate) struct ActorExited;

impl PbServerActorClient {
    pub(crate) fn new(buffer_size: usize) -> (Self, PbServerActorQueue) {
        let (tx, rx) = mpsc::channel(buffer_size);

        (PbServerActorClient { sender: tx }, PbServerActorQueue { receiver: rx })
    }

    pub(crate) async fn put(&self, input: PutInput) -> Result<PutOutput, PutError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Put(input, Callback(tx)))
            .await
            .map_err(|_| PutError::ActorExited)?;

        rx.await.unwrap_or(Err(PutError::ActorExited))
    }

    pub(crate) async fn sync_put(&self, input: PutInput) -> Result<PutOutput, PutError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::SyncPut(input, Callback(tx)))
            .await
            .map_err(|_| PutError::ActorExited)?;

        rx.await.unwrap_or(Err(PutError::ActorExited))
    }

    pub(crate) async fn get(&self, input: GetInput) -> Result<GetOutput, GetError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Get(input, Callback(tx)))
            .await
            .map_err(|_| GetError::ActorExited)?;

        rx.await.unwrap_or(Err(GetError::ActorExited))
    }

    pub(crate) async fn get_all(&self, epoch: Epoch) -> Result<Snapshot, GetAllError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::GetAll(epoch, Callback(tx)))
            .await
            .map_err(|_| GetAllError::ActorExited)?;

        rx.await.unwrap_or(Err(GetAllError::ActorExited))
    }

    pub(crate) async fn last_known_epoch(&self) -> Result<Epoch, ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::LastKnownEpoch(Callback(tx))).await?;

        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn observe_view(
        &self,
        view: View,
        initialized_view: bool,
    ) -> Result<ViewObservation, ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::ObserveView(view, initialized_view, Callback(tx))).await?;

        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn install_snapshot(&self, epoch: Epoch, snapshot: Snapshot) -> Result<bool, ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::InstallSnapshot(epoch, snapshot, Callback(tx))).await?;

        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn shutdown(&self) -> Result<ShutdownOutput, ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Shutdown(Callback(tx))).await?;

        rx.await.map_err(|_| ActorExited)
    }

    /// Best effort shutdown, for contexts that can't wait for the reply.
    pub(crate) fn shutdown_detached(&self) {
        let (tx, _rx) = oneshot::channel();
        let _ = self.sender.try_send(Event::Shutdown(Callback(tx)));
    }

    async fn send(&self, event: Event) -> Result<(), ActorExited> {
        self.sender.send(event).await.map_err(|_| ActorExited)
    }
}

pub(crate) struct PbServerActorQueue {
    receiver: mpsc::Receiver<Event>,
}

/// Background resources a running replica owns. Dropping them stops the listener and heartbeat.
pub(crate) struct ServingResources {
    pub(crate) server_shutdown_handle: RpcServerShutdownHandle,
    pub(crate) ticker_handle: TickerHandle,
}

/// PbServerActor gives the `PbServer` exclusive access to itself. Events are handled one at a
/// time, to completion, including the primary's forward to its backup.
pub(crate) struct PbServerActor {
    logger: slog::Logger,
    queue: PbServerActorQueue,
    pb_server: PbServer,
    resources: Option<ServingResources>,
}

impl PbServerActor {
    pub(crate) fn new(logger: slog::Logger, queue: PbServerActorQueue, pb_server: PbServer) -> Self {
        PbServerActor {
            logger,
            queue,
            pb_server,
            resources: None,
        }
    }

    pub(crate) fn set_resources(&mut self, resources: ServingResources) {
        self.resources = Some(resources);
    }

    pub(crate) async fn run_event_loop(mut self) {
        while let Some(event) = self.queue.receiver.recv().await {
            self.handle_event(event).await;
        }

        slog::info!(self.logger, "Replica event loop exited");
    }

    // Awaited inline. Nothing else runs against `pb_server` until this returns.
    async fn handle_event(&mut self, event: Event) {
        match event {
            Event::Put(input, callback) => {
                let result = self.pb_server.handle_put(input).await;
                callback.send(result);
            }
            Event::SyncPut(input, callback) => {
                callback.send(self.pb_server.handle_sync_put(input));
            }
            Event::Get(input, callback) => {
                callback.send(self.pb_server.handle_get(input));
            }
            Event::GetAll(epoch, callback) => {
                callback.send(self.pb_server.handle_get_all(epoch));
            }
            Event::LastKnownEpoch(callback) => {
                callback.send(self.pb_server.last_known_epoch());
            }
            Event::ObserveView(view, initialized_view, callback) => {
                callback.send(self.pb_server.observe_view(view, initialized_view));
            }
            Event::InstallSnapshot(epoch, snapshot, callback) => {
                callback.send(self.pb_server.install_snapshot(epoch, snapshot));
            }
            Event::Shutdown(callback) => {
                if let Some(resources) = self.resources.take() {
                    slog::info!(self.logger, "Shutting down");
                    resources.server_shutdown_handle.shutdown();
                    drop(resources.ticker_handle);
                }
                callback.send(ShutdownOutput {
                    requests_served: self.pb_server.requests_served(),
                });
            }
        }
    }
}
