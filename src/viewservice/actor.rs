use crate::common::{Callback, View};
use crate::timer::{TickHandler, TickOutcome};
use crate::viewservice::api::{PingInput, PingOutput, ViewServiceError};
use crate::viewservice::view_server::ViewServer;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
enum Event {
    Ping(PingInput, Callback<PingOutput>),
    Get(Callback<View>),
    Tick,
}

#[derive(Clone)]
pub(crate) struct ViewServiceActorClient {
    sender: mpsc::Sender<Event>,
}

impl ViewServiceActorClient {
    pub(crate) fn new(buffer_size: usize) -> (Self, ViewServiceActorQueue) {
        let (tx, rx) = mpsc::channel(buffer_size);

        (ViewServiceActorClient { sender: tx }, ViewServiceActorQueue { receiver: rx })
    }

    pub(crate) async fn ping(&self, input: PingInput) -> Result<PingOutput, ViewServiceError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Ping(input, Callback(tx))).await?;

        rx.await.map_err(|_| ViewServiceError::ActorExited)
    }

    pub(crate) async fn get(&self) -> Result<View, ViewServiceError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Get(Callback(tx))).await?;

        rx.await.map_err(|_| ViewServiceError::ActorExited)
    }

    pub(crate) async fn tick(&self) -> Result<(), ViewServiceError> {
        self.send(Event::Tick).await
    }

    async fn send(&self, event: Event) -> Result<(), ViewServiceError> {
        self.sender.send(event).await.map_err(|_| ViewServiceError::ActorExited)
    }
}

#[async_trait::async_trait]
impl TickHandler for ViewServiceActorClient {
    async fn on_tick(&mut self) -> TickOutcome {
        match self.tick().await {
            Ok(()) => TickOutcome::Continue,
            Err(_) => TickOutcome::Stop,
        }
    }
}

pub(crate) struct ViewServiceActorQueue {
    receiver: mpsc::Receiver<Event>,
}

/// ViewServiceActor gives the `ViewServer` exclusive access to itself: pings, gets, and ticks are
/// handled one at a time, in arrival order.
pub(crate) struct ViewServiceActor {
    logger: slog::Logger,
    queue: ViewServiceActorQueue,
    view_server: ViewServer,
}

impl ViewServiceActor {
    pub(crate) fn new(logger: slog::Logger, queue: ViewServiceActorQueue, view_server: ViewServer) -> Self {
        ViewServiceActor {
            logger,
            queue,
            view_server,
        }
    }

    pub(crate) async fn run_event_loop(mut self) {
        while let Some(event) = self.queue.receiver.recv().await {
            self.handle_event(event);
        }

        slog::info!(self.logger, "View service event loop exited");
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Ping(input, callback) => {
                let output = self.view_server.handle_ping(input);
                callback.send(output);
            }
            Event::Get(callback) => {
                callback.send(self.view_server.handle_get());
            }
            Event::Tick => {
                self.view_server.tick();
            }
        }
    }
}
