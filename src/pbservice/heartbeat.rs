use crate::common::Address;
use crate::pbservice::actor::PbServerActorClient;
use crate::pbservice::api::PeerTransport;
use crate::pbservice::pb_server::ViewObservation;
use crate::timer::{TickHandler, TickOutcome};
use crate::viewservice::ViewServiceTransport;
use std::sync::Arc;

/// Heartbeat is the replica's recurring task: ping the view service, hand the reply to the replica,
/// and fetch the bootstrap snapshot if the replica became a backup.
///
/// Runs outside the replica's event loop, so that the event loop never waits on another replica.
pub(crate) struct Heartbeat {
    logger: slog::Logger,
    me: Address,
    replica: PbServerActorClient,
    view_service: Arc<dyn ViewServiceTransport>,
    peers: Arc<dyn PeerTransport>,
}

impl Heartbeat {
    pub(crate) fn new(
        logger: slog::Logger,
        me: Address,
        replica: PbServerActorClient,
        view_service: Arc<dyn ViewServiceTransport>,
        peers: Arc<dyn PeerTransport>,
    ) -> Self {
        Heartbeat {
            logger,
            me,
            replica,
            view_service,
            peers,
        }
    }
}

#[async_trait::async_trait]
impl TickHandler for Heartbeat {
    async fn on_tick(&mut self) -> TickOutcome {
        let epoch = match self.replica.last_known_epoch().await {
            Ok(epoch) => epoch,
            Err(_) => return TickOutcome::Stop,
        };

        let output = match self.view_service.ping(&self.me, epoch).await {
            Ok(output) => output,
            Err(e) => {
                slog::warn!(self.logger, "Ping to view service failed: {}", e);
                return TickOutcome::Continue;
            }
        };

        let observation = self
            .replica
            .observe_view(output.view, output.initialized_view)
            .await;
        let (primary, bootstrap_epoch) = match observation {
            Ok(ViewObservation::UpToDate) => return TickOutcome::Continue,
            Ok(ViewObservation::BootstrapNeeded { primary, epoch }) => (primary, epoch),
            Err(_) => return TickOutcome::Stop,
        };

        // A failure here is retried on the next tick, unless the view moves on first.
        match self.peers.get_all(&primary, bootstrap_epoch).await {
            Ok(snapshot) => match self.replica.install_snapshot(bootstrap_epoch, snapshot).await {
                Ok(_) => TickOutcome::Continue,
                Err(_) => TickOutcome::Stop,
            },
            Err(e) => {
                slog::warn!(
                    self.logger,
                    "Bootstrap from {:?} for {:?} failed: {}",
                    primary,
                    bootstrap_epoch,
                    e
                );
                TickOutcome::Continue
            }
        }
    }
}
