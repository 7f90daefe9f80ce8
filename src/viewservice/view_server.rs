use crate::common::{Address, Epoch, View};
use crate::viewservice::api::{PingInput, PingOutput};
use crate::viewservice::server_table::{Registration, ServerTable};

/// ViewServer is the view service's state machine: it owns the current view, tracks liveness of
/// every server that has pinged it, and decides view changes. It does no IO and knows nothing
/// about time, other than being told when a ping interval has elapsed via `tick()`.
pub(crate) struct ViewServer {
    logger: slog::Logger,
    view: View,
    // Highest epoch the current primary has confirmed by pinging with it.
    acknowledged_epoch: Epoch,
    servers: ServerTable,
    dead_pings: u32,
}

impl ViewServer {
    pub(crate) fn new(logger: slog::Logger, dead_pings: u32) -> Self {
        ViewServer {
            logger,
            view: View::uninitialized(),
            acknowledged_epoch: Epoch::ZERO,
            servers: ServerTable::new(),
            dead_pings,
        }
    }

    pub(crate) fn handle_ping(&mut self, input: PingInput) -> PingOutput {
        let PingInput { caller, reported_epoch } = input;

        // The very first server to ever ping becomes primary of view 1. The reply it is about to
        // receive is its acknowledgment of that view.
        let initializing = self.view.epoch.is_zero();
        if initializing {
            self.view.primary = Some(caller.clone());
            self.view.epoch.incr();
            self.acknowledged_epoch = self.view.epoch;
            slog::info!(self.logger, "First ping from {:?}. Initialized view: {:?}", caller, self.view);
        }

        if reported_epoch.is_zero() {
            let holds_slot = !initializing && self.holds_slot(&caller);
            match self.servers.register(caller.clone(), self.view.epoch, holds_slot) {
                Registration::New => slog::info!(self.logger, "Registered {:?}", caller),
                Registration::Refreshed => slog::debug!(
                    self.logger,
                    "Refreshed registration of {:?}, known since epoch {:?}",
                    caller,
                    self.servers.get(&caller).map(|record| record.first_seen_epoch())
                ),
                Registration::Restarted => slog::warn!(
                    self.logger,
                    "{:?} restarted while holding a slot in view {:?}. It will be evicted from its slot.",
                    caller,
                    self.view
                ),
            }
        } else {
            if !self.servers.heartbeat(&caller) {
                // Declared dead earlier (e.g. partitioned) but still running. It rejoins as a
                // brand new candidate.
                slog::info!(
                    self.logger,
                    "Unknown server {:?} pinged with epoch {:?}. Re-registering.",
                    caller,
                    reported_epoch
                );
                self.servers.register(caller.clone(), self.view.epoch, false);
            }

            if self.view.is_primary(&caller) && reported_epoch == self.view.epoch {
                if self.acknowledged_epoch != reported_epoch {
                    slog::info!(self.logger, "Primary {:?} acknowledged view {:?}", caller, reported_epoch);
                }
                self.acknowledged_epoch = reported_epoch;
            }
        }

        PingOutput {
            view: self.view.clone(),
            initialized_view: initializing,
        }
    }

    pub(crate) fn handle_get(&self) -> View {
        self.view.clone()
    }

    /// `tick()` is called once per ping interval. It advances failure detection, and then changes
    /// the view if a slot needs (re)filling. The epoch advances by at most 1 per call.
    pub(crate) fn tick(&mut self) {
        if self.view.epoch.is_zero() {
            return;
        }

        for dead in self.servers.sweep(self.dead_pings) {
            slog::info!(self.logger, "Server {:?} missed {} pings. Declared dead.", dead, self.dead_pings);
        }

        let mut next_view = self.view.clone();

        if let Some(primary) = self.view.primary.clone() {
            if self.servers.must_evict(&primary) {
                if self.is_current_view_acknowledged() {
                    // The backup leaves its slot too, and is the one (and only) promotion
                    // candidate. If it's gone as well, nobody holds the data anymore and the
                    // primary slot stays empty.
                    next_view.primary = None;
                    if let Some(backup) = next_view.backup.take() {
                        if !self.servers.must_evict(&backup) {
                            next_view.primary = Some(backup);
                        }
                    }
                    self.servers.clear_restarted(&primary);
                } else {
                    slog::warn!(
                        self.logger,
                        "Primary {:?} failed but has not acknowledged view {:?}. Can't change view.",
                        primary,
                        self.view.epoch
                    );
                }
            }
        }

        if let Some(backup) = next_view.backup.clone() {
            if self.servers.must_evict(&backup) {
                next_view.backup = None;
                self.servers.clear_restarted(&backup);
            }
        }

        if next_view.primary.is_some() && next_view.backup.is_none() && self.is_current_view_acknowledged() {
            let candidate = self
                .servers
                .first_eligible(|candidate| !next_view.is_primary(candidate))
                .cloned();
            next_view.backup = candidate;
        }

        if next_view.primary != self.view.primary || next_view.backup != self.view.backup {
            next_view.epoch.incr();
            slog::info!(self.logger, "View change: {:?} -> {:?}", self.view, next_view);
            self.view = next_view;
        }
    }

    fn holds_slot(&self, address: &Address) -> bool {
        self.view.is_primary(address) || self.view.is_backup(address)
    }

    // The primary slot may only be replaced once the current primary has seen the current view.
    fn is_current_view_acknowledged(&self) -> bool {
        self.acknowledged_epoch == self.view.epoch || self.view.primary.is_none()
    }
}
