use crate::common::{Address, Epoch, View};
use crate::pbservice::api::{
    GetAllError, GetError, GetInput, GetOutput, PeerTransport, PutError, PutInput, PutOutput,
};
use crate::pbservice::role::Role;
use crate::pbservice::store::{PreparedPut, ReplicatedState, Snapshot};
use std::sync::Arc;

/// What the heartbeat must do after handing the server a fresh view.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum ViewObservation {
    UpToDate,
    BootstrapNeeded { primary: Address, epoch: Epoch },
}

/// PbServer is the replica's request handling logic. It performs no IO of its own besides the
/// primary's synchronous forward to the backup.
pub(crate) struct PbServer {
    logger: slog::Logger,
    me: Address,
    view: View,
    role: Role,
    state: ReplicatedState,
    // Epoch whose primary's snapshot has been installed. Backup serves SyncPut only when this is
    // the current epoch.
    bootstrapped_for: Option<Epoch>,
    // Whether `state` is a complete copy of the replicated state as of `view`.
    in_sync: bool,
    peers: Arc<dyn PeerTransport>,
    requests_served: u64,
}

impl PbServer {
    pub(crate) fn new(logger: slog::Logger, me: Address, peers: Arc<dyn PeerTransport>) -> Self {
        PbServer {
            logger,
            me,
            view: View::uninitialized(),
            role: Role::Unknown,
            state: ReplicatedState::new(),
            bootstrapped_for: None,
            in_sync: false,
            peers,
            requests_served: 0,
        }
    }

    pub(crate) async fn handle_put(&mut self, input: PutInput) -> Result<PutOutput, PutError> {
        if self.role != Role::Primary {
            return Err(PutError::WrongServer("primary"));
        }
        self.requests_served += 1;

        let write = match self.state.prepare(&input) {
            PreparedPut::Duplicate { previous_value } => {
                slog::debug!(
                    self.logger,
                    "Duplicate put from {:?} with {:?}",
                    input.client_id,
                    input.token
                );
                return Ok(PutOutput { previous_value });
            }
            PreparedPut::Fresh(write) => write,
        };

        if let Some(backup) = self.view.backup.clone() {
            match self.peers.sync_put(&backup, input).await {
                Ok(backup_output) => {
                    if backup_output.previous_value != write.previous_value {
                        slog::error!(
                            self.logger,
                            "Backup {:?} diverged: it had previous value {:?}, we had {:?}",
                            backup,
                            backup_output.previous_value,
                            write.previous_value
                        );
                    }
                }
                Err(e) => {
                    slog::warn!(self.logger, "Forward to backup {:?} failed: {:?}", backup, e);
                    return Err(PutError::SyncFailure);
                }
            }
        }

        let previous_value = self.state.commit(write);
        Ok(PutOutput { previous_value })
    }

    pub(crate) fn handle_sync_put(&mut self, input: PutInput) -> Result<PutOutput, PutError> {
        if self.role != Role::Backup {
            return Err(PutError::WrongServer("backup"));
        }
        if self.bootstrapped_for != Some(self.view.epoch) {
            slog::info!(self.logger, "Rejecting forwarded put, bootstrap for {:?} is incomplete", self.view.epoch);
            return Err(PutError::WrongServer("bootstrapped backup"));
        }

        let previous_value = match self.state.prepare(&input) {
            PreparedPut::Duplicate { previous_value } => previous_value,
            PreparedPut::Fresh(write) => self.state.commit(write),
        };

        Ok(PutOutput { previous_value })
    }

    pub(crate) fn handle_get(&mut self, input: GetInput) -> Result<GetOutput, GetError> {
        if self.role != Role::Primary {
            return Err(GetError::WrongServer);
        }
        self.requests_served += 1;

        match self.state.get(&input.key) {
            Some(value) => Ok(GetOutput { value: value.clone() }),
            None => Err(GetError::NoKey),
        }
    }

    /// Serves a backup's bootstrap. Only the primary of exactly `epoch` may answer, so that every
    /// write committed after the snapshot is also forwarded to that backup.
    pub(crate) fn handle_get_all(&self, epoch: Epoch) -> Result<Snapshot, GetAllError> {
        if self.role != Role::Primary || self.view.epoch != epoch {
            return Err(GetAllError::WrongServer);
        }

        Ok(self.state.snapshot())
    }

    pub(crate) fn last_known_epoch(&self) -> Epoch {
        self.view.epoch
    }

    /// `initialized_view` is set when the ping that returned `view` is the one that created it.
    pub(crate) fn observe_view(&mut self, view: View, initialized_view: bool) -> ViewObservation {
        if view.epoch < self.view.epoch {
            slog::warn!(self.logger, "Ignoring stale view {:?}, already at {:?}", view, self.view);
            return self.bootstrap_needs();
        }

        if view != self.view {
            let assigned = Role::assigned_by(&view, &self.me);
            let role = match assigned {
                Role::Primary if initialized_view || self.in_sync => {
                    self.in_sync = true;
                    Role::Primary
                }
                Role::Primary => {
                    // Never completed a bootstrap, our data can't be trusted. Refusing to serve
                    // is all we can do.
                    slog::error!(self.logger, "Assigned primary of {:?} without holding the data", view);
                    self.in_sync = false;
                    Role::Unknown
                }
                Role::Backup => {
                    self.in_sync = self.bootstrapped_for == Some(view.epoch);
                    Role::Backup
                }
                Role::Unknown => {
                    self.in_sync = false;
                    Role::Unknown
                }
            };

            if role != self.role {
                slog::info!(self.logger, "Role {:?} -> {:?} in view {:?}", self.role, role, view);
            }
            self.role = role;
            self.view = view;
        }

        self.bootstrap_needs()
    }

    /// Installs a bootstrap snapshot fetched for `epoch`. Returns false if the view moved on while
    /// the snapshot was in flight, in which case it is discarded.
    pub(crate) fn install_snapshot(&mut self, epoch: Epoch, snapshot: Snapshot) -> bool {
        if self.role != Role::Backup || self.view.epoch != epoch {
            slog::info!(
                self.logger,
                "Discarding snapshot for {:?}, now {:?} in view {:?}",
                epoch,
                self.role,
                self.view
            );
            return false;
        }

        self.state.install(snapshot);
        self.bootstrapped_for = Some(epoch);
        self.in_sync = true;
        slog::info!(
            self.logger,
            "Bootstrapped for {:?}, holding {} keys",
            epoch,
            self.state.len()
        );

        true
    }

    pub(crate) fn requests_served(&self) -> u64 {
        self.requests_served
    }

    fn bootstrap_needs(&self) -> ViewObservation {
        if self.role != Role::Backup || self.bootstrapped_for == Some(self.view.epoch) {
            return ViewObservation::UpToDate;
        }

        match &self.view.primary {
            Some(primary) => ViewObservation::BootstrapNeeded {
                primary: primary.clone(),
                epoch: self.view.epoch,
            },
            None => ViewObservation::UpToDate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ClientId, Token};
    use crate::pbservice::api::PbCallError;
    use crate::pbservice::test_utils::FakeNetwork;
    use tokio::sync::Mutex;

    fn view(epoch: u64, primary: Option<&str>, backup: Option<&str>) -> View {
        View {
            epoch: Epoch::new(epoch),
            primary: primary.map(Address::new),
            backup: backup.map(Address::new),
        }
    }

    fn put_input(client_id: u64, token: u64, key: &str, value: &str, combine_with_hash: bool) -> PutInput {
        PutInput {
            client_id: ClientId::new(client_id),
            token: Token::new(token),
            key: key.to_string(),
            value: value.to_string(),
            combine_with_hash,
        }
    }

    fn get_input(key: &str) -> GetInput {
        GetInput { key: key.to_string() }
    }

    /// Primary "p" + backup "b" in view 2, backup already bootstrapped.
    async fn primary_and_backup(network: &Arc<FakeNetwork>) -> (Arc<Mutex<PbServer>>, Arc<Mutex<PbServer>>) {
        let primary = network.add_server("p");
        let backup = network.add_server("b");

        primary.lock().await.observe_view(view(1, Some("p"), None), true);
        primary.lock().await.observe_view(view(2, Some("p"), Some("b")), false);
        let observation = backup.lock().await.observe_view(view(2, Some("p"), Some("b")), false);
        assert_eq!(
            observation,
            ViewObservation::BootstrapNeeded {
                primary: Address::new("p"),
                epoch: Epoch::new(2),
            }
        );
        let snapshot = network.get_all(&Address::new("p"), Epoch::new(2)).await.unwrap();
        assert!(backup.lock().await.install_snapshot(Epoch::new(2), snapshot));

        (primary, backup)
    }

    #[tokio::test]
    async fn unknown_role_rejects_everything() {
        let network = FakeNetwork::new();
        let server = network.add_server("s");
        let mut server = server.lock().await;

        assert_eq!(
            server.handle_put(put_input(1, 1, "k", "v", false)).await,
            Err(PutError::WrongServer("primary"))
        );
        assert!(server.handle_sync_put(put_input(1, 1, "k", "v", false)).is_err());
        assert_eq!(server.handle_get(get_input("k")), Err(GetError::WrongServer));
        assert_eq!(server.handle_get_all(Epoch::ZERO), Err(GetAllError::WrongServer));
        assert_eq!(server.requests_served(), 0);
    }

    #[tokio::test]
    async fn primary_without_backup_commits_locally() {
        // -- setup --
        let network = FakeNetwork::new();
        let server = network.add_server("p");
        let mut server = server.lock().await;
        assert_eq!(server.observe_view(view(1, Some("p"), None), true), ViewObservation::UpToDate);

        // -- execute & verify --
        assert_eq!(server.handle_get(get_input("x")), Err(GetError::NoKey));
        let output = server.handle_put(put_input(1, 1, "x", "3", false)).await.unwrap();
        assert_eq!(output.previous_value, "");
        assert_eq!(
            server.handle_get(get_input("x")),
            Ok(GetOutput {
                value: "3".to_string()
            })
        );
        assert_eq!(server.requests_served(), 3);
        assert_eq!(server.last_known_epoch(), Epoch::new(1));
    }

    #[tokio::test]
    async fn put_is_replicated_to_backup() {
        // -- setup --
        let network = FakeNetwork::new();
        let (primary, backup) = primary_and_backup(&network).await;

        // -- execute --
        primary
            .lock()
            .await
            .handle_put(put_input(1, 1, "x", "3", false))
            .await
            .unwrap();

        // -- verify --
        // Backup takes over, with no intervening writes.
        let mut backup = backup.lock().await;
        backup.observe_view(view(3, Some("b"), None), false);
        assert_eq!(
            backup.handle_get(get_input("x")),
            Ok(GetOutput {
                value: "3".to_string()
            })
        );
    }

    #[tokio::test]
    async fn failed_forward_is_not_committed() {
        // -- setup --
        let network = FakeNetwork::new();
        let (primary, _backup) = primary_and_backup(&network).await;
        let mut primary = primary.lock().await;
        primary.handle_put(put_input(1, 1, "x", "before", false)).await.unwrap();

        // -- execute --
        network.set_down("b", true);
        let result = primary.handle_put(put_input(1, 2, "x", "after", false)).await;

        // -- verify --
        assert_eq!(result, Err(PutError::SyncFailure));
        assert_eq!(primary.handle_get(get_input("x")).unwrap().value, "before");

        // The retry goes through once the backup is reachable, and is applied exactly once.
        network.set_down("b", false);
        let retry = primary
            .handle_put(put_input(1, 2, "x", "after", true))
            .await
            .unwrap();
        assert_eq!(retry.previous_value, "before");
    }

    #[tokio::test]
    async fn lost_forward_reply_is_deduplicated_on_backup() {
        // -- setup --
        let network = FakeNetwork::new();
        let (primary, backup) = primary_and_backup(&network).await;
        let mut primary = primary.lock().await;
        primary.handle_put(put_input(1, 1, "h", "a", true)).await.unwrap();

        // Backup applies the write, but the primary never sees the reply.
        network.set_drop_replies("b", true);
        assert_eq!(
            primary.handle_put(put_input(1, 2, "h", "b", true)).await,
            Err(PutError::SyncFailure)
        );
        network.set_drop_replies("b", false);

        // -- execute --
        let retry = primary.handle_put(put_input(1, 2, "h", "b", true)).await.unwrap();

        // -- verify --
        let after_a = crate::common::combine_hash("", "a");
        assert_eq!(retry.previous_value, after_a);
        let expected = crate::common::combine_hash(&after_a, "b");
        assert_eq!(primary.handle_get(get_input("h")).unwrap().value, expected);

        let mut backup = backup.lock().await;
        backup.observe_view(view(3, Some("b"), None), false);
        assert_eq!(backup.handle_get(get_input("h")).unwrap().value, expected);
    }

    #[tokio::test]
    async fn identical_put_is_applied_once() {
        let network = FakeNetwork::new();
        let (primary, _backup) = primary_and_backup(&network).await;
        let mut primary = primary.lock().await;
        primary.handle_put(put_input(42, 6, "k", "seed", false)).await.unwrap();

        let first = primary.handle_put(put_input(42, 7, "k", "v", true)).await.unwrap();
        let value_after_first = primary.handle_get(get_input("k")).unwrap();
        let second = primary.handle_put(put_input(42, 7, "k", "v", true)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.previous_value, "seed");
        assert_eq!(primary.handle_get(get_input("k")).unwrap(), value_after_first);
    }

    #[tokio::test]
    async fn backup_rejects_forward_until_bootstrapped() {
        // -- setup --
        let network = FakeNetwork::new();
        let primary = network.add_server("p");
        let backup = network.add_server("b");
        primary.lock().await.observe_view(view(1, Some("p"), None), true);
        primary
            .lock()
            .await
            .handle_put(put_input(1, 1, "early", "1", false))
            .await
            .unwrap();

        primary.lock().await.observe_view(view(2, Some("p"), Some("b")), false);
        backup.lock().await.observe_view(view(2, Some("p"), Some("b")), false);

        // -- execute & verify --
        // 1. Backup isn't bootstrapped, so the primary can't commit.
        assert_eq!(
            primary
                .lock()
                .await
                .handle_put(put_input(1, 2, "late", "2", false))
                .await,
            Err(PutError::SyncFailure)
        );

        // 2. Bootstrap.
        let snapshot = network.get_all(&Address::new("p"), Epoch::new(2)).await.unwrap();
        assert!(backup.lock().await.install_snapshot(Epoch::new(2), snapshot));
        assert_eq!(
            backup.lock().await.observe_view(view(2, Some("p"), Some("b")), false),
            ViewObservation::UpToDate
        );

        // 3. Writes flow again, and the backup holds both old and new state.
        primary
            .lock()
            .await
            .handle_put(put_input(1, 2, "late", "2", false))
            .await
            .unwrap();
        let mut backup = backup.lock().await;
        backup.observe_view(view(3, Some("b"), None), false);
        assert_eq!(backup.handle_get(get_input("early")).unwrap().value, "1");
        assert_eq!(backup.handle_get(get_input("late")).unwrap().value, "2");
    }

    #[tokio::test]
    async fn get_all_requires_matching_epoch() {
        let network = FakeNetwork::new();
        let primary = network.add_server("p");
        let mut primary = primary.lock().await;
        primary.observe_view(view(1, Some("p"), None), true);

        assert!(primary.handle_get_all(Epoch::new(1)).is_ok());
        assert_eq!(primary.handle_get_all(Epoch::new(2)), Err(GetAllError::WrongServer));
    }

    #[tokio::test]
    async fn stale_snapshot_is_discarded() {
        let network = FakeNetwork::new();
        let backup = network.add_server("b");
        let mut backup = backup.lock().await;
        backup.observe_view(view(2, Some("p"), Some("b")), false);

        // View moved on while the snapshot was in flight.
        backup.observe_view(view(3, Some("p"), Some("c")), false);
        assert!(!backup.install_snapshot(Epoch::new(2), Snapshot::default()));
        assert_eq!(backup.handle_get_all(Epoch::new(3)), Err(GetAllError::WrongServer));
    }

    #[tokio::test]
    async fn unbootstrapped_backup_does_not_become_primary() {
        let network = FakeNetwork::new();
        let server = network.add_server("b");
        let mut server = server.lock().await;
        server.observe_view(view(2, Some("p"), Some("b")), false);
        server.observe_view(view(3, Some("b"), None), false);

        assert_eq!(server.handle_get(get_input("x")), Err(GetError::WrongServer));
    }

    #[tokio::test]
    async fn bootstrap_drops_writes_the_primary_never_committed() {
        // -- setup --
        let network = FakeNetwork::new();
        let (primary, backup) = primary_and_backup(&network).await;

        // Backup applies a forwarded write that the primary then abandons.
        network
            .sync_put(&Address::new("b"), put_input(9, 1, "ghost", "boo", false))
            .await
            .unwrap();

        // -- execute --
        // Backup is dropped from the view and later bootstraps again.
        backup.lock().await.observe_view(view(3, Some("p"), None), false);
        primary.lock().await.observe_view(view(4, Some("p"), Some("b")), false);
        assert_eq!(
            backup.lock().await.observe_view(view(4, Some("p"), Some("b")), false),
            ViewObservation::BootstrapNeeded {
                primary: Address::new("p"),
                epoch: Epoch::new(4),
            }
        );
        let snapshot = network.get_all(&Address::new("p"), Epoch::new(4)).await.unwrap();
        assert!(backup.lock().await.install_snapshot(Epoch::new(4), snapshot));

        // -- verify --
        let mut backup = backup.lock().await;
        backup.observe_view(view(5, Some("b"), None), false);
        assert_eq!(primary.lock().await.handle_get(get_input("ghost")), Err(GetError::NoKey));
        assert_eq!(backup.handle_get(get_input("ghost")), Err(GetError::NoKey));
    }

    #[tokio::test]
    async fn primary_of_first_view_it_did_not_create_does_not_serve() {
        // A restarted process is handed the slot it held before the crash, with none of the data.
        let network = FakeNetwork::new();
        let server = network.add_server("p");
        let mut server = server.lock().await;
        server.observe_view(view(1, Some("p"), None), false);

        assert_eq!(server.handle_get(get_input("x")), Err(GetError::WrongServer));
        assert_eq!(
            server.handle_put(put_input(1, 1, "x", "1", false)).await,
            Err(PutError::WrongServer("primary"))
        );
    }

    #[tokio::test]
    async fn stale_view_is_ignored() {
        let network = FakeNetwork::new();
        let (primary, _backup) = primary_and_backup(&network).await;
        let mut primary = primary.lock().await;

        assert_eq!(primary.observe_view(view(1, Some("p"), None), false), ViewObservation::UpToDate);
        assert_eq!(primary.last_known_epoch(), Epoch::new(2));
    }

    #[tokio::test]
    async fn backup_demoted_by_view_rejects_forward() {
        // -- setup --
        let network = FakeNetwork::new();
        let (primary, backup) = primary_and_backup(&network).await;

        // Backup learns it's no longer backup before the primary learns about the change.
        backup.lock().await.observe_view(view(3, Some("p"), Some("c")), false);

        // -- execute --
        let result = primary
            .lock()
            .await
            .handle_put(put_input(1, 1, "k", "v", false))
            .await;

        // -- verify --
        assert_eq!(result, Err(PutError::SyncFailure));
        assert_eq!(
            network
                .sync_put(&Address::new("b"), put_input(1, 1, "k", "v", false))
                .await,
            Err(PbCallError::WrongServer)
        );
    }
}
