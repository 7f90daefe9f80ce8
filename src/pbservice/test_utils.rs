use crate::common::{Address, Epoch, View};
use crate::pbservice::api::{PbCallError, PeerTransport, PutError, PutInput, PutOutput};
use crate::pbservice::pb_server::PbServer;
use crate::pbservice::store::Snapshot;
use crate::viewservice::{PingOutput, ViewServiceError, ViewServiceTransport};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

pub(crate) fn discard_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

/// FakeNetwork routes peer calls straight to in-process `PbServer`s.
#[derive(Default)]
pub(crate) struct FakeNetwork {
    servers: StdMutex<HashMap<Address, Arc<Mutex<PbServer>>>>,
    down: StdMutex<HashSet<Address>>,
    // Calls are delivered, but the caller never sees the reply.
    dropping_replies: StdMutex<HashSet<Address>>,
}

impl FakeNetwork {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(FakeNetwork::default())
    }

    pub(crate) fn add_server(self: &Arc<Self>, address: &str) -> Arc<Mutex<PbServer>> {
        let address = Address::new(address);
        let server = PbServer::new(discard_logger(), address.clone(), self.clone());
        let server = Arc::new(Mutex::new(server));
        self.servers.lock().unwrap().insert(address, server.clone());

        server
    }

    pub(crate) fn set_down(&self, address: &str, down: bool) {
        Self::toggle(&self.down, address, down);
    }

    pub(crate) fn set_drop_replies(&self, address: &str, dropping: bool) {
        Self::toggle(&self.dropping_replies, address, dropping);
    }

    fn toggle(set: &StdMutex<HashSet<Address>>, address: &str, member: bool) {
        let mut set = set.lock().unwrap();
        if member {
            set.insert(Address::new(address));
        } else {
            set.remove(&Address::new(address));
        }
    }

    fn lookup(&self, address: &Address) -> Result<Arc<Mutex<PbServer>>, PbCallError> {
        if self.down.lock().unwrap().contains(address) {
            return Err(PbCallError::Unreachable(format!("{} is down", address)));
        }

        self.servers
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .ok_or_else(|| PbCallError::Unreachable(format!("{} doesn't exist", address)))
    }

    fn deliver<T>(&self, address: &Address, reply: Result<T, PbCallError>) -> Result<T, PbCallError> {
        if self.dropping_replies.lock().unwrap().contains(address) {
            return Err(PbCallError::Unreachable("Reply lost".to_string()));
        }

        reply
    }
}

#[async_trait::async_trait]
impl PeerTransport for FakeNetwork {
    async fn sync_put(&self, backup: &Address, input: PutInput) -> Result<PutOutput, PbCallError> {
        let server = self.lookup(backup)?;
        let reply = server.lock().await.handle_sync_put(input).map_err(|e| match e {
            PutError::WrongServer(_) => PbCallError::WrongServer,
            PutError::SyncFailure => PbCallError::SyncFailure,
            PutError::ActorExited => PbCallError::ServerFault(e.to_string()),
        });

        self.deliver(backup, reply)
    }

    async fn get_all(&self, primary: &Address, epoch: Epoch) -> Result<Snapshot, PbCallError> {
        let server = self.lookup(primary)?;
        let reply = server
            .lock()
            .await
            .handle_get_all(epoch)
            .map_err(|_| PbCallError::WrongServer);

        self.deliver(primary, reply)
    }
}

/// FakeViewService answers every ping with whatever view the test has set.
pub(crate) struct FakeViewService {
    view: StdMutex<View>,
    pings: StdMutex<Vec<(Address, Epoch)>>,
    reachable: StdMutex<bool>,
}

impl FakeViewService {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(FakeViewService {
            view: StdMutex::new(View::uninitialized()),
            pings: StdMutex::new(Vec::new()),
            reachable: StdMutex::new(true),
        })
    }

    pub(crate) fn set_view(&self, view: View) {
        *self.view.lock().unwrap() = view;
    }

    pub(crate) fn set_reachable(&self, reachable: bool) {
        *self.reachable.lock().unwrap() = reachable;
    }

    pub(crate) fn pings(&self) -> Vec<(Address, Epoch)> {
        self.pings.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ViewServiceTransport for FakeViewService {
    async fn ping(&self, caller: &Address, reported_epoch: Epoch) -> Result<PingOutput, ViewServiceError> {
        if !*self.reachable.lock().unwrap() {
            return Err(ViewServiceError::Unreachable("Partitioned".to_string()));
        }

        let mut pings = self.pings.lock().unwrap();
        let view = self.view.lock().unwrap().clone();
        // Like the real service: the caller's first ping created view 1 if it is its primary.
        let initialized_view = reported_epoch.is_zero()
            && view.epoch == Epoch::new(1)
            && view.is_primary(caller)
            && pings.iter().all(|(pinged, _)| pinged != caller);
        pings.push((caller.clone(), reported_epoch));

        Ok(PingOutput { view, initialized_view })
    }

    async fn get(&self) -> Result<View, ViewServiceError> {
        Ok(self.view.lock().unwrap().clone())
    }
}
