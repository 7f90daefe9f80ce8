use crate::common::{Address, ClientId, Epoch, Token};
use crate::pbservice::store::Snapshot;

#[derive(Clone, Debug)]
pub(crate) struct PutInput {
    pub(crate) client_id: ClientId,
    pub(crate) token: Token,
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) combine_with_hash: bool,
}

#[derive(Debug, Eq, PartialEq)]
pub(crate) struct PutOutput {
    pub(crate) previous_value: String,
}

#[derive(Debug)]
pub(crate) struct GetInput {
    pub(crate) key: String,
}

#[derive(Debug, Eq, PartialEq)]
pub(crate) struct GetOutput {
    pub(crate) value: String,
}

#[derive(Debug, Eq, PartialEq)]
pub(crate) struct ShutdownOutput {
    pub(crate) requests_served: u64,
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub(crate) enum PutError {
    #[error("Not the {0}")]
    WrongServer(&'static str),
    #[error("Failed to replicate write to backup")]
    SyncFailure,
    #[error("Replica's internal task has exited")]
    ActorExited,
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub(crate) enum GetError {
    #[error("Not the primary")]
    WrongServer,
    #[error("No such key")]
    NoKey,
    #[error("Replica's internal task has exited")]
    ActorExited,
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub(crate) enum GetAllError {
    #[error("Not the primary of the requested view")]
    WrongServer,
    #[error("Replica's internal task has exited")]
    ActorExited,
}

/// PbCallError is the outcome of a failed call to a replica, as seen by the caller.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum PbCallError {
    #[error("Callee does not hold the required role")]
    WrongServer,
    #[error("No such key")]
    NoKey,
    #[error("Callee failed to replicate write")]
    SyncFailure,
    #[error("No reply: {0}")]
    Unreachable(String),
    #[error("Callee failed: {0}")]
    ServerFault(String),
}

/// PeerTransport is how a replica reaches other replicas.
#[async_trait::async_trait]
pub(crate) trait PeerTransport: Send + Sync + 'static {
    async fn sync_put(&self, backup: &Address, input: PutInput) -> Result<PutOutput, PbCallError>;

    async fn get_all(&self, primary: &Address, epoch: Epoch) -> Result<Snapshot, PbCallError>;
}

/// PrimaryTransport is how clerks reach whichever replica they believe is primary.
#[async_trait::async_trait]
pub(crate) trait PrimaryTransport: Send + Sync + 'static {
    async fn put(&self, primary: &Address, input: PutInput) -> Result<PutOutput, PbCallError>;

    async fn get(&self, primary: &Address, input: GetInput) -> Result<GetOutput, PbCallError>;
}
