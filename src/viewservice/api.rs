use crate::common::{Address, Epoch, View};

#[derive(Debug)]
pub(crate) struct PingInput {
    pub(crate) caller: Address,
    pub(crate) reported_epoch: Epoch,
}

#[derive(Debug)]
pub(crate) struct PingOutput {
    pub(crate) view: View,
    // True only for the caller whose ping created view 1, and so holds all of its (empty) data.
    pub(crate) initialized_view: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ViewServiceError {
    #[error("View service unreachable: {0}")]
    Unreachable(String),
    #[error("Malformed reply from view service: {0}")]
    Malformed(String),
    #[error("View service's internal task has exited")]
    ActorExited,
}

/// ViewServiceTransport is how replicas and clerks reach the view service.
#[async_trait::async_trait]
pub(crate) trait ViewServiceTransport: Send + Sync + 'static {
    async fn ping(&self, caller: &Address, reported_epoch: Epoch) -> Result<PingOutput, ViewServiceError>;

    async fn get(&self) -> Result<View, ViewServiceError>;
}
