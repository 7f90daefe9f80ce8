use std::fmt::Debug;
use tokio::sync::oneshot;

/// Callback is the reply half of a request sent to an actor's event loop.
#[derive(Debug)]
pub(crate) struct Callback<T: Debug>(pub(crate) oneshot::Sender<T>);

impl<T: Debug> Callback<T> {
    pub(crate) fn send(self, message: T) {
        // Caller may have given up waiting (e.g. RPC cancelled). Nothing to do about it.
        let _ = self.0.send(message);
    }
}
