mod listener;
mod shutdown;

pub(crate) use listener::bind;
pub(crate) use listener::logged_shutdown;
pub use listener::StartServerError;
pub(crate) use shutdown::shutdown_signal;
pub(crate) use shutdown::RpcServerShutdownHandle;
pub(crate) use shutdown::RpcServerShutdownSignal;
