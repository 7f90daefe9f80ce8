mod actor;
mod api;
mod heartbeat;
mod options;
mod pb_server;
mod peer_client;
mod role;
mod rpc_server;
mod store;
#[cfg(test)]
mod test_utils;
mod wiring;

pub(crate) use api::GetInput;
#[cfg(test)]
pub(crate) use api::GetOutput;
pub use api::PbCallError;
pub(crate) use api::PrimaryTransport;
pub(crate) use api::PutInput;
#[cfg(test)]
pub(crate) use api::PutOutput;
pub use options::PbServerOptions;
pub(crate) use peer_client::PbClients;
pub use wiring::shutdown_remote_replica;
pub use wiring::start_pb_server;
pub use wiring::PbServerConfig;
pub use wiring::PbServerHandle;
