mod actor;
mod api;
mod client;
mod options;
mod rpc_server;
mod server_table;
mod view_server;
mod wiring;

pub use api::ViewServiceError;
pub(crate) use api::PingOutput;
pub(crate) use api::ViewServiceTransport;
pub(crate) use client::ViewServiceClient;
pub use options::ViewServiceOptions;
pub use wiring::start_view_service;
pub use wiring::ViewServiceConfig;
pub use wiring::ViewServiceHandle;
