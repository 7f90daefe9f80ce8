mod clerk;
mod common;
mod pbservice;
mod server;
mod timer;
mod viewservice;
mod grpc {
    include!("../generated/pbkv.rs");
}

pub use clerk::Clerk;
pub use clerk::ClerkConfig;
pub use clerk::ClerkError;
pub use clerk::ClerkOptions;
pub use common::combine_hash;
pub use common::Address;
pub use common::ClientId;
pub use common::Epoch;
pub use common::Token;
pub use common::View;
pub use common::DEAD_PINGS;
pub use common::PING_INTERVAL;
pub use common::RPC_TIMEOUT;
pub use pbservice::shutdown_remote_replica;
pub use pbservice::start_pb_server;
pub use pbservice::PbCallError;
pub use pbservice::PbServerConfig;
pub use pbservice::PbServerHandle;
pub use pbservice::PbServerOptions;
pub use server::StartServerError;
pub use viewservice::start_view_service;
pub use viewservice::ViewServiceConfig;
pub use viewservice::ViewServiceError;
pub use viewservice::ViewServiceHandle;
pub use viewservice::ViewServiceOptions;

