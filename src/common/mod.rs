mod callback;
mod channel;
mod defaults;
mod hash;
mod types;
mod view;

pub(crate) use callback::Callback;
pub(crate) use channel::lazy_channel;
pub(crate) use channel::ChannelError;
pub use defaults::DEAD_PINGS;
pub use defaults::PING_INTERVAL;
pub use defaults::RPC_TIMEOUT;
pub use hash::combine_hash;
pub use types::Address;
pub use types::ClientId;
pub use types::Epoch;
pub use types::Token;
pub use view::View;
