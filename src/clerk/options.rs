use crate::common::{PING_INTERVAL, RPC_TIMEOUT};
use std::convert::TryFrom;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct ClerkOptions {
    /// How long to wait before retrying a failed request.
    pub retry_interval: Option<Duration>,
    pub rpc_timeout: Option<Duration>,
}

#[derive(Debug)]
pub(super) struct ClerkOptionsValidated {
    pub retry_interval: Duration,
    pub rpc_timeout: Duration,
}

impl TryFrom<ClerkOptions> for ClerkOptionsValidated {
    type Error = &'static str;

    fn try_from(options: ClerkOptions) -> Result<Self, Self::Error> {
        let values = ClerkOptionsValidated {
            retry_interval: options.retry_interval.unwrap_or(PING_INTERVAL),
            rpc_timeout: options.rpc_timeout.unwrap_or(RPC_TIMEOUT),
        };

        if values.retry_interval == Duration::from_millis(0) || values.rpc_timeout == Duration::from_millis(0) {
            return Err("Retry interval and RPC timeout must be non-zero");
        }

        Ok(values)
    }
}
