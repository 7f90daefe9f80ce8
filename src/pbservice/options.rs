use crate::common::{PING_INTERVAL, RPC_TIMEOUT};
use std::convert::TryFrom;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct PbServerOptions {
    pub ping_interval: Option<Duration>,
    pub rpc_timeout: Option<Duration>,
}

#[derive(Debug)]
pub(super) struct PbServerOptionsValidated {
    pub ping_interval: Duration,
    pub rpc_timeout: Duration,
}

impl PbServerOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.ping_interval == Duration::from_millis(0) {
            return Err("Ping interval must be non-zero");
        }
        if self.rpc_timeout == Duration::from_millis(0) {
            return Err("RPC timeout must be non-zero");
        }

        Ok(())
    }
}

impl TryFrom<PbServerOptions> for PbServerOptionsValidated {
    type Error = &'static str;

    fn try_from(options: PbServerOptions) -> Result<Self, Self::Error> {
        let values = PbServerOptionsValidated {
            ping_interval: options.ping_interval.unwrap_or(PING_INTERVAL),
            rpc_timeout: options.rpc_timeout.unwrap_or(RPC_TIMEOUT),
        };

        values.validate()?;
        Ok(values)
    }
}
