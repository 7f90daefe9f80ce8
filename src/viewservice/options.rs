use crate::common::{DEAD_PINGS, PING_INTERVAL};
use std::convert::TryFrom;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct ViewServiceOptions {
    pub ping_interval: Option<Duration>,
    pub dead_pings: Option<u32>,
}

#[derive(Debug)]
pub(super) struct ViewServiceOptionsValidated {
    pub ping_interval: Duration,
    pub dead_pings: u32,
}

impl ViewServiceOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.ping_interval == Duration::from_millis(0) {
            return Err("Ping interval must be non-zero");
        }
        // A single dropped ping must never be enough to declare a server dead.
        if self.dead_pings < 2 {
            return Err("Dead pings must be at least 2");
        }

        Ok(())
    }
}

impl TryFrom<ViewServiceOptions> for ViewServiceOptionsValidated {
    type Error = &'static str;

    fn try_from(options: ViewServiceOptions) -> Result<Self, Self::Error> {
        let values = ViewServiceOptionsValidated {
            ping_interval: options.ping_interval.unwrap_or(PING_INTERVAL),
            dead_pings: options.dead_pings.unwrap_or(DEAD_PINGS),
        };

        values.validate()?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let validated = ViewServiceOptionsValidated::try_from(ViewServiceOptions::default()).unwrap();
        assert_eq!(validated.ping_interval, PING_INTERVAL);
        assert_eq!(validated.dead_pings, DEAD_PINGS);
    }

    #[test]
    fn rejects_illegal_values() {
        let one_dead_ping = ViewServiceOptions {
            dead_pings: Some(1),
            ..Default::default()
        };
        assert!(ViewServiceOptionsValidated::try_from(one_dead_ping).is_err());

        let zero_interval = ViewServiceOptions {
            ping_interval: Some(Duration::from_millis(0)),
            ..Default::default()
        };
        assert!(ViewServiceOptionsValidated::try_from(zero_interval).is_err());
    }
}
