use std::time::Duration;

/// Heartbeat period of replicas, and failure detection period of the view service.
pub const PING_INTERVAL: Duration = Duration::from_millis(100);

/// Consecutive missed heartbeats before the view service declares a server dead.
pub const DEAD_PINGS: u32 = 5;

/// Upper bound on any single outbound RPC.
pub const RPC_TIMEOUT: Duration = Duration::from_millis(300);
