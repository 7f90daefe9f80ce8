mod ticker;
mod time;

pub(crate) use ticker::TickHandler;
pub(crate) use ticker::TickOutcome;
pub(crate) use ticker::TickerHandle;
