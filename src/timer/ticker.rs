use crate::timer::time::{Clock, RealClock};
use tokio::sync::oneshot;
use tokio::time::Duration;

/// TickHandler is the body of a recurring background task, e.g. a view service's failure
/// detector or a replica's heartbeat.
#[async_trait::async_trait]
pub(crate) trait TickHandler: Send + 'static {
    async fn on_tick(&mut self) -> TickOutcome;
}

#[derive(Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    Continue,
    // The owner of the handler is gone (e.g. actor exited), there's nothing left to tick.
    Stop,
}

/// TickerHandle keeps a ticker task alive. Dropping the handle stops the task, interrupting an
/// in-progress tick if there is one.
pub(crate) struct TickerHandle {
    _stop: oneshot::Sender<()>,
}

impl TickerHandle {
    pub(crate) fn spawn_ticker_task<H: TickHandler>(interval: Duration, handler: H) -> Self {
        let (task, handle) = TickerTask::new(interval, handler, RealClock);
        tokio::task::spawn(task.run());

        handle
    }
}

struct TickerTask<H: TickHandler, C: Clock> {
    interval: Duration,
    handler: H,
    clock: C,
    stopped: oneshot::Receiver<()>,
}

impl<H: TickHandler, C: Clock> TickerTask<H, C> {
    fn new(interval: Duration, handler: H, clock: C) -> (Self, TickerHandle) {
        let (tx, rx) = oneshot::channel();

        let task = TickerTask {
            interval,
            handler,
            clock,
            stopped: rx,
        };

        (task, TickerHandle { _stop: tx })
    }

    // First tick fires immediately, then one tick per `interval` after the previous tick finished.
    async fn run(mut self) {
        loop {
            let outcome = tokio::select! {
                _ = &mut self.stopped => return,
                outcome = self.handler.on_tick() => outcome,
            };
            if outcome == TickOutcome::Stop {
                return;
            }

            tokio::select! {
                _ = &mut self.stopped => return,
                _ = self.clock.sleep(self.interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::time;
    use tokio::sync::mpsc;

    struct ChannelHandler {
        tx: mpsc::UnboundedSender<()>,
        remaining: usize,
    }

    #[async_trait::async_trait]
    impl TickHandler for ChannelHandler {
        async fn on_tick(&mut self) -> TickOutcome {
            let _ = self.tx.send(());
            self.remaining -= 1;
            if self.remaining == 0 {
                TickOutcome::Stop
            } else {
                TickOutcome::Continue
            }
        }
    }

    /// Never finishes a tick.
    struct StuckHandler;

    #[async_trait::async_trait]
    impl TickHandler for StuckHandler {
        async fn on_tick(&mut self) -> TickOutcome {
            std::future::pending().await
        }
    }

    async fn assert_tick(rx: &mut mpsc::UnboundedReceiver<()>) {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("Unexpected timeout")
            .expect("Expected tick");
    }

    async fn assert_no_tick(rx: &mut mpsc::UnboundedReceiver<()>) {
        tokio::time::timeout(Duration::from_millis(10), rx.recv())
            .await
            .expect_err("Expected timeout");
    }

    #[tokio::test]
    async fn ticker_ticks_once_per_interval() {
        // -- setup --
        let interval = Duration::from_millis(100);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (mock_clock, mut mock_clock_controller) = time::mocked_clock();
        let handler = ChannelHandler { tx, remaining: 100 };

        let (task, _handle) = TickerTask::new(interval, handler, mock_clock);
        tokio::task::spawn(task.run());

        // -- execute & verify --
        // 1. First tick is immediate.
        assert_tick(&mut rx).await;
        assert_no_tick(&mut rx).await;

        // 2. Less than an interval, no tick.
        mock_clock_controller.advance(interval / 2);
        assert_no_tick(&mut rx).await;

        // 3. One tick per interval.
        mock_clock_controller.advance(interval / 2);
        assert_tick(&mut rx).await;
        for _ in 0..5 {
            assert_no_tick(&mut rx).await;
            mock_clock_controller.advance(interval);
            assert_tick(&mut rx).await;
        }
    }

    #[tokio::test]
    async fn ticker_exits_when_handle_dropped() {
        // -- setup --
        let interval = Duration::from_millis(100);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (mock_clock, _mock_clock_controller) = time::mocked_clock();
        let handler = ChannelHandler { tx, remaining: 100 };

        let (task, handle) = TickerTask::new(interval, handler, mock_clock);
        let join_handle = tokio::task::spawn(task.run());
        assert_tick(&mut rx).await;

        // -- execute --
        drop(handle);

        // -- verify --
        // Exits mid-sleep, without time advancing. The handler went with it, and ticked no more.
        join_handle.await.unwrap();
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn ticker_exits_when_handler_stops() {
        let interval = Duration::from_millis(100);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (mock_clock, mut mock_clock_controller) = time::mocked_clock();
        let handler = ChannelHandler { tx, remaining: 2 };

        let (task, _handle) = TickerTask::new(interval, handler, mock_clock);
        let join_handle = tokio::task::spawn(task.run());

        assert_tick(&mut rx).await;
        assert_no_tick(&mut rx).await;
        mock_clock_controller.advance(interval);
        assert_tick(&mut rx).await;

        join_handle.await.unwrap();
    }

    #[tokio::test]
    async fn dropping_handle_interrupts_stuck_tick() {
        let (mock_clock, _mock_clock_controller) = time::mocked_clock();
        let (task, handle) = TickerTask::new(Duration::from_millis(100), StuckHandler, mock_clock);
        let join_handle = tokio::task::spawn(task.run());

        drop(handle);

        tokio::time::timeout(Duration::from_secs(5), join_handle)
            .await
            .expect("Ticker should exit")
            .unwrap();
    }
}
