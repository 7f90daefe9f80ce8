use tokio::time::Duration;

#[cfg(test)]
use tokio::sync::watch;

/// Clock lets recurring tasks wait without depending on wall-clock time, so tests can drive time.
#[async_trait::async_trait]
pub(crate) trait Clock: Send + 'static {
    async fn sleep(&mut self, duration: Duration);
}

pub(crate) struct RealClock;

#[async_trait::async_trait]
impl Clock for RealClock {
    async fn sleep(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A clock that only moves when its controller says so.
#[cfg(test)]
pub(crate) fn mocked_clock() -> (MockClock, MockClockController) {
    let (tx, rx) = watch::channel(Duration::from_millis(0));

    (MockClock { elapsed: rx }, MockClockController { elapsed: tx })
}

#[cfg(test)]
pub(crate) struct MockClock {
    elapsed: watch::Receiver<Duration>,
}

#[cfg(test)]
#[async_trait::async_trait]
impl Clock for MockClock {
    async fn sleep(&mut self, duration: Duration) {
        let wake_at = *self.elapsed.borrow() + duration;

        while *self.elapsed.borrow() < wake_at {
            if self.elapsed.changed().await.is_err() {
                // Controller is gone, so time is frozen.
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
pub(crate) struct MockClockController {
    elapsed: watch::Sender<Duration>,
}

#[cfg(test)]
impl MockClockController {
    pub(crate) fn elapsed(&self) -> Duration {
        *self.elapsed.borrow()
    }

    pub(crate) fn advance(&mut self, duration: Duration) {
        let _ = self.elapsed.send(self.elapsed() + duration);
    }
}
