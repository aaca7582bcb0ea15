use futures::future::BoxFuture;
use std::time::Duration;
use tokio::time::Instant;

/// Time source shared by the debouncer and the controller.
///
/// The controller takes one explicitly instead of reaching for a global timer, so
/// tests can run it on tokio's paused clock.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// [`Clock`] backed by the tokio timer of the current runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}
