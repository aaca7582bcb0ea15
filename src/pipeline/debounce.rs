use super::clock::Clock;
use futures::Stream;
use futures::future::BoxFuture;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

/// Stream adapter that yields a value only after `delay` passes with no newer value.
///
/// A newer value replaces the pending one and restarts the window; the replaced
/// value is never yielded. When the source ends, a pending value is still yielded
/// once its window elapses.
pub struct Debounce<S: Stream> {
    source: Pin<Box<S>>,
    source_done: bool,
    delay: Duration,
    clock: Arc<dyn Clock>,
    pending: Option<S::Item>,
    timer: Option<BoxFuture<'static, ()>>,
}

// `pending` is never pinned
impl<S: Stream> Unpin for Debounce<S> {}

pub fn debounce<S: Stream>(source: S, delay: Duration, clock: Arc<dyn Clock>) -> Debounce<S> {
    Debounce {
        source: Box::pin(source),
        source_done: false,
        delay,
        clock,
        pending: None,
        timer: None,
    }
}

impl<S: Stream> Stream for Debounce<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.get_mut();

        while !this.source_done {
            match this.source.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    this.pending = Some(item);
                    this.timer = Some(this.clock.sleep(this.delay));
                }
                Poll::Ready(None) => this.source_done = true,
                Poll::Pending => break,
            }
        }

        if let Some(timer) = this.timer.as_mut() {
            if timer.as_mut().poll(cx).is_pending() {
                return Poll::Pending;
            }
            this.timer = None;
            if let Some(item) = this.pending.take() {
                return Poll::Ready(Some(item));
            }
        }

        if this.source_done {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}
