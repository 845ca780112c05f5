use crate::{Lifecycle, Timestamp};
use futures_core::stream::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream helpers for streams of request states, such as the ones returned
/// by `to_stream()` on the trackers.
pub trait RequestStreamExt: Stream {
    /// Yields states until the first settled one, which is yielded too.
    ///
    /// ```
    /// use futures::StreamExt;
    /// use reqtrack::{RequestStreamExt, RequestTracker};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let tracker = RequestTracker::new(|| async { Ok::<_, String>("pong") });
    /// let call = tracker.handle().spawn(());
    /// let states: Vec<_> = tracker.to_stream().until_settled().collect().await;
    /// assert!(states.last().unwrap().is_complete());
    /// call.await.unwrap();
    /// # }
    /// ```
    fn until_settled(self) -> UntilSettled<Self>
    where
        Self: Sized,
        Self::Item: Lifecycle,
    {
        UntilSettled {
            stream: self,
            stopped: false,
            started_at: None,
        }
    }

    /// Like [`until_settled`](Self::until_settled), but settled states of
    /// calls started before `started_at` are skipped over.
    fn until_settled_after(self, started_at: Timestamp) -> UntilSettled<Self>
    where
        Self: Sized,
        Self::Item: Lifecycle,
    {
        UntilSettled {
            stream: self,
            stopped: false,
            started_at: Some(started_at),
        }
    }
}

impl<T: ?Sized> RequestStreamExt for T where T: Stream {}

#[pin_project(project = UntilSettledProj)]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct UntilSettled<A> {
    #[pin]
    stream: A,
    stopped: bool,
    started_at: Option<Timestamp>,
}

impl<A> Stream for UntilSettled<A>
where
    A: Stream,
    A::Item: Lifecycle,
{
    type Item = A::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let UntilSettledProj {
            stream,
            stopped,
            started_at,
        } = self.project();

        if *stopped {
            return Poll::Ready(None);
        }

        match stream.poll_next(cx) {
            Poll::Ready(Some(state)) => {
                let current = match (*started_at, state.start_time()) {
                    (Some(after), Some(start)) => start >= after,
                    (Some(_), None) => false,
                    (None, _) => true,
                };
                if current && state.is_settled() {
                    *stopped = true;
                }
                Poll::Ready(Some(state))
            }
            Poll::Ready(None) => {
                *stopped = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
